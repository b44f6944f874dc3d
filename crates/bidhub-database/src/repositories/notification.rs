//! Notification repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use bidhub_core::error::{AppError, ErrorKind};
use bidhub_core::result::AppResult;
use bidhub_core::types::id::{NotificationId, UserId};
use bidhub_core::types::pagination::{PageRequest, PageResponse};
use bidhub_entity::notification::{Notification, NotificationView};
use bidhub_entity::store::NotificationStore;

/// Repository for durable notification records and per-user read state.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn insert(&self, notification: &Notification, recipients: &[UserId]) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to begin notification transaction",
                e,
            )
        })?;

        sqlx::query(
            "INSERT INTO notifications (id, kind, title, body, related_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(notification.id)
        .bind(notification.kind)
        .bind(&notification.title)
        .bind(&notification.body)
        .bind(notification.related_id)
        .bind(notification.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert notification", e)
        })?;

        for recipient in recipients {
            sqlx::query(
                "INSERT INTO user_notifications (user_id, notification_id, is_read) \
                 VALUES ($1, $2, FALSE) ON CONFLICT DO NOTHING",
            )
            .bind(recipient)
            .bind(notification.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert recipient row", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to commit notification transaction",
                e,
            )
        })?;

        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationView>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM user_notifications WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
                })?;

        let views = sqlx::query_as::<_, NotificationView>(
            "SELECT n.id, n.kind, n.title, n.body, n.related_id, n.created_at, un.is_read \
             FROM notifications n \
             JOIN user_notifications un ON un.notification_id = n.id \
             WHERE un.user_id = $1 \
             ORDER BY n.created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        Ok(PageResponse::new(
            views,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn mark_read(&self, user_id: UserId, notification_id: NotificationId) -> AppResult<()> {
        // Idempotent by design; zero rows affected is not an error.
        sqlx::query(
            "UPDATE user_notifications SET is_read = TRUE \
             WHERE user_id = $1 AND notification_id = $2",
        )
        .bind(user_id)
        .bind(notification_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark notification read", e)
        })?;
        Ok(())
    }
}
