//! Watch-entry repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use bidhub_core::error::{AppError, ErrorKind};
use bidhub_core::result::AppResult;
use bidhub_core::types::id::{AuctionId, UserId};
use bidhub_entity::store::WatchStore;
use bidhub_entity::watch::{WatchEntry, WatchKind};

/// Repository for watch-list and recently-viewed entries.
#[derive(Debug, Clone)]
pub struct WatchRepository {
    pool: PgPool,
}

impl WatchRepository {
    /// Create a new watch repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WatchStore for WatchRepository {
    async fn upsert(&self, entry: &WatchEntry) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO watch_entries (user_id, auction_id, kind, added_at) \
             VALUES ($1, $2, $3, $4) ON CONFLICT DO NOTHING",
        )
        .bind(entry.user_id)
        .bind(entry.auction_id)
        .bind(entry.kind)
        .bind(entry.added_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert watch entry", e)
        })?;
        Ok(())
    }

    async fn remove_watch(&self, user_id: UserId, auction_id: AuctionId) -> AppResult<()> {
        // Removing a missing entry is a no-op.
        sqlx::query(
            "DELETE FROM watch_entries WHERE user_id = $1 AND auction_id = $2 AND kind = $3",
        )
        .bind(user_id)
        .bind(auction_id)
        .bind(WatchKind::WatchList)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to remove watch entry", e)
        })?;
        Ok(())
    }

    async fn auction_ids_for_user(&self, user_id: UserId) -> AppResult<Vec<AuctionId>> {
        sqlx::query_scalar::<_, AuctionId>(
            "SELECT auction_id FROM watch_entries WHERE user_id = $1 AND kind = $2 \
             ORDER BY added_at DESC",
        )
        .bind(user_id)
        .bind(WatchKind::WatchList)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list watched auctions", e)
        })
    }

    async fn user_ids_for_auction(&self, auction_id: AuctionId) -> AppResult<Vec<UserId>> {
        sqlx::query_scalar::<_, UserId>(
            "SELECT DISTINCT user_id FROM watch_entries WHERE auction_id = $1",
        )
        .bind(auction_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list auction watchers", e)
        })
    }
}
