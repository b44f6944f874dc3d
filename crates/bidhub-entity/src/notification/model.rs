//! Notification entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use bidhub_core::types::id::{NotificationId, UserId};

use super::kind::NotificationKind;

/// A notification record shared by every recipient.
///
/// Created by the fan-out service, never mutated. Per-recipient read
/// state lives in [`UserNotification`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The event class this notification describes.
    pub kind: NotificationKind,
    /// Short title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// The related entity (usually an auction).
    pub related_id: Option<Uuid>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Create a new notification stamped with the current time.
    pub fn new(
        kind: NotificationKind,
        title: impl Into<String>,
        body: impl Into<String>,
        related_id: Option<Uuid>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            kind,
            title: title.into(),
            body: body.into(),
            related_id,
            created_at: Utc::now(),
        }
    }
}

/// Per-recipient read state for a notification.
///
/// One row per (user, notification) pair; `is_read` transitions
/// false→true only, idempotently.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserNotification {
    /// The recipient user.
    pub user_id: UserId,
    /// The notification this row tracks.
    pub notification_id: NotificationId,
    /// Whether the recipient has read the notification.
    pub is_read: bool,
}

/// A notification joined with the requesting user's read flag, as
/// returned by the notification list query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NotificationView {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The event class this notification describes.
    pub kind: NotificationKind,
    /// Short title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// The related entity (usually an auction).
    pub related_id: Option<Uuid>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// Whether the requesting user has read it.
    pub is_read: bool,
}
