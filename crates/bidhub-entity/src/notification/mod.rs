//! Notification entities: the shared notification record, its kind, and
//! the per-user read-state join row.

pub mod kind;
pub mod model;

pub use kind::NotificationKind;
pub use model::{Notification, NotificationView, UserNotification};
