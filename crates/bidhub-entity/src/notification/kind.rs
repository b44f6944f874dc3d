//! Notification kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The event class a notification describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A new bid was admitted on a watched auction.
    NewBid,
    /// A payment completed for a sold auction.
    NewPayment,
    /// An auction's current price changed.
    PriceUpdate,
    /// An auction ended or was canceled.
    AuctionEnd,
    /// Feedback was left for a user.
    Feedback,
}

impl NotificationKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewBid => "new_bid",
            Self::NewPayment => "new_payment",
            Self::PriceUpdate => "price_update",
            Self::AuctionEnd => "auction_end",
            Self::Feedback => "feedback",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
