//! Watch entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use bidhub_core::types::id::{AuctionId, UserId};

/// How a user's interest in an auction was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "watch_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum WatchKind {
    /// Explicitly added to the user's watchlist.
    WatchList,
    /// Recorded when the user viewed the auction.
    RecentlyViewed,
}

impl WatchKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WatchList => "watch_list",
            Self::RecentlyViewed => "recently_viewed",
        }
    }
}

impl fmt::Display for WatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A durable interest record linking a user to an auction.
///
/// At most one row per (user, auction, kind). Together with historical
/// bids these rows determine the auction's notification recipient set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WatchEntry {
    /// The interested user.
    pub user_id: UserId,
    /// The auction of interest.
    pub auction_id: AuctionId,
    /// How the interest was recorded.
    pub kind: WatchKind,
    /// When the interest was first recorded.
    pub added_at: DateTime<Utc>,
}

impl WatchEntry {
    /// Create a new watch entry stamped with the current time.
    pub fn new(user_id: UserId, auction_id: AuctionId, kind: WatchKind) -> Self {
        Self {
            user_id,
            auction_id,
            kind,
            added_at: Utc::now(),
        }
    }
}
