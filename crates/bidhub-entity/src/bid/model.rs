//! Bid entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bidhub_core::types::id::{AuctionId, BidId, UserId};

/// An admitted monetary offer against an auction.
///
/// Bids are append-only and immutable once created; `placed_at` order
/// matches admission order for a given auction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Bid {
    /// Unique bid identifier.
    pub id: BidId,
    /// The auction this bid was placed on.
    pub auction_id: AuctionId,
    /// The user who placed the bid.
    pub bidder_id: UserId,
    /// The offered amount; strictly above the prior accepted price.
    pub amount: Decimal,
    /// When the bid was admitted.
    pub placed_at: DateTime<Utc>,
}

impl Bid {
    /// Create a new bid stamped with the current time.
    pub fn new(auction_id: AuctionId, bidder_id: UserId, amount: Decimal) -> Self {
        Self {
            id: BidId::new(),
            auction_id,
            bidder_id,
            amount,
            placed_at: Utc::now(),
        }
    }
}
