//! Auction entity model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bidhub_core::types::id::{AuctionId, UserId};

use super::status::AuctionStatus;

/// A sellable item with a monotonically increasing current price, a
/// reserve ceiling, and an end time.
///
/// Invariant: `starting_price <= current_price <= max_price`. The price
/// and status fields are mutated only by the bid admission engine or the
/// authorized status-change path.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Auction {
    /// Unique auction identifier.
    pub id: AuctionId,
    /// The user selling the item.
    pub seller_id: UserId,
    /// Product title.
    pub title: String,
    /// Product description.
    pub description: String,
    /// Opening price.
    pub starting_price: Decimal,
    /// Highest admitted bid so far (equals `starting_price` before any bid).
    pub current_price: Decimal,
    /// Reserve ceiling; a bid at exactly this amount wins immediately.
    pub max_price: Decimal,
    /// When bidding closes.
    pub end_time: DateTime<Utc>,
    /// Lifecycle status.
    pub status: AuctionStatus,
    /// When the auction was created.
    pub created_at: DateTime<Utc>,
}

impl Auction {
    /// Whether the auction accepts bids at the given instant.
    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.status.is_biddable() && now <= self.end_time
    }

    /// Whether `amount` is a valid next price: strictly above the current
    /// price and within the reserve ceiling.
    pub fn accepts_amount(&self, amount: Decimal) -> bool {
        amount > self.current_price && amount <= self.max_price
    }

    /// Whether a bid of `amount` triggers the auto-win rule.
    pub fn is_winning_amount(&self, amount: Decimal) -> bool {
        amount == self.max_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn auction(current: i64, max: i64) -> Auction {
        let now = Utc::now();
        Auction {
            id: AuctionId::new(),
            seller_id: UserId::new(),
            title: "Vintage camera".to_string(),
            description: String::new(),
            starting_price: Decimal::from(current),
            current_price: Decimal::from(current),
            max_price: Decimal::from(max),
            end_time: now + Duration::hours(1),
            status: AuctionStatus::InProgress,
            created_at: now,
        }
    }

    #[test]
    fn test_accepts_amount_bounds() {
        let a = auction(100, 500);
        assert!(!a.accepts_amount(Decimal::from(100)));
        assert!(a.accepts_amount(Decimal::from(101)));
        assert!(a.accepts_amount(Decimal::from(500)));
        assert!(!a.accepts_amount(Decimal::from(501)));
    }

    #[test]
    fn test_open_until_end_time() {
        let mut a = auction(100, 500);
        assert!(a.is_open_at(Utc::now()));
        assert!(!a.is_open_at(a.end_time + Duration::seconds(1)));
        a.status = AuctionStatus::Ended;
        assert!(!a.is_open_at(Utc::now()));
    }
}
