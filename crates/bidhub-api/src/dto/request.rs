//! Request DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bidhub_core::types::id::AuctionId;
use bidhub_entity::auction::AuctionStatus;

/// Body for `POST /api/bids`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBidRequest {
    /// Auction being bid on.
    pub auction_id: AuctionId,
    /// Offered amount.
    pub amount: Decimal,
}

/// Body for `PUT /api/auctions/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    /// The target status.
    pub status: AuctionStatus,
}

/// Body for `POST /api/watchlist`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchRequest {
    /// Auction to watch.
    pub auction_id: AuctionId,
}
