//! The bid admission engine.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};

use bidhub_core::error::AppError;
use bidhub_core::result::AppResult;
use bidhub_core::types::id::AuctionId;
use bidhub_core::types::pagination::{PageRequest, PageResponse};
use bidhub_entity::auction::AuctionStatus;
use bidhub_entity::bid::Bid;
use bidhub_entity::store::{AuctionStore, BidStore};
use bidhub_realtime::message::types::OutboundMessage;
use bidhub_realtime::RealtimeHub;

use crate::context::RequestContext;
use crate::notification::NotificationFanout;

use super::locks::AdmissionLocks;

/// Admits bids one at a time per auction.
///
/// Validation and the price/status write happen under the auction's
/// admission lock, so two concurrent bids can never both read the same
/// stale price and both land. Fan-out is handed off after the durable
/// commit and never blocks or fails the bid caller.
#[derive(Clone)]
pub struct BidEngine {
    /// Auction state reads.
    auctions: Arc<dyn AuctionStore>,
    /// Bid persistence.
    bids: Arc<dyn BidStore>,
    /// Per-auction serialization.
    locks: Arc<AdmissionLocks>,
    /// Live push fabric, for auto-subscription.
    hub: Arc<RealtimeHub>,
    /// Post-commit fan-out.
    fanout: NotificationFanout,
}

impl BidEngine {
    /// Creates a new bid engine.
    pub fn new(
        auctions: Arc<dyn AuctionStore>,
        bids: Arc<dyn BidStore>,
        locks: Arc<AdmissionLocks>,
        hub: Arc<RealtimeHub>,
        fanout: NotificationFanout,
    ) -> Self {
        Self {
            auctions,
            bids,
            locks,
            hub,
            fanout,
        }
    }

    /// Admits a bid, or rejects it with a terminal error.
    ///
    /// `Contention` is the only retryable rejection. On success the
    /// bidder's live connections follow the auction and fan-out runs as
    /// a detached task.
    pub async fn place_bid(
        &self,
        ctx: &RequestContext,
        auction_id: AuctionId,
        amount: Decimal,
    ) -> AppResult<Bid> {
        let _guard = self.locks.acquire(auction_id).await?;

        let mut auction = self
            .auctions
            .find(auction_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Auction {auction_id} not found")))?;

        let now = chrono::Utc::now();
        if !auction.is_open_at(now) {
            return Err(AppError::auction_closed(
                "Auction is not available for bidding",
            ));
        }
        if !auction.accepts_amount(amount) {
            return Err(AppError::invalid_amount(format!(
                "Bid must be above {} and at most {}",
                auction.current_price, auction.max_price
            )));
        }

        let new_status = if auction.is_winning_amount(amount) {
            AuctionStatus::Ended
        } else {
            auction.status
        };

        let bid = Bid::new(auction_id, ctx.user_id, amount);
        self.bids.admit(&bid, new_status).await?;

        if new_status.is_terminal() {
            self.locks.retire(&auction_id);
        }

        // The bidder follows the auction from now on.
        self.hub.join_user_to_auction(&ctx.user_id, auction_id);

        // Broadcast while still holding the admission lock, so the
        // auction's live event stream is enqueued in admission order.
        self.hub.broadcast_to_auction(
            &auction_id,
            &OutboundMessage::BidPlaced {
                auction_id,
                new_price: amount,
                placed_at: bid.placed_at,
            },
        );

        info!(
            auction_id = %auction_id,
            bid_id = %bid.id,
            amount = %amount,
            won = new_status == AuctionStatus::Ended,
            "Bid admitted"
        );

        auction.current_price = amount;
        auction.status = new_status;
        let fanout = self.fanout.clone();
        let fanout_bid = bid.clone();
        tokio::spawn(async move {
            if let Err(e) = fanout.new_bid_notification(&auction, &fanout_bid).await {
                warn!(
                    auction_id = %auction.id,
                    error = %e,
                    "Bid fan-out failed"
                );
            }
        });

        Ok(bid)
    }

    /// Paginated bid history, newest first.
    pub async fn list_bids(&self, page: &PageRequest) -> AppResult<PageResponse<Bid>> {
        self.bids.list(page).await
    }
}
