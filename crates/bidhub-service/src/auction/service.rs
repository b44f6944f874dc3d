//! Authorized auction status transitions.

use std::sync::Arc;

use tracing::{info, warn};

use bidhub_core::error::AppError;
use bidhub_core::result::AppResult;
use bidhub_core::types::id::AuctionId;
use bidhub_entity::auction::AuctionStatus;
use bidhub_entity::store::AuctionStore;

use crate::bidding::AdmissionLocks;
use crate::context::RequestContext;
use crate::notification::NotificationFanout;

/// Owner/admin-triggered auction lifecycle changes.
///
/// Shares the per-auction admission lock table with the bid engine, so
/// an explicit cancel can never interleave with a concurrent admission
/// and overwrite a terminal state it did not observe.
#[derive(Clone)]
pub struct AuctionStatusService {
    /// Auction state.
    auctions: Arc<dyn AuctionStore>,
    /// Per-auction serialization, shared with bid admission.
    locks: Arc<AdmissionLocks>,
    /// Terminal-transition fan-out.
    fanout: NotificationFanout,
}

impl AuctionStatusService {
    /// Creates a new status service.
    pub fn new(
        auctions: Arc<dyn AuctionStore>,
        locks: Arc<AdmissionLocks>,
        fanout: NotificationFanout,
    ) -> Self {
        Self {
            auctions,
            locks,
            fanout,
        }
    }

    /// Moves an auction to a new status.
    ///
    /// Only the selling user or an admin may transition, and only along
    /// the legal edges of the state machine; terminal states never
    /// transition again. Ending or canceling fans out an auction-end
    /// notification best-effort.
    pub async fn change_status(
        &self,
        ctx: &RequestContext,
        auction_id: AuctionId,
        new_status: AuctionStatus,
    ) -> AppResult<()> {
        let _guard = self.locks.acquire(auction_id).await?;

        let mut auction = self
            .auctions
            .find(auction_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Auction {auction_id} not found")))?;

        if !ctx.role.is_admin() && auction.seller_id != ctx.user_id {
            return Err(AppError::unauthorized(
                "Only the seller or an admin may change auction status",
            ));
        }
        if !auction.status.can_transition_to(new_status) {
            return Err(AppError::validation(format!(
                "Cannot transition auction from {} to {}",
                auction.status, new_status
            )));
        }

        self.auctions
            .set_status(auction_id, auction.status, new_status)
            .await?;
        info!(
            auction_id = %auction_id,
            from = %auction.status,
            to = %new_status,
            actor = %ctx.user_id,
            "Auction status changed"
        );

        if new_status.is_terminal() {
            self.locks.retire(&auction_id);
            auction.status = new_status;
            if let Err(e) = self.fanout.auction_end_notification(&auction).await {
                warn!(auction_id = %auction_id, error = %e, "Auction end fan-out failed");
            }
        }
        Ok(())
    }
}
