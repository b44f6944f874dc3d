//! Watch index — the single source of truth for who cares about an auction.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use bidhub_core::error::AppError;
use bidhub_core::result::AppResult;
use bidhub_core::types::id::{AuctionId, UserId};
use bidhub_entity::store::{AuctionStore, BidStore, WatchStore};
use bidhub_entity::user::UserRole;
use bidhub_entity::watch::{WatchEntry, WatchKind};

use crate::context::RequestContext;

/// Unified durable-interest index.
///
/// Watchlist rows, recently-viewed rows, and historical bids all feed
/// one recipient query; fan-out never assembles the audience from
/// separate joins.
#[derive(Clone)]
pub struct WatchIndex {
    /// Interest rows.
    watches: Arc<dyn WatchStore>,
    /// Bid history, for the historical-bidder audience.
    bids: Arc<dyn BidStore>,
    /// Auction existence checks.
    auctions: Arc<dyn AuctionStore>,
}

impl WatchIndex {
    /// Creates a new watch index.
    pub fn new(
        watches: Arc<dyn WatchStore>,
        bids: Arc<dyn BidStore>,
        auctions: Arc<dyn AuctionStore>,
    ) -> Self {
        Self {
            watches,
            bids,
            auctions,
        }
    }

    /// Adds an auction to the caller's watchlist. Idempotent.
    ///
    /// Watchlists are a buyer feature; other roles get `Forbidden`.
    pub async fn watch(&self, ctx: &RequestContext, auction_id: AuctionId) -> AppResult<()> {
        if ctx.role != UserRole::Buyer {
            return Err(AppError::forbidden("Only buyers maintain a watchlist"));
        }
        self.require_auction(auction_id).await?;
        self.watches
            .upsert(&WatchEntry::new(ctx.user_id, auction_id, WatchKind::WatchList))
            .await?;
        debug!(user_id = %ctx.user_id, auction_id = %auction_id, "Auction watched");
        Ok(())
    }

    /// Removes an auction from the caller's watchlist; no-op if absent.
    pub async fn unwatch(&self, ctx: &RequestContext, auction_id: AuctionId) -> AppResult<()> {
        if ctx.role != UserRole::Buyer {
            return Err(AppError::forbidden("Only buyers maintain a watchlist"));
        }
        self.watches.remove_watch(ctx.user_id, auction_id).await
    }

    /// Records that the caller viewed the auction. Idempotent.
    pub async fn record_view(&self, ctx: &RequestContext, auction_id: AuctionId) -> AppResult<()> {
        self.require_auction(auction_id).await?;
        self.watches
            .upsert(&WatchEntry::new(
                ctx.user_id,
                auction_id,
                WatchKind::RecentlyViewed,
            ))
            .await
    }

    /// Auction IDs on the caller's watchlist.
    pub async fn watched_auctions(&self, ctx: &RequestContext) -> AppResult<Vec<AuctionId>> {
        self.watches.auction_ids_for_user(ctx.user_id).await
    }

    /// The durable notification audience for an auction: watchers,
    /// recent viewers, and everyone who has ever bid, deduplicated.
    pub async fn recipients_of(&self, auction_id: AuctionId) -> AppResult<Vec<UserId>> {
        let mut recipients: HashSet<UserId> = self
            .watches
            .user_ids_for_auction(auction_id)
            .await?
            .into_iter()
            .collect();
        recipients.extend(self.bids.bidder_ids(auction_id).await?);
        Ok(recipients.into_iter().collect())
    }

    async fn require_auction(&self, auction_id: AuctionId) -> AppResult<()> {
        self.auctions
            .find(auction_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Auction {auction_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryWorld;

    fn index(world: &Arc<InMemoryWorld>) -> WatchIndex {
        WatchIndex::new(world.clone(), world.clone(), world.clone())
    }

    fn buyer() -> RequestContext {
        RequestContext::new(UserId::new(), UserRole::Buyer)
    }

    #[tokio::test]
    async fn watch_requires_buyer_role() {
        let world = InMemoryWorld::new();
        let auction = world.add_open_auction(100, 500);
        let seller = RequestContext::new(UserId::new(), UserRole::Seller);

        let err = index(&world).watch(&seller, auction).await.unwrap_err();
        assert_eq!(err.kind, bidhub_core::error::ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn watch_unknown_auction_is_not_found() {
        let world = InMemoryWorld::new();
        let err = index(&world)
            .watch(&buyer(), AuctionId::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind, bidhub_core::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn recipients_union_watchers_viewers_and_bidders() {
        let world = InMemoryWorld::new();
        let auction = world.add_open_auction(100, 500);
        let idx = index(&world);

        let watcher = buyer();
        let viewer = buyer();
        let bidder_id = UserId::new();

        idx.watch(&watcher, auction).await.unwrap();
        idx.record_view(&viewer, auction).await.unwrap();
        world.add_bid(auction, bidder_id, 150);

        let recipients = idx.recipients_of(auction).await.unwrap();
        let set: HashSet<_> = recipients.into_iter().collect();
        assert_eq!(
            set,
            HashSet::from([watcher.user_id, viewer.user_id, bidder_id])
        );
    }

    #[tokio::test]
    async fn watch_then_unwatch_round_trip() {
        let world = InMemoryWorld::new();
        let auction = world.add_open_auction(100, 500);
        let idx = index(&world);
        let ctx = buyer();

        idx.watch(&ctx, auction).await.unwrap();
        assert_eq!(idx.watched_auctions(&ctx).await.unwrap(), vec![auction]);

        idx.unwatch(&ctx, auction).await.unwrap();
        assert!(idx.watched_auctions(&ctx).await.unwrap().is_empty());
        // Unwatching again stays a no-op.
        idx.unwatch(&ctx, auction).await.unwrap();
    }
}
