//! Async storage contracts for the bidding engine.
//!
//! The service layer consumes these traits; `bidhub-database` provides
//! the PostgreSQL implementations. Tests inject in-memory fakes, so the
//! admission and fan-out logic can be exercised without a database.

use async_trait::async_trait;

use bidhub_core::result::AppResult;
use bidhub_core::types::id::{AuctionId, NotificationId, UserId};
use bidhub_core::types::pagination::{PageRequest, PageResponse};

use crate::auction::{Auction, AuctionStatus};
use crate::bid::Bid;
use crate::notification::{Notification, NotificationView};
use crate::watch::WatchEntry;

/// Read/write access to auction price and status state.
#[async_trait]
pub trait AuctionStore: Send + Sync + 'static {
    /// Load an auction's current committed state.
    async fn find(&self, id: AuctionId) -> AppResult<Option<Auction>>;

    /// Move an auction's status from `from` to `to` in one guarded
    /// write. Transition legality is enforced by the caller; the store
    /// rejects the write with `Conflict` when the auction's committed
    /// status no longer equals `from`.
    async fn set_status(
        &self,
        id: AuctionId,
        from: AuctionStatus,
        to: AuctionStatus,
    ) -> AppResult<()>;
}

/// Append-only bid storage.
#[async_trait]
pub trait BidStore: Send + Sync + 'static {
    /// Persist an admitted bid together with the auction's new price
    /// (the bid amount) and status in one atomic write. A failure leaves
    /// neither the bid nor the price change behind.
    async fn admit(&self, bid: &Bid, new_status: AuctionStatus) -> AppResult<()>;

    /// Paginated bid history across all auctions, newest first.
    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<Bid>>;

    /// Distinct users who have ever bid on the auction.
    async fn bidder_ids(&self, auction_id: AuctionId) -> AppResult<Vec<UserId>>;
}

/// Durable interest records (watchlist and recently-viewed rows).
#[async_trait]
pub trait WatchStore: Send + Sync + 'static {
    /// Record interest; no-op if the (user, auction, kind) row exists.
    async fn upsert(&self, entry: &WatchEntry) -> AppResult<()>;

    /// Remove a user's explicit watchlist row for an auction; no-op if
    /// absent.
    async fn remove_watch(&self, user_id: UserId, auction_id: AuctionId) -> AppResult<()>;

    /// Auctions the user has a watchlist row for.
    async fn auction_ids_for_user(&self, user_id: UserId) -> AppResult<Vec<AuctionId>>;

    /// Distinct users with any interest row (watchlist or recently
    /// viewed) for the auction.
    async fn user_ids_for_auction(&self, auction_id: AuctionId) -> AppResult<Vec<UserId>>;
}

/// Durable notification storage with per-recipient read state.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Persist one notification row plus one unread `UserNotification`
    /// row per recipient, atomically.
    async fn insert(&self, notification: &Notification, recipients: &[UserId]) -> AppResult<()>;

    /// Notifications addressed to the user, newest first, with the
    /// user's read flag joined in.
    async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationView>>;

    /// Set `is_read = true` for the user's row; idempotent, and a no-op
    /// (not an error) when no such row exists.
    async fn mark_read(&self, user_id: UserId, notification_id: NotificationId) -> AppResult<()>;
}
