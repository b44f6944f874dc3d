//! Application state shared across all handlers.

use std::sync::Arc;

use bidhub_auth::TokenVerifier;
use bidhub_core::config::AppConfig;
use bidhub_database::repositories::{
    AuctionRepository, BidRepository, NotificationRepository, WatchRepository,
};
use bidhub_database::DatabasePool;
use bidhub_entity::store::{AuctionStore, BidStore, NotificationStore, WatchStore};
use bidhub_realtime::RealtimeHub;
use bidhub_service::{
    AdmissionLocks, AuctionStatusService, BidEngine, NotificationFanout, WatchIndex,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Database pool, for health checks.
    pub db: DatabasePool,
    /// Bearer-token verifier.
    pub verifier: Arc<TokenVerifier>,
    /// Live connection hub.
    pub hub: Arc<RealtimeHub>,
    /// Bid admission engine.
    pub bids: BidEngine,
    /// Auction lifecycle service.
    pub auctions: AuctionStatusService,
    /// Watchlist and interest index.
    pub watchlist: WatchIndex,
    /// Notification fan-out and pull API.
    pub notifications: NotificationFanout,
}

impl AppState {
    /// Wires repositories, services, and the hub into one state value.
    pub fn build(config: AppConfig, db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        let auction_store: Arc<dyn AuctionStore> = Arc::new(AuctionRepository::new(pool.clone()));
        let bid_store: Arc<dyn BidStore> = Arc::new(BidRepository::new(pool.clone()));
        let watch_store: Arc<dyn WatchStore> = Arc::new(WatchRepository::new(pool.clone()));
        let notification_store: Arc<dyn NotificationStore> =
            Arc::new(NotificationRepository::new(pool));

        let verifier = Arc::new(TokenVerifier::new(&config.auth));
        let hub = Arc::new(RealtimeHub::new(config.realtime.clone()));
        let locks = Arc::new(AdmissionLocks::new(config.bidding.lock_timeout_ms));

        let watchlist = WatchIndex::new(
            watch_store,
            bid_store.clone(),
            auction_store.clone(),
        );
        let notifications =
            NotificationFanout::new(notification_store, watchlist.clone(), hub.clone());
        let bids = BidEngine::new(
            auction_store.clone(),
            bid_store,
            locks.clone(),
            hub.clone(),
            notifications.clone(),
        );
        let auctions = AuctionStatusService::new(auction_store, locks, notifications.clone());

        Self {
            config: Arc::new(config),
            db,
            verifier,
            hub,
            bids,
            auctions,
            watchlist,
            notifications,
        }
    }
}
