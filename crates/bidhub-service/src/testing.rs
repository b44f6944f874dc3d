//! In-memory store fakes shared by the service tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;

use bidhub_core::error::AppError;
use bidhub_core::result::AppResult;
use bidhub_core::types::id::{AuctionId, NotificationId, UserId};
use bidhub_core::types::pagination::{PageRequest, PageResponse};
use bidhub_entity::auction::{Auction, AuctionStatus};
use bidhub_entity::bid::Bid;
use bidhub_entity::notification::{Notification, NotificationView, UserNotification};
use bidhub_entity::store::{AuctionStore, BidStore, NotificationStore, WatchStore};
use bidhub_entity::watch::{WatchEntry, WatchKind};

/// One shared in-memory backing store implementing all four store
/// traits, so a single `Arc<InMemoryWorld>` can stand in for the whole
/// database.
#[derive(Default)]
pub struct InMemoryWorld {
    auctions: Mutex<HashMap<AuctionId, Auction>>,
    bids: Mutex<Vec<Bid>>,
    watches: Mutex<Vec<WatchEntry>>,
    notifications: Mutex<Vec<Notification>>,
    user_rows: Mutex<Vec<UserNotification>>,
}

impl InMemoryWorld {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seeds an in-progress auction ending an hour from now.
    pub fn add_open_auction(&self, current: i64, max: i64) -> AuctionId {
        let now = chrono::Utc::now();
        let auction = Auction {
            id: AuctionId::new(),
            seller_id: UserId::new(),
            title: "Vintage camera".to_string(),
            description: String::new(),
            starting_price: Decimal::from(current),
            current_price: Decimal::from(current),
            max_price: Decimal::from(max),
            end_time: now + chrono::Duration::hours(1),
            status: AuctionStatus::InProgress,
            created_at: now,
        };
        let id = auction.id;
        self.auctions.lock().unwrap().insert(id, auction);
        id
    }

    pub fn auction(&self, id: AuctionId) -> Auction {
        self.auctions.lock().unwrap().get(&id).unwrap().clone()
    }

    pub fn set_auction_status(&self, id: AuctionId, status: AuctionStatus) {
        self.auctions.lock().unwrap().get_mut(&id).unwrap().status = status;
    }

    pub fn set_auction_end_time(&self, id: AuctionId, end_time: chrono::DateTime<chrono::Utc>) {
        self.auctions.lock().unwrap().get_mut(&id).unwrap().end_time = end_time;
    }

    pub fn add_bid(&self, auction_id: AuctionId, bidder_id: UserId, amount: i64) {
        self.bids
            .lock()
            .unwrap()
            .push(Bid::new(auction_id, bidder_id, Decimal::from(amount)));
    }

    pub fn add_watch(&self, user_id: UserId, auction_id: AuctionId) {
        self.watches
            .lock()
            .unwrap()
            .push(WatchEntry::new(user_id, auction_id, WatchKind::WatchList));
    }

    pub fn bid_amounts(&self, auction_id: AuctionId) -> Vec<Decimal> {
        self.bids
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.auction_id == auction_id)
            .map(|b| b.amount)
            .collect()
    }
}

#[async_trait]
impl AuctionStore for InMemoryWorld {
    async fn find(&self, id: AuctionId) -> AppResult<Option<Auction>> {
        let found = self.auctions.lock().unwrap().get(&id).cloned();
        // Widen race windows between read and write in concurrency tests.
        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn set_status(
        &self,
        id: AuctionId,
        from: AuctionStatus,
        to: AuctionStatus,
    ) -> AppResult<()> {
        let mut auctions = self.auctions.lock().unwrap();
        let auction = auctions
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Auction {id} not found")))?;
        if auction.status != from {
            return Err(AppError::conflict(format!(
                "Auction {id} is no longer in status {from}"
            )));
        }
        auction.status = to;
        Ok(())
    }
}

#[async_trait]
impl BidStore for InMemoryWorld {
    async fn admit(&self, bid: &Bid, new_status: AuctionStatus) -> AppResult<()> {
        let mut auctions = self.auctions.lock().unwrap();
        let auction = auctions
            .get_mut(&bid.auction_id)
            .ok_or_else(|| AppError::not_found("Auction vanished during admit"))?;
        auction.current_price = bid.amount;
        auction.status = new_status;
        self.bids.lock().unwrap().push(bid.clone());
        Ok(())
    }

    async fn list(&self, page: &PageRequest) -> AppResult<PageResponse<Bid>> {
        let bids = self.bids.lock().unwrap();
        let total = bids.len() as u64;
        let items = bids
            .iter()
            .rev()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn bidder_ids(&self, auction_id: AuctionId) -> AppResult<Vec<UserId>> {
        let mut seen = Vec::new();
        for bid in self.bids.lock().unwrap().iter() {
            if bid.auction_id == auction_id && !seen.contains(&bid.bidder_id) {
                seen.push(bid.bidder_id);
            }
        }
        Ok(seen)
    }
}

#[async_trait]
impl WatchStore for InMemoryWorld {
    async fn upsert(&self, entry: &WatchEntry) -> AppResult<()> {
        let mut watches = self.watches.lock().unwrap();
        let exists = watches.iter().any(|w| {
            w.user_id == entry.user_id && w.auction_id == entry.auction_id && w.kind == entry.kind
        });
        if !exists {
            watches.push(entry.clone());
        }
        Ok(())
    }

    async fn remove_watch(&self, user_id: UserId, auction_id: AuctionId) -> AppResult<()> {
        self.watches.lock().unwrap().retain(|w| {
            !(w.user_id == user_id && w.auction_id == auction_id && w.kind == WatchKind::WatchList)
        });
        Ok(())
    }

    async fn auction_ids_for_user(&self, user_id: UserId) -> AppResult<Vec<AuctionId>> {
        Ok(self
            .watches
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.user_id == user_id && w.kind == WatchKind::WatchList)
            .map(|w| w.auction_id)
            .collect())
    }

    async fn user_ids_for_auction(&self, auction_id: AuctionId) -> AppResult<Vec<UserId>> {
        let mut seen = Vec::new();
        for watch in self.watches.lock().unwrap().iter() {
            if watch.auction_id == auction_id && !seen.contains(&watch.user_id) {
                seen.push(watch.user_id);
            }
        }
        Ok(seen)
    }
}

#[async_trait]
impl NotificationStore for InMemoryWorld {
    async fn insert(&self, notification: &Notification, recipients: &[UserId]) -> AppResult<()> {
        self.notifications.lock().unwrap().push(notification.clone());
        let mut rows = self.user_rows.lock().unwrap();
        for recipient in recipients {
            rows.push(UserNotification {
                user_id: *recipient,
                notification_id: notification.id,
                is_read: false,
            });
        }
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationView>> {
        let notifications = self.notifications.lock().unwrap();
        let rows = self.user_rows.lock().unwrap();
        let mut views: Vec<NotificationView> = rows
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| {
                notifications
                    .iter()
                    .find(|n| n.id == r.notification_id)
                    .map(|n| NotificationView {
                        id: n.id,
                        kind: n.kind,
                        title: n.title.clone(),
                        body: n.body.clone(),
                        related_id: n.related_id,
                        created_at: n.created_at,
                        is_read: r.is_read,
                    })
            })
            .collect();
        views.reverse();
        let total = views.len() as u64;
        let items = views
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }

    async fn mark_read(&self, user_id: UserId, notification_id: NotificationId) -> AppResult<()> {
        for row in self.user_rows.lock().unwrap().iter_mut() {
            if row.user_id == user_id && row.notification_id == notification_id {
                row.is_read = true;
            }
        }
        Ok(())
    }
}
