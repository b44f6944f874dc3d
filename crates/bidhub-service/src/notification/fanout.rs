//! Notification fan-out — durable rows first, live push second.

use std::sync::Arc;

use tracing::{debug, info};

use bidhub_core::result::AppResult;
use bidhub_core::types::id::{NotificationId, UserId};
use bidhub_core::types::pagination::{PageRequest, PageResponse};
use bidhub_entity::auction::Auction;
use bidhub_entity::bid::Bid;
use bidhub_entity::notification::{Notification, NotificationKind, NotificationView};
use bidhub_entity::store::NotificationStore;
use bidhub_realtime::message::types::OutboundMessage;
use bidhub_realtime::RealtimeHub;

use crate::context::RequestContext;
use crate::watch::WatchIndex;

/// Persists notifications and pushes them to live connections.
///
/// The durable write is the source of truth; the push is best-effort.
/// Offline recipients pick their notifications up through the pull API.
#[derive(Clone)]
pub struct NotificationFanout {
    /// Durable notification rows.
    notifications: Arc<dyn NotificationStore>,
    /// Audience resolution.
    watch_index: WatchIndex,
    /// Live push fabric.
    hub: Arc<RealtimeHub>,
}

impl NotificationFanout {
    /// Creates a new fan-out service.
    pub fn new(
        notifications: Arc<dyn NotificationStore>,
        watch_index: WatchIndex,
        hub: Arc<RealtimeHub>,
    ) -> Self {
        Self {
            notifications,
            watch_index,
            hub,
        }
    }

    /// Persists a notification for the recipients, then pushes it to
    /// each recipient's live connections.
    ///
    /// Returns once the durable write has committed and the pushes are
    /// enqueued; it never waits for transport acknowledgement.
    pub async fn notify(
        &self,
        recipients: &[UserId],
        notification: Notification,
    ) -> AppResult<Notification> {
        self.notifications
            .insert(&notification, recipients)
            .await?;

        let event = OutboundMessage::ReceiveNotification {
            notification: notification.clone(),
        };
        for recipient in recipients {
            self.hub.send_to_user(recipient, &event);
        }

        debug!(
            notification_id = %notification.id,
            recipients = recipients.len(),
            kind = %notification.kind,
            "Notification fanned out"
        );
        Ok(notification)
    }

    /// Durable fan-out for an admitted bid.
    ///
    /// The durable audience gets the watcher-facing variant and the
    /// seller gets a distinct variant. The live `BidPlaced` group event
    /// is broadcast by the admission engine itself, under the admission
    /// lock, so the price stream stays in admission order.
    pub async fn new_bid_notification(&self, auction: &Auction, bid: &Bid) -> AppResult<()> {
        let mut audience = self.watch_index.recipients_of(auction.id).await?;
        audience.retain(|u| *u != auction.seller_id && *u != bid.bidder_id);

        if !audience.is_empty() {
            self.notify(
                &audience,
                Notification::new(
                    NotificationKind::NewBid,
                    format!("New bid on {}", auction.title),
                    format!("The price is now {}", bid.amount),
                    Some(auction.id.into_uuid()),
                ),
            )
            .await?;
        }

        self.notify(
            &[auction.seller_id],
            Notification::new(
                NotificationKind::NewBid,
                format!("Your auction {} received a bid", auction.title),
                format!("A buyer offered {}", bid.amount),
                Some(auction.id.into_uuid()),
            ),
        )
        .await?;

        Ok(())
    }

    /// Fan-out when an auction reaches a terminal status.
    pub async fn auction_end_notification(&self, auction: &Auction) -> AppResult<()> {
        let audience = self.watch_index.recipients_of(auction.id).await?;
        if !audience.is_empty() {
            self.notify(
                &audience,
                Notification::new(
                    NotificationKind::AuctionEnd,
                    format!("Auction {} has ended", auction.title),
                    format!("Final price: {}", auction.current_price),
                    Some(auction.id.into_uuid()),
                ),
            )
            .await?;
        }
        info!(auction_id = %auction.id, "Auction end fanned out");
        Ok(())
    }

    /// Marks one of the caller's notifications read. Idempotent.
    pub async fn read_notification(
        &self,
        ctx: &RequestContext,
        notification_id: NotificationId,
    ) -> AppResult<()> {
        self.notifications
            .mark_read(ctx.user_id, notification_id)
            .await
    }

    /// The caller's durable notifications, newest first.
    pub async fn list_notifications(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> AppResult<PageResponse<NotificationView>> {
        self.notifications.list_for_user(ctx.user_id, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryWorld;
    use bidhub_core::config::RealtimeConfig;
    use bidhub_entity::user::UserRole;

    fn fanout(world: &Arc<InMemoryWorld>) -> (NotificationFanout, Arc<RealtimeHub>) {
        let hub = Arc::new(RealtimeHub::new(RealtimeConfig::default()));
        let index = WatchIndex::new(world.clone(), world.clone(), world.clone());
        (
            NotificationFanout::new(world.clone(), index, hub.clone()),
            hub,
        )
    }

    #[tokio::test]
    async fn offline_recipients_get_durable_rows() {
        let world = InMemoryWorld::new();
        let (fanout, _hub) = fanout(&world);
        let recipient = UserId::new();

        fanout
            .notify(
                &[recipient],
                Notification::new(NotificationKind::NewBid, "New bid", "Price rose", None),
            )
            .await
            .unwrap();

        let ctx = RequestContext::new(recipient, UserRole::Buyer);
        let page = fanout
            .list_notifications(&ctx, &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(!page.items[0].is_read);
    }

    #[tokio::test]
    async fn live_recipients_get_pushed() {
        let world = InMemoryWorld::new();
        let (fanout, hub) = fanout(&world);
        let recipient = UserId::new();
        let (_conn, mut rx) = hub.register(recipient, UserRole::Buyer);

        fanout
            .notify(
                &[recipient],
                Notification::new(NotificationKind::NewBid, "New bid", "Price rose", None),
            )
            .await
            .unwrap();

        assert!(matches!(
            rx.try_recv(),
            Ok(OutboundMessage::ReceiveNotification { .. })
        ));
    }

    #[tokio::test]
    async fn seller_gets_distinct_variant() {
        let world = InMemoryWorld::new();
        let (fanout, _hub) = fanout(&world);
        let auction_id = world.add_open_auction(100, 500);
        let auction = world.auction(auction_id);
        let watcher = UserId::new();
        world.add_watch(watcher, auction_id);

        let bid = Bid::new(auction_id, UserId::new(), 150.into());
        fanout.new_bid_notification(&auction, &bid).await.unwrap();

        let seller_ctx = RequestContext::new(auction.seller_id, UserRole::Seller);
        let watcher_ctx = RequestContext::new(watcher, UserRole::Buyer);
        let seller_page = fanout
            .list_notifications(&seller_ctx, &PageRequest::default())
            .await
            .unwrap();
        let watcher_page = fanout
            .list_notifications(&watcher_ctx, &PageRequest::default())
            .await
            .unwrap();

        assert_eq!(seller_page.items.len(), 1);
        assert_eq!(watcher_page.items.len(), 1);
        assert_ne!(seller_page.items[0].title, watcher_page.items[0].title);
    }

    #[tokio::test]
    async fn read_notification_is_idempotent() {
        let world = InMemoryWorld::new();
        let (fanout, _hub) = fanout(&world);
        let recipient = UserId::new();
        let notification = fanout
            .notify(
                &[recipient],
                Notification::new(NotificationKind::NewBid, "New bid", "Price rose", None),
            )
            .await
            .unwrap();

        let ctx = RequestContext::new(recipient, UserRole::Buyer);
        fanout
            .read_notification(&ctx, notification.id)
            .await
            .unwrap();
        fanout
            .read_notification(&ctx, notification.id)
            .await
            .unwrap();
        // Unknown ID is also a no-op.
        fanout
            .read_notification(&ctx, NotificationId::new())
            .await
            .unwrap();

        let page = fanout
            .list_notifications(&ctx, &PageRequest::default())
            .await
            .unwrap();
        assert!(page.items[0].is_read);
    }
}
