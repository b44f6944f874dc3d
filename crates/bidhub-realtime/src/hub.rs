//! The real-time hub — presence, groups, and push routing in one facade.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use bidhub_core::config::RealtimeConfig;
use bidhub_core::types::id::{AuctionId, ConnectionId, UserId};
use bidhub_entity::user::UserRole;

use crate::connection::handle::ConnectionHandle;
use crate::connection::presence::PresenceRegistry;
use crate::group::registry::GroupRegistry;
use crate::message::types::OutboundMessage;

/// Central coordination point for all live connections.
///
/// The transport layer registers and unregisters connections; the
/// service layer pushes events through it. All operations are
/// non-blocking in-memory work.
#[derive(Debug)]
pub struct RealtimeHub {
    /// Presence registry.
    presence: Arc<PresenceRegistry>,
    /// Auction group membership.
    groups: Arc<GroupRegistry>,
    /// Configuration.
    config: RealtimeConfig,
}

impl RealtimeHub {
    /// Creates a new hub.
    pub fn new(config: RealtimeConfig) -> Self {
        info!(
            max_connections_per_user = config.max_connections_per_user,
            buffer = config.channel_buffer_size,
            "Real-time hub initialized"
        );
        Self {
            presence: Arc::new(PresenceRegistry::new()),
            groups: Arc::new(GroupRegistry::new()),
            config,
        }
    }

    /// Registers a new authenticated connection.
    ///
    /// Returns the handle and the receiver half of its outbound queue.
    /// A user at the connection cap has their oldest connection evicted.
    pub fn register(
        &self,
        user_id: UserId,
        role: UserRole,
    ) -> (Arc<ConnectionHandle>, mpsc::Receiver<OutboundMessage>) {
        let existing = self.presence.live_connections(&user_id);
        if existing.len() >= self.config.max_connections_per_user {
            warn!(
                user_id = %user_id,
                count = existing.len(),
                max = self.config.max_connections_per_user,
                "User at max connections, evicting oldest"
            );
            if let Some(oldest) = existing.first() {
                oldest.push(OutboundMessage::Disconnect {
                    reason: "Superseded by a newer connection".to_string(),
                });
                self.unregister(&oldest.id);
            }
        }

        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(user_id, role, tx));
        self.presence.connect(handle.clone());

        info!(conn_id = %handle.id, user_id = %user_id, "Connection registered");
        (handle, rx)
    }

    /// Unregisters a connection and cleans up its group memberships.
    ///
    /// Never fails; unknown connections are a no-op.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.presence.disconnect(conn_id) {
            handle.mark_dead();
            let left = self.groups.leave_all(*conn_id);
            info!(
                conn_id = %conn_id,
                user_id = %handle.user_id,
                groups_left = left.len(),
                "Connection unregistered"
            );
        }
    }

    /// Joins a single connection to an auction group.
    pub fn join_auction(&self, auction_id: AuctionId, conn_id: ConnectionId) {
        self.groups.join(auction_id, conn_id);
        debug!(auction_id = %auction_id, conn_id = %conn_id, "Joined auction group");
    }

    /// Removes a single connection from an auction group.
    pub fn leave_auction(&self, auction_id: AuctionId, conn_id: ConnectionId) {
        self.groups.leave(auction_id, conn_id);
        debug!(auction_id = %auction_id, conn_id = %conn_id, "Left auction group");
    }

    /// Joins every live connection of a user to an auction group.
    ///
    /// Used for auto-subscription after a successful bid: the bidder
    /// starts receiving price updates without an explicit join.
    pub fn join_user_to_auction(&self, user_id: &UserId, auction_id: AuctionId) {
        for conn in self.presence.live_connections(user_id) {
            self.groups.join(auction_id, conn.id);
        }
    }

    /// Pushes an event to every live connection of a user.
    ///
    /// Best-effort: offline users and slow consumers are skipped.
    pub fn send_to_user(&self, user_id: &UserId, message: &OutboundMessage) {
        for conn in self.presence.live_connections(user_id) {
            conn.push(message.clone());
        }
    }

    /// Broadcasts an event to every member of an auction group.
    pub fn broadcast_to_auction(&self, auction_id: &AuctionId, message: &OutboundMessage) {
        let subscriber_ids = self.groups.subscribers(auction_id);
        let mut sent = 0usize;
        for conn_id in &subscriber_ids {
            if let Some(handle) = self.presence.get(conn_id) {
                if handle.push(message.clone()) {
                    sent += 1;
                }
            }
        }
        debug!(
            auction_id = %auction_id,
            subscribers = subscriber_ids.len(),
            sent,
            "Broadcast to auction group"
        );
    }

    /// The presence registry.
    pub fn presence(&self) -> &Arc<PresenceRegistry> {
        &self.presence
    }

    /// The group registry.
    pub fn groups(&self) -> &Arc<GroupRegistry> {
        &self.groups
    }

    /// The hub configuration.
    pub fn config(&self) -> &RealtimeConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hub() -> RealtimeHub {
        RealtimeHub::new(RealtimeConfig {
            max_connections_per_user: 2,
            channel_buffer_size: 8,
            ping_interval_seconds: 30,
        })
    }

    #[tokio::test]
    async fn register_caps_connections_per_user() {
        let hub = hub();
        let user = UserId::new();

        let (first, mut rx1) = hub.register(user, UserRole::Buyer);
        let (_second, _rx2) = hub.register(user, UserRole::Buyer);
        let (_third, _rx3) = hub.register(user, UserRole::Buyer);

        assert_eq!(hub.presence().live_connections(&user).len(), 2);
        assert!(!first.is_alive());
        // The evicted transport is told to shut its socket down.
        assert!(matches!(
            rx1.try_recv(),
            Ok(OutboundMessage::Disconnect { .. })
        ));
    }

    #[tokio::test]
    async fn broadcast_reaches_group_members_only() {
        let hub = hub();
        let auction = AuctionId::new();
        let (member, mut member_rx) = hub.register(UserId::new(), UserRole::Buyer);
        let (_outsider, mut outsider_rx) = hub.register(UserId::new(), UserRole::Buyer);

        hub.join_auction(auction, member.id);
        hub.broadcast_to_auction(&auction, &OutboundMessage::Ping { timestamp: 7 });

        assert!(matches!(
            member_rx.try_recv(),
            Ok(OutboundMessage::Ping { timestamp: 7 })
        ));
        assert!(outsider_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unregister_cleans_up_groups() {
        let hub = hub();
        let auction = AuctionId::new();
        let (conn, _rx) = hub.register(UserId::new(), UserRole::Buyer);
        hub.join_auction(auction, conn.id);

        hub.unregister(&conn.id);

        assert!(hub.groups().subscribers(&auction).is_empty());
        assert_eq!(hub.presence().connection_count(), 0);
    }

    #[tokio::test]
    async fn auto_subscribe_joins_all_live_connections() {
        let hub = hub();
        let user = UserId::new();
        let auction = AuctionId::new();
        let (a, _rx1) = hub.register(user, UserRole::Buyer);
        let (b, _rx2) = hub.register(user, UserRole::Buyer);

        hub.join_user_to_auction(&user, auction);

        assert!(hub.groups().is_member(&auction, &a.id));
        assert!(hub.groups().is_member(&auction, &b.id));
    }
}
