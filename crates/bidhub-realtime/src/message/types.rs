//! Inbound and outbound message type definitions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bidhub_core::types::id::{AuctionId, NotificationId, UserId};
use bidhub_core::types::pagination::{PageRequest, PageResponse};
use bidhub_entity::notification::{Notification, NotificationView};

/// Client RPCs sent over the live connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Join an auction's live group.
    JoinAuction {
        /// Auction to follow.
        auction_id: AuctionId,
    },
    /// Leave an auction's live group.
    LeaveAuction {
        /// Auction to stop following.
        auction_id: AuctionId,
    },
    /// Submit a bid.
    PlaceBid {
        /// Auction being bid on.
        auction_id: AuctionId,
        /// Offered amount.
        amount: Decimal,
    },
    /// Pull the caller's durable notifications.
    ListNotifications {
        /// Page selection; defaults apply when omitted.
        #[serde(default)]
        page: PageRequest,
    },
    /// Mark a notification as read.
    MarkRead {
        /// Notification ID.
        notification_id: NotificationId,
    },
    /// Pong response to server ping.
    Pong {
        /// Echoed timestamp.
        timestamp: i64,
    },
}

/// Server events pushed to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Another user joined the auction group.
    UserJoinAuction {
        /// The auction.
        auction_id: AuctionId,
        /// Who joined.
        user_id: UserId,
    },
    /// Another user left the auction group.
    UserLeaveAuction {
        /// The auction.
        auction_id: AuctionId,
        /// Who left.
        user_id: UserId,
    },
    /// Notification delivery.
    ReceiveNotification {
        /// The notification record.
        notification: Notification,
    },
    /// A bid was admitted on an auction the client follows.
    BidPlaced {
        /// The auction.
        auction_id: AuctionId,
        /// The price after admission.
        new_price: Decimal,
        /// When the bid landed.
        placed_at: DateTime<Utc>,
    },
    /// A bid the client submitted over this connection was rejected.
    BidRejected {
        /// The auction.
        auction_id: AuctionId,
        /// Rejection code.
        code: String,
        /// Human-readable reason.
        message: String,
    },
    /// Response to a `list_notifications` RPC.
    NotificationList {
        /// One page of the caller's notifications, newest first.
        page: PageResponse<NotificationView>,
    },
    /// Ping (server keepalive).
    Ping {
        /// Server timestamp.
        timestamp: i64,
    },
    /// The server is closing this connection; the transport should
    /// stop forwarding and shut the socket down.
    Disconnect {
        /// Why the connection is being closed.
        reason: String,
    },
    /// Error message.
    Error {
        /// Error code.
        code: String,
        /// Error description.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_tag_format() {
        let msg: InboundMessage =
            serde_json::from_str(r#"{"type":"pong","timestamp":42}"#).unwrap();
        assert!(matches!(msg, InboundMessage::Pong { timestamp: 42 }));
    }

    #[test]
    fn list_notifications_defaults_page() {
        let msg: InboundMessage = serde_json::from_str(r#"{"type":"list_notifications"}"#).unwrap();
        match msg {
            InboundMessage::ListNotifications { page } => {
                assert_eq!(page.page, 1);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[test]
    fn outbound_events_are_snake_case_tagged() {
        let event = OutboundMessage::BidPlaced {
            auction_id: AuctionId::new(),
            new_price: Decimal::new(1050, 2),
            placed_at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"bid_placed""#));
        assert!(json.contains(r#""new_price":"10.50""#));
    }
}
