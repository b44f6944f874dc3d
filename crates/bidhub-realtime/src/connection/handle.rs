//! Individual WebSocket connection handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use bidhub_core::types::id::{ConnectionId, UserId};
use bidhub_entity::user::UserRole;

use crate::message::types::OutboundMessage;

/// A handle to a single live connection.
///
/// Holds the sender half of the connection's outbound queue plus
/// metadata about the connected user. The receiver half is drained by a
/// forwarder task owned by the transport layer.
#[derive(Debug)]
pub struct ConnectionHandle {
    /// Unique connection ID.
    pub id: ConnectionId,
    /// User who owns this connection.
    pub user_id: UserId,
    /// User's role (cached for quick checks).
    pub role: UserRole,
    /// Sender for outbound events; bounded, FIFO per connection.
    pub sender: mpsc::Sender<OutboundMessage>,
    /// When the connection was established.
    pub connected_at: DateTime<Utc>,
    /// Whether the connection is still alive.
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle.
    pub fn new(user_id: UserId, role: UserRole, sender: mpsc::Sender<OutboundMessage>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            role,
            sender,
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
        }
    }

    /// Push an outbound event to this connection without blocking.
    ///
    /// A full buffer drops the event (slow consumer); a closed channel
    /// marks the connection dead. Returns whether the event was queued.
    pub fn push(&self, msg: OutboundMessage) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(msg) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Connection send buffer full, dropping event");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_dead();
                false
            }
        }
    }

    /// Check if connection is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark connection as dead.
    pub fn mark_dead(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
