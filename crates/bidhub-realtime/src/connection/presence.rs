//! Presence registry — tracks all live connections indexed by user ID.

use std::sync::Arc;

use dashmap::DashMap;

use bidhub_core::types::id::{ConnectionId, UserId};

use super::handle::ConnectionHandle;

/// Thread-safe registry of every live connection.
///
/// A user with zero live connections is offline; the per-user entry is
/// reclaimed when its last connection drains so membership never leaks.
#[derive(Debug, Default)]
pub struct PresenceRegistry {
    /// User ID → list of connection handles (one user can hold several).
    by_user: DashMap<UserId, Vec<Arc<ConnectionHandle>>>,
    /// Connection ID → handle for direct lookup.
    by_id: DashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl PresenceRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection. Re-adding the same connection is a no-op.
    pub fn connect(&self, handle: Arc<ConnectionHandle>) {
        if self.by_id.insert(handle.id, handle.clone()).is_some() {
            return;
        }
        self.by_user.entry(handle.user_id).or_default().push(handle);
    }

    /// Removes a connection; safe no-op when the connection is unknown.
    pub fn disconnect(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        let (_, handle) = self.by_id.remove(conn_id)?;
        if let Some(mut connections) = self.by_user.get_mut(&handle.user_id) {
            connections.retain(|c| c.id != *conn_id);
            if connections.is_empty() {
                drop(connections);
                self.by_user.remove(&handle.user_id);
            }
        }
        Some(handle)
    }

    /// Snapshot of all live connections for a user.
    pub fn live_connections(&self, user_id: &UserId) -> Vec<Arc<ConnectionHandle>> {
        self.by_user
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Looks up a specific connection by ID.
    pub fn get(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.by_id.get(conn_id).map(|entry| entry.value().clone())
    }

    /// Whether the user has at least one live connection.
    pub fn is_online(&self, user_id: &UserId) -> bool {
        self.by_user.contains_key(user_id)
    }

    /// Total number of live connections.
    pub fn connection_count(&self) -> usize {
        self.by_id.len()
    }

    /// Number of distinct online users.
    pub fn user_count(&self) -> usize {
        self.by_user.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::types::OutboundMessage;
    use bidhub_entity::user::UserRole;
    use tokio::sync::mpsc;

    fn conn(user_id: UserId) -> Arc<ConnectionHandle> {
        let (tx, _rx) = mpsc::channel::<OutboundMessage>(8);
        Arc::new(ConnectionHandle::new(user_id, UserRole::Buyer, tx))
    }

    #[test]
    fn connect_is_idempotent() {
        let registry = PresenceRegistry::new();
        let user = UserId::new();
        let c = conn(user);

        registry.connect(c.clone());
        registry.connect(c.clone());

        assert_eq!(registry.live_connections(&user).len(), 1);
        assert_eq!(registry.connection_count(), 1);
    }

    #[test]
    fn disconnect_unknown_is_noop() {
        let registry = PresenceRegistry::new();
        assert!(registry.disconnect(&uuid::Uuid::new_v4()).is_none());
    }

    #[test]
    fn disconnect_excludes_from_live_set() {
        let registry = PresenceRegistry::new();
        let user = UserId::new();
        let a = conn(user);
        let b = conn(user);
        registry.connect(a.clone());
        registry.connect(b.clone());

        registry.disconnect(&a.id);

        let live = registry.live_connections(&user);
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, b.id);
    }

    #[test]
    fn draining_last_connection_reclaims_user_entry() {
        let registry = PresenceRegistry::new();
        let user = UserId::new();
        let c = conn(user);
        registry.connect(c.clone());
        assert!(registry.is_online(&user));

        registry.disconnect(&c.id);

        assert!(!registry.is_online(&user));
        assert_eq!(registry.user_count(), 0);
    }
}
