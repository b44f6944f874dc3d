//! Group registry — which connections follow which auctions.

use std::collections::HashSet;

use dashmap::DashMap;

use bidhub_core::types::id::{AuctionId, ConnectionId};

/// Per-auction membership sets with a reverse index for O(1) cleanup
/// on disconnect. Empty groups are reclaimed so the map only ever holds
/// auctions somebody is actually watching live.
#[derive(Debug, Default)]
pub struct GroupRegistry {
    /// Auction ID → set of member connection IDs.
    members: DashMap<AuctionId, HashSet<ConnectionId>>,
    /// Connection ID → set of auction IDs (reverse index).
    memberships: DashMap<ConnectionId, HashSet<AuctionId>>,
}

impl GroupRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a connection to an auction group. Idempotent.
    pub fn join(&self, auction_id: AuctionId, conn_id: ConnectionId) {
        self.members.entry(auction_id).or_default().insert(conn_id);
        self.memberships
            .entry(conn_id)
            .or_default()
            .insert(auction_id);
    }

    /// Removes a connection from an auction group. Idempotent.
    pub fn leave(&self, auction_id: AuctionId, conn_id: ConnectionId) {
        if let Some(mut group) = self.members.get_mut(&auction_id) {
            group.remove(&conn_id);
            if group.is_empty() {
                drop(group);
                self.members.remove(&auction_id);
            }
        }
        if let Some(mut groups) = self.memberships.get_mut(&conn_id) {
            groups.remove(&auction_id);
            if groups.is_empty() {
                drop(groups);
                self.memberships.remove(&conn_id);
            }
        }
    }

    /// Removes a connection from every group it joined.
    ///
    /// Returns the auction IDs the connection was a member of.
    pub fn leave_all(&self, conn_id: ConnectionId) -> Vec<AuctionId> {
        let Some((_, groups)) = self.memberships.remove(&conn_id) else {
            return Vec::new();
        };
        for auction_id in &groups {
            if let Some(mut group) = self.members.get_mut(auction_id) {
                group.remove(&conn_id);
                if group.is_empty() {
                    drop(group);
                    self.members.remove(auction_id);
                }
            }
        }
        groups.into_iter().collect()
    }

    /// Snapshot of the member connection IDs for an auction.
    pub fn subscribers(&self, auction_id: &AuctionId) -> Vec<ConnectionId> {
        self.members
            .get(auction_id)
            .map(|group| group.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether a connection is a member of the given auction group.
    pub fn is_member(&self, auction_id: &AuctionId, conn_id: &ConnectionId) -> bool {
        self.members
            .get(auction_id)
            .map(|group| group.contains(conn_id))
            .unwrap_or(false)
    }

    /// Number of live auction groups.
    pub fn group_count(&self) -> usize {
        self.members.len()
    }
}
