//! # bidhub-realtime
//!
//! In-memory real-time state for BidHub: which users are connected,
//! which connections follow which auctions, and the push fabric that
//! delivers events to them. Everything here is process-local and
//! non-durable; persistence lives behind the store traits.
//!
//! ## Modules
//!
//! - `connection` — per-socket handles and the presence registry
//! - `group` — auction group membership with a reverse index
//! - `message` — inbound client RPCs and outbound server events
//! - `hub` — the facade the service and transport layers talk to

pub mod connection;
pub mod group;
pub mod hub;
pub mod message;

pub use connection::handle::ConnectionHandle;
pub use connection::presence::PresenceRegistry;
pub use group::registry::GroupRegistry;
pub use hub::RealtimeHub;
pub use message::types::{InboundMessage, OutboundMessage};
