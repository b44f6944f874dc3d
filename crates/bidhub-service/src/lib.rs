//! # bidhub-service
//!
//! Business logic service layer for BidHub. Each service orchestrates
//! the store traits, the real-time hub, and the caller's identity to
//! implement application-level use cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod auction;
pub mod bidding;
pub mod context;
pub mod notification;
pub mod watch;

#[cfg(test)]
pub(crate) mod testing;

pub use auction::AuctionStatusService;
pub use bidding::{AdmissionLocks, BidEngine};
pub use context::RequestContext;
pub use notification::NotificationFanout;
pub use watch::WatchIndex;
