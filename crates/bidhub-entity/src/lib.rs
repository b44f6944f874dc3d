//! # bidhub-entity
//!
//! Domain entities for BidHub: auctions, bids, notifications, watch
//! entries, and user roles, plus the async storage contracts
//! ([`store`]) that the database crate implements and the service
//! layer consumes.

pub mod auction;
pub mod bid;
pub mod notification;
pub mod store;
pub mod user;
pub mod watch;

pub use auction::{Auction, AuctionStatus};
pub use bid::Bid;
pub use notification::{Notification, NotificationKind, UserNotification};
pub use user::UserRole;
pub use watch::{WatchEntry, WatchKind};
