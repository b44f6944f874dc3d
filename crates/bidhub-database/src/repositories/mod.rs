//! Repository implementations for all BidHub entities.

pub mod auction;
pub mod bid;
pub mod notification;
pub mod watch;

pub use auction::AuctionRepository;
pub use bid::BidRepository;
pub use notification::NotificationRepository;
pub use watch::WatchRepository;
