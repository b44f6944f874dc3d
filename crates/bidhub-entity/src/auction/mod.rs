//! Auction entity and status state machine.

pub mod model;
pub mod status;

pub use model::Auction;
pub use status::AuctionStatus;
