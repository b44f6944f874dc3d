//! Auction lifecycle.

pub mod service;

pub use service::AuctionStatusService;
