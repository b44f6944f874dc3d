//! Auction group membership.

pub mod registry;

pub use registry::GroupRegistry;
