//! Bid entity.

pub mod model;

pub use model::Bid;
