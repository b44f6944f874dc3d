//! Bid admission.

pub mod engine;
pub mod locks;

pub use engine::BidEngine;
pub use locks::AdmissionLocks;
