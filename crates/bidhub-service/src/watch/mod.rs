//! Durable interest tracking.

pub mod service;

pub use service::WatchIndex;
