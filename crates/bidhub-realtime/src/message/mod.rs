//! Wire-level message definitions for the real-time transport.

pub mod types;

pub use types::{InboundMessage, OutboundMessage};
