//! Watch entries: durable interest records used to derive group
//! membership.

pub mod model;

pub use model::{WatchEntry, WatchKind};
