//! HTTP and WebSocket handlers.

pub mod auction;
pub mod bid;
pub mod health;
pub mod notification;
pub mod watch;
pub mod ws;
