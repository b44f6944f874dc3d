//! Notification persistence and live fan-out.

pub mod fanout;

pub use fanout::NotificationFanout;
