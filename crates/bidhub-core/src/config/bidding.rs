//! Bid admission engine configuration.

use serde::{Deserialize, Serialize};

/// Bid admission settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiddingConfig {
    /// How long a `place_bid` call may wait for the per-auction admission
    /// lock before failing with a retryable contention error, in
    /// milliseconds.
    #[serde(default = "default_lock_timeout")]
    pub lock_timeout_ms: u64,
}

impl Default for BiddingConfig {
    fn default() -> Self {
        Self {
            lock_timeout_ms: default_lock_timeout(),
        }
    }
}

fn default_lock_timeout() -> u64 {
    2000
}
