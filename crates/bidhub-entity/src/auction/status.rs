//! Auction status state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an auction.
///
/// The status machine is linear with terminal states:
/// `PendingPublish → InProgress → {Ended, Canceled}`.
/// `Ended` and `Canceled` are terminal; no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "auction_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuctionStatus {
    /// Created but not yet open for bidding.
    PendingPublish,
    /// Open for bidding.
    InProgress,
    /// Closed by the auto-win rule, by end-time expiry, or explicitly.
    Ended,
    /// Withdrawn by the seller or an administrator.
    Canceled,
}

impl AuctionStatus {
    /// Whether this status accepts no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended | Self::Canceled)
    }

    /// Whether bids may be admitted in this status (end time permitting).
    pub fn is_biddable(&self) -> bool {
        matches!(self, Self::InProgress)
    }

    /// Whether the status machine allows moving from `self` to `next`.
    pub fn can_transition_to(&self, next: AuctionStatus) -> bool {
        match (self, next) {
            (Self::PendingPublish, Self::InProgress) => true,
            (Self::PendingPublish, Self::Canceled) => true,
            (Self::InProgress, Self::Ended) => true,
            (Self::InProgress, Self::Canceled) => true,
            _ => false,
        }
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPublish => "pending_publish",
            Self::InProgress => "in_progress",
            Self::Ended => "ended",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuctionStatus {
    type Err = bidhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending_publish" => Ok(Self::PendingPublish),
            "in_progress" => Ok(Self::InProgress),
            "ended" => Ok(Self::Ended),
            "canceled" => Ok(Self::Canceled),
            _ => Err(bidhub_core::AppError::validation(format!(
                "Invalid auction status: '{s}'. Expected one of: pending_publish, in_progress, ended, canceled"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_transitions() {
        assert!(AuctionStatus::PendingPublish.can_transition_to(AuctionStatus::InProgress));
        assert!(AuctionStatus::InProgress.can_transition_to(AuctionStatus::Ended));
        assert!(AuctionStatus::InProgress.can_transition_to(AuctionStatus::Canceled));
        assert!(!AuctionStatus::PendingPublish.can_transition_to(AuctionStatus::Ended));
    }

    #[test]
    fn test_terminal_states() {
        for terminal in [AuctionStatus::Ended, AuctionStatus::Canceled] {
            assert!(terminal.is_terminal());
            for next in [
                AuctionStatus::PendingPublish,
                AuctionStatus::InProgress,
                AuctionStatus::Ended,
                AuctionStatus::Canceled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_only_in_progress_is_biddable() {
        assert!(AuctionStatus::InProgress.is_biddable());
        assert!(!AuctionStatus::PendingPublish.is_biddable());
        assert!(!AuctionStatus::Ended.is_biddable());
        assert!(!AuctionStatus::Canceled.is_biddable());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "in_progress".parse::<AuctionStatus>().unwrap(),
            AuctionStatus::InProgress
        );
        assert!("open".parse::<AuctionStatus>().is_err());
    }
}
