//! # Status Derivation
//!
//! The single source of truth for whether a stream is pending, live, or
//! finished. Every consumer (valuation, lifecycle gating, display) derives
//! status through this one function with the same `now`, so no two views
//! of a stream can disagree at the same instant.

use serde::{Deserialize, Serialize};

/// Derived stream status; recomputed on demand, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamStatus {
    pub is_started: bool,
    pub is_finished: bool,
    /// Seconds until the stream goes live; 0 once started
    pub time_until_start: u64,
}

/// Pure and total over well-formed unsigned inputs.
pub fn derive_status(starting_timestamp: u64, duration: u64, now: u64) -> StreamStatus {
    let end_time = starting_timestamp.saturating_add(duration);
    StreamStatus {
        is_started: now >= starting_timestamp,
        is_finished: now >= end_time,
        time_until_start: starting_timestamp.saturating_sub(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_before_start() {
        let status = derive_status(1000, 3600, 400);
        assert!(!status.is_started);
        assert!(!status.is_finished);
        assert_eq!(status.time_until_start, 600);
    }

    #[test]
    fn test_live() {
        let status = derive_status(1000, 3600, 1000);
        assert!(status.is_started);
        assert!(!status.is_finished);
        assert_eq!(status.time_until_start, 0);
    }

    #[test]
    fn test_finished_at_boundary() {
        let status = derive_status(1000, 3600, 4600);
        assert!(status.is_started);
        assert!(status.is_finished);
    }

    #[test]
    fn test_consistency_at_single_instant() {
        // started implies no countdown, for any instant
        for now in [0, 999, 1000, 1001, 4599, 4600, 5000] {
            let status = derive_status(1000, 3600, now);
            if status.is_started {
                assert_eq!(status.time_until_start, 0);
            } else {
                assert!(status.time_until_start > 0);
            }
        }
    }
}
