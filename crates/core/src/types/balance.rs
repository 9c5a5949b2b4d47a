//! # Reconciled Balance
//!
//! The authoritative side of a stream's value: the cumulative amount the
//! ledger reports as already withdrawn, as of the last successful poll.
//! Merging is last-write-wins by fetch timestamp so an in-flight read that
//! lands after a newer one cannot roll the state backwards.

use serde::{Deserialize, Serialize};

/// One authoritative read of a stream's claimable figure.
///
/// The ledger reports the collectible amount and the fee owed on it as a
/// pair; the cumulative claimed figure is their sum. `fetched_at` is
/// stamped by the poller when the response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimableSnapshot {
    pub released: u64,
    pub fee: u64,
    pub fetched_at: u64,
}

impl ClaimableSnapshot {
    /// Combined cumulative figure the projector subtracts from streamed value
    pub fn claimed_total(&self) -> u64 {
        self.released.saturating_add(self.fee)
    }
}

/// What happened when a snapshot was merged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Snapshot accepted and state replaced
    Applied,
    /// Snapshot older than the held state; discarded unchanged
    Stale,
    /// Snapshot accepted, but the cumulative figure went backwards — a
    /// data-integrity warning for a non-recurring stream, not a failure
    Regressed,
}

/// Last authoritative claimed amount and when it was obtained.
///
/// Owned by the reconciliation poller; replaced atomically on every
/// successful read and never rolled back on failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledBalance {
    pub last_known_claimed: u64,
    pub last_fetch: u64,
}

impl ReconciledBalance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge an authoritative read, last-write-wins by `fetched_at`.
    pub fn apply(&mut self, snapshot: &ClaimableSnapshot) -> ReconcileOutcome {
        if snapshot.fetched_at < self.last_fetch {
            return ReconcileOutcome::Stale;
        }

        let regressed = snapshot.claimed_total() < self.last_known_claimed;
        self.last_known_claimed = snapshot.claimed_total();
        self.last_fetch = snapshot.fetched_at;

        if regressed {
            ReconcileOutcome::Regressed
        } else {
            ReconcileOutcome::Applied
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_state() {
        let mut balance = ReconciledBalance::new();
        let outcome = balance.apply(&ClaimableSnapshot {
            released: 300_000,
            fee: 500,
            fetched_at: 100,
        });
        assert_eq!(outcome, ReconcileOutcome::Applied);
        assert_eq!(balance.last_known_claimed, 300_500);
        assert_eq!(balance.last_fetch, 100);
    }

    #[test]
    fn test_stale_response_discarded() {
        let mut balance = ReconciledBalance::new();
        balance.apply(&ClaimableSnapshot { released: 500_000, fee: 0, fetched_at: 200 });

        // An older in-flight read lands after the fresher one
        let outcome =
            balance.apply(&ClaimableSnapshot { released: 300_000, fee: 0, fetched_at: 150 });
        assert_eq!(outcome, ReconcileOutcome::Stale);
        assert_eq!(balance.last_known_claimed, 500_000);
        assert_eq!(balance.last_fetch, 200);
    }

    #[test]
    fn test_regression_flagged_but_applied() {
        let mut balance = ReconciledBalance::new();
        balance.apply(&ClaimableSnapshot { released: 500_000, fee: 0, fetched_at: 200 });

        // The ledger is authoritative even when the figure goes backwards;
        // the caller logs the integrity warning.
        let outcome =
            balance.apply(&ClaimableSnapshot { released: 400_000, fee: 0, fetched_at: 300 });
        assert_eq!(outcome, ReconcileOutcome::Regressed);
        assert_eq!(balance.last_known_claimed, 400_000);
    }

    #[test]
    fn test_equal_timestamp_wins() {
        let mut balance = ReconciledBalance::new();
        balance.apply(&ClaimableSnapshot { released: 100, fee: 0, fetched_at: 50 });
        let outcome = balance.apply(&ClaimableSnapshot { released: 200, fee: 0, fetched_at: 50 });
        assert_eq!(outcome, ReconcileOutcome::Applied);
        assert_eq!(balance.last_known_claimed, 200);
    }
}
