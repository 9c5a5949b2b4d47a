//! # Reconciliation Poller
//!
//! One task per watched stream, issuing an authoritative claimable read
//! every tick and merging the result last-write-wins. A failed read
//! leaves the previous reconciled value untouched — the projection keeps
//! running on stale authoritative data rather than blocking, and the next
//! scheduled tick supersedes the failure. Nothing is retried in between.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

use paystream_client::StreamLedger;
use paystream_core::{ClaimableSnapshot, Clock, ReconcileOutcome, ReconciledBalance, StreamId};

/// Spawn the polling task for one stream. The returned handle is owned by
/// the registry and aborted when the stream leaves the visible set.
pub fn spawn_poller(
    id: StreamId,
    ledger: Arc<dyn StreamLedger>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    tx: watch::Sender<ReconciledBalance>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        // This task is the single writer; the watch channel gives readers
        // an atomic replace-on-write view.
        let mut balance = ReconciledBalance::new();

        loop {
            ticker.tick().await;
            let now = clock.now();

            match ledger.read_claimable(id).await {
                Ok(claimable) => {
                    let snapshot = ClaimableSnapshot {
                        released: claimable.released,
                        fee: claimable.fee,
                        fetched_at: now,
                    };
                    let previous = balance.last_known_claimed;
                    match balance.apply(&snapshot) {
                        ReconcileOutcome::Applied => {
                            let _ = tx.send(balance);
                        }
                        ReconcileOutcome::Regressed => {
                            log::warn!(
                                "claimed amount regressed for stream {} ({} -> {})",
                                id.short(),
                                previous,
                                snapshot.claimed_total(),
                            );
                            let _ = tx.send(balance);
                        }
                        ReconcileOutcome::Stale => {
                            log::debug!("discarded stale read for stream {}", id.short());
                        }
                    }
                }
                Err(e) => {
                    log::warn!("reconciliation poll failed for stream {}: {}", id.short(), e);
                }
            }
        }
    })
}
