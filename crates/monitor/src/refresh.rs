//! # Projection Refresh
//!
//! The local half of a displayed value: a per-stream timer that reads the
//! clock once per tick, takes the latest reconciled state from the watch
//! channel, and publishes a fresh projection. Runs independently of the
//! poller, so the locally-computed figure keeps moving every second even
//! while the authoritative source is unreachable.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time;

use paystream_core::{project, Clock, ProjectedValue, ReconciledBalance, StreamParameters};

/// Spawn the refresh task for one stream; aborted by the registry
/// together with the stream's poller.
pub fn spawn_refresh(
    params: StreamParameters,
    clock: Arc<dyn Clock>,
    interval: Duration,
    balance_rx: watch::Receiver<ReconciledBalance>,
    tx: watch::Sender<ProjectedValue>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);

        loop {
            ticker.tick().await;
            // One clock read per tick feeds status and valuation alike
            let now = clock.now();
            let reconciled = *balance_rx.borrow();
            let value = project(&params, &reconciled, now);
            log::debug!(
                "projection: streamed={} remaining={} claimable={}",
                value.streamed,
                value.remaining,
                value.available_to_claim,
            );
            let _ = tx.send(value);
        }
    })
}
