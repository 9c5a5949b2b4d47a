//! # Monitor Registry
//!
//! Explicit ownership of every polling and refresh task, keyed by stream
//! id. Watching a stream spawns its task pair; `stop` cancels both
//! together, so no timer can outlive the stream it renders. Dropping the
//! registry aborts everything outstanding.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use paystream_client::StreamLedger;
use paystream_core::{project, Clock, ProjectedValue, ReconciledBalance, StreamId, StreamParameters};

use crate::poller::spawn_poller;
use crate::refresh::spawn_refresh;

/// The task pair and value channels for one watched stream
struct StreamTasks {
    poll: JoinHandle<()>,
    refresh: JoinHandle<()>,
    value: watch::Receiver<ProjectedValue>,
}

impl StreamTasks {
    fn abort(&self) {
        self.poll.abort();
        self.refresh.abort();
    }
}

impl Drop for StreamTasks {
    fn drop(&mut self) {
        self.abort();
    }
}

/// Owner of all per-stream monitoring tasks
pub struct MonitorRegistry {
    ledger: Arc<dyn StreamLedger>,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    refresh_interval: Duration,
    tasks: HashMap<StreamId, StreamTasks>,
}

impl MonitorRegistry {
    pub fn new(
        ledger: Arc<dyn StreamLedger>,
        clock: Arc<dyn Clock>,
        poll_interval: Duration,
        refresh_interval: Duration,
    ) -> Self {
        Self {
            ledger,
            clock,
            poll_interval,
            refresh_interval,
            tasks: HashMap::new(),
        }
    }

    /// Start watching a stream: one reconciliation poller plus one
    /// projection refresher. Watching an already-watched id replaces the
    /// old pair (both halves cancelled first).
    pub fn watch(
        &mut self,
        id: StreamId,
        params: StreamParameters,
    ) -> watch::Receiver<ProjectedValue> {
        self.stop(id);

        let (balance_tx, balance_rx) = watch::channel(ReconciledBalance::new());
        let initial = project(&params, &ReconciledBalance::new(), self.clock.now());
        let (value_tx, value_rx) = watch::channel(initial);

        let poll = spawn_poller(
            id,
            self.ledger.clone(),
            self.clock.clone(),
            self.poll_interval,
            balance_tx,
        );
        let refresh = spawn_refresh(
            params,
            self.clock.clone(),
            self.refresh_interval,
            balance_rx,
            value_tx,
        );

        self.tasks.insert(
            id,
            StreamTasks {
                poll,
                refresh,
                value: value_rx.clone(),
            },
        );
        value_rx
    }

    /// Cancel both tasks for a stream that left the visible set.
    /// Returns false when the id was not being watched.
    pub fn stop(&mut self, id: StreamId) -> bool {
        self.tasks.remove(&id).is_some()
    }

    /// Cancel everything, e.g. on navigation away or shutdown
    pub fn stop_all(&mut self) {
        self.tasks.clear();
    }

    pub fn is_watched(&self, id: StreamId) -> bool {
        self.tasks.contains_key(&id)
    }

    pub fn watched(&self) -> Vec<StreamId> {
        self.tasks.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Latest projection for a watched stream
    pub fn value(&self, id: StreamId) -> Option<ProjectedValue> {
        self.tasks.get(&id).map(|t| *t.value.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use paystream_core::{Address, HookConfig, StreamParameters};
    use paystream_client::{Claimable, LedgerError, LedgerResult};

    use crate::clock::ManualClock;

    struct StaticLedger {
        released: u64,
    }

    #[async_trait]
    impl StreamLedger for StaticLedger {
        async fn read_claimable(&self, _id: StreamId) -> LedgerResult<Claimable> {
            Ok(Claimable { released: self.released, fee: 0 })
        }

        async fn read_stream(&self, id: StreamId) -> LedgerResult<StreamParameters> {
            Err(LedgerError::UnknownStream(id))
        }

        async fn create_stream(
            &self,
            _params: &StreamParameters,
            _hooks: &HookConfig,
            _tag: &str,
        ) -> LedgerResult<StreamId> {
            Err(LedgerError::Rejected("not scripted".to_string()))
        }

        async fn update_stream(
            &self,
            _id: StreamId,
            _amount: u64,
            _starting_timestamp: u64,
            _duration: u64,
            _recurring: bool,
        ) -> LedgerResult<()> {
            Err(LedgerError::Rejected("not scripted".to_string()))
        }

        async fn cancel_stream(&self, _id: StreamId) -> LedgerResult<()> {
            Err(LedgerError::Rejected("not scripted".to_string()))
        }

        async fn collect_funds(&self, _id: StreamId) -> LedgerResult<()> {
            Err(LedgerError::Rejected("not scripted".to_string()))
        }

        async fn pause_stream(&self, _id: StreamId) -> LedgerResult<()> {
            Err(LedgerError::Rejected("not scripted".to_string()))
        }

        async fn resume_stream(&self, _id: StreamId) -> LedgerResult<()> {
            Err(LedgerError::Rejected("not scripted".to_string()))
        }

        async fn set_vault(&self, _id: StreamId, _vault: Address) -> LedgerResult<()> {
            Err(LedgerError::Rejected("not scripted".to_string()))
        }

        async fn set_hook_config(&self, _id: StreamId, _config: &HookConfig) -> LedgerResult<()> {
            Err(LedgerError::Rejected("not scripted".to_string()))
        }

        async fn approve(&self, _spender: Address, _amount: u64) -> LedgerResult<()> {
            Err(LedgerError::Rejected("not scripted".to_string()))
        }

        async fn stream_ids_for_recipient(
            &self,
            _recipient: Address,
        ) -> LedgerResult<Vec<StreamId>> {
            Ok(Vec::new())
        }

        async fn stream_ids_for_streamer(&self, _streamer: Address) -> LedgerResult<Vec<StreamId>> {
            Ok(Vec::new())
        }
    }

    fn params(start: u64, duration: u64) -> StreamParameters {
        StreamParameters::new(
            Address::new([1; Address::LEN]),
            Address::new([2; Address::LEN]),
            Address::new([3; Address::LEN]),
            1_000_000,
            start,
            duration,
            false,
        )
        .unwrap()
    }

    fn registry(clock: Arc<ManualClock>) -> MonitorRegistry {
        MonitorRegistry::new(
            Arc::new(StaticLedger { released: 250_000 }),
            clock,
            Duration::from_secs(1),
            Duration::from_secs(1),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_and_read_projection() {
        let clock = Arc::new(ManualClock::new(2800));
        let mut registry = registry(clock.clone());
        let id = StreamId::new([1; StreamId::LEN]);

        let rx = registry.watch(id, params(1000, 3600));
        assert!(registry.is_watched(id));

        tokio::time::sleep(Duration::from_secs(2)).await;
        // Half-way through: 500_000 streamed, 250_000 already claimed
        assert_eq!(rx.borrow().available_to_claim, 250_000);
        assert_eq!(registry.value(id).unwrap().remaining, 500_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_both_tasks_together() {
        let clock = Arc::new(ManualClock::new(2800));
        let mut registry = registry(clock.clone());
        let id = StreamId::new([1; StreamId::LEN]);

        let rx = registry.watch(id, params(1000, 3600));
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(registry.stop(id));
        assert!(!registry.is_watched(id));
        assert!(!registry.stop(id));

        // Aborted tasks stop publishing: the projection freezes even as
        // time moves on
        let frozen = *rx.borrow();
        clock.advance(600);
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(*rx.borrow(), frozen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_all_empties_registry() {
        let clock = Arc::new(ManualClock::new(2800));
        let mut registry = registry(clock);

        registry.watch(StreamId::new([1; StreamId::LEN]), params(1000, 3600));
        registry.watch(StreamId::new([2; StreamId::LEN]), params(5000, 7200));
        assert_eq!(registry.len(), 2);

        registry.stop_all();
        assert!(registry.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rewatching_replaces_task_pair() {
        let clock = Arc::new(ManualClock::new(2800));
        let mut registry = registry(clock);
        let id = StreamId::new([1; StreamId::LEN]);

        registry.watch(id, params(1000, 3600));
        registry.watch(id, params(1000, 7200));
        assert_eq!(registry.len(), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        // The replacement pair projects with the new duration
        let value = registry.value(id).unwrap();
        assert_eq!(value.streamed, 1_000_000u64 * 1800 / 7200);
    }
}
