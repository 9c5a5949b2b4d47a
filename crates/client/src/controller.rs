//! # Stream Controller
//!
//! Exclusive owner of one stream's client-side state: the parameter
//! snapshot, the hook configuration, and the paused/closed latches. Every
//! user-initiated operation passes the lifecycle state machine first, so
//! an obviously-invalid request is rejected before anything reaches the
//! external ledger.
//!
//! The ledger capability is injected at construction; the controller
//! never reaches for ambient state. Callers read the clock once per tick
//! and pass `now` into each operation.

use std::sync::Arc;

use paystream_core::{
    check_op, phase_of, project, Address, HookConfig, ProjectedValue, ReconciledBalance,
    StreamId, StreamOp, StreamParameters, StreamPhase,
};

use crate::errors::ClientResult;
use crate::ledger::StreamLedger;
use crate::metadata::{MetadataError, MetadataStore, StreamRecord};

pub struct StreamController {
    ledger: Arc<dyn StreamLedger>,
    id: StreamId,
    params: StreamParameters,
    hooks: HookConfig,
    paused: bool,
    closed: bool,
}

impl std::fmt::Debug for StreamController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamController")
            .field("id", &self.id)
            .field("params", &self.params)
            .field("hooks", &self.hooks)
            .field("paused", &self.paused)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl StreamController {
    /// Validate terms locally, then register the stream on the ledger.
    pub async fn create(
        ledger: Arc<dyn StreamLedger>,
        params: StreamParameters,
        hooks: HookConfig,
        tag: &str,
    ) -> ClientResult<Self> {
        params.validate()?;
        let id = ledger.create_stream(&params, &hooks, tag).await?;
        Ok(Self {
            ledger,
            id,
            params,
            hooks,
            paused: false,
            closed: false,
        })
    }

    /// Take over an existing stream from its authoritative snapshot.
    ///
    /// Hook switches are not readable back from the ledger; an attached
    /// controller starts from the disabled record and replaces it
    /// wholesale on the first `set_hooks`.
    pub async fn attach(ledger: Arc<dyn StreamLedger>, id: StreamId) -> ClientResult<Self> {
        let params = ledger.read_stream(id).await?;
        params.validate()?;
        Ok(Self {
            ledger,
            id,
            params,
            hooks: HookConfig::disabled(),
            paused: false,
            closed: false,
        })
    }

    pub fn id(&self) -> StreamId {
        self.id
    }

    pub fn params(&self) -> &StreamParameters {
        &self.params
    }

    pub fn hooks(&self) -> &HookConfig {
        &self.hooks
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn phase(&self, now: u64) -> StreamPhase {
        phase_of(&self.params, self.closed, now)
    }

    /// Project this stream's value against the given reconciled state
    pub fn project(&self, reconciled: &ReconciledBalance, now: u64) -> ProjectedValue {
        project(&self.params, reconciled, now)
    }

    fn ensure(&self, op: StreamOp, now: u64) -> ClientResult<()> {
        check_op(op, self.phase(now), self.paused)?;
        Ok(())
    }

    /// Best-effort off-chain record write. The ledger create has already
    /// been acknowledged when this runs, so a failure surfaces to the
    /// caller without unwinding the stream.
    pub async fn register_record(
        &self,
        store: &dyn MetadataStore,
        tag: &str,
    ) -> Result<StreamRecord, MetadataError> {
        store
            .create_record(&StreamRecord {
                streamer: self.params.streamer,
                recipient: self.params.recipient,
                token_address: self.params.token,
                tag: tag.to_string(),
            })
            .await
    }

    /// Replace the stream's terms wholesale. Status derived from the new
    /// snapshot is effective immediately on ledger ack.
    pub async fn update(
        &mut self,
        amount: u64,
        starting_timestamp: u64,
        duration: u64,
        recurring: bool,
        now: u64,
    ) -> ClientResult<()> {
        self.ensure(StreamOp::Update, now)?;
        let replacement = StreamParameters {
            total_amount: amount,
            starting_timestamp,
            duration,
            recurring,
            ..self.params
        };
        replacement.validate()?;
        self.ledger
            .update_stream(self.id, amount, starting_timestamp, duration, recurring)
            .await?;
        self.params = replacement;
        Ok(())
    }

    /// Terminate the stream. The parameters are considered dead afterwards
    /// and any further mutation is rejected locally.
    pub async fn cancel(&mut self, now: u64) -> ClientResult<()> {
        self.ensure(StreamOp::Cancel, now)?;
        self.ledger.cancel_stream(self.id).await?;
        self.closed = true;
        Ok(())
    }

    /// Withdraw released funds; lifecycle state is unchanged, the claimed
    /// figure grows ledger-side and arrives through reconciliation.
    pub async fn collect(&self, now: u64) -> ClientResult<()> {
        self.ensure(StreamOp::Collect, now)?;
        self.ledger.collect_funds(self.id).await?;
        Ok(())
    }

    pub async fn pause(&mut self, now: u64) -> ClientResult<()> {
        self.ensure(StreamOp::Pause, now)?;
        self.ledger.pause_stream(self.id).await?;
        self.paused = true;
        Ok(())
    }

    pub async fn resume(&mut self, now: u64) -> ClientResult<()> {
        self.ensure(StreamOp::Resume, now)?;
        self.ledger.resume_stream(self.id).await?;
        self.paused = false;
        Ok(())
    }

    /// Replace the hook record wholesale. The new configuration applies to
    /// operations initiated after the ledger acknowledges it; an operation
    /// already in flight fires under whichever record the ledger held.
    pub async fn set_hooks(&mut self, config: HookConfig, now: u64) -> ClientResult<()> {
        self.ensure(StreamOp::SetHooks, now)?;
        self.ledger.set_hook_config(self.id, &config).await?;
        self.hooks = config;
        Ok(())
    }

    /// Associate the recipient's secondary payout destination
    pub async fn set_vault(&mut self, vault: Address, now: u64) -> ClientResult<()> {
        self.ensure(StreamOp::SetVault, now)?;
        self.ledger.set_vault(self.id, vault).await?;
        self.params.recipient_vault = vault;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ClientError;
    use crate::ledger::{Claimable, LedgerError, LedgerResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records every call that reaches the ledger boundary
    struct MockLedger {
        calls: Mutex<Vec<&'static str>>,
        fail: bool,
    }

    impl MockLedger {
        fn new() -> Arc<Self> {
            Arc::new(Self { calls: Mutex::new(Vec::new()), fail: false })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self { calls: Mutex::new(Vec::new()), fail: true })
        }

        fn record(&self, call: &'static str) -> LedgerResult<()> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                Err(LedgerError::Rejected("transaction reverted".to_string()))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StreamLedger for MockLedger {
        async fn read_stream(&self, id: StreamId) -> LedgerResult<StreamParameters> {
            self.record("read_stream")?;
            Err(LedgerError::UnknownStream(id))
        }

        async fn read_claimable(&self, _id: StreamId) -> LedgerResult<Claimable> {
            self.record("read_claimable")?;
            Ok(Claimable { released: 0, fee: 0 })
        }

        async fn create_stream(
            &self,
            _params: &StreamParameters,
            _hooks: &HookConfig,
            _tag: &str,
        ) -> LedgerResult<StreamId> {
            self.record("create_stream")?;
            Ok(StreamId::new([7; StreamId::LEN]))
        }

        async fn update_stream(
            &self,
            _id: StreamId,
            _amount: u64,
            _starting_timestamp: u64,
            _duration: u64,
            _recurring: bool,
        ) -> LedgerResult<()> {
            self.record("update_stream")
        }

        async fn cancel_stream(&self, _id: StreamId) -> LedgerResult<()> {
            self.record("cancel_stream")
        }

        async fn collect_funds(&self, _id: StreamId) -> LedgerResult<()> {
            self.record("collect_funds")
        }

        async fn pause_stream(&self, _id: StreamId) -> LedgerResult<()> {
            self.record("pause_stream")
        }

        async fn resume_stream(&self, _id: StreamId) -> LedgerResult<()> {
            self.record("resume_stream")
        }

        async fn set_vault(&self, _id: StreamId, _vault: Address) -> LedgerResult<()> {
            self.record("set_vault")
        }

        async fn set_hook_config(&self, _id: StreamId, _config: &HookConfig) -> LedgerResult<()> {
            self.record("set_hook_config")
        }

        async fn approve(&self, _spender: Address, _amount: u64) -> LedgerResult<()> {
            self.record("approve")
        }

        async fn stream_ids_for_recipient(&self, _recipient: Address) -> LedgerResult<Vec<StreamId>> {
            self.record("stream_ids_for_recipient")?;
            Ok(Vec::new())
        }

        async fn stream_ids_for_streamer(&self, _streamer: Address) -> LedgerResult<Vec<StreamId>> {
            self.record("stream_ids_for_streamer")?;
            Ok(Vec::new())
        }
    }

    fn addr(byte: u8) -> Address {
        Address::new([byte; Address::LEN])
    }

    fn params(start: u64, duration: u64) -> StreamParameters {
        StreamParameters::new(addr(1), addr(2), addr(3), 1_000_000, start, duration, false)
            .unwrap()
    }

    #[tokio::test]
    async fn test_update_on_closed_never_reaches_ledger() {
        let ledger = MockLedger::new();
        let mut controller = StreamController::create(
            ledger.clone(),
            params(1000, 3600),
            HookConfig::disabled(),
            "salary",
        )
        .await
        .unwrap();

        controller.cancel(500).await.unwrap();
        assert_eq!(controller.phase(600), StreamPhase::Closed);

        let err = controller.update(2_000_000, 2000, 7200, false, 600).await.unwrap_err();
        assert!(matches!(err, ClientError::Precondition(_)));

        // Cancellation went out; the illegal update did not
        assert_eq!(ledger.calls(), vec!["create_stream", "cancel_stream"]);
    }

    #[tokio::test]
    async fn test_update_replaces_parameters_wholesale() {
        let ledger = MockLedger::new();
        let mut controller = StreamController::create(
            ledger.clone(),
            params(1000, 3600),
            HookConfig::disabled(),
            "salary",
        )
        .await
        .unwrap();

        assert_eq!(controller.phase(2000), StreamPhase::Active);
        controller.update(2_000_000, 10_000, 7200, true, 2000).await.unwrap();

        assert_eq!(controller.params().total_amount, 2_000_000);
        assert_eq!(controller.params().duration, 7200);
        assert!(controller.params().recurring);
        // Status recomputes from the new snapshot immediately
        assert_eq!(controller.phase(2000), StreamPhase::Pending);
    }

    #[tokio::test]
    async fn test_invalid_update_rejected_locally() {
        let ledger = MockLedger::new();
        let mut controller = StreamController::create(
            ledger.clone(),
            params(1000, 3600),
            HookConfig::disabled(),
            "salary",
        )
        .await
        .unwrap();

        let err = controller.update(2_000_000, 2000, 0, false, 2000).await.unwrap_err();
        assert!(matches!(err, ClientError::Precondition(_)));
        assert_eq!(ledger.calls(), vec!["create_stream"]);
    }

    #[tokio::test]
    async fn test_collect_blocked_while_paused() {
        let ledger = MockLedger::new();
        let mut controller = StreamController::create(
            ledger.clone(),
            params(1000, 3600),
            HookConfig::disabled(),
            "salary",
        )
        .await
        .unwrap();

        controller.pause(2000).await.unwrap();
        assert!(controller.collect(2100).await.is_err());

        controller.resume(2200).await.unwrap();
        controller.collect(2300).await.unwrap();

        assert_eq!(
            ledger.calls(),
            vec!["create_stream", "pause_stream", "resume_stream", "collect_funds"]
        );
    }

    #[tokio::test]
    async fn test_hook_mutation_frozen_after_close() {
        let ledger = MockLedger::new();
        let mut controller = StreamController::create(
            ledger.clone(),
            params(1000, 3600),
            HookConfig::disabled(),
            "salary",
        )
        .await
        .unwrap();

        // Legal while merely finished
        controller
            .set_hooks(
                HookConfig { call_after_funds_collected: true, ..Default::default() },
                10_000,
            )
            .await
            .unwrap();
        assert!(controller.hooks().call_after_funds_collected);

        // But frozen once the stream is closed
        let ledger = MockLedger::new();
        let mut controller = StreamController::create(
            ledger.clone(),
            params(1000, 3600),
            HookConfig::disabled(),
            "salary",
        )
        .await
        .unwrap();
        controller.cancel(2000).await.unwrap();
        let err = controller
            .set_hooks(
                HookConfig { call_after_funds_collected: true, ..Default::default() },
                2100,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Precondition(_)));
        assert_eq!(ledger.calls(), vec!["create_stream", "cancel_stream"]);
    }

    #[tokio::test]
    async fn test_ledger_rejection_surfaces_as_discrete_failure() {
        let ledger = MockLedger::failing();
        let err = StreamController::create(
            ledger.clone(),
            params(1000, 3600),
            HookConfig::disabled(),
            "salary",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ClientError::Ledger(LedgerError::Rejected(_))));
    }
}
