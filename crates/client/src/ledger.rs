//! # Ledger Capability
//!
//! The external settlement authority at its interface boundary. Custody,
//! authorization, and hook invocation all live behind this trait; the
//! engine only issues requests and interprets responses. Every operation
//! is asynchronous, fallible, request/response, with no implicit retry —
//! a failed poll is superseded by the next tick, and a failed
//! user-initiated call surfaces as a discrete outcome.
//!
//! The capability is passed explicitly (`Arc<dyn StreamLedger>`) into
//! whatever needs it; there is no ambient singleton dispatcher.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use paystream_core::{Address, HookConfig, StreamId, StreamParameters};

/// One authoritative claimable read: the collectible amount and the fee
/// owed on it. The cumulative claimed figure is their sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claimable {
    pub released: u64,
    pub fee: u64,
}

/// Failures crossing the ledger boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Ledger unreachable: {0}")]
    Unreachable(String),

    #[error("Ledger call timed out after {0}ms")]
    Timeout(u64),

    #[error("Ledger rejected the operation: {0}")]
    Rejected(String),

    #[error("Malformed ledger response: {0}")]
    MalformedResponse(String),

    #[error("Unknown stream: {0}")]
    UnknownStream(StreamId),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Settlement authority operations consumed by the engine.
#[async_trait]
pub trait StreamLedger: Send + Sync {
    /// Fetch the authoritative parameter snapshot for a stream
    async fn read_stream(&self, id: StreamId) -> LedgerResult<StreamParameters>;

    /// Fetch the collectible-amount/fee pair for a stream
    async fn read_claimable(&self, id: StreamId) -> LedgerResult<Claimable>;

    /// Register a new stream; returns its content-hash handle
    async fn create_stream(
        &self,
        params: &StreamParameters,
        hooks: &HookConfig,
        tag: &str,
    ) -> LedgerResult<StreamId>;

    /// Replace a stream's economic terms wholesale
    async fn update_stream(
        &self,
        id: StreamId,
        amount: u64,
        starting_timestamp: u64,
        duration: u64,
        recurring: bool,
    ) -> LedgerResult<()>;

    async fn cancel_stream(&self, id: StreamId) -> LedgerResult<()>;

    async fn collect_funds(&self, id: StreamId) -> LedgerResult<()>;

    async fn pause_stream(&self, id: StreamId) -> LedgerResult<()>;

    async fn resume_stream(&self, id: StreamId) -> LedgerResult<()>;

    /// Associate a secondary payout destination consulted by
    /// funds-collected hooks
    async fn set_vault(&self, id: StreamId, vault: Address) -> LedgerResult<()>;

    /// Replace the hook configuration wholesale
    async fn set_hook_config(&self, id: StreamId, config: &HookConfig) -> LedgerResult<()>;

    /// Token pre-authorization; a precondition for create/update that the
    /// ledger enforces, not this engine
    async fn approve(&self, spender: Address, amount: u64) -> LedgerResult<()>;

    /// Bulk handle listing for the recipient-facing view
    async fn stream_ids_for_recipient(&self, recipient: Address) -> LedgerResult<Vec<StreamId>>;

    /// Bulk handle listing for the payer-facing view
    async fn stream_ids_for_streamer(&self, streamer: Address) -> LedgerResult<Vec<StreamId>>;
}
