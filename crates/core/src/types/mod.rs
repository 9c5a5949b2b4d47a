//! # Core Types
//!
//! Identifier handles, stream terms, hook configuration, and the
//! reconciled balance state owned by the poller.

pub mod balance;
pub mod hooks;
pub mod ids;
pub mod stream;

pub use balance::{ClaimableSnapshot, ReconcileOutcome, ReconciledBalance};
pub use hooks::{HookConfig, HookEvent, HookPhase};
pub use ids::{Address, StreamId};
pub use stream::StreamParameters;
