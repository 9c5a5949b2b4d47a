//! # PayStream Core - Shared Engine Logic
//!
//! This crate contains the pure types and valuation logic shared between
//! the monitor service and client code. It provides:
//!
//! - Type definitions for streams, hook configuration, and identifiers
//! - The valuation projector (locally-computed claimable balances)
//! - Reconciled balance state with last-write-wins merge
//! - The lifecycle state machine gating user-initiated operations
//!
//! Everything here is side-effect free: no clock reads, no I/O. Callers
//! read the clock once per tick and thread `now` through every function.

pub mod clock;
pub mod constants;
pub mod errors;
pub mod lifecycle;
pub mod status;
pub mod types;
pub mod valuation;

// Re-export commonly used items
pub use clock::Clock;
pub use constants::*;
pub use errors::{CoreResult, StreamError};
pub use lifecycle::{check_op, hook_events, phase_of, StreamOp, StreamPhase};
pub use status::{derive_status, StreamStatus};
pub use types::*;
pub use valuation::{format_amount, project, ProjectedValue};
