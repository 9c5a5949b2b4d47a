//! # Core Error Types
//!
//! Common error types shared between the monitor service and client code.
//! Precondition violations are raised here, synchronously, before any
//! external call is attempted; arithmetic hazards (division by zero,
//! negative elapsed time) are prevented by construction instead of being
//! represented as runtime variants.

use thiserror::Error;

use crate::lifecycle::{StreamOp, StreamPhase};

/// Engine errors for validation and lifecycle gating
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    // ========================================================================
    // Parameter Validation
    // ========================================================================

    #[error("Invalid duration: must be greater than zero")]
    InvalidDuration,

    #[error("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[error("Zero address not allowed for {0}")]
    ZeroAddress(&'static str),

    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    // ========================================================================
    // Lifecycle Gating
    // ========================================================================

    #[error("Operation {op} not allowed while stream is {phase}")]
    OperationNotAllowed { op: StreamOp, phase: StreamPhase },

    #[error("Stream is paused")]
    StreamPaused,

    #[error("Stream is not paused")]
    NotPaused,

    // ========================================================================
    // Math Guards
    // ========================================================================

    #[error("Math overflow")]
    MathOverflow,
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, StreamError>;

impl StreamError {
    /// Shorthand for a lifecycle rejection
    pub fn not_allowed(op: StreamOp, phase: StreamPhase) -> Self {
        Self::OperationNotAllowed { op, phase }
    }
}
