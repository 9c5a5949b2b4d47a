//! # Stream Parameters

use serde::{Deserialize, Serialize};

use crate::errors::{CoreResult, StreamError};
use crate::types::ids::Address;

/// Immutable economic terms of a single stream.
///
/// A snapshot is never mutated in place: an update replaces it wholesale,
/// so the per-second rate is always recomputed from whole values instead
/// of being persisted and accumulating rounding error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamParameters {
    pub streamer: Address,
    pub streamer_vault: Address,
    pub recipient: Address,
    pub recipient_vault: Address,
    pub token: Address,
    /// Total amount in the token's smallest indivisible unit
    pub total_amount: u64,
    /// Seconds since epoch; may be in the future
    pub starting_timestamp: u64,
    /// Streaming window in seconds; always > 0 once validated
    pub duration: u64,
    /// Reserved: restart semantics are ledger-defined and never projected locally
    pub recurring: bool,
}

impl StreamParameters {
    /// Build a validated parameter snapshot. Vaults start unset and are
    /// associated later through the vault operation.
    pub fn new(
        streamer: Address,
        recipient: Address,
        token: Address,
        total_amount: u64,
        starting_timestamp: u64,
        duration: u64,
        recurring: bool,
    ) -> CoreResult<Self> {
        let params = Self {
            streamer,
            streamer_vault: Address::ZERO,
            recipient,
            recipient_vault: Address::ZERO,
            token,
            total_amount,
            starting_timestamp,
            duration,
            recurring,
        };
        params.validate()?;
        Ok(params)
    }

    /// Reject malformed terms before anything reaches the ledger.
    /// A zero duration in particular must never survive construction:
    /// downstream valuation divides by it.
    pub fn validate(&self) -> CoreResult<()> {
        if self.duration == 0 {
            return Err(StreamError::InvalidDuration);
        }
        if self.total_amount == 0 {
            return Err(StreamError::InvalidAmount);
        }
        if self.streamer.is_zero() {
            return Err(StreamError::ZeroAddress("streamer"));
        }
        if self.recipient.is_zero() {
            return Err(StreamError::ZeroAddress("recipient"));
        }
        if self.token.is_zero() {
            return Err(StreamError::ZeroAddress("token"));
        }
        Ok(())
    }

    /// End of the streaming window
    pub fn end_time(&self) -> u64 {
        self.starting_timestamp.saturating_add(self.duration)
    }
}
