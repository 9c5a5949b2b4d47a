//! # Stream Lifecycle State Machine
//!
//! Governs which user-initiated operations are legal given the stream's
//! current phase, and which hook transition points each operation crosses.
//! The job here is to stop an obviously-invalid operation before it is
//! attempted against the ledger — not to re-derive ledger-side
//! authorization rules.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CoreResult, StreamError};
use crate::status::derive_status;
use crate::types::hooks::{HookConfig, HookEvent, HookPhase};
use crate::types::stream::StreamParameters;

/// Lifecycle phase, derived from time plus the closed latch.
///
/// Paused is an overlay flag, not a phase: a paused stream still moves
/// Pending -> Active -> Finished with the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamPhase {
    Pending,
    Active,
    Finished,
    Closed,
}

impl StreamPhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamPhase::Closed)
    }
}

impl fmt::Display for StreamPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StreamPhase::Pending => "pending",
            StreamPhase::Active => "active",
            StreamPhase::Finished => "finished",
            StreamPhase::Closed => "closed",
        };
        write!(f, "{}", s)
    }
}

/// User-initiated operations gated by the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamOp {
    Update,
    Cancel,
    Collect,
    Pause,
    Resume,
    SetHooks,
    SetVault,
}

impl fmt::Display for StreamOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StreamOp::Update => "update",
            StreamOp::Cancel => "cancel",
            StreamOp::Collect => "collect",
            StreamOp::Pause => "pause",
            StreamOp::Resume => "resume",
            StreamOp::SetHooks => "set-hooks",
            StreamOp::SetVault => "set-vault",
        };
        write!(f, "{}", s)
    }
}

/// Derive the current phase from the parameter snapshot, the explicit
/// cancellation latch, and a single clock read.
pub fn phase_of(params: &StreamParameters, closed: bool, now: u64) -> StreamPhase {
    if closed {
        return StreamPhase::Closed;
    }
    let status = derive_status(params.starting_timestamp, params.duration, now);
    if !status.is_started {
        StreamPhase::Pending
    } else if !status.is_finished {
        StreamPhase::Active
    } else {
        StreamPhase::Finished
    }
}

/// Check operation legality before it reaches the external ledger.
pub fn check_op(op: StreamOp, phase: StreamPhase, paused: bool) -> CoreResult<()> {
    let legal = match op {
        StreamOp::Update | StreamOp::Cancel | StreamOp::Pause | StreamOp::Resume => {
            matches!(phase, StreamPhase::Pending | StreamPhase::Active)
        }
        StreamOp::Collect => matches!(phase, StreamPhase::Active | StreamPhase::Finished),
        StreamOp::SetHooks | StreamOp::SetVault => !phase.is_terminal(),
    };
    if !legal {
        return Err(StreamError::not_allowed(op, phase));
    }

    // Paused overlay: release is suspended, so collection is too
    match op {
        StreamOp::Collect | StreamOp::Pause if paused => Err(StreamError::StreamPaused),
        StreamOp::Resume if !paused => Err(StreamError::NotPaused),
        _ => Ok(()),
    }
}

/// Transition points an operation crosses
pub fn hook_events(op: StreamOp) -> &'static [HookEvent] {
    match op {
        StreamOp::Update => &[HookEvent::StreamUpdated],
        StreamOp::Cancel => &[HookEvent::StreamClosed],
        StreamOp::Collect => &[HookEvent::FundsCollected],
        StreamOp::Pause => &[HookEvent::StreamPaused],
        StreamOp::Resume => &[HookEvent::StreamUnpaused],
        StreamOp::SetHooks | StreamOp::SetVault => &[],
    }
}

/// Hook entries the ledger will invoke for an operation under the active
/// configuration, in firing order.
pub fn firing_hooks(config: &HookConfig, op: StreamOp) -> Vec<(HookEvent, HookPhase)> {
    let mut firing = Vec::new();
    for &event in hook_events(op) {
        for phase in [HookPhase::Before, HookPhase::After] {
            if config.fires(event, phase) {
                firing.push((event, phase));
            }
        }
    }
    firing
}
