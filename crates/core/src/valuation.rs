//! # Valuation Projector
//!
//! Pure projection of a stream's value at an instant: the payer-facing
//! "funds still streaming" figure and the recipient-facing "claimable now"
//! figure. The continuous rate is recomputed from whole values on every
//! call; the multiplication is widened to `u128` and divided once, so no
//! rounding error accumulates across ticks.
//!
//! Every output is clamped into `[0, total_amount]` regardless of what the
//! authoritative source reported — a malformed ledger response can never
//! surface as a negative or over-large displayed value.

use serde::{Deserialize, Serialize};

use crate::status::{derive_status, StreamStatus};
use crate::types::balance::ReconciledBalance;
use crate::types::stream::StreamParameters;

/// Projected view of one stream at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedValue {
    /// Amount released by elapsed time, ignoring withdrawals
    pub streamed: u64,
    /// Amount not yet released; the payer-facing view
    pub remaining: u64,
    /// Released minus authoritatively withdrawn; the recipient-facing view
    pub available_to_claim: u64,
    /// Display-only continuous rate, recomputed per call
    pub rate_per_second: f64,
    pub status: StreamStatus,
}

/// Project a stream's value at `now`.
///
/// Idempotent: identical inputs produce identical output. `params` must
/// have survived validation — a zero duration is a precondition violation
/// upstream, not a branch here.
pub fn project(
    params: &StreamParameters,
    reconciled: &ReconciledBalance,
    now: u64,
) -> ProjectedValue {
    let status = derive_status(params.starting_timestamp, params.duration, now);
    let total = params.total_amount;
    let claimed = reconciled.last_known_claimed;
    let unclaimed_total = total.saturating_sub(claimed);
    let rate_per_second = total as f64 / params.duration as f64;

    if !status.is_started {
        return ProjectedValue {
            streamed: 0,
            remaining: total,
            available_to_claim: 0,
            rate_per_second,
            status,
        };
    }

    if status.is_finished {
        // Saturated: everything released, whatever the ledger has not
        // paid out yet is claimable.
        return ProjectedValue {
            streamed: total,
            remaining: 0,
            available_to_claim: unclaimed_total,
            rate_per_second,
            status,
        };
    }

    // Clock skew after being marked started clamps to zero elapsed
    let elapsed = now.saturating_sub(params.starting_timestamp);

    // elapsed < duration here, so the widened product divides back into u64
    let streamed = (total as u128 * elapsed as u128 / params.duration as u128) as u64;
    let remaining = total.saturating_sub(streamed);
    let available_to_claim = streamed.saturating_sub(claimed).min(unclaimed_total);

    ProjectedValue {
        streamed,
        remaining,
        available_to_claim,
        rate_per_second,
        status,
    }
}

/// Render a fixed-point amount with the token's decimal scaling,
/// e.g. `1_500_000` at 6 decimals -> `"1.500000"`.
pub fn format_amount(amount: u64, decimals: u32) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let scale = 10u64.pow(decimals);
    format!(
        "{}.{:0width$}",
        amount / scale,
        amount % scale,
        width = decimals as usize
    )
}
