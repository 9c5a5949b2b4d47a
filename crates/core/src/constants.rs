//! # Engine Constants

/// Display decimals of the streamed token's smallest unit (6-decimal
/// fixed-point, e.g. 1_000_000 = 1.0).
pub const DEFAULT_TOKEN_DECIMALS: u32 = 6;

/// Default cadence for reconciliation polls and projection refreshes.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 1;

/// Seconds in one hour; durations are entered in hours at the edges.
pub const SECONDS_PER_HOUR: u64 = 3600;
