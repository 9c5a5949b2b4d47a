//! # Clock Source
//!
//! Wall-clock seconds provider. Implementations must be monotonic, and a
//! single logical tick must read the clock exactly once, reusing that
//! value for every derived computation — reading twice across a tick
//! boundary can produce inconsistent views of the same stream (started
//! but with a nonzero countdown).

/// Monotonic wall-clock time, seconds resolution.
pub trait Clock: Send + Sync {
    /// Current time in seconds since the Unix epoch.
    fn now(&self) -> u64;
}
