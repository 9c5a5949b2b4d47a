//! # Clock Implementations

use std::sync::atomic::{AtomicU64, Ordering};

use paystream_core::Clock;

/// Wall clock, seconds since the Unix epoch
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        // Negative wall-clock time would predate the epoch; clamp rather
        // than wrap
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

/// Deterministic clock for tests and simulation
pub struct ManualClock(AtomicU64);

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self(AtomicU64::new(start))
    }

    pub fn set(&self, now: u64) {
        self.0.store(now, Ordering::Relaxed);
    }

    pub fn advance(&self, secs: u64) {
        self.0.fetch_add(secs, Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}
