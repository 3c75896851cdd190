// Cleanup outcome counters
//
// Purpose: make removal outcomes measurable without adding failure modes to
// teardown paths. Counters are relaxed atomics; reading them is lossy by
// design and only used for reporting and test assertions.

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counter.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Process-wide cleanup statistics.
#[derive(Debug, Default)]
pub struct CleanupStats {
    /// Successful file removals.
    pub removals: Counter,
    /// Removals that reported an error.
    pub removal_failures: Counter,
    /// Rejected validation candidates.
    pub validation_failures: Counter,
    /// Registry drains performed (0 or 1 per registry in normal operation).
    pub drains: Counter,
}

impl CleanupStats {
    /// Point-in-time copy of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            removals: self.removals.get(),
            removal_failures: self.removal_failures.get(),
            validation_failures: self.validation_failures.get(),
            drains: self.drains.get(),
        }
    }
}

/// Plain-value view of [`CleanupStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub removals: u64,
    pub removal_failures: u64,
    pub validation_failures: u64,
    pub drains: u64,
}

static STATS: Lazy<CleanupStats> = Lazy::new(CleanupStats::default);

pub fn global() -> &'static CleanupStats {
    &STATS
}
