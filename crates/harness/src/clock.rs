// model = "claude-opus-4-5"
// created = "2026-10-14"
// modified = "2026-10-14"
// driver = "Isaac Clayton"

//! Elapsed-time measurement.

use std::cell::Cell;
use std::time::{Duration, Instant};

use tracing::debug;

/// A source of monotonically increasing timestamps.
pub trait Clock {
    /// Time elapsed since some fixed, clock-specific origin.
    fn now(&self) -> Duration;

    /// Time elapsed since `start`, a value previously returned by `now`.
    fn since(&self, start: Duration) -> Duration {
        return self.now().saturating_sub(start);
    }
}

/// Wall time from `std::time::Instant`.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> MonotonicClock {
        return MonotonicClock {
            origin: Instant::now(),
        };
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        return Self::new();
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        return self.origin.elapsed();
    }
}

/// A clock that only moves when told to. For tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> ManualClock {
        return ManualClock::default();
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        return self.now.get();
    }
}

/// Run `batch` once and return its result with the time it took.
pub fn time_batch<C: Clock, T>(clock: &C, label: &str, batch: impl FnOnce() -> T) -> (T, Duration) {
    let start = clock.now();
    let out = batch();
    let elapsed = clock.since(start);
    debug!(label, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "batch finished");
    return (out, elapsed);
}
