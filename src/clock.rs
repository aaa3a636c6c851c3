//! Timekeeping for the front end's event loop.  Both types take the current
//! time as an argument so that they can be tested without sleeping.
use std::time::{Duration, Instant};

/// Schedules game ticks
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Ticker {
    next: Option<Instant>,
}

impl Ticker {
    pub(crate) fn new() -> Ticker {
        Ticker::default()
    }

    /// Return how long to wait from `now` until the next tick is due,
    /// scheduling one `period` from now if none is pending
    pub(crate) fn wait(&mut self, now: Instant, period: Duration) -> Duration {
        self.next
            .get_or_insert(now + period)
            .saturating_duration_since(now)
    }

    /// If a tick is due at `now`, clear it and return `true`
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        if self.next.is_some_and(|t| t <= now) {
            self.next = None;
            true
        } else {
            false
        }
    }

    /// Forget any pending tick
    pub(crate) fn reset(&mut self) {
        self.next = None;
    }
}

/// Measures the real time between successive calls to [`Stopwatch::lap()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Stopwatch {
    last: Instant,
}

impl Stopwatch {
    pub(crate) fn new(now: Instant) -> Stopwatch {
        Stopwatch { last: now }
    }

    pub(crate) fn lap(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = self.last.max(now);
        elapsed
    }
}
