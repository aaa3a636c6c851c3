use crate::consts;
use std::time::Duration;

/// How often the snake moves.
///
/// `interval` is the run's tick interval, shortened permanently on every
/// catch.  `boost` is the extra speed granted by Speed power-ups, kept
/// separately so that it can be taken back when symmetric reversion is
/// enabled.  Neither ever lets the snake move faster than
/// [`MIN_TICK_INTERVAL`][consts::MIN_TICK_INTERVAL].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Pace {
    interval: Duration,
    boost: Duration,
}

impl Pace {
    pub(super) fn new() -> Pace {
        Pace {
            interval: consts::INITIAL_TICK_INTERVAL,
            boost: Duration::ZERO,
        }
    }

    /// The run's tick interval, not counting Speed power-ups
    pub(super) fn interval(&self) -> Duration {
        self.interval
    }

    /// The time that should actually elapse between two ticks
    pub(super) fn period(&self) -> Duration {
        self.interval
            .saturating_sub(self.boost)
            .max(consts::MIN_TICK_INTERVAL)
    }

    /// Speed up in response to eating an item
    pub(super) fn on_catch(&mut self) {
        self.interval = self
            .interval
            .saturating_sub(consts::CATCH_SPEEDUP)
            .max(consts::MIN_TICK_INTERVAL);
    }

    /// Speed up by `amount` until [`Pace::unboost()`] is called
    pub(super) fn boost(&mut self, amount: Duration) {
        self.boost = self.boost.saturating_add(amount);
    }

    pub(super) fn unboost(&mut self, amount: Duration) {
        self.boost = self.boost.saturating_sub(amount);
    }
}

impl Default for Pace {
    fn default() -> Pace {
        Pace::new()
    }
}
