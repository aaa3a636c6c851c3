use super::item::MutationKind;
use super::pace::Pace;
use crate::consts;
use std::time::Duration;

/// A power-up as seen from outside the engine
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ActivePowerUp {
    pub(crate) kind: MutationKind,
    pub(crate) remaining: Duration,
}

/// Tracks the (at most one) active power-up and applies & reverts its
/// effects.
///
/// The countdown is advanced by [`PowerUps::tick()`] with real elapsed time;
/// nothing here reads a clock.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct PowerUps {
    active: Option<Active>,

    /// Set by DoublePoints; cleared by the next catch, or when the power-up
    /// ends, whichever comes first
    double_points: bool,

    /// Whether ending a Speed power-up gives back the speed it granted
    symmetric_speed_revert: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Active {
    kind: MutationKind,
    remaining: Duration,
    /// How much the power-up sped up the snake
    speedup: Duration,
}

impl PowerUps {
    pub(super) fn new(symmetric_speed_revert: bool) -> PowerUps {
        PowerUps {
            active: None,
            double_points: false,
            symmetric_speed_revert,
        }
    }

    pub(super) fn active(&self) -> Option<ActivePowerUp> {
        self.active.map(|a| ActivePowerUp {
            kind: a.kind,
            remaining: a.remaining,
        })
    }

    pub(super) fn shielded(&self) -> bool {
        self.active.is_some_and(|a| a.kind == MutationKind::Shield)
    }

    pub(super) fn double_points_pending(&self) -> bool {
        self.double_points
    }

    /// Start a power-up of the given kind, ending any current one first.
    /// Returns the kind of the power-up that was cut short, if any.
    pub(super) fn activate(&mut self, kind: MutationKind, pace: &mut Pace) -> Option<MutationKind> {
        let replaced = self.deactivate(pace);
        let speedup = match kind {
            MutationKind::Speed => {
                pace.boost(consts::SPEED_POWERUP_SPEEDUP);
                consts::SPEED_POWERUP_SPEEDUP
            }
            MutationKind::DoublePoints => {
                self.double_points = true;
                Duration::ZERO
            }
            MutationKind::Shield | MutationKind::Camouflage => Duration::ZERO,
        };
        self.active = Some(Active {
            kind,
            remaining: consts::POWERUP_DURATION,
            speedup,
        });
        replaced
    }

    /// Count down the active power-up by `elapsed`.  Returns the kind of the
    /// power-up if this caused it to expire.
    pub(super) fn tick(&mut self, elapsed: Duration, pace: &mut Pace) -> Option<MutationKind> {
        let active = self.active.as_mut()?;
        active.remaining = active.remaining.saturating_sub(elapsed);
        if active.remaining.is_zero() {
            self.deactivate(pace)
        } else {
            None
        }
    }

    /// Consume the DoublePoints flag, returning whether it was set
    pub(super) fn take_double_points(&mut self) -> bool {
        std::mem::take(&mut self.double_points)
    }

    /// End the active power-up, if any, and revert its effects
    pub(super) fn deactivate(&mut self, pace: &mut Pace) -> Option<MutationKind> {
        let active = self.active.take()?;
        match active.kind {
            MutationKind::Speed => {
                // Speed normally sticks around after the power-up is gone
                if self.symmetric_speed_revert {
                    pace.unboost(active.speedup);
                }
            }
            MutationKind::DoublePoints => self.double_points = false,
            MutationKind::Shield | MutationKind::Camouflage => (),
        }
        Some(active.kind)
    }
}
