use super::direction::Direction;
use super::grid::{Cell, Grid};
use super::item::{Item, MutationKind};
use super::powerup::ActivePowerUp;
use super::scoring::EvolutionTier;
use super::Phase;
use std::time::Duration;

/// An immutable picture of a game, for drawing.  Holds no references into the
/// engine.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot {
    pub(crate) grid: Grid,
    /// Snake segments, head first
    pub(crate) snake: Vec<Cell>,
    /// The direction the snake last moved in, if it has moved yet
    pub(crate) heading: Option<Direction>,
    pub(crate) item: Option<Item>,
    pub(crate) score: u32,
    pub(crate) tier: EvolutionTier,
    pub(crate) power_up: Option<ActivePowerUp>,
    pub(crate) double_points_pending: bool,
    pub(crate) phase: Phase,
    /// The run's tick interval, not counting Speed power-ups
    pub(crate) tick_interval: Duration,
    /// The time between ticks, including any Speed boost
    pub(crate) period: Duration,
}

impl Snapshot {
    pub(crate) fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }

    pub(crate) fn power_up_kind(&self) -> Option<MutationKind> {
        self.power_up.map(|p| p.kind)
    }
}
