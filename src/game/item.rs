use super::grid::{Cell, Grid};
use super::snake::Snake;
use enum_map::Enum;
use rand::{seq::IteratorRandom, Rng};
use std::fmt;

/// The special effect carried by an item
#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub(crate) enum MutationKind {
    Speed,
    Shield,
    DoublePoints,
    Camouflage,
}

impl MutationKind {
    pub(crate) fn iter() -> impl Iterator<Item = MutationKind> {
        (0..Self::LENGTH).map(Self::from_usize)
    }

    fn as_str(&self) -> &'static str {
        match self {
            MutationKind::Speed => "Speed",
            MutationKind::Shield => "Shield",
            MutationKind::DoublePoints => "Double Points",
            MutationKind::Camouflage => "Camouflage",
        }
    }
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The consumable currently on the grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Item {
    pub(crate) cell: Cell,
    pub(crate) kind: MutationKind,
}

/// Place a new item on a uniformly random cell of `grid` not occupied by
/// `snake`, carrying a uniformly random mutation.  Returns `None` if the snake
/// fills the whole grid.
pub(super) fn spawn<R: Rng>(rng: &mut R, grid: Grid, snake: &Snake) -> Option<Item> {
    let cell = grid.cells().filter(|&c| !snake.contains(c)).choose(rng)?;
    let kind = MutationKind::from_usize(rng.random_range(0..MutationKind::LENGTH));
    Some(Item { cell, kind })
}
