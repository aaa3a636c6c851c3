use super::grid::Cell;

/// A direction the snake can travel in.  "North" is towards the top of the
/// grid, i.e., towards `y == 0`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// The unit vector for this direction
    pub(super) fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Return the cell one step from `cell` in this direction.  The result
    /// may lie outside the grid.
    pub(super) fn step(self, cell: Cell) -> Cell {
        let (dx, dy) = self.delta();
        Cell::new(cell.x + dx, cell.y + dy)
    }

    pub(super) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}
