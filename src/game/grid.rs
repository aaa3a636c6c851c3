use std::fmt;

/// A single cell of the playing field.
///
/// Coordinates are signed so that a step off the edge of the grid can be
/// computed and then rejected by [`Grid::in_bounds()`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The fixed-size playing field.  There is no wraparound: a cell is either
/// inside the grid or it isn't.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    /// # Panics
    ///
    /// Panics if either dimension is not positive.
    pub(crate) const fn new(width: i32, height: i32) -> Grid {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Grid { width, height }
    }

    pub(crate) fn width(self) -> i32 {
        self.width
    }

    pub(crate) fn height(self) -> i32 {
        self.height
    }

    pub(super) fn in_bounds(self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    /// The cell at which a new snake is placed
    pub(super) fn center(self) -> Cell {
        Cell::new(self.width / 2, self.height / 2)
    }

    /// Iterate over every cell of the grid in row-major order
    pub(super) fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Cell::new(0, 0), true)]
    #[case(Cell::new(19, 19), true)]
    #[case(Cell::new(10, 10), true)]
    #[case(Cell::new(-1, 5), false)]
    #[case(Cell::new(5, -1), false)]
    #[case(Cell::new(20, 5), false)]
    #[case(Cell::new(5, 20), false)]
    fn test_in_bounds(#[case] cell: Cell, #[case] inside: bool) {
        assert_eq!(Grid::new(20, 20).in_bounds(cell), inside);
    }

    #[test]
    fn center_of_default_grid() {
        assert_eq!(Grid::new(20, 20).center(), Cell::new(10, 10));
    }

    #[test]
    fn cells_cover_grid() {
        let grid = Grid::new(3, 2);
        let cells = grid.cells().collect::<Vec<_>>();
        assert_eq!(
            cells,
            [
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(2, 0),
                Cell::new(0, 1),
                Cell::new(1, 1),
                Cell::new(2, 1),
            ]
        );
        assert!(cells.iter().all(|&c| grid.in_bounds(c)));
    }
}
