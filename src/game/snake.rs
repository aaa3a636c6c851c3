use super::direction::Direction;
use super::grid::{Cell, Grid};
use std::collections::VecDeque;

/// The snake: a head and a possibly-empty body.
///
/// The snake is never empty: it always has a head, and `body` holds the
/// remaining segments, nearest the head first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    head: Cell,

    /// The positions of the rest of the snake, from just behind the head to
    /// the tip of the tail
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a snake of length 1 at `head`
    pub(super) fn new(head: Cell) -> Snake {
        Snake {
            head,
            body: VecDeque::new(),
        }
    }

    /// Create a snake from its head and the rest of its segments, nearest the
    /// head first
    #[cfg(test)]
    pub(super) fn from_segments<I: IntoIterator<Item = Cell>>(head: Cell, body: I) -> Snake {
        Snake {
            head,
            body: body.into_iter().collect(),
        }
    }

    pub(super) fn head(&self) -> Cell {
        self.head
    }

    pub(super) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Iterate over every segment, head first
    pub(super) fn segments(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(super) fn contains(&self, cell: Cell) -> bool {
        self.segments().any(|c| c == cell)
    }

    /// Return the cell the head would move to when travelling in `direction`.
    /// The snake itself is not changed.
    pub(super) fn advance(&self, direction: Direction) -> Cell {
        direction.step(self.head)
    }

    pub(super) fn would_collide_with_wall(&self, next_head: Cell, grid: Grid) -> bool {
        !grid.in_bounds(next_head)
    }

    /// Test whether moving the head to `next_head` would run into the snake's
    /// own body.  This must be called before the move.  Unless the snake is
    /// `growing` this tick, its tail cell is about to be vacated and so is not
    /// counted.
    pub(super) fn would_collide_with_self(&self, next_head: Cell, growing: bool) -> bool {
        let checked = if growing {
            self.len()
        } else {
            self.len() - 1
        };
        self.segments().take(checked).any(|c| c == next_head)
    }

    /// Move the head to `next_head`, keeping every existing segment
    pub(super) fn grow(&mut self, next_head: Cell) {
        self.body.push_front(self.head);
        self.head = next_head;
    }

    /// Move the head to `next_head` and drop the last segment
    pub(super) fn move_without_growth(&mut self, next_head: Cell) {
        self.body.push_front(self.head);
        self.head = next_head;
        let _ = self.body.pop_back();
    }
}
