use super::direction::Direction;
use super::grid::Grid;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The player's snake.  Every cell of the body is distinct.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The cells occupied by the snake, with the head at the front
    pub(super) body: VecDeque<Position>,

    /// The direction in which the snake is currently facing
    pub(super) direction: Direction,
}

impl Snake {
    /// Create a one-cell snake at `head` facing in `direction`
    pub(super) fn new(head: Position, direction: Direction) -> Snake {
        Snake {
            body: VecDeque::from([head]),
            direction,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        // The body is never empty
        self.body.front().copied().unwrap_or_default()
    }

    pub(super) fn len(&self) -> usize {
        self.body.len()
    }

    pub(super) fn contains(&self, cell: Position) -> bool {
        self.body.contains(&cell)
    }

    pub(super) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Change the snake's direction to `direction`
    pub(super) fn turn(&mut self, direction: Direction) {
        self.direction = direction;
    }

    /// The cell the head would move into on the next tick
    pub(super) fn next_head(&self, grid: Grid) -> Position {
        grid.wrap(self.head(), self.direction)
    }

    /// Returns `true` if moving the head into `cell` would hit the body.
    ///
    /// The tail counts as occupied even though it would be vacated by the
    /// same move.
    pub(super) fn would_collide(&self, cell: Position) -> bool {
        self.contains(cell)
    }

    /// Move the head into `new_head`.  The tail is dropped unless the snake
    /// has just eaten.
    pub(super) fn grow(&mut self, new_head: Position, ate_food: bool) {
        self.body.push_front(new_head);
        if !ate_food {
            let _ = self.body.pop_back();
        }
        debug_assert!(self.cells_distinct(), "snake overlaps itself: {self:?}");
    }

    fn cells_distinct(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.len());
        self.cells().all(|c| seen.insert(c))
    }
}
