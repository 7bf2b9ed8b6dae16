use super::direction::Direction;
use ratatui::layout::{Position, Rect, Size};

/// A square board on which every edge wraps around to the opposite edge
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: u16,
}

impl Grid {
    pub(crate) fn new(size: u16) -> Grid {
        debug_assert!(size > 0, "grid size must be nonzero");
        Grid { size }
    }

    pub(crate) fn size(self) -> u16 {
        self.size
    }

    pub(crate) fn cell_count(self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }

    pub(crate) fn center(self) -> Position {
        Position::new(self.size / 2, self.size / 2)
    }

    pub(crate) fn contains(self, cell: Position) -> bool {
        cell.x < self.size && cell.y < self.size
    }

    /// All cells of the board in row-major order
    pub(crate) fn cells(self) -> impl Iterator<Item = Position> {
        Rect::from((Position::ORIGIN, Size::new(self.size, self.size))).positions()
    }

    /// Return the cell one step from `cell` in `direction`, wrapping around
    /// the edges of the board
    pub(crate) fn wrap(self, cell: Position, direction: Direction) -> Position {
        let Position { mut x, mut y } = cell;
        match direction {
            Direction::Up => y = decrement_wrapping(y, self.size),
            Direction::Down => y = increment_wrapping(y, self.size),
            Direction::Left => x = decrement_wrapping(x, self.size),
            Direction::Right => x = increment_wrapping(x, self.size),
        }
        Position { x, y }
    }
}

fn decrement_wrapping(x: u16, max: u16) -> u16 {
    x.checked_sub(1).unwrap_or(max - 1)
}

fn increment_wrapping(x: u16, max: u16) -> u16 {
    x.checked_add(1).filter(|&xx| xx < max).unwrap_or(0)
}
