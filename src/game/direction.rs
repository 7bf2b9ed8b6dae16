use enum_map::Enum;
use rand::Rng;

/// One of the four unit moves on the board
#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns `true` if turning from `self` to `other` would make the snake
    /// double back on itself
    pub(crate) fn is_reverse_of(self, other: Direction) -> bool {
        self.reverse() == other
    }

    /// Pick one of the four directions uniformly at random
    pub(super) fn random<R: Rng>(rng: &mut R) -> Direction {
        Direction::from_usize(rng.random_range(0..Direction::LENGTH))
    }
}
