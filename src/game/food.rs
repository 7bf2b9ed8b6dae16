use super::direction::Direction;
use super::grid::Grid;
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;
use std::time::Duration;

/// How many random cells are tried per board cell before falling back to
/// enumerating the free cells
const PLACEMENT_ATTEMPTS_PER_CELL: usize = 4;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum FoodKind {
    #[default]
    Normal,
    /// Worth more points, wanders around the board, and disappears after a
    /// few seconds
    Special,
}

impl FoodKind {
    pub(crate) fn points(self) -> u32 {
        match self {
            FoodKind::Normal => consts::NORMAL_FOOD_POINTS,
            FoodKind::Special => consts::SPECIAL_FOOD_POINTS,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Food {
    pub(super) position: Position,
    pub(super) kind: FoodKind,

    /// The direction in which special food wanders; `None` for normal food
    direction: Option<Direction>,

    /// How long the food has existed
    age: Duration,

    /// Once `age` reaches this, the food is replaced
    max_age: Duration,

    /// Time accumulated towards the next step of a special food
    move_budget: Duration,
}

impl Food {
    pub(super) fn normal(position: Position) -> Food {
        Food {
            position,
            kind: FoodKind::Normal,
            direction: None,
            age: Duration::ZERO,
            max_age: Duration::MAX,
            move_budget: Duration::ZERO,
        }
    }

    pub(super) fn special(position: Position, direction: Direction) -> Food {
        Food {
            position,
            kind: FoodKind::Special,
            direction: Some(direction),
            age: Duration::ZERO,
            max_age: consts::SPECIAL_FOOD_LIFETIME,
            move_budget: Duration::ZERO,
        }
    }

    /// Place a new food of a randomly-chosen kind on a cell not covered by
    /// `snake`.  Returns `None` if the snake fills the whole board.
    pub(super) fn spawn<R: Rng>(snake: &Snake, grid: Grid, rng: &mut R) -> Option<Food> {
        let position = free_cell(snake, grid, rng)?;
        if rng.random_bool(consts::SPECIAL_FOOD_PROBABILITY) {
            Some(Food::special(position, Direction::random(rng)))
        } else {
            Some(Food::normal(position))
        }
    }

    #[cfg(test)]
    pub(super) fn aged(mut self, age: Duration) -> Food {
        self.age = age;
        self
    }

    #[cfg(test)]
    pub(super) fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub(super) fn age(&self) -> Duration {
        self.age
    }

    /// Advance a special food by `elapsed` time.  Normal food is unaffected.
    ///
    /// The food steps once every [`consts::SPECIAL_FOOD_SLOWDOWN`] ticks of
    /// length `interval`.  If its next cell is on the snake, it turns around
    /// and tries the opposite cell once; if that is blocked too, it stays
    /// put.
    pub(super) fn tick(
        &mut self,
        snake: &Snake,
        grid: Grid,
        elapsed: Duration,
        interval: Duration,
    ) -> FoodTick {
        if self.kind != FoodKind::Special {
            return FoodTick::default();
        }
        self.move_budget = self.move_budget.saturating_add(elapsed);
        if self.move_budget >= interval.saturating_mul(consts::SPECIAL_FOOD_SLOWDOWN) {
            self.move_budget = Duration::ZERO;
            self.step(snake, grid);
        }
        self.age = self.age.saturating_add(elapsed);
        FoodTick {
            expired: self.age >= self.max_age,
        }
    }

    fn step(&mut self, snake: &Snake, grid: Grid) {
        let Some(direction) = self.direction else {
            return;
        };
        let target = grid.wrap(self.position, direction);
        if !snake.contains(target) {
            self.position = target;
            return;
        }
        let reverse = direction.reverse();
        self.direction = Some(reverse);
        let target = grid.wrap(self.position, reverse);
        if !snake.contains(target) {
            self.position = target;
        }
    }

    /// Rendering hint: how faded an aging special food should look
    pub(super) fn opacity(&self) -> Option<f64> {
        (self.kind == FoodKind::Special).then(|| {
            let remaining = 1.0 - self.age.as_secs_f64() / self.max_age.as_secs_f64();
            remaining.max(consts::MIN_FOOD_OPACITY)
        })
    }
}

/// Result of [`Food::tick()`]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct FoodTick {
    /// The food has reached its maximum age and should be replaced
    pub(super) expired: bool,
}

fn free_cell<R: Rng>(snake: &Snake, grid: Grid, rng: &mut R) -> Option<Position> {
    if snake.len() >= grid.cell_count() {
        return None;
    }
    for _ in 0..grid.cell_count() * PLACEMENT_ATTEMPTS_PER_CELL {
        let cell = Position::new(
            rng.random_range(0..grid.size()),
            rng.random_range(0..grid.size()),
        );
        if !snake.contains(cell) {
            return Some(cell);
        }
    }
    grid.cells().filter(|&c| !snake.contains(c)).choose(rng)
}
