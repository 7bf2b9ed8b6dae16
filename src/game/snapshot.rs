use super::direction::Direction;
use super::food::FoodKind;
use crate::settings::Settings;
use ratatui::layout::Position;

/// A read-only copy of everything the interface needs in order to draw the
/// game
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Snapshot {
    pub(crate) grid_size: u16,

    /// The cells of the snake, head first
    pub(crate) snake: Vec<Position>,

    /// The direction in which the snake's head is pointing
    pub(crate) direction: Direction,

    pub(crate) food: Option<FoodView>,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) phase: Phase,
    pub(crate) settings: Settings,

    /// The high score table, formatted for display
    pub(crate) high_score_lines: Vec<String>,
}

impl Snapshot {
    pub(crate) fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    pub(crate) fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub(crate) fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FoodView {
    pub(crate) position: Position,
    pub(crate) kind: FoodKind,

    /// For special food, how faded it should be drawn, from 1.0 (fresh) down
    /// to [`MIN_FOOD_OPACITY`][crate::consts::MIN_FOOD_OPACITY]
    pub(crate) opacity: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Phase {
    #[default]
    Running,
    Paused,
    /// The snake ran into itself
    Dead,
    /// The snake has filled the board and there are no more spaces to place
    /// food in.
    Exhausted,
}

impl Phase {
    pub(crate) fn is_game_over(self) -> bool {
        matches!(self, Phase::Dead | Phase::Exhausted)
    }
}
