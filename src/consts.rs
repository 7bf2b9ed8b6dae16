//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Default width & height of the (square) board, in cells
pub(crate) const GRID_SIZE: u16 = 20;

/// Smallest board size accepted from the configuration file
pub(crate) const MIN_GRID_SIZE: u16 = 5;

/// Largest board size accepted from the configuration file
pub(crate) const MAX_GRID_SIZE: u16 = 40;

/// Tick interval at a speed setting of 0%
pub(crate) const SLOWEST_TICK: Duration = Duration::from_millis(200);

/// Tick interval at a speed setting of 100%
pub(crate) const FASTEST_TICK: Duration = Duration::from_millis(20);

/// How often the ambient-track poller checks which track should be playing
pub(crate) const AMBIENT_POLL_PERIOD: Duration = Duration::from_millis(100);

/// Probability that a newly-spawned food is special
pub(crate) const SPECIAL_FOOD_PROBABILITY: f64 = 0.05;

/// How long a special food lasts before it is replaced
pub(crate) const SPECIAL_FOOD_LIFETIME: Duration = Duration::from_secs(4);

/// Special food moves once every this many ticks
pub(crate) const SPECIAL_FOOD_SLOWDOWN: u32 = 2;

/// Lowest opacity hint given for an aging special food
pub(crate) const MIN_FOOD_OPACITY: f64 = 0.3;

/// Special food whose opacity is below this is drawn dimmed
pub(crate) const FADED_FOOD_OPACITY: f64 = 0.6;

/// Points for eating a normal food
pub(crate) const NORMAL_FOOD_POINTS: u32 = 10;

/// Points for eating a special food
pub(crate) const SPECIAL_FOOD_POINTS: u32 = 30;

/// Maximum number of entries kept in the high score table
pub(crate) const MAX_HIGH_SCORES: usize = 10;

/// Amount by which a settings slider moves per keypress
pub(crate) const SLIDER_STEP: u8 = 5;

/// Each board cell is drawn this many terminal columns wide so that the board
/// looks roughly square.
pub(crate) const CELL_WIDTH: u16 = 2;

/// Width of the high score card shown beside the board
pub(crate) const SCORES_CARD_WIDTH: u16 = 36;

/// The game screen is never drawn narrower than this, so that the score bar
/// fits over small boards
pub(crate) const MIN_DISPLAY_WIDTH: u16 = 48;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: &str = "▲▲";

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: &str = "▼▼";

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: &str = "◀◀";

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: &str = "▶▶";

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "██";

/// Glyph for normal food
pub(crate) const FOOD_SYMBOL: &str = "()";

/// Glyph for special food
pub(crate) const SPECIAL_FOOD_SYMBOL: &str = "<>";

/// Glyph for the snake's head when it has run into itself
pub(crate) const COLLISION_SYMBOL: &str = "××";

/// Glyph for empty board cells
pub(crate) const EMPTY_CELL_SYMBOL: &str = " ·";

/// Style for the snake's head
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new()
    .fg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);

/// Style for the snake's body
pub(crate) const SNAKE_BODY_STYLE: Style = Style::new().fg(Color::Green);

/// Style for normal food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightMagenta);

/// Style for special food
pub(crate) const SPECIAL_FOOD_STYLE: Style = Style::new().fg(Color::LightBlue);

/// Style for empty board cells
pub(crate) const EMPTY_CELL_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the "PAUSED"/"GAME OVER" banners
pub(crate) const BANNER_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::BOLD);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
