//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Tick interval at the start of a session
pub(crate) const BASE_TICK_INTERVAL: Duration = Duration::from_millis(150);

/// Amount by which the tick interval shrinks for every [`SPEED_STEP_SCORE`]
/// points scored
pub(crate) const TICK_INTERVAL_DECREMENT: Duration = Duration::from_millis(2);

/// The tick interval never drops below this
pub(crate) const MIN_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Number of points between speed-ups
pub(crate) const SPEED_STEP_SCORE: u32 = 50;

/// Points awarded for eating one piece of food
pub(crate) const FOOD_REWARD: u32 = 10;

/// Number of segments in a newly-created snake
pub(crate) const INITIAL_SNAKE_LENGTH: u16 = 3;

/// Default number of tiles along each side of the (square) board
pub(crate) const DEFAULT_TILE_COUNT: u16 = 20;

/// Smallest permitted board
pub(crate) const MIN_TILE_COUNT: u16 = 4;

/// Largest board that fits in [`DISPLAY_SIZE`]
pub(crate) const MAX_TILE_COUNT: u16 = 20;

/// Terminal columns used to draw a single tile.  Terminal cells are roughly
/// twice as tall as they are wide, so this keeps tiles square-ish.
pub(crate) const TILE_WIDTH: u16 = 2;

/// How long to wait for input before advancing the clock by another frame
pub(crate) const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Minimum horizontal drag, in columns, that counts as a swipe
pub(crate) const SWIPE_MIN_COLUMNS: u16 = 4;

/// Minimum vertical drag, in rows, that counts as a swipe
pub(crate) const SWIPE_MIN_ROWS: u16 = 2;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Name of the offline asset cache
pub(crate) const CACHE_NAME: &str = "neon-snake-v1";

/// Assets pre-populated into the offline cache at startup
pub(crate) const ASSETS: &[&str] = &["./", "./index.txt", "./logo.txt"];

/// Glyphs for the snake's head
pub(crate) const SNAKE_HEAD_SYMBOL: &str = "██";

/// Glyphs for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "▓▓";

/// Glyphs for the food
pub(crate) const FOOD_SYMBOL: &str = "()";

/// Glyphs drawn where the snake crashed
pub(crate) const COLLISION_SYMBOL: &str = "><";

/// Style for the snake's head
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new()
    .fg(Color::LightGreen)
    .add_modifier(Modifier::BOLD);

/// Style for the snake's body
pub(crate) const SNAKE_BODY_STYLE: Style = Style::new().fg(Color::LightCyan);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new()
    .fg(Color::LightMagenta)
    .add_modifier(Modifier::BOLD);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for the board border
pub(crate) const BORDER_STYLE: Style = Style::new().fg(Color::Cyan);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the on-screen control pad buttons
pub(crate) const PAD_STYLE: Style = Style::new().fg(Color::LightCyan);
