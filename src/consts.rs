//! Assorted constants & hard-coded configuration
use crate::game::{Grid, Milestone};
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Size of one grid cell in the original pixel canvas
pub(crate) const CELL_SIZE: i32 = 20;

/// Width & height of the original pixel canvas
pub(crate) const CANVAS_SIZE: i32 = 400;

/// The playing field: 20 × 20 cells
pub(crate) const GRID: Grid = Grid::new(CANVAS_SIZE / CELL_SIZE, CANVAS_SIZE / CELL_SIZE);

/// Time between movements of the snake at the start of a game
pub(crate) const INITIAL_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// The snake never moves more often than this
pub(crate) const MIN_TICK_INTERVAL: Duration = Duration::from_millis(50);

/// How much faster the snake gets, permanently, each time it eats an item
pub(crate) const CATCH_SPEEDUP: Duration = Duration::from_millis(10);

/// How much faster the snake gets when it eats a Speed item
pub(crate) const SPEED_POWERUP_SPEEDUP: Duration = Duration::from_millis(30);

/// How long a power-up stays active
pub(crate) const POWERUP_DURATION: Duration = Duration::from_secs(5);

/// How often the front end advances power-up countdowns while waiting for
/// the next tick
pub(crate) const COUNTDOWN_STEP: Duration = Duration::from_millis(100);

/// Maximum number of entries kept on the leaderboard
pub(crate) const LEADERBOARD_CAP: usize = 10;

/// Scores at which the rewards collaborator is notified, unless configured
/// otherwise
pub(crate) const DEFAULT_REWARD_THRESHOLDS: [u32; 3] = [5, 10, 20];

/// Scores that trigger a one-off announcement when hit exactly
pub(crate) const MILESTONES: &[Milestone] = &[Milestone {
    score: 15,
    label: "Mutation Frenzy",
}];

/// Player identity used when none is configured
pub(crate) const ANONYMOUS_PLAYER: &str = "anonymous";

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the snake's head before it has started moving
pub(crate) const SNAKE_HEAD_IDLE_SYMBOL: char = '@';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for a Speed item
pub(crate) const SPEED_SYMBOL: char = '»';

/// Glyph for a Shield item
pub(crate) const SHIELD_SYMBOL: char = '◆';

/// Glyph for a DoublePoints item
pub(crate) const DOUBLE_POINTS_SYMBOL: char = '2';

/// Glyph for a Camouflage item
pub(crate) const CAMOUFLAGE_SYMBOL: char = '≈';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the snake while Camouflage is active
pub(crate) const CAMOUFLAGED_SNAKE_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::DIM);

/// Style for the snake while Shield is active
pub(crate) const SHIELDED_SNAKE_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Style for items
pub(crate) const ITEM_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the current player's leaderboard entry
pub(crate) const PLAYER_ENTRY_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
