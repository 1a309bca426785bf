//! Default rules & hard-coded configuration
use crate::game::{Direction, GridPoint};
use std::time::Duration;

/// Default number of columns on the board
pub const BOARD_COLUMNS: u16 = 20;

/// Default number of rows on the board
pub const BOARD_ROWS: u16 = 20;

/// Default time between ticks, in milliseconds
pub const TICK_PERIOD_MS: u64 = 150;

/// Default time between ticks
pub const TICK_PERIOD: Duration = Duration::from_millis(TICK_PERIOD_MS);

/// Default score awarded for each piece of food eaten
pub const POINTS_PER_FOOD: u32 = 10;

/// Default length of the snake at the start of a game
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Default direction the snake faces at the start of a game
pub const INITIAL_HEADING: Direction = Direction::Right;

/// Where food is put when the snake covers every cell of the board
pub const FOOD_FALLBACK: GridPoint = GridPoint::ORIGIN;
