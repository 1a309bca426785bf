use super::geometry::GridPoint;
use serde::{Deserialize, Serialize};

/// One of the four directions in which the snake can travel
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the point one cell away from `pos` in this direction.  No bounds
    /// checking is performed; the result may lie off the board.
    pub fn advance(self, pos: GridPoint) -> GridPoint {
        let GridPoint { x, y } = pos;
        match self {
            Direction::Up => GridPoint::new(x, y - 1),
            Direction::Down => GridPoint::new(x, y + 1),
            Direction::Left => GridPoint::new(x - 1, y),
            Direction::Right => GridPoint::new(x + 1, y),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
