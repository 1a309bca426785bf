use super::direction::Direction;
use crate::consts;
use serde::Serialize;

/// A cell coordinate on the board, measured from the top-left corner.
///
/// Coordinates are signed so that a position one step past any edge can be
/// represented while checking for wall collisions.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const ORIGIN: GridPoint = GridPoint { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> GridPoint {
        GridPoint { x, y }
    }
}

/// The dimensions of the playing field
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct BoardSize {
    pub columns: u16,
    pub rows: u16,
}

impl BoardSize {
    pub const fn new(columns: u16, rows: u16) -> BoardSize {
        BoardSize { columns, rows }
    }

    /// Test whether `pos` lies on the board
    pub fn contains(self, pos: GridPoint) -> bool {
        (0..i32::from(self.columns)).contains(&pos.x)
            && (0..i32::from(self.rows)).contains(&pos.y)
    }

    pub fn cell_count(self) -> usize {
        usize::from(self.columns) * usize::from(self.rows)
    }

    /// The cell at which a new snake's head is placed
    pub fn center(self) -> GridPoint {
        GridPoint::new(i32::from(self.columns / 2), i32::from(self.rows / 2))
    }

    /// Count the cells in a straight line from [`BoardSize::center()`] to the
    /// edge of the board in `direction`, including the center itself.  The
    /// board is assumed to be nonempty.
    pub fn span_from_center(self, direction: Direction) -> usize {
        let half_columns = self.columns / 2;
        let half_rows = self.rows / 2;
        usize::from(match direction {
            Direction::Up => half_rows + 1,
            Direction::Down => self.rows - half_rows,
            Direction::Left => half_columns + 1,
            Direction::Right => self.columns - half_columns,
        })
    }

    /// Iterate over every cell of the board in row-major order
    pub fn positions(self) -> impl Iterator<Item = GridPoint> {
        let columns = i32::from(self.columns);
        (0..i32::from(self.rows))
            .flat_map(move |y| (0..columns).map(move |x| GridPoint::new(x, y)))
    }
}

impl Default for BoardSize {
    fn default() -> BoardSize {
        BoardSize::new(consts::BOARD_COLUMNS, consts::BOARD_ROWS)
    }
}
