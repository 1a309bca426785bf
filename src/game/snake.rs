use super::direction::Direction;
use super::geometry::{BoardSize, GridPoint};
use std::collections::VecDeque;
use std::iter;

/// The snake's body and the way it is facing.
///
/// The head is stored apart from the rest of the body so that a snake can
/// never be empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snake {
    /// The position of the snake's head
    head: GridPoint,

    /// The positions of the remaining segments, from the one directly behind
    /// the head to the tip of the tail
    body: VecDeque<GridPoint>,

    /// The direction in which the snake will next move
    heading: Direction,
}

impl Snake {
    /// Create a snake of `length` segments (at least one) with its head in the
    /// center of `board`, facing `heading`, with the rest of its body trailing
    /// out behind it in a straight line.
    pub fn initial(board: BoardSize, length: usize, heading: Direction) -> Snake {
        let head = board.center();
        let backwards = heading.opposite();
        let body = iter::successors(Some(head), |&p| Some(backwards.advance(p)))
            .skip(1)
            .take(length.saturating_sub(1))
            .collect();
        Snake {
            head,
            body,
            heading,
        }
    }

    /// Create a snake from an explicit list of segments, head first.  Returns
    /// `None` if `segments` is empty.
    pub fn from_segments<I>(segments: I, heading: Direction) -> Option<Snake>
    where
        I: IntoIterator<Item = GridPoint>,
    {
        let mut iter = segments.into_iter();
        let head = iter.next()?;
        Some(Snake {
            head,
            body: iter.collect(),
            heading,
        })
    }

    pub fn head(&self) -> GridPoint {
        self.head
    }

    /// Return the segments behind the head
    pub fn body(&self) -> &VecDeque<GridPoint> {
        &self.body
    }

    /// Return the last segment of the snake, which is the head when the snake
    /// has length 1
    pub fn tail_tip(&self) -> GridPoint {
        self.body.back().copied().unwrap_or(self.head)
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Always `false`; a snake has at least a head.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all segments from head to tail
    pub fn segments(&self) -> impl Iterator<Item = GridPoint> + '_ {
        iter::once(self.head).chain(self.body.iter().copied())
    }

    /// Change the snake's heading to `direction` unless that would reverse it
    /// into its own neck.  Returns whether the change was accepted.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.heading.opposite() {
            false
        } else {
            self.heading = direction;
            true
        }
    }

    /// The position the head will occupy after the next move
    pub fn next_head(&self) -> GridPoint {
        self.heading.advance(self.head)
    }

    /// Move the snake one cell along its heading.  If `grow` is false, the
    /// last segment is dropped so that the length stays the same.
    ///
    /// Bounds and collisions are not checked here.
    pub fn advance(&mut self, grow: bool) {
        self.body.push_front(self.head);
        self.head = self.next_head();
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Test whether any segment lies at `pos`
    pub fn occupies(&self, pos: GridPoint) -> bool {
        self.segments().any(|p| p == pos)
    }

    /// Test whether moving the head to `pos` would run into the snake's own
    /// body.  The tail tip only counts when the move also grows the snake,
    /// as otherwise it vacates its cell on the same step.
    pub fn bites_itself(&self, pos: GridPoint, grows: bool) -> bool {
        let solid = if grows { self.len() } else { self.len() - 1 };
        self.segments().take(solid).any(|p| p == pos)
    }
}
