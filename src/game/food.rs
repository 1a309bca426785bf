use super::geometry::{BoardSize, GridPoint};
use super::snake::Snake;
use crate::consts;
use log::warn;
use rand::{seq::IteratorRandom, Rng};
use serde::Serialize;
use std::collections::HashSet;

/// The single piece of food on the board
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Food {
    position: GridPoint,
}

impl Food {
    pub fn at(position: GridPoint) -> Food {
        Food { position }
    }

    pub fn position(self) -> GridPoint {
        self.position
    }

    /// Place food on a cell of `board` chosen uniformly at random from those
    /// not occupied by `snake`.
    ///
    /// If the snake covers the whole board, there is nowhere valid to put the
    /// food, and it is placed at [`FOOD_FALLBACK`][consts::FOOD_FALLBACK]
    /// instead.  Board validation keeps this from happening in a game started
    /// from a valid configuration.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, board: BoardSize, snake: &Snake) -> Food {
        let occupied = snake.segments().collect::<HashSet<_>>();
        if let Some(position) = board
            .positions()
            .filter(move |p| !occupied.contains(p))
            .choose(rng)
        {
            Food { position }
        } else {
            warn!(
                "No free cell for food on {}x{} board with snake of length {}; placing food at {:?}",
                board.columns,
                board.rows,
                snake.len(),
                consts::FOOD_FALLBACK,
            );
            Food {
                position: consts::FOOD_FALLBACK,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// Build a snake by taking a random self-avoiding walk of up to `len`
    /// cells across `board`.
    fn random_snake<R: Rng>(rng: &mut R, board: BoardSize, len: usize) -> Snake {
        let start = board
            .positions()
            .choose(rng)
            .expect("board should be nonempty");
        let mut cells = vec![start];
        let mut seen = HashSet::from([start]);
        while cells.len() < len {
            let last = *cells.last().expect("cells should be nonempty");
            let Some(next) = [
                Direction::Up,
                Direction::Down,
                Direction::Left,
                Direction::Right,
            ]
            .into_iter()
            .map(|d| d.advance(last))
            .filter(|&p| board.contains(p) && !seen.contains(&p))
            .choose(rng) else {
                break;
            };
            cells.push(next);
            seen.insert(next);
        }
        Snake::from_segments(cells, Direction::Right).expect("cells should be nonempty")
    }

    #[test]
    fn spawn_never_overlaps_snake() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let board = BoardSize::new(8, 6);
        for trial in 0..200 {
            let len = 1 + trial % 40;
            let snake = random_snake(&mut rng, board, len);
            for _ in 0..10 {
                let food = Food::spawn(&mut rng, board, &snake);
                assert!(
                    board.contains(food.position()),
                    "food should be on the board"
                );
                assert!(
                    !snake.occupies(food.position()),
                    "food at {:?} should not overlap snake {:?}",
                    food.position(),
                    snake
                );
            }
        }
    }

    #[test]
    fn spawn_uses_only_free_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let board = BoardSize::new(2, 2);
        let snake = Snake::from_segments(
            [
                GridPoint::new(0, 0),
                GridPoint::new(1, 0),
                GridPoint::new(1, 1),
            ],
            Direction::Down,
        )
        .expect("segments should be nonempty");
        for _ in 0..10 {
            assert_eq!(
                Food::spawn(&mut rng, board, &snake).position(),
                GridPoint::new(0, 1)
            );
        }
    }

    #[test]
    fn spawn_on_full_board_falls_back() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let board = BoardSize::new(2, 1);
        let snake = Snake::from_segments(
            [GridPoint::new(1, 0), GridPoint::new(0, 0)],
            Direction::Right,
        )
        .expect("segments should be nonempty");
        assert_eq!(
            Food::spawn(&mut rng, board, &snake).position(),
            consts::FOOD_FALLBACK
        );
    }

    #[test]
    fn spawn_is_deterministic_for_seed() {
        let board = BoardSize::default();
        let snake = Snake::initial(board, 3, Direction::Right);
        let a = Food::spawn(&mut ChaCha12Rng::seed_from_u64(RNG_SEED), board, &snake);
        let b = Food::spawn(&mut ChaCha12Rng::seed_from_u64(RNG_SEED), board, &snake);
        assert_eq!(a, b);
    }
}
