//! The game rules and the state machine that applies them
mod direction;
mod food;
mod geometry;
mod snake;
pub use self::direction::Direction;
pub use self::food::Food;
pub use self::geometry::{BoardSize, GridPoint};
pub use self::snake::Snake;
use crate::config::GameSettings;
use crate::scheduler::Scheduler;
use log::{debug, info, trace};
use rand::Rng;
use serde::Serialize;
use std::io;
use std::sync::mpsc::{channel, Receiver, Sender};

/// The authoritative state of one game of snake.
///
/// All mutation goes through `&mut self`; callers sharing an engine between
/// threads must serialize access (see [`crate::session::SharedGame`]).
#[derive(Debug)]
pub struct GameEngine<R, S> {
    rng: R,
    scheduler: S,
    settings: GameSettings,
    snake: Snake,
    food: Food,
    score: u32,
    ticks: u64,
    phase: Phase,
    /// The most recent accepted direction request not yet applied by a tick
    pending: Option<Direction>,
    listeners: Vec<Sender<Snapshot>>,
}

impl<R: Rng, S: Scheduler> GameEngine<R, S> {
    /// Create an engine in the [`Phase::Idle`] phase with a fresh snake and
    /// food.  `settings` are assumed to have passed
    /// [`GameSettings::validate()`].
    pub fn new(settings: GameSettings, mut rng: R, scheduler: S) -> GameEngine<R, S> {
        let snake = settings.initial_snake();
        let food = Food::spawn(&mut rng, settings.board, &snake);
        GameEngine {
            rng,
            scheduler,
            settings,
            snake,
            food,
            score: 0,
            ticks: 0,
            phase: Phase::Idle,
            pending: None,
            listeners: Vec::new(),
        }
    }

    /// Reset the snake, food, and score and begin playing.  Allowed from any
    /// phase.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the scheduler could not be armed.  The fresh game is
    /// then left [`Phase::Paused`] so that [`GameEngine::resume()`] can try
    /// again.
    pub fn start(&mut self) -> io::Result<()> {
        self.snake = self.settings.initial_snake();
        self.food = Food::spawn(&mut self.rng, self.settings.board, &self.snake);
        self.score = 0;
        self.ticks = 0;
        self.pending = None;
        self.phase = Phase::Playing;
        let r = self.arm();
        if r.is_ok() {
            info!(
                "Game started on {}x{} board",
                self.settings.board.columns, self.settings.board.rows
            );
        }
        self.notify();
        r
    }

    /// Identical to [`GameEngine::start()`]
    ///
    /// # Errors
    ///
    /// Returns `Err` if the scheduler could not be armed.
    pub fn restart(&mut self) -> io::Result<()> {
        self.start()
    }

    /// Suspend a game in progress.  Does nothing unless playing.
    pub fn pause(&mut self) {
        if self.phase == Phase::Playing {
            self.scheduler.disarm();
            self.phase = Phase::Paused;
            debug!("Game paused at tick {}", self.ticks);
            self.notify();
        }
    }

    /// Continue a paused game.  Does nothing unless paused.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the scheduler could not be armed, in which case the
    /// game stays paused.
    pub fn resume(&mut self) -> io::Result<()> {
        if self.phase != Phase::Paused {
            return Ok(());
        }
        self.phase = Phase::Playing;
        self.arm()?;
        debug!("Game resumed at tick {}", self.ticks);
        self.notify();
        Ok(())
    }

    /// Arm the scheduler for a game that has just entered
    /// [`Phase::Playing`], falling back to [`Phase::Paused`] if that fails
    fn arm(&mut self) -> io::Result<()> {
        let r = self.scheduler.arm(self.settings.tick_period);
        if r.is_err() {
            self.phase = Phase::Paused;
        }
        r
    }

    /// Ask for the snake to turn to `direction` on the next tick.
    ///
    /// The request is dropped if the game is not being played or if it would
    /// reverse the snake into itself.  Otherwise it replaces any earlier
    /// request made since the last tick.
    pub fn request_direction_change(&mut self, direction: Direction) {
        if self.phase != Phase::Playing {
            trace!("Ignoring turn to {direction:?} while {:?}", self.phase);
        } else if direction == self.snake.heading().opposite() {
            trace!(
                "Ignoring reversal to {direction:?} while heading {:?}",
                self.snake.heading()
            );
        } else {
            self.pending = Some(direction);
        }
    }

    /// Advance the game by one step.  Does nothing unless playing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != Phase::Playing {
            return TickOutcome::Idle;
        }
        self.ticks += 1;
        if let Some(direction) = self.pending.take() {
            // The heading cannot have changed since the request was
            // accepted, but a stale reversal must never get through.
            if !self.snake.turn(direction) {
                trace!("Dropping stale reversal to {direction:?}");
            }
        }
        let next = self.snake.next_head();
        let will_eat = next == self.food.position();
        let outcome = if !self.settings.board.contains(next) {
            TickOutcome::Crashed(Collision::Wall)
        } else if self.snake.bites_itself(next, will_eat) {
            TickOutcome::Crashed(Collision::SelfBite)
        } else {
            self.snake.advance(will_eat);
            if will_eat {
                self.score = self.score.saturating_add(self.settings.points_per_food);
                self.food = Food::spawn(&mut self.rng, self.settings.board, &self.snake);
                TickOutcome::Ate
            } else {
                TickOutcome::Moved
            }
        };
        if let TickOutcome::Crashed(collision) = outcome {
            self.end_game(collision, next);
        }
        self.notify();
        outcome
    }

    fn end_game(&mut self, collision: Collision, at: GridPoint) {
        self.scheduler.disarm();
        self.phase = Phase::GameOver;
        info!(
            "Game over after {} ticks: {collision:?} collision at ({}, {}); final score {}",
            self.ticks, at.x, at.y, self.score
        );
    }
}

impl<R, S> GameEngine<R, S> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Food {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Number of ticks processed since the game was last started
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Capture the observable state of the game
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            score: self.score,
            ticks: self.ticks,
            heading: self.snake.heading(),
            snake: self.snake.segments().collect(),
            food: self.food.position(),
        }
    }

    /// Register for a [`Snapshot`] after every tick and every phase change.
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<Snapshot> {
        let (sender, receiver) = channel();
        self.listeners.push(sender);
        receiver
    }

    fn notify(&mut self) {
        if self.listeners.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.listeners
            .retain(|sender| sender.send(snapshot.clone()).is_ok());
    }
}

/// The life-cycle state of a game
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not yet started
    Idle,
    Playing,
    Paused,
    /// The snake has crashed; only a restart does anything.
    GameOver,
}

/// What happened during a call to [`GameEngine::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game was not being played, so nothing happened.
    Idle,
    /// The snake moved forwards one cell.
    Moved,
    /// The snake moved onto the food and grew.
    Ate,
    /// The snake hit something and the game is over.  The snake was not moved.
    Crashed(Collision),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Collision {
    Wall,
    SelfBite,
}

/// A copy of everything a front end needs in order to draw the game
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub score: u32,
    pub ticks: u64,
    pub heading: Direction,
    /// Snake segments, head first
    pub snake: Vec<GridPoint>,
    pub food: GridPoint,
}
