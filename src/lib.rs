//! Deterministic, tick-driven simulation of a game of snake on a grid.
//!
//! A [`GameEngine`][game::GameEngine] owns the snake, the food, the score, and
//! the game's phase, and advances them one step at a time when its `tick()`
//! method is called.  What calls `tick()` is up to the [`Scheduler`] the engine
//! is built with: tests drive a [`ManualScheduler`] by hand, while
//! [`SharedGame`] wires the engine to a [`ThreadScheduler`] so that it ticks
//! itself while direction requests arrive from other threads.
//!
//! Drawing the board and translating key presses into directions are left to
//! the front end.
//!
//! [`Scheduler`]: scheduler::Scheduler
//! [`ManualScheduler`]: scheduler::ManualScheduler
//! [`ThreadScheduler`]: scheduler::ThreadScheduler
//! [`SharedGame`]: session::SharedGame
pub mod config;
pub mod consts;
pub mod game;
pub mod scheduler;
pub mod session;
