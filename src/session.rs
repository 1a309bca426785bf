//! A game engine shared between a cadence thread and its controllers
use crate::config::GameSettings;
use crate::game::{Direction, GameEngine, Snapshot};
use crate::scheduler::{Armed, ThreadScheduler};
use rand::Rng;
use std::io;
use std::ops::ControlFlow;
use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// An engine driven by a [`ThreadScheduler`]
pub type ThreadedEngine<R> = GameEngine<R, ThreadScheduler>;

/// A cloneable handle to a game that ticks itself on a background thread.
///
/// Every operation locks the engine, so ticks never overlap and direction
/// requests from other threads are never applied partway through a tick.
/// The background thread stops once the last handle is dropped.
#[derive(Debug)]
pub struct SharedGame<R> {
    inner: Arc<Mutex<ThreadedEngine<R>>>,
}

impl<R: Rng + Send + 'static> SharedGame<R> {
    pub fn new(settings: GameSettings, rng: R) -> SharedGame<R> {
        let inner = Arc::new_cyclic(|weak: &Weak<Mutex<ThreadedEngine<R>>>| {
            let weak = weak.clone();
            let scheduler = ThreadScheduler::new(move |armed: &Armed| {
                let Some(engine) = weak.upgrade() else {
                    return ControlFlow::Break(());
                };
                let mut engine = lock(&engine);
                // A pause or restart may have happened while this thread was
                // waiting for the lock.
                if armed.is_current() {
                    let _ = engine.tick();
                }
                ControlFlow::Continue(())
            });
            Mutex::new(GameEngine::new(settings, rng, scheduler))
        });
        SharedGame { inner }
    }

    /// # Errors
    ///
    /// Returns `Err` if the cadence thread could not be spawned.  The game is
    /// left paused.
    pub fn start(&self) -> io::Result<()> {
        self.with(GameEngine::start)
    }

    /// # Errors
    ///
    /// Returns `Err` if the cadence thread could not be spawned.  The game is
    /// left paused.
    pub fn restart(&self) -> io::Result<()> {
        self.with(GameEngine::restart)
    }

    pub fn pause(&self) {
        self.with(GameEngine::pause);
    }

    /// # Errors
    ///
    /// Returns `Err` if the cadence thread could not be spawned.  The game
    /// stays paused.
    pub fn resume(&self) -> io::Result<()> {
        self.with(GameEngine::resume)
    }

    pub fn request_direction_change(&self, direction: Direction) {
        self.with(|engine| engine.request_direction_change(direction));
    }
}

impl<R> SharedGame<R> {
    /// Run `func` with exclusive access to the engine
    pub fn with<F, T>(&self, func: F) -> T
    where
        F: FnOnce(&mut ThreadedEngine<R>) -> T,
    {
        func(&mut lock(&self.inner))
    }

    pub fn snapshot(&self) -> Snapshot {
        self.with(|engine| engine.snapshot())
    }

    pub fn subscribe(&self) -> Receiver<Snapshot> {
        self.with(GameEngine::subscribe)
    }
}

impl<R> Clone for SharedGame<R> {
    fn clone(&self) -> SharedGame<R> {
        SharedGame {
            inner: Arc::clone(&self.inner),
        }
    }
}

// Engine state is always consistent between method calls, so a panic in
// another holder does not leave it unusable.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
