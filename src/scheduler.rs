//! The cadence source that makes a running game tick
use log::debug;
use std::fmt;
use std::io;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Something that periodically calls `GameEngine::tick()` while armed.
///
/// The engine arms its scheduler when a game starts or resumes and disarms it
/// when the game is paused or ends.
pub trait Scheduler {
    /// Begin (or restart) invoking the tick callback every `interval`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the cadence could not be set up, in which case the
    /// scheduler is left disarmed.
    fn arm(&mut self, interval: Duration) -> io::Result<()>;

    /// Stop invoking the tick callback
    fn disarm(&mut self);

    fn is_armed(&self) -> bool;
}

/// A scheduler that never fires on its own.  Whoever owns the engine calls
/// `tick()` by hand; the scheduler just remembers whether it is supposed to.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ManualScheduler {
    interval: Option<Duration>,
}

impl ManualScheduler {
    pub fn new() -> ManualScheduler {
        ManualScheduler::default()
    }

    /// Return the interval at which ticks are wanted, or `None` if disarmed
    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }
}

impl Scheduler for ManualScheduler {
    fn arm(&mut self, interval: Duration) -> io::Result<()> {
        self.interval = Some(interval);
        Ok(())
    }

    fn disarm(&mut self) {
        self.interval = None;
    }

    fn is_armed(&self) -> bool {
        self.interval.is_some()
    }
}

type TickCallback = dyn Fn(&Armed) -> ControlFlow<()> + Send + Sync;

/// A scheduler that runs its callback on a background thread.
///
/// Each call to `arm()` spawns a fresh thread tagged with a new generation
/// number; `disarm()` and re-arming bump the generation, after which older
/// threads exit without firing again.  Disarming never blocks, so it is safe
/// to call from within the callback.
pub struct ThreadScheduler {
    callback: Arc<TickCallback>,
    generation: Arc<AtomicU64>,
    armed: bool,
}

impl ThreadScheduler {
    /// Create a disarmed scheduler that will invoke `callback` on every tick.
    ///
    /// The callback is passed the [`Armed`] token of the thread invoking it;
    /// it should check [`Armed::is_current()`] after acquiring whatever lock
    /// guards the engine and skip the tick if the token is stale.  Returning
    /// `ControlFlow::Break` stops the thread.
    pub fn new<F>(callback: F) -> ThreadScheduler
    where
        F: Fn(&Armed) -> ControlFlow<()> + Send + Sync + 'static,
    {
        ThreadScheduler {
            callback: Arc::new(callback),
            generation: Arc::new(AtomicU64::new(0)),
            armed: false,
        }
    }
}

impl Scheduler for ThreadScheduler {
    fn arm(&mut self, interval: Duration) -> io::Result<()> {
        // Bumping the generation retires any thread from an earlier arming,
        // even if spawning its replacement fails.
        let armed = Armed {
            generation: self.generation.fetch_add(1, Ordering::SeqCst) + 1,
            current: Arc::clone(&self.generation),
        };
        self.armed = false;
        let callback = Arc::clone(&self.callback);
        let _handle = thread::Builder::new()
            .name(String::from("snakesim-cadence"))
            .spawn(move || run_cadence(&armed, interval, &*callback))?;
        self.armed = true;
        Ok(())
    }

    fn disarm(&mut self) {
        let _ = self.generation.fetch_add(1, Ordering::SeqCst);
        self.armed = false;
    }

    fn is_armed(&self) -> bool {
        self.armed
    }
}

impl Drop for ThreadScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}

impl fmt::Debug for ThreadScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadScheduler")
            .field("generation", &self.generation.load(Ordering::SeqCst))
            .field("armed", &self.armed)
            .finish_non_exhaustive()
    }
}

fn run_cadence(armed: &Armed, interval: Duration, callback: &TickCallback) {
    debug!("Cadence thread {} started", armed.generation);
    let mut next_tick = Instant::now() + interval;
    while armed.is_current() {
        thread::sleep(next_tick.saturating_duration_since(Instant::now()));
        if !armed.is_current() || callback(armed).is_break() {
            break;
        }
        next_tick += interval;
    }
    debug!("Cadence thread {} stopped", armed.generation);
}

/// Token identifying one arming of a [`ThreadScheduler`]
#[derive(Clone, Debug)]
pub struct Armed {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl Armed {
    /// Test whether the scheduler is still armed with the same arming that
    /// spawned this token's thread
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}
