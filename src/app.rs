use crate::command::Command;
use anyhow::Context;
use log::{error, info, warn};
use rand::{rngs::StdRng, SeedableRng};
use snakesim::config::GameSettings;
use snakesim::game::Snapshot;
use snakesim::session::SharedGame;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::Receiver;
use std::thread;

/// Headless front end: commands come in as lines of text, and the state of
/// the game goes out as one JSON object per line after every change.
#[derive(Debug)]
pub(crate) struct App {
    game: SharedGame<StdRng>,
}

impl App {
    pub(crate) fn new(settings: GameSettings, seed: u64) -> App {
        App {
            game: SharedGame::new(settings, StdRng::seed_from_u64(seed)),
        }
    }

    /// Process commands from `input` until it is exhausted or a `quit` is
    /// read, writing snapshots to `output` from a separate thread.
    pub(crate) fn run<I, W>(self, input: I, output: W) -> anyhow::Result<()>
    where
        I: BufRead,
        W: Write + Send + 'static,
    {
        let initial = self.game.snapshot();
        let snapshots = self.game.subscribe();
        let printer = thread::Builder::new()
            .name(String::from("snakesim-output"))
            .spawn(move || print_snapshots(&initial, &snapshots, output))
            .context("failed to spawn output thread")?;
        for line in input.lines() {
            let line = line.context("failed to read command")?;
            match Command::from_line(&line) {
                Some(Command::Quit) => break,
                Some(cmd) => {
                    // The game is left paused, so a later `resume` can retry.
                    if let Err(e) = self.dispatch(cmd) {
                        error!("Failed to run {cmd:?} command: {e}");
                    }
                }
                None if line.trim().is_empty() => (),
                None => warn!("Unrecognized command: {line:?}"),
            }
        }
        info!("Shutting down");
        // Dropping the game closes the snapshot channel, which lets the
        // printer finish.
        drop(self);
        printer
            .join()
            .map_err(|_| anyhow::anyhow!("output thread panicked"))?
            .context("failed to write snapshot")
    }

    fn dispatch(&self, cmd: Command) -> io::Result<()> {
        match cmd {
            Command::Turn(direction) => {
                self.game.request_direction_change(direction);
                Ok(())
            }
            Command::Start => self.game.start(),
            Command::Pause => {
                self.game.pause();
                Ok(())
            }
            Command::Resume => self.game.resume(),
            Command::Restart => self.game.restart(),
            Command::Quit => Ok(()),
        }
    }
}

fn print_snapshots<W: Write>(
    initial: &Snapshot,
    snapshots: &Receiver<Snapshot>,
    mut output: W,
) -> io::Result<()> {
    write_snapshot(&mut output, initial)?;
    for snap in snapshots {
        write_snapshot(&mut output, &snap)?;
    }
    Ok(())
}

fn write_snapshot<W: Write>(output: &mut W, snap: &Snapshot) -> io::Result<()> {
    serde_json::to_writer(&mut *output, snap)?;
    output.write_all(b"\n")?;
    output.flush()
}
