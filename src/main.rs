mod app;
mod command;
use crate::app::App;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use log::info;
use simplelog::{ColorChoice, TermLogger, TerminalMode, WriteLogger};
use snakesim::config::{Config, ConfigError, LoggingConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
Usage: snakesim [-c|--config <path>] [-s|--seed <u64>]

Run a headless game of snake.  Commands are read from standard input, one per
line: up, down, left, right, start, pause, resume, restart, quit.  The state of
the game is written to standard output as one JSON object per line.

Options:
  -c, --config <path>   Read configuration from <path>
  -s, --seed <u64>      Seed the random number generator
  -h, --help            Show this help and exit
  -V, --version         Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Arguments {
    Run {
        config: Option<PathBuf>,
        seed: Option<u64>,
    },
    Help,
    Version,
}

impl Arguments {
    fn from_parser(mut parser: Parser) -> Result<Arguments, lexopt::Error> {
        let mut config = None;
        let mut seed = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('s') | Arg::Long("seed") => {
                    seed = Some(parser.value()?.parse::<u64>()?);
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Arguments::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Arguments::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Arguments::Run { config, seed })
    }
}

fn main() -> ExitCode {
    match Arguments::from_parser(Parser::from_env()) {
        Ok(Arguments::Run { config, seed }) => match run(config, seed) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("snakesim: {e:?}");
                ExitCode::FAILURE
            }
        },
        Ok(Arguments::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Arguments::Version) => {
            println!("snakesim {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("snakesim: {e}");
            eprint!("{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(config_path: Option<PathBuf>, seed: Option<u64>) -> anyhow::Result<()> {
    let config = load_config(config_path).context("failed to load configuration")?;
    init_logging(&config.logging)?;
    let seed = seed.unwrap_or_else(rand::random);
    info!("Using RNG seed {seed}");
    App::new(config.game, seed).run(io::stdin().lock(), io::stdout())
}

fn load_config(path: Option<PathBuf>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => Config::load(&p, false),
        None => match Config::default_path() {
            Ok(p) => Config::load(&p, true),
            Err(ConfigError::NoPath) => Ok(Config::default()),
            Err(e) => Err(e),
        },
    }
}

fn init_logging(cfg: &LoggingConfig) -> anyhow::Result<()> {
    let log_config = simplelog::Config::default();
    let r = if let Some(ref path) = cfg.file {
        let file = fs_err::File::create(path).context("failed to open log file")?;
        WriteLogger::init(cfg.level, log_config, file)
    } else {
        TermLogger::init(
            cfg.level,
            log_config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )
    };
    r.context("failed to initialize logging")
}
