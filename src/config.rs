use crate::consts;
use crate::game::{BoardSize, Direction, Snake};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// Rules for the game itself
    #[serde(default)]
    pub game: GameSettings,

    /// Where & how much to log
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Return the default configuration file path
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snakesim").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read, if the file's contents
    /// could not be deserialized, or if the game settings are unplayable.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        Config::parse(&content)
    }

    /// Parse & validate configuration from a TOML document
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        let config = toml::from_str::<Config>(content)?;
        config.game.validate()?;
        Ok(config)
    }
}

/// The fixed rules of a game.  These do not change once an engine has been
/// created.
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(from = "RawGameSettings")]
pub struct GameSettings {
    /// Size of the playing field
    pub board: BoardSize,

    /// Time between ticks while a game is being played
    pub tick_period: Duration,

    /// Score awarded for each piece of food eaten
    pub points_per_food: u32,

    /// Length of the snake at the start of a game
    pub initial_length: usize,

    /// Direction the snake faces at the start of a game
    pub initial_heading: Direction,
}

impl GameSettings {
    /// Return the snake with which every game under these settings begins
    pub fn initial_snake(&self) -> Snake {
        Snake::initial(self.board, self.initial_length, self.initial_heading)
    }

    /// Check that a game can actually be played under these settings
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        let BoardSize { columns, rows } = self.board;
        if columns == 0 || rows == 0 {
            return Err(InvalidConfig::EmptyBoard { columns, rows });
        }
        if self.tick_period.is_zero() {
            return Err(InvalidConfig::ZeroTickPeriod);
        }
        if self.initial_length == 0 {
            return Err(InvalidConfig::ZeroLength);
        }
        // The initial snake trails straight back from the center, so it fits
        // exactly when its length is at most that span.
        let room = self
            .board
            .span_from_center(self.initial_heading.opposite());
        if self.initial_length > room {
            return Err(InvalidConfig::SnakeDoesNotFit {
                length: self.initial_length,
                columns,
                rows,
            });
        }
        if self.initial_length >= self.board.cell_count() {
            return Err(InvalidConfig::NoRoomForFood { columns, rows });
        }
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> GameSettings {
        GameSettings {
            board: BoardSize::default(),
            tick_period: consts::TICK_PERIOD,
            points_per_food: consts::POINTS_PER_FOOD,
            initial_length: consts::INITIAL_SNAKE_LENGTH,
            initial_heading: consts::INITIAL_HEADING,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGameSettings {
    columns: u16,
    rows: u16,
    tick_interval_ms: u64,
    points_per_food: u32,
    initial_length: usize,
    initial_heading: Direction,
}

impl Default for RawGameSettings {
    fn default() -> RawGameSettings {
        RawGameSettings {
            columns: consts::BOARD_COLUMNS,
            rows: consts::BOARD_ROWS,
            tick_interval_ms: consts::TICK_PERIOD_MS,
            points_per_food: consts::POINTS_PER_FOOD,
            initial_length: consts::INITIAL_SNAKE_LENGTH,
            initial_heading: consts::INITIAL_HEADING,
        }
    }
}

impl From<RawGameSettings> for GameSettings {
    fn from(value: RawGameSettings) -> GameSettings {
        GameSettings {
            board: BoardSize::new(value.columns, value.rows),
            tick_period: Duration::from_millis(value.tick_interval_ms),
            points_per_food: value.points_per_food,
            initial_length: value.initial_length,
            initial_heading: value.initial_heading,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Most verbose level of messages to emit
    pub level: LevelFilter,

    /// File to write log messages to.  When unset, messages go to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            level: LevelFilter::Info,
            file: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid game settings")]
    Invalid(#[from] InvalidConfig),
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum InvalidConfig {
    #[error("board must have at least one row and one column, got {columns}x{rows}")]
    EmptyBoard { columns: u16, rows: u16 },
    #[error("tick interval must be nonzero")]
    ZeroTickPeriod,
    #[error("initial snake length must be nonzero")]
    ZeroLength,
    #[error("snake of length {length} does not fit on {columns}x{rows} board")]
    SnakeDoesNotFit {
        length: usize,
        columns: u16,
        rows: u16,
    },
    #[error("{columns}x{rows} board leaves no room for food")]
    NoRoomForFood { columns: u16, rows: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn empty_config_is_default() {
        let config = Config::parse("").expect("empty config should parse");
        assert_eq!(config, Config::default());
        assert_eq!(config.game.board, BoardSize::new(20, 20));
        assert_eq!(config.game.tick_period, Duration::from_millis(150));
        assert_eq!(config.game.points_per_food, 10);
        assert_eq!(config.game.initial_length, 3);
        assert_eq!(config.game.initial_heading, Direction::Right);
        assert_eq!(config.logging.level, LevelFilter::Info);
    }

    #[test]
    fn full_config() {
        let config = Config::parse(concat!(
            "[game]\n",
            "columns = 30\n",
            "rows = 12\n",
            "tick-interval-ms = 90\n",
            "points-per-food = 5\n",
            "initial-length = 4\n",
            "initial-heading = \"up\"\n",
            "\n",
            "[logging]\n",
            "level = \"debug\"\n",
            "file = \"/tmp/snakesim.log\"\n",
        ))
        .expect("config should parse");
        assert_eq!(
            config,
            Config {
                game: GameSettings {
                    board: BoardSize::new(30, 12),
                    tick_period: Duration::from_millis(90),
                    points_per_food: 5,
                    initial_length: 4,
                    initial_heading: Direction::Up,
                },
                logging: LoggingConfig {
                    level: LevelFilter::Debug,
                    file: Some(PathBuf::from("/tmp/snakesim.log")),
                },
            }
        );
    }

    #[test]
    fn partial_game_table() {
        let config = Config::parse("[game]\nrows = 8\n").expect("config should parse");
        assert_eq!(config.game.board, BoardSize::new(20, 8));
        assert_eq!(config.game.tick_period, consts::TICK_PERIOD);
    }

    #[test]
    fn bad_heading() {
        let r = Config::parse("[game]\ninitial-heading = \"north\"\n");
        assert!(matches!(r, Err(ConfigError::Parse(_))), "got {r:?}");
    }

    #[rstest]
    #[case("columns = 0", InvalidConfig::EmptyBoard { columns: 0, rows: 20 })]
    #[case("rows = 0", InvalidConfig::EmptyBoard { columns: 20, rows: 0 })]
    #[case("tick-interval-ms = 0", InvalidConfig::ZeroTickPeriod)]
    #[case("initial-length = 0", InvalidConfig::ZeroLength)]
    #[case(
        "initial-length = 12",
        InvalidConfig::SnakeDoesNotFit { length: 12, columns: 20, rows: 20 }
    )]
    #[case(
        "columns = 2\nrows = 1\ninitial-length = 2",
        InvalidConfig::NoRoomForFood { columns: 2, rows: 1 }
    )]
    #[case(
        "initial-length = 300000000",
        InvalidConfig::SnakeDoesNotFit { length: 300_000_000, columns: 20, rows: 20 }
    )]
    #[case(
        "initial-length = 4294967295",
        InvalidConfig::SnakeDoesNotFit { length: 4_294_967_295, columns: 20, rows: 20 }
    )]
    #[case(
        "initial-heading = \"down\"\ninitial-length = 12",
        InvalidConfig::SnakeDoesNotFit { length: 12, columns: 20, rows: 20 }
    )]
    #[case(
        "columns = 1\nrows = 1\ninitial-length = 1",
        InvalidConfig::NoRoomForFood { columns: 1, rows: 1 }
    )]
    fn invalid_game(#[case] body: &str, #[case] err: InvalidConfig) {
        let r = Config::parse(&format!("[game]\n{body}\n"));
        match r {
            Err(ConfigError::Invalid(e)) => assert_eq!(e, err),
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn huge_length_rejected_quickly() {
        let start = std::time::Instant::now();
        let r = Config::parse("[game]\ninitial-length = 300000000\n");
        assert!(
            matches!(
                r,
                Err(ConfigError::Invalid(InvalidConfig::SnakeDoesNotFit { .. }))
            ),
            "got {r:?}"
        );
        assert!(
            start.elapsed() < Duration::from_secs(1),
            "validation should not build the snake"
        );
    }

    #[rstest]
    #[case(Direction::Up)]
    #[case(Direction::Down)]
    #[case(Direction::Left)]
    #[case(Direction::Right)]
    fn fit_check_agrees_with_initial_snake(#[case] heading: Direction) {
        let board = BoardSize::new(7, 4);
        let longest = board.span_from_center(heading.opposite());
        for initial_length in 1..=longest + 1 {
            let settings = GameSettings {
                board,
                initial_length,
                initial_heading: heading,
                ..GameSettings::default()
            };
            let on_board = settings
                .initial_snake()
                .segments()
                .all(|p| board.contains(p));
            assert_eq!(
                settings.validate().is_ok(),
                on_board,
                "length {initial_length} facing {heading:?}"
            );
        }
    }

    #[test]
    fn longest_snake_that_fits() {
        let config =
            Config::parse("[game]\ninitial-length = 11\n").expect("config should parse");
        assert_eq!(config.game.initial_snake().tail_tip().x, 0);
    }

    #[test]
    fn load_missing_allowed() {
        let tmpdir = tempfile::tempdir().expect("should create tempdir");
        let config = Config::load(&tmpdir.path().join("config.toml"), true)
            .expect("missing file should be allowed");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_missing_not_allowed() {
        let tmpdir = tempfile::tempdir().expect("should create tempdir");
        let r = Config::load(&tmpdir.path().join("config.toml"), false);
        assert!(matches!(r, Err(ConfigError::Read(_))), "got {r:?}");
    }

    #[test]
    fn load_from_file() {
        let tmpdir = tempfile::tempdir().expect("should create tempdir");
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[game]\npoints-per-food = 25\n").expect("should write config");
        let config = Config::load(&path, false).expect("config should load");
        assert_eq!(config.game.points_per_food, 25);
    }
}
