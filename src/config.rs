use crate::consts;
use crate::game::Grid;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Settings for gameplay
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("neon-snake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which the high score should be stored: the file
    /// given in the configuration or, if that is not set, the default high
    /// score path.  Returns `None` if `files.save-high-score` is `false` or if
    /// no path is configured and the default could not be computed.
    pub(crate) fn high_score_path(&self) -> Option<PathBuf> {
        if !self.files.save_high_score {
            return None;
        }
        self.files
            .high_score_file
            .clone()
            .or_else(default_high_score_path)
    }

    pub(crate) fn log_file(&self) -> Option<&Path> {
        self.files.log_file.as_deref()
    }
}

fn default_high_score_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("neon-snake").join("high-score"))
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Number of tiles along each side of the board
    pub(crate) tile_count: TileCount,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            tile_count: TileCount(consts::DEFAULT_TILE_COUNT),
        }
    }
}

/// A board size within the range that fits the display
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "u16")]
pub(crate) struct TileCount(u16);

impl TileCount {
    pub(crate) fn grid(self) -> Grid {
        Grid::new(self.0)
    }
}

impl TryFrom<u16> for TileCount {
    type Error = TileCountError;

    fn try_from(value: u16) -> Result<TileCount, TileCountError> {
        if (consts::MIN_TILE_COUNT..=consts::MAX_TILE_COUNT).contains(&value) {
            Ok(TileCount(value))
        } else {
            Err(TileCountError(value.to_string()))
        }
    }
}

impl std::str::FromStr for TileCount {
    type Err = TileCountError;

    fn from_str(s: &str) -> Result<TileCount, TileCountError> {
        s.parse::<u16>()
            .map_err(|_| TileCountError(s.to_owned()))
            .and_then(TileCount::try_from)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error(
    "tile count must be an integer from {min} to {max}, got {0}",
    min = consts::MIN_TILE_COUNT,
    max = consts::MAX_TILE_COUNT
)]
pub(crate) struct TileCountError(String);

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    save_high_score: bool,

    /// File to append log messages to.  Nothing is logged if this is unset.
    log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
            log_file: None,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
