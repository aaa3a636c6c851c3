use crate::game::Rules;
use log::LevelFilter;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Who is playing
    #[serde(default)]
    pub(crate) player: PlayerConfig,

    /// Gameplay settings
    #[serde(default)]
    pub(crate) rules: Rules,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    #[serde(default)]
    pub(crate) logging: LoggingConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("mutasnake").join("config.toml"))
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
                log::debug!("No configuration file at {}; using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct PlayerConfig {
    /// The identity (e.g., a wallet address) under which scores are recorded
    pub(crate) id: Option<String>,
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the leaderboard is stored
    leaderboard_file: Option<PathBuf>,

    /// Path to which log messages are appended
    log_file: Option<PathBuf>,
}

impl FileConfig {
    /// Return the path at which the leaderboard should be stored: the file
    /// given in the configuration or, if that is not set, a file in the local
    /// data directory.  Return `None` if no path is configured and the local
    /// data directory could not be determined.
    pub(crate) fn leaderboard_file(&self) -> Option<Cow<'_, Path>> {
        self.leaderboard_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| data_file("leaderboard.json").map(Cow::from))
    }

    /// Return the path to which log messages should be written, determined in
    /// the same way as [`FileConfig::leaderboard_file()`]
    pub(crate) fn log_file(&self) -> Option<Cow<'_, Path>> {
        self.log_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| data_file("mutasnake.log").map(Cow::from))
    }
}

fn data_file(name: &str) -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join("mutasnake").join(name))
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct LoggingConfig {
    /// Most verbose level of messages to write to the log file
    pub(crate) level: LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            level: LevelFilter::Info,
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
