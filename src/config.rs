use crate::consts;
use crate::game::Grid;
use crate::util::{default_data_dir, APP_DIR_NAME};
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the log file created in the data directory when no log file is
/// configured
const LOG_FILE_NAME: &str = "torsnake.log";

/// Program configuration read from a configuration file
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Config {
    /// Minimum level of messages written to the log file
    pub(crate) log_level: LevelFilter,

    pub(crate) game: GameConfig,

    /// Settings about data files
    pub(crate) files: FileConfig,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            log_level: LevelFilter::Info,
            game: GameConfig::default(),
            files: FileConfig::default(),
        }
    }
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join(APP_DIR_NAME).join("config.toml"))
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

    /// Return the board to play on, with the configured size clamped to the
    /// supported range
    pub(crate) fn grid(&self) -> Grid {
        let size = self
            .game
            .grid_size
            .clamp(consts::MIN_GRID_SIZE, consts::MAX_GRID_SIZE);
        if size != self.game.grid_size {
            log::warn!(
                "Configured grid size {} is out of range; using {size}",
                self.game.grid_size
            );
        }
        Grid::new(size)
    }

    /// Return the directory in which to store high scores & settings: the
    /// directory given in the configuration or, if that is not set, the
    /// default data directory.  Returns `None` if no directory is configured
    /// and the default could not be determined.
    pub(crate) fn data_dir(&self) -> Option<PathBuf> {
        self.files.data_dir.clone().or_else(default_data_dir)
    }

    /// Return the path to write log messages to
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.files
            .log_file
            .clone()
            .or_else(|| self.data_dir().map(|p| p.join(LOG_FILE_NAME)))
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Width & height of the board, in cells
    pub(crate) grid_size: u16,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            grid_size: consts::GRID_SIZE,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Directory in which high scores & settings are stored
    pub(crate) data_dir: Option<PathBuf>,

    /// Whether to load & save high scores and settings at all
    pub(crate) save_data: bool,

    pub(crate) log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            data_dir: None,
            save_data: true,
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

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn empty() {
        let cfg = toml::from_str::<Config>("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.log_level, LevelFilter::Info);
        assert_eq!(cfg.grid(), Grid::new(20));
        assert!(cfg.files.save_data);
    }

    #[test]
    fn full() {
        let src = concat!(
            "log-level = \"debug\"\n",
            "\n",
            "[game]\n",
            "grid-size = 12\n",
            "\n",
            "[files]\n",
            "data-dir = \"/tmp/torsnake\"\n",
            "save-data = false\n",
            "log-file = \"/var/log/snake.log\"\n",
        );
        let cfg = toml::from_str::<Config>(src).unwrap();
        assert_eq!(
            cfg,
            Config {
                log_level: LevelFilter::Debug,
                game: GameConfig { grid_size: 12 },
                files: FileConfig {
                    data_dir: Some(PathBuf::from("/tmp/torsnake")),
                    save_data: false,
                    log_file: Some(PathBuf::from("/var/log/snake.log")),
                },
            }
        );
        assert_eq!(cfg.data_dir(), Some(PathBuf::from("/tmp/torsnake")));
        assert_eq!(cfg.log_file(), Some(PathBuf::from("/var/log/snake.log")));
    }

    #[test]
    fn log_file_defaults_to_data_dir() {
        let cfg = toml::from_str::<Config>("[files]\ndata-dir = \"/srv/snake\"\n").unwrap();
        assert_eq!(cfg.log_file(), Some(PathBuf::from("/srv/snake/torsnake.log")));
    }

    #[rstest]
    #[case(0, 5)]
    #[case(5, 5)]
    #[case(17, 17)]
    #[case(40, 40)]
    #[case(1000, 40)]
    fn grid_size_clamped(#[case] configured: u16, #[case] size: u16) {
        let cfg = Config {
            game: GameConfig {
                grid_size: configured,
            },
            ..Config::default()
        };
        assert_eq!(cfg.grid().size(), size);
    }

    #[test]
    fn bad_log_level() {
        let r = toml::from_str::<Config>("log-level = \"loud\"\n");
        assert!(r.is_err());
    }

    #[test]
    fn load_missing() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn load_invalid() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs_err::write(&path, "[game]\ngrid-size = \"big\"\n").unwrap();
        assert!(matches!(
            Config::load(&path, true),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs_err::write(&path, "[files]\nsave-data = false\n").unwrap();
        let cfg = Config::load(&path, false).unwrap();
        assert!(!cfg.files.save_data);
        assert_eq!(cfg.game, GameConfig::default());
    }
}
