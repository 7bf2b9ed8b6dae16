//! Persistence of high scores & settings as seen by the game engine.
//!
//! Failures are logged and otherwise ignored: the game always gets a usable
//! value back, and a failed save never interrupts play.
use crate::highscores::{HighScores, DATE_FORMAT};
use crate::settings::Settings;
use crate::util::error_chain;
use std::fmt;
use std::path::{Path, PathBuf};

/// File in the data directory in which high scores are stored
const HIGH_SCORES_FILE: &str = "high_scores.json";

/// File in the data directory in which settings are stored
const SETTINGS_FILE: &str = "settings.json";

pub(crate) trait Store: fmt::Debug {
    /// Return the current high score table
    fn load_scores(&mut self) -> HighScores;

    /// Add `score` to the high score table, stamped with the current time,
    /// and persist the table.  A score of zero is ignored.
    fn commit_score(&mut self, score: u32);

    /// Return the saved settings, or the defaults if there are none
    fn load_settings(&mut self) -> Settings;

    fn save_settings(&mut self, settings: Settings);
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn load_scores(&mut self) -> HighScores {
        (**self).load_scores()
    }

    fn commit_score(&mut self, score: u32) {
        (**self).commit_score(score);
    }

    fn load_settings(&mut self) -> Settings {
        (**self).load_settings()
    }

    fn save_settings(&mut self, settings: Settings) {
        (**self).save_settings(settings);
    }
}

/// The current local time in the format used for high score entries
pub(crate) fn timestamp() -> String {
    chrono::Local::now().format(DATE_FORMAT).to_string()
}

/// A [`Store`] backed by JSON files in a data directory
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileStore {
    scores_path: PathBuf,
    settings_path: PathBuf,
    scores: HighScores,
}

impl FileStore {
    /// Open the store in `data_dir`, reading the high score table (if any)
    pub(crate) fn new(data_dir: &Path) -> FileStore {
        let scores_path = data_dir.join(HIGH_SCORES_FILE);
        let scores = match HighScores::load(&scores_path) {
            Ok(scores) => {
                log::debug!("Loaded {} high scores", scores.len());
                scores
            }
            Err(e) => {
                log::warn!("{}; starting with no high scores", error_chain(&e));
                HighScores::default()
            }
        };
        FileStore {
            scores_path,
            settings_path: data_dir.join(SETTINGS_FILE),
            scores,
        }
    }
}

impl Store for FileStore {
    fn load_scores(&mut self) -> HighScores {
        self.scores.clone()
    }

    fn commit_score(&mut self, score: u32) {
        if self.scores.commit(score, timestamp()) {
            log::info!("Recorded high score of {score}");
            if let Err(e) = self.scores.save(&self.scores_path) {
                log::warn!("{}", error_chain(&e));
            }
        }
    }

    fn load_settings(&mut self) -> Settings {
        match Settings::load(&self.settings_path) {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                let settings = Settings::default();
                self.save_settings(settings);
                settings
            }
            Err(e) => {
                log::warn!("{}; using default settings", error_chain(&e));
                Settings::default()
            }
        }
    }

    fn save_settings(&mut self, settings: Settings) {
        if let Err(e) = settings.save(&self.settings_path) {
            log::warn!("{}", error_chain(&e));
        }
    }
}

/// A [`Store`] that forgets everything when the program exits
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore {
    scores: HighScores,
    settings: Settings,
}

impl MemoryStore {
    #[cfg(test)]
    pub(crate) fn with_settings(settings: Settings) -> MemoryStore {
        MemoryStore {
            scores: HighScores::default(),
            settings,
        }
    }
}

impl Store for MemoryStore {
    fn load_scores(&mut self) -> HighScores {
        self.scores.clone()
    }

    fn commit_score(&mut self, score: u32) {
        self.scores.commit(score, timestamp());
    }

    fn load_settings(&mut self) -> Settings {
        self.settings
    }

    fn save_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }
}
