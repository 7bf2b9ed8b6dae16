use crate::consts;
use crate::util::{LoadError, SaveError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Format of the timestamps recorded alongside each score
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// The best scores achieved so far, highest first
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct HighScores(Vec<HighScoreEntry>);

impl HighScores {
    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(|e| SaveError::mkdir("high scores", e))?;
        }
        let mut src =
            serde_json::to_string(self).map_err(|e| SaveError::serialize("high scores", e))?;
        src.push('\n');
        fs_err::write(path, &src).map_err(|e| SaveError::write("high scores", e))?;
        Ok(())
    }

    /// Read high scores from the JSON file at `path`.  A nonexistent file is
    /// treated as an empty table.
    ///
    /// Entries in the file are re-sorted & truncated in case the file was
    /// edited by hand.
    pub(crate) fn load(path: &Path) -> Result<HighScores, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HighScores::default()),
            Err(e) => return Err(LoadError::read("high scores", e)),
        };
        let mut scores: HighScores =
            serde_json::from_slice(&src).map_err(|e| LoadError::deserialize("high scores", e))?;
        scores.normalize();
        Ok(scores)
    }

    /// Record `score`, achieved at `date`.  Returns `true` if the score made
    /// it into the table.
    ///
    /// Scores of zero are not recorded, nor is an entry identical to one
    /// already in the table.  Entries with equal scores keep the order in
    /// which they were added, and only the top
    /// [`MAX_HIGH_SCORES`][consts::MAX_HIGH_SCORES] are kept.
    pub(crate) fn commit(&mut self, score: u32, date: String) -> bool {
        if score == 0 {
            return false;
        }
        let entry = HighScoreEntry { score, date };
        if self.0.contains(&entry) {
            return false;
        }
        self.0.push(entry.clone());
        self.normalize();
        self.0.contains(&entry)
    }

    fn normalize(&mut self) {
        // `sort_by` is stable, so ties stay in order of arrival.
        self.0.sort_by(|a, b| b.score.cmp(&a.score));
        self.0.truncate(consts::MAX_HIGH_SCORES);
    }

    /// The highest score recorded, or zero
    pub(crate) fn best(&self) -> u32 {
        self.0.first().map_or(0, |e| e.score)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    #[cfg(test)]
    pub(crate) fn entries(&self) -> &[HighScoreEntry] {
        &self.0
    }

    /// Render the table as one line per entry, with medals for the top three
    pub(crate) fn lines(&self) -> Vec<String> {
        if self.0.is_empty() {
            return vec![String::from("No high scores yet!")];
        }
        self.0
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let prefix = match i {
                    0 => String::from("🥇"),
                    1 => String::from("🥈"),
                    2 => String::from("🥉"),
                    _ => format!("{}. ", i + 1),
                };
                format!("{prefix}{} pts ({})", entry.score, entry.date)
            })
            .collect()
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct HighScoreEntry {
    pub(crate) score: u32,
    pub(crate) date: String,
}
