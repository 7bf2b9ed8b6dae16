use crate::consts;
use crate::util::{LoadError, SaveError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// User-adjustable settings, saved between sessions
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub(crate) speed: Percent,
    pub(crate) volume: Percent,
}

impl Settings {
    /// Time between ticks of the game at the current speed setting.
    ///
    /// 0% gives [`consts::SLOWEST_TICK`], 100% gives [`consts::FASTEST_TICK`],
    /// and everything in between is interpolated linearly.
    pub(crate) fn tick_interval(&self) -> Duration {
        let span = consts::SLOWEST_TICK.saturating_sub(consts::FASTEST_TICK);
        let faster_by = span * u32::from(self.speed.get()) / 100;
        consts::SLOWEST_TICK
            .saturating_sub(faster_by)
            .clamp(consts::FASTEST_TICK, consts::SLOWEST_TICK)
    }

    /// Read settings from the JSON file at `path`.  Returns `None` if the
    /// file does not exist.
    pub(crate) fn load(path: &Path) -> Result<Option<Settings>, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LoadError::read("settings", e)),
        };
        serde_json::from_slice(&src)
            .map(Some)
            .map_err(|e| LoadError::deserialize("settings", e))
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(|e| SaveError::mkdir("settings", e))?;
        }
        let mut src =
            serde_json::to_string(self).map_err(|e| SaveError::serialize("settings", e))?;
        src.push('\n');
        fs_err::write(path, &src).map_err(|e| SaveError::write("settings", e))?;
        Ok(())
    }
}

/// A slider position from 0 to 100
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(from = "f64", into = "u8")]
pub(crate) struct Percent(u8);

impl Percent {
    pub(crate) const MIN: Percent = Percent(0);
    pub(crate) const MAX: Percent = Percent(100);

    /// Create a `Percent`, clamping `value` to at most 100
    pub(crate) fn new(value: u8) -> Percent {
        Percent(value.min(100))
    }

    pub(crate) fn get(self) -> u8 {
        self.0
    }

    pub(crate) fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub(crate) fn increase(self) -> Percent {
        Percent::new(self.0.saturating_add(consts::SLIDER_STEP))
    }

    pub(crate) fn decrease(self) -> Percent {
        Percent(self.0.saturating_sub(consts::SLIDER_STEP))
    }

    pub(crate) fn can_increase(self) -> bool {
        self != Self::MAX
    }

    pub(crate) fn can_decrease(self) -> bool {
        self != Self::MIN
    }
}

impl Default for Percent {
    fn default() -> Percent {
        Percent(50)
    }
}

// Slider widgets tend to store fractional values, so accept any number and
// round it into range.
impl From<f64> for Percent {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from(value: f64) -> Percent {
        if value.is_nan() {
            Percent::default()
        } else {
            Percent(value.round().clamp(0.0, 100.0) as u8)
        }
    }
}

impl From<Percent> for u8 {
    fn from(value: Percent) -> u8 {
        value.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{}%", self.0))
    }
}
