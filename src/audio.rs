//! Sound cues emitted by the game and the ways of playing them
use crate::game::{FoodKind, Phase, Snapshot};
use crate::settings::Percent;
use std::fmt;
use std::io::Write;

/// Fire-and-forget sound notifications from the game engine
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Cue {
    /// The snake ate some food
    Eat,
    /// The game was paused or resumed, or ended
    Pause,
    /// Switch the looping background track, or stop it if `None`
    Ambient(Option<Track>),
    /// The volume slider moved
    Volume(Percent),
}

/// Background music tracks
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Track {
    Normal,
    /// Played while special food is on the board
    Special,
}

impl From<FoodKind> for Track {
    fn from(kind: FoodKind) -> Track {
        match kind {
            FoodKind::Normal => Track::Normal,
            FoodKind::Special => Track::Special,
        }
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Track::Normal => "normal",
            Track::Special => "special",
        };
        f.pad(name)
    }
}

pub(crate) trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// An [`AudioSink`] that rings the terminal bell for one-shot cues and keeps
/// note of which background track should be playing
#[derive(Debug)]
pub(crate) struct TerminalBell<W> {
    out: W,
    volume: Percent,

    /// `None` while the background track is stopped
    track: Option<Track>,
}

impl<W: Write> TerminalBell<W> {
    pub(crate) fn new(out: W, volume: Percent) -> Self {
        TerminalBell {
            out,
            volume,
            track: None,
        }
    }

    pub(crate) fn track(&self) -> Option<Track> {
        self.track
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &W {
        &self.out
    }

    fn ring(&mut self) {
        if self.volume.is_zero() {
            return;
        }
        if let Err(e) = self.out.write_all(b"\x07").and_then(|()| self.out.flush()) {
            log::debug!("Failed to ring terminal bell: {e}");
        }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        log::debug!("Audio cue: {cue:?}");
        match cue {
            Cue::Eat | Cue::Pause => self.ring(),
            Cue::Ambient(track) => self.track = track,
            Cue::Volume(volume) => self.volume = volume,
        }
    }
}

/// Checks, several times a second, whether the background track needs to
/// change to match the food currently on the board.  The track plays only
/// while the game is running and is stopped otherwise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct AmbientPoller {
    current: Option<Track>,
}

impl AmbientPoller {
    pub(crate) fn poll(&mut self, snapshot: &Snapshot) -> Option<Cue> {
        let wanted = (snapshot.phase == Phase::Running).then(|| {
            snapshot
                .food
                .as_ref()
                .map_or(Track::Normal, |food| Track::from(food.kind))
        });
        (wanted != self.current).then(|| {
            self.current = wanted;
            Cue::Ambient(wanted)
        })
    }
}
