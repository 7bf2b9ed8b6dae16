use crate::command::Command;
use crate::consts;
use crate::game::Intent;
use crate::settings::{Percent, Settings};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// State of the settings pop-up shown while the game is paused
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Paused {
    /// The currently-selected slider
    selection: Slider,
}

impl Paused {
    const HORIZONTAL_PADDING: u16 = 1;
    const POINTER_WIDTH: u16 = 2;
    const LABEL_WIDTH: u16 = 6;
    const LABEL_VALUE_GUTTER: u16 = 2;
    const VALUE_WIDTH: u16 = 8;

    /// The height that should be used for the `Rect` passed to
    /// `PauseMenu::render()`
    pub(crate) const HEIGHT: u16 = 6;

    /// The width that should be used for the `Rect` passed to
    /// `PauseMenu::render()`
    pub(crate) const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::POINTER_WIDTH + Self::LABEL_WIDTH + Self::LABEL_VALUE_GUTTER + Self::VALUE_WIDTH;

    /// Handle a command while paused.  Returns `Some` if the user moved a
    /// slider.
    pub(crate) fn handle_command(&mut self, cmd: Command, settings: Settings) -> Option<Intent> {
        let value = self.selection.value(settings);
        match cmd {
            Command::Up => {
                if let Some(s) = self.selection.prev() {
                    self.selection = s;
                }
                None
            }
            Command::Down => {
                if let Some(s) = self.selection.next() {
                    self.selection = s;
                }
                None
            }
            Command::Left => value
                .can_decrease()
                .then(|| self.selection.intent(value.decrease())),
            Command::Right => value
                .can_increase()
                .then(|| self.selection.intent(value.increase())),
            Command::Home => Some(self.selection.intent(Percent::MIN)),
            Command::End => Some(self.selection.intent(Percent::MAX)),
            _ => None,
        }
    }

    pub(super) fn menu(self, settings: Settings) -> PauseMenu {
        PauseMenu {
            selection: self.selection,
            settings,
        }
    }
}

/// The adjustable settings
#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
enum Slider {
    #[default]
    Speed,
    Volume,
}

impl Slider {
    fn iter() -> impl Iterator<Item = Slider> {
        (0..Slider::LENGTH).map(Slider::from_usize)
    }

    fn next(self) -> Option<Slider> {
        let i = self.into_usize() + 1;
        (i < Slider::LENGTH).then(|| Slider::from_usize(i))
    }

    fn prev(self) -> Option<Slider> {
        self.into_usize().checked_sub(1).map(Slider::from_usize)
    }

    fn label(self) -> &'static str {
        match self {
            Slider::Speed => "Speed",
            Slider::Volume => "Volume",
        }
    }

    fn value(self, settings: Settings) -> Percent {
        match self {
            Slider::Speed => settings.speed,
            Slider::Volume => settings.volume,
        }
    }

    fn intent(self, value: Percent) -> Intent {
        match self {
            Slider::Speed => Intent::SetSpeed(value),
            Slider::Volume => Intent::SetVolume(value),
        }
    }

    fn to_line(self, value: Percent, selected: bool) -> Line<'static> {
        let s = format!(
            "{pointer:pwidth$}{label:lwidth$}{space:gutter$}{left} {value:^4} {right}",
            pointer = if selected { "»" } else { "" },
            pwidth = usize::from(Paused::POINTER_WIDTH),
            label = self.label(),
            lwidth = usize::from(Paused::LABEL_WIDTH),
            space = "",
            gutter = usize::from(Paused::LABEL_VALUE_GUTTER),
            left = if value.can_decrease() { '◀' } else { '◁' },
            right = if value.can_increase() { '▶' } else { '▷' },
        );
        let style = if selected {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        };
        Line::styled(s, style)
    }
}

/// A widget for displaying the pause pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct PauseMenu {
    selection: Slider,
    settings: Settings,
}

impl Widget for PauseMenu {
    /*
     * ┌────── PAUSED ──────┐
     * │ » Speed   ◀ 50%  ▶ │
     * │   Volume  ◀ 50%  ▶ │
     * │                    │
     * │ Resume (p)         │
     * └────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(Paused::HORIZONTAL_PADDING))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let mut rows = inner.rows();
        for (slider, row) in Slider::iter().zip(rows.by_ref()) {
            slider
                .to_line(slider.value(self.settings), slider == self.selection)
                .render(row, buf);
        }
        if let Some(row) = rows.nth(1) {
            Line::from_iter([
                Span::raw("Resume ("),
                Span::styled("p", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings(speed: u8, volume: u8) -> Settings {
        Settings {
            speed: Percent::new(speed),
            volume: Percent::new(volume),
        }
    }

    #[test]
    fn adjust_sliders() {
        let mut paused = Paused::default();
        let s = settings(50, 100);
        assert_eq!(
            paused.handle_command(Command::Right, s),
            Some(Intent::SetSpeed(Percent::new(55)))
        );
        assert_eq!(
            paused.handle_command(Command::Left, s),
            Some(Intent::SetSpeed(Percent::new(45)))
        );
        assert_eq!(paused.handle_command(Command::Up, s), None);
        assert_eq!(paused.handle_command(Command::Down, s), None);
        assert_eq!(paused.handle_command(Command::Right, s), None);
        assert_eq!(
            paused.handle_command(Command::Home, s),
            Some(Intent::SetVolume(Percent::MIN))
        );
        assert_eq!(paused.handle_command(Command::Down, s), None);
        assert_eq!(
            paused.handle_command(Command::End, s),
            Some(Intent::SetVolume(Percent::MAX))
        );
        assert_eq!(paused.handle_command(Command::Up, s), None);
        assert_eq!(
            paused.handle_command(Command::End, s),
            Some(Intent::SetSpeed(Percent::MAX))
        );
        assert_eq!(paused.handle_command(Command::Space, s), None);
    }

    #[test]
    fn render() {
        let area = Rect::new(0, 0, Paused::WIDTH, Paused::HEIGHT);
        let mut buffer = Buffer::empty(area);
        Paused::default()
            .menu(settings(100, 5))
            .render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌────── PAUSED ──────┐",
            "│ » Speed   ◀ 100% ▷ │",
            "│   Volume  ◀  5%  ▶ │",
            "│                    │",
            "│ Resume (p)         │",
            "└────────────────────┘",
        ]);
        expected.set_style(area, Style::reset());
        expected.set_style(Rect::new(2, 1, 18, 1), consts::MENU_SELECTION_STYLE);
        expected.set_style(Rect::new(10, 4, 1, 1), consts::KEY_STYLE);
        assert_eq!(buffer, expected);
    }
}
