//! Drawing the game screen
mod paused;
pub(crate) use self::paused::Paused;
use crate::audio::Track;
use crate::consts;
use crate::game::{Direction, FoodKind, FoodView, Phase, Snapshot};
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Position, Rect, Size},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

/// The full game screen: score bar, board, messages, and whichever pop-ups
/// are open
#[derive(Clone, Copy, Debug)]
pub(crate) struct GameView<'a> {
    pub(crate) snapshot: &'a Snapshot,

    /// The background track currently playing, if any
    pub(crate) track: Option<Track>,

    pub(crate) paused: Paused,

    /// Whether to show the high score card beside the board
    pub(crate) show_scores: bool,
}

impl GameView<'_> {
    /// Size of the board including its border
    fn board_size(&self) -> Size {
        let grid = self.snapshot.grid_size;
        Size {
            width: grid.saturating_mul(consts::CELL_WIDTH).saturating_add(2),
            height: grid.saturating_add(2),
        }
    }

    fn render_score_bar(&self, area: Rect, buf: &mut Buffer) {
        Line::styled(
            format!(
                " Score: {}  High Score: {}",
                self.snapshot.score, self.snapshot.high_score
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(area, buf);
        let track = match self.track {
            Some(track) => format!("♪ {track} "),
            None => String::from("♪ off "),
        };
        Line::from(track).right_aligned().render(area, buf);
    }

    fn render_board(&self, area: Rect, buf: &mut Buffer) {
        DottedBorder.render(area, buf);
        let snap = self.snapshot;
        let mut canvas = Canvas {
            area: area.inner(Margin::new(1, 1)),
            buf,
        };
        for p in Rect::new(0, 0, snap.grid_size, snap.grid_size).positions() {
            canvas.draw_cell(p, consts::EMPTY_CELL_SYMBOL, consts::EMPTY_CELL_STYLE);
        }
        for &p in snap.snake.iter().skip(1) {
            canvas.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_BODY_STYLE);
        }
        if let Some(food) = snap.food {
            let (symbol, style) = food_glyph(food);
            canvas.draw_cell(food.position, symbol, style);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if let Some(head) = snap.head() {
            if snap.phase == Phase::Dead {
                canvas.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            } else {
                canvas.draw_cell(head, head_symbol(snap.direction), consts::SNAKE_HEAD_STYLE);
            }
        }
    }

    fn render_messages(&self, msg1_area: Rect, msg2_area: Rect, buf: &mut Buffer) {
        let banner = match self.snapshot.phase {
            Phase::Running | Phase::Paused => {
                controls_line().centered().render(msg2_area, buf);
                return;
            }
            Phase::Dead => "GAME OVER",
            Phase::Exhausted => "GAME OVER: the board is full!",
        };
        Line::styled(banner, consts::BANNER_STYLE)
            .centered()
            .render(msg1_area, buf);
        Line::from_iter([
            Span::raw("Press "),
            Span::styled("SPACE", consts::KEY_STYLE),
            Span::raw(" to play again or "),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(" to quit"),
        ])
        .centered()
        .render(msg2_area, buf);
    }
}

impl Widget for GameView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board_size = self.board_size();
        let content_width = if self.show_scores {
            board_size
                .width
                .saturating_add(1)
                .saturating_add(consts::SCORES_CARD_WIDTH)
        } else {
            board_size.width
        };
        let display = center_rect(
            area,
            Size {
                width: content_width.max(consts::MIN_DISPLAY_WIDTH),
                height: board_size.height.saturating_add(3),
            },
        );
        let [score_area, main_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(board_size.height),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        self.render_score_bar(score_area, buf);

        let content = center_rect(
            main_area,
            Size {
                width: content_width,
                height: board_size.height,
            },
        );
        let board_area = if self.show_scores {
            let [board_area, _, card_area] = Layout::horizontal([
                Constraint::Length(board_size.width),
                Constraint::Length(1),
                Constraint::Length(consts::SCORES_CARD_WIDTH),
            ])
            .areas(content);
            ScoresCard {
                lines: &self.snapshot.high_score_lines,
            }
            .render(card_area, buf);
            board_area
        } else {
            content
        };
        self.render_board(board_area, buf);
        self.render_messages(msg1_area, msg2_area, buf);

        if self.snapshot.is_paused() {
            let pause_area = center_rect(
                display,
                Size {
                    width: Paused::WIDTH,
                    height: Paused::HEIGHT,
                },
            );
            self.paused
                .menu(self.snapshot.settings)
                .render(pause_area, buf);
        }
    }
}

/// Key hints shown below the board during play
fn controls_line() -> Line<'static> {
    Line::from_iter([
        ("Move", "←↑↓→/wasd"),
        ("Pause", "p"),
        ("Scores", "Tab"),
        ("Quit", "q"),
    ]
    .into_iter()
    .enumerate()
    .flat_map(|(i, (action, key))| {
        [
            Span::raw(if i == 0 { "" } else { "  " }),
            Span::raw(format!("{action}: ")),
            Span::styled(key, consts::KEY_STYLE),
        ]
    }))
}

fn head_symbol(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

fn food_glyph(food: FoodView) -> (&'static str, Style) {
    match food.kind {
        FoodKind::Normal => (consts::FOOD_SYMBOL, consts::FOOD_STYLE),
        FoodKind::Special => {
            let mut style = consts::SPECIAL_FOOD_STYLE;
            if food
                .opacity
                .is_some_and(|o| o < consts::FADED_FOOD_OPACITY)
            {
                style = style.add_modifier(Modifier::DIM);
            }
            (consts::SPECIAL_FOOD_SYMBOL, style)
        }
    }
}

/// The high score table, shown beside the board on request
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ScoresCard<'a> {
    lines: &'a [String],
}

impl Widget for ScoresCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" High Scores ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);
        for (line, row) in self.lines.iter().zip(inner.rows()) {
            Line::raw(line.as_str()).render(row, buf);
        }
    }
}

/// Draws board cells, each of which is [`consts::CELL_WIDTH`] columns wide
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        let Some(x) = pos
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if !self.area.contains(Position::new(x, y)) {
            return;
        }
        let room = usize::from(self.area.right() - x).min(usize::from(consts::CELL_WIDTH));
        self.buf
            .set_stringn(x, y, symbol, room, Style::reset().patch(style));
    }

    fn draw_char(&mut self, pos: Position, symbol: char) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
        }
    }
}

/// A border drawn with dots, for a board whose edges wrap around
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let max_x = area.width.saturating_sub(1);
        let max_y = area.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        for corner in [
            Position::ORIGIN,
            Position::new(max_x, 0),
            Position::new(max_x, max_y),
            Position::new(0, max_y),
        ] {
            canvas.draw_char(corner, '·');
        }
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use pretty_assertions::assert_eq;
    use ratatui::style::Color;

    // With a 5×5 board in a 48×10 area, the board's border occupies columns
    // 18-29 and rows 1-7, and cell (x, y) starts at column 19 + 2x, row 2 + y.
    const AREA: Rect = Rect::new(0, 0, 48, 10);

    fn snapshot() -> Snapshot {
        Snapshot {
            grid_size: 5,
            snake: vec![Position::new(2, 2), Position::new(1, 2), Position::new(1, 3)],
            direction: Direction::Right,
            food: Some(FoodView {
                position: Position::new(0, 0),
                kind: FoodKind::Normal,
                opacity: None,
            }),
            score: 20,
            high_score: 140,
            phase: Phase::Running,
            settings: Settings::default(),
            high_score_lines: vec!["🥇 140 pts (2026-10-19 09:15)".into()],
        }
    }

    fn render(snapshot: &Snapshot, show_scores: bool) -> Buffer {
        render_in(AREA, snapshot, show_scores)
    }

    fn render_in(area: Rect, snapshot: &Snapshot, show_scores: bool) -> Buffer {
        let mut buffer = Buffer::empty(area);
        GameView {
            snapshot,
            track: Some(Track::Normal),
            paused: Paused::default(),
            show_scores,
        }
        .render(area, &mut buffer);
        buffer
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    fn cell_text(buf: &Buffer, x: u16, y: u16) -> String {
        format!("{}{}", buf[(x, y)].symbol(), buf[(x + 1, y)].symbol())
    }

    #[test]
    fn running() {
        let buf = render(&snapshot(), false);
        let score_row = row(&buf, 0);
        assert!(score_row.starts_with(" Score: 20  High Score: 140"), "{score_row:?}");
        assert!(score_row.ends_with("♪ normal "), "{score_row:?}");
        assert_eq!(buf[(0, 0)].modifier, Modifier::REVERSED);
        assert_eq!(buf[(18, 1)].symbol(), "·");
        assert_eq!(buf[(19, 1)].symbol(), "⋯");
        assert_eq!(buf[(29, 7)].symbol(), "·");
        assert_eq!(buf[(18, 4)].symbol(), "⋮");
        assert_eq!(cell_text(&buf, 23, 4), "▶▶");
        assert_eq!(buf[(23, 4)].fg, Color::LightGreen);
        assert_eq!(cell_text(&buf, 21, 4), "██");
        assert_eq!(cell_text(&buf, 21, 5), "██");
        assert_eq!(cell_text(&buf, 19, 2), "()");
        assert_eq!(buf[(19, 2)].fg, Color::LightMagenta);
        assert_eq!(cell_text(&buf, 27, 6), " ·");
        assert_eq!(row(&buf, 8).trim(), "");
        assert_eq!(
            row(&buf, 9).trim(),
            "Move: ←↑↓→/wasd  Pause: p  Scores: Tab  Quit: q"
        );
        assert_eq!(buf[(6, 9)].fg, Color::Yellow);
    }

    #[test]
    fn stopped_track() {
        let mut snap = snapshot();
        snap.phase = Phase::Paused;
        let mut buf = Buffer::empty(AREA);
        GameView {
            snapshot: &snap,
            track: None,
            paused: Paused::default(),
            show_scores: false,
        }
        .render(AREA, &mut buf);
        let score_row = row(&buf, 0);
        assert!(score_row.ends_with("♪ off "), "{score_row:?}");
    }

    #[test]
    fn dead() {
        let mut snap = snapshot();
        snap.phase = Phase::Dead;
        let buf = render(&snap, false);
        assert_eq!(cell_text(&buf, 23, 4), "××");
        assert_eq!(row(&buf, 8).trim(), "GAME OVER");
        assert_eq!(row(&buf, 9).trim(), "Press SPACE to play again or q to quit");
    }

    #[test]
    fn exhausted() {
        let mut snap = snapshot();
        snap.phase = Phase::Exhausted;
        snap.food = None;
        let buf = render(&snap, false);
        assert_eq!(cell_text(&buf, 23, 4), "▶▶");
        assert_eq!(row(&buf, 8).trim(), "GAME OVER: the board is full!");
    }

    #[test]
    fn paused() {
        let mut snap = snapshot();
        snap.phase = Phase::Paused;
        let buf = render(&snap, false);
        // The pop-up is centered in the display area
        assert_eq!(row(&buf, 2).trim_end(), format!("{:13}┌────── PAUSED ──────┐", ""));
        assert!(row(&buf, 3).contains("» Speed   ◀ 50%  ▶"));
        assert!(row(&buf, 4).contains("  Volume  ◀ 50%  ▶"));
        assert!(row(&buf, 6).contains("Resume (p)"));
    }

    #[test]
    fn special_food_fades() {
        let mut snap = snapshot();
        snap.food = Some(FoodView {
            position: Position::new(4, 0),
            kind: FoodKind::Special,
            opacity: Some(0.9),
        });
        let buf = render(&snap, false);
        assert_eq!(cell_text(&buf, 27, 2), "<>");
        assert!(!buf[(27, 2)].modifier.contains(Modifier::DIM));
        snap.food = Some(FoodView {
            position: Position::new(4, 0),
            kind: FoodKind::Special,
            opacity: Some(0.3),
        });
        let buf = render(&snap, false);
        assert!(buf[(27, 2)].modifier.contains(Modifier::DIM));
    }

    #[test]
    fn scores_card() {
        // Board (12 columns) + gap + card (36 columns) fills the whole width
        let buf = render_in(Rect::new(0, 0, 49, 10), &snapshot(), true);
        assert_eq!(buf[(0, 1)].symbol(), "·");
        assert_eq!(buf[(13, 1)].symbol(), "┌");
        assert!(row(&buf, 1).contains(" High Scores "));
        assert!(row(&buf, 2).contains("140 pts (2026-10-19 09:15)"));
        assert_eq!(buf[(48, 7)].symbol(), "┘");
    }

    #[test]
    fn direction_glyphs() {
        let mut snap = snapshot();
        for (direction, glyph) in [
            (Direction::Up, "▲▲"),
            (Direction::Down, "▼▼"),
            (Direction::Left, "◀◀"),
        ] {
            snap.direction = direction;
            let buf = render(&snap, false);
            assert_eq!(cell_text(&buf, 23, 4), glyph);
        }
    }
}
