use crate::audio::{AmbientPoller, AudioSink, TerminalBell};
use crate::command::Command;
use crate::consts;
use crate::game::{Direction, Game, Intent, Phase, Snapshot};
use crate::store::{FileStore, Store};
use crate::ui::{GameView, Paused};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::io::{self, Stdout, Write};
use std::time::Instant;

/// The interactive front end: owns the game, draws it, feeds it input, and
/// plays its sound cues
#[derive(Debug)]
pub(crate) struct App<S = FileStore, W = Stdout, R = rand::rngs::ThreadRng> {
    game: Game<S, R>,
    bell: TerminalBell<W>,
    poller: AmbientPoller,

    /// The game state as of the latest tick or settings change
    snapshot: Snapshot,

    paused: Paused,
    show_scores: bool,
    next_tick: Instant,
    next_poll: Instant,
    quitting: bool,
}

impl<S: Store, W: Write, R: Rng> App<S, W, R> {
    pub(crate) fn new(game: Game<S, R>, bell: TerminalBell<W>) -> Self {
        let now = Instant::now();
        let snapshot = game.snapshot();
        App {
            next_tick: now + game.tick_interval(),
            next_poll: now + consts::AMBIENT_POLL_PERIOD,
            game,
            bell,
            poller: AmbientPoller::default(),
            snapshot,
            paused: Paused::default(),
            show_scores: false,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        log::info!("Starting game");
        while !self.quitting {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let view = GameView {
            snapshot: &self.snapshot,
            track: self.bell.track(),
            paused: self.paused,
            show_scores: self.show_scores,
        };
        terminal.draw(|frame| frame.render_widget(view, frame.area()))?;
        Ok(())
    }

    /// Wait for input until the next scheduled job is due.  If input arrives
    /// first, handle it; otherwise, run whatever is due.
    fn process_input(&mut self) -> io::Result<()> {
        let deadline = self.next_tick.min(self.next_poll);
        let wait = deadline.saturating_duration_since(Instant::now());
        if !wait.is_zero() && poll(wait)? {
            self.handle_event(read()?);
        } else {
            self.run_due(Instant::now());
        }
        Ok(())
    }

    /// Advance the game and/or poll the background track, depending on which
    /// deadlines have passed as of `now`
    fn run_due(&mut self, now: Instant) {
        if now >= self.next_tick {
            let was_over = self.snapshot.is_game_over();
            self.snapshot = self.game.tick();
            self.next_tick = now + self.game.tick_interval();
            // The high score card opens by itself at game over and closes
            // again when the next game starts
            match (was_over, self.snapshot.is_game_over()) {
                (false, true) => self.show_scores = true,
                (true, false) => self.show_scores = false,
                _ => (),
            }
        }
        if now >= self.next_poll {
            if let Some(cue) = self.poller.poll(&self.snapshot) {
                self.bell.play(cue);
            }
            self.next_poll = now + consts::AMBIENT_POLL_PERIOD;
        }
        self.play_cues();
    }

    fn handle_event(&mut self, event: Event) {
        if event == Event::FocusLost {
            if self.snapshot.phase == Phase::Running {
                self.game.submit(Intent::TogglePause);
            }
            return;
        }
        let Some(cmd) = event.as_key_press_event().and_then(Command::from_key_event) else {
            return;
        };
        match cmd {
            Command::Quit | Command::Q => {
                log::info!("Quitting");
                self.quitting = true;
            }
            Command::Next => self.show_scores = !self.show_scores,
            Command::P | Command::Esc => self.game.submit(Intent::TogglePause),
            Command::Space | Command::Enter => self.game.submit(Intent::Confirm),
            _ if self.snapshot.is_paused() => {
                if let Some(intent) = self.paused.handle_command(cmd, self.snapshot.settings) {
                    self.game.submit(intent);
                    self.snapshot = self.game.snapshot();
                }
            }
            Command::Up => self.game.submit(Intent::Turn(Direction::Up)),
            Command::Down => self.game.submit(Intent::Turn(Direction::Down)),
            Command::Left => self.game.submit(Intent::Turn(Direction::Left)),
            Command::Right => self.game.submit(Intent::Turn(Direction::Right)),
            Command::Home | Command::End => (),
        }
        self.play_cues();
    }

    fn play_cues(&mut self) {
        for cue in self.game.drain_cues() {
            self.bell.play(cue);
        }
    }
}
