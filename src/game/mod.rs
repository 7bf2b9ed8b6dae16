mod direction;
mod food;
mod grid;
mod input;
mod snake;
mod snapshot;
pub(crate) use self::direction::Direction;
pub(crate) use self::food::FoodKind;
pub(crate) use self::grid::Grid;
pub(crate) use self::input::Intent;
pub(crate) use self::snapshot::{FoodView, Phase, Snapshot};
use self::food::Food;
use self::input::{Control, InputQueue};
use self::snake::Snake;
use crate::audio::Cue;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::store::{FileStore, Store};
use rand::Rng;
use std::time::Duration;

/// The game engine.  This is the only thing that modifies the state of a
/// game; the interface submits [`Intent`]s and reads [`Snapshot`]s.
#[derive(Debug)]
pub(crate) struct Game<S = FileStore, R = rand::rngs::ThreadRng> {
    rng: R,
    store: S,
    grid: Grid,
    snake: Snake,
    food: Option<Food>,
    score: u32,
    phase: Phase,
    input: InputQueue,
    settings: Settings,
    tick_interval: Duration,
    high_scores: HighScores,

    /// Whether the current round's score has been sent to the store yet
    committed: bool,

    /// Sound cues not yet collected by the interface
    cues: Vec<Cue>,
}

impl<S: Store> Game<S, rand::rngs::ThreadRng> {
    pub(crate) fn new(store: S, grid: Grid) -> Self {
        Game::new_with_rng(store, grid, rand::rng())
    }
}

impl<S: Store, R: Rng> Game<S, R> {
    pub(crate) fn new_with_rng(mut store: S, grid: Grid, rng: R) -> Game<S, R> {
        let settings = store.load_settings();
        let high_scores = store.load_scores();
        let mut game = Game {
            rng,
            store,
            grid,
            snake: Snake::new(grid.center(), Direction::Right),
            food: None,
            score: 0,
            phase: Phase::Running,
            input: InputQueue::default(),
            settings,
            tick_interval: settings.tick_interval(),
            high_scores,
            committed: false,
            cues: Vec::new(),
        };
        game.start_round();
        game
    }

    /// Accept an intent from the interface.
    ///
    /// Turns and pause/restart requests are held until the next tick, with a
    /// newer request of the same sort replacing an older one.  Slider changes
    /// take effect immediately.
    pub(crate) fn submit(&mut self, intent: Intent) {
        match intent {
            Intent::Turn(direction) => {
                if self.phase == Phase::Running && !direction.is_reverse_of(self.snake.direction)
                {
                    self.input.queue_direction(direction);
                }
            }
            Intent::TogglePause => self.input.queue_control(Control::TogglePause),
            Intent::Confirm => self.input.queue_control(Control::Confirm),
            Intent::SetSpeed(speed) => {
                log::debug!("Speed set to {speed}");
                self.settings.speed = speed;
                self.tick_interval = self.settings.tick_interval();
                self.store.save_settings(self.settings);
            }
            Intent::SetVolume(volume) => {
                log::debug!("Volume set to {volume}");
                self.settings.volume = volume;
                self.cues.push(Cue::Volume(volume));
                self.store.save_settings(self.settings);
            }
        }
    }

    /// Advance the game by one tick and return the resulting state.
    ///
    /// A pending pause/restart request is handled first, and uses up the
    /// tick.  Otherwise, if the game is running, the snake moves.
    pub(crate) fn tick(&mut self) -> Snapshot {
        if let Some(control) = self.input.take_control() {
            self.apply_control(control);
        } else if self.phase == Phase::Running {
            self.step();
        }
        self.snapshot()
    }

    fn apply_control(&mut self, control: Control) {
        match (control, self.phase) {
            (_, Phase::Running) => {
                self.phase = Phase::Paused;
                self.cues.push(Cue::Pause);
            }
            (_, Phase::Paused) => {
                self.phase = Phase::Running;
                self.cues.push(Cue::Pause);
            }
            (Control::Confirm, Phase::Dead | Phase::Exhausted) => self.reset(),
            (Control::TogglePause, Phase::Dead | Phase::Exhausted) => (),
        }
    }

    fn step(&mut self) {
        if let Some(direction) = self.input.take_direction() {
            if !direction.is_reverse_of(self.snake.direction) {
                self.snake.turn(direction);
            }
        }
        let interval = self.tick_interval;
        let expired = match self.food.as_mut() {
            Some(food) => food.tick(&self.snake, self.grid, interval, interval).expired,
            None => false,
        };
        let new_head = self.snake.next_head(self.grid);
        debug_assert!(self.grid.contains(new_head), "head left the board");
        if self.snake.would_collide(new_head) {
            self.game_over(Phase::Dead);
            return;
        }
        let eaten = self
            .food
            .as_ref()
            .filter(|food| food.position == new_head)
            .map(|food| food.kind);
        self.snake.grow(new_head, eaten.is_some());
        if let Some(kind) = eaten {
            self.score += kind.points();
            self.cues.push(Cue::Eat);
            self.place_food();
        } else if expired {
            self.place_food();
        }
        debug_assert!(
            self.food
                .as_ref()
                .is_none_or(|food| !self.snake.contains(food.position)),
            "food is under the snake"
        );
    }

    fn place_food(&mut self) {
        self.food = Food::spawn(&self.snake, self.grid, &mut self.rng);
        if self.food.is_none() {
            self.game_over(Phase::Exhausted);
        }
    }

    fn game_over(&mut self, phase: Phase) {
        log::info!("Game over ({phase:?}) with a score of {}", self.score);
        self.phase = phase;
        self.cues.push(Cue::Pause);
        self.commit_score();
    }

    fn commit_score(&mut self) {
        if !self.committed {
            self.committed = true;
            self.store.commit_score(self.score);
            self.high_scores = self.store.load_scores();
        }
    }

    fn reset(&mut self) {
        self.commit_score();
        log::info!("Starting a new game");
        self.start_round();
    }

    fn start_round(&mut self) {
        self.snake = Snake::new(self.grid.center(), Direction::Right);
        self.score = 0;
        self.committed = false;
        self.input.clear();
        self.tick_interval = self.settings.tick_interval();
        self.phase = Phase::Running;
        self.place_food();
    }
}

impl<S, R> Game<S, R> {
    pub(crate) fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_size: self.grid.size(),
            snake: self.snake.cells().collect(),
            direction: self.snake.direction,
            food: self.food.as_ref().map(|food| FoodView {
                position: food.position,
                kind: food.kind,
                opacity: food.opacity(),
            }),
            score: self.score,
            high_score: self.high_scores.best(),
            phase: self.phase,
            settings: self.settings,
            high_score_lines: self.high_scores.lines(),
        }
    }

    pub(crate) fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Take the sound cues emitted since the last call
    pub(crate) fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }
}

#[cfg(test)]
impl<S, R> Game<S, R> {
    /// Replace the snake, head first
    pub(crate) fn set_snake(
        &mut self,
        body: &[ratatui::layout::Position],
        direction: Direction,
    ) {
        self.snake = Snake {
            body: body.iter().copied().collect(),
            direction,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts;
    use crate::settings::Percent;
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use ratatui::layout::Position;
    use std::collections::HashSet;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    type TestGame = Game<MemoryStore, ChaCha12Rng>;

    fn new_game() -> TestGame {
        new_game_with(Grid::new(20), Settings::default())
    }

    fn new_game_with(grid: Grid, settings: Settings) -> TestGame {
        Game::new_with_rng(
            MemoryStore::with_settings(settings),
            grid,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    fn cells(cs: &[(u16, u16)]) -> Vec<Position> {
        cs.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    fn set_snake(game: &mut TestGame, cs: &[(u16, u16)], direction: Direction) {
        game.set_snake(&cells(cs), direction);
    }

    #[test]
    fn new_game_state() {
        let mut game = new_game();
        let snap = game.snapshot();
        assert_eq!(snap.snake, cells(&[(10, 10)]));
        assert_eq!(snap.direction, Direction::Right);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.grid_size, 20);
        let food = snap.food.unwrap();
        assert_ne!(food.position, Position::new(10, 10));
        assert_eq!(game.tick_interval(), Duration::from_millis(110));
        assert!(game.drain_cues().is_empty());
    }

    #[test]
    fn move_one_step() {
        let mut game = new_game();
        game.food = Some(Food::normal(Position::new(0, 0)));
        let snap = game.tick();
        assert_eq!(snap.snake, cells(&[(11, 10)]));
        assert_eq!(snap.score, 0);
    }

    #[test]
    fn eat_normal_food() {
        let mut game = new_game();
        set_snake(&mut game, &[(5, 5), (4, 5), (3, 5)], Direction::Right);
        game.food = Some(Food::normal(Position::new(6, 5)));
        let snap = game.tick();
        assert_eq!(snap.snake, cells(&[(6, 5), (5, 5), (4, 5), (3, 5)]));
        assert_eq!(snap.score, 10);
        let food = snap.food.unwrap();
        assert!(!snap.snake.contains(&food.position));
        assert_eq!(game.drain_cues(), [Cue::Eat]);
    }

    #[test]
    fn eat_special_food() {
        let mut game = new_game();
        set_snake(&mut game, &[(5, 5), (4, 5)], Direction::Right);
        // Moving away from the snake; it won't step until the second tick
        game.food = Some(Food::special(Position::new(6, 5), Direction::Up));
        let snap = game.tick();
        assert_eq!(snap.score, 30);
        assert_eq!(snap.snake.len(), 3);
    }

    #[test]
    fn not_eating_keeps_length() {
        let mut game = new_game();
        set_snake(&mut game, &[(5, 5), (4, 5), (3, 5)], Direction::Right);
        game.food = Some(Food::normal(Position::new(0, 0)));
        let snap = game.tick();
        assert_eq!(snap.snake, cells(&[(6, 5), (5, 5), (4, 5)]));
    }

    #[test]
    fn turn() {
        let mut game = new_game();
        game.food = Some(Food::normal(Position::new(0, 0)));
        game.submit(Intent::Turn(Direction::Up));
        let snap = game.tick();
        assert_eq!(snap.snake, cells(&[(10, 9)]));
        assert_eq!(snap.direction, Direction::Up);
    }

    #[test]
    fn reverse_turn_ignored() {
        let mut game = new_game();
        game.food = Some(Food::normal(Position::new(0, 0)));
        game.submit(Intent::Turn(Direction::Left));
        assert_eq!(game.tick().snake, cells(&[(11, 10)]));
        // Even if it gets into the queue somehow
        game.input.queue_direction(Direction::Left);
        let snap = game.tick();
        assert_eq!(snap.snake, cells(&[(12, 10)]));
        assert_eq!(snap.direction, Direction::Right);
    }

    #[test]
    fn latest_turn_wins() {
        let mut game = new_game();
        game.food = Some(Food::normal(Position::new(0, 0)));
        game.submit(Intent::Turn(Direction::Up));
        game.submit(Intent::Turn(Direction::Down));
        assert_eq!(game.tick().snake, cells(&[(10, 11)]));
    }

    #[test]
    fn quick_double_turn_cannot_reverse() {
        let mut game = new_game();
        set_snake(&mut game, &[(5, 5), (4, 5), (3, 5)], Direction::Right);
        game.food = Some(Food::normal(Position::new(0, 0)));
        // Up then Left within one tick: Left would reverse the current
        // direction, so Up stands.
        game.submit(Intent::Turn(Direction::Up));
        game.submit(Intent::Turn(Direction::Left));
        let snap = game.tick();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.snake, cells(&[(5, 4), (5, 5), (4, 5)]));
    }

    #[test]
    fn pause_and_resume() {
        let mut game = new_game();
        game.food = Some(Food::normal(Position::new(0, 0)));
        game.submit(Intent::TogglePause);
        let snap = game.tick();
        assert!(snap.is_paused());
        assert_eq!(snap.snake, cells(&[(10, 10)]));
        game.submit(Intent::Turn(Direction::Up));
        for _ in 0..5 {
            assert_eq!(game.tick(), snap);
        }
        game.submit(Intent::Confirm);
        assert_eq!(game.tick().phase, Phase::Running);
        assert_eq!(game.tick().snake, cells(&[(11, 10)]));
        assert_eq!(game.drain_cues(), [Cue::Pause, Cue::Pause]);
    }

    #[test]
    fn confirm_pauses_running_game() {
        let mut game = new_game();
        game.submit(Intent::Confirm);
        assert_eq!(game.tick().phase, Phase::Paused);
    }

    #[test]
    fn self_collision() {
        let mut game = new_game();
        set_snake(
            &mut game,
            &[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)],
            Direction::Left,
        );
        game.food = Some(Food::normal(Position::new(0, 0)));
        game.score = 50;
        game.submit(Intent::Turn(Direction::Down));
        let snap = game.tick();
        assert_eq!(snap.phase, Phase::Dead);
        assert!(snap.is_game_over());
        assert_eq!(snap.high_score, 50);
        assert_eq!(game.store.load_scores().len(), 1);
        assert_eq!(game.drain_cues(), [Cue::Pause]);
        // Nothing happens until a restart
        game.submit(Intent::Turn(Direction::Up));
        game.submit(Intent::TogglePause);
        for _ in 0..5 {
            assert_eq!(game.tick(), snap);
        }
        game.submit(Intent::Confirm);
        let snap = game.tick();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.snake, cells(&[(10, 10)]));
        assert_eq!(snap.direction, Direction::Right);
        assert_eq!(snap.score, 0);
        assert!(snap.food.is_some());
        // The score was recorded once, not again on restart
        assert_eq!(game.store.load_scores().len(), 1);
        assert_eq!(snap.high_score_lines.len(), 1);
    }

    #[test]
    fn moving_into_tail_is_fatal() {
        let mut game = new_game();
        set_snake(&mut game, &[(5, 5), (5, 6), (6, 6), (6, 5)], Direction::Right);
        game.food = Some(Food::normal(Position::new(0, 0)));
        assert_eq!(game.tick().phase, Phase::Dead);
    }

    #[test]
    fn zero_score_not_recorded() {
        let mut game = new_game();
        set_snake(&mut game, &[(5, 5), (5, 6), (6, 6), (6, 5)], Direction::Right);
        game.food = Some(Food::normal(Position::new(0, 0)));
        assert_eq!(game.tick().phase, Phase::Dead);
        assert_eq!(game.store.load_scores(), HighScores::default());
    }

    #[test]
    fn special_food_expires() {
        let settings = Settings {
            speed: Percent::MIN,
            volume: Percent::default(),
        };
        let mut game = new_game_with(Grid::new(20), settings);
        assert_eq!(game.tick_interval(), Duration::from_millis(200));
        game.food = Some(Food::special(Position::new(3, 0), Direction::Right));
        for _ in 0..19 {
            game.tick();
        }
        let food = game.food.as_ref().unwrap();
        assert_eq!(food.kind, FoodKind::Special);
        assert_eq!(food.age(), Duration::from_millis(3800));
        game.tick();
        let food = game.food.as_ref().unwrap();
        assert_eq!(food.age(), Duration::ZERO);
        assert_eq!(game.snapshot().score, 0);
    }

    #[test]
    fn boxed_in_special_food_still_expires() {
        let mut game = new_game();
        let interval = game.tick_interval();
        // Heading up the right-hand side of (3, 5); the body covers both of
        // the food's horizontal neighbours for the next two ticks
        set_snake(
            &mut game,
            &[(4, 4), (4, 5), (4, 6), (3, 6), (2, 6), (2, 5), (2, 4)],
            Direction::Up,
        );
        game.food = Some(
            Food::special(Position::new(3, 5), Direction::Right)
                .aged(consts::SPECIAL_FOOD_LIFETIME - interval * 2),
        );
        game.tick();
        let food = game.food.as_ref().unwrap();
        assert_eq!(food.position, Position::new(3, 5));
        assert_eq!(food.age(), consts::SPECIAL_FOOD_LIFETIME - interval);
        // This tick both tries to move the food (it can't) and ages it out
        let snap = game.tick();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.snake[0], Position::new(4, 2));
        let food = game.food.as_ref().unwrap();
        assert_eq!(food.age(), Duration::ZERO);
        assert!(!snap.snake.contains(&food.position));
        assert_eq!(snap.score, 0);
    }

    #[test]
    fn board_exhausted() {
        let mut game = new_game_with(Grid::new(5), Settings::default());
        // Fill every cell but (4, 4), snaking back & forth, with the head at
        // (3, 4) facing the gap
        let mut path = Vec::new();
        for y in 0..5u16 {
            let xs: Vec<u16> = if y % 2 == 0 {
                (0..5).collect()
            } else {
                (0..5).rev().collect()
            };
            path.extend(xs.into_iter().map(|x| (x, y)));
        }
        path.pop();
        path.reverse();
        set_snake(&mut game, &path, Direction::Right);
        game.food = Some(Food::normal(Position::new(4, 4)));
        let snap = game.tick();
        assert_eq!(snap.phase, Phase::Exhausted);
        assert!(snap.is_game_over());
        assert_eq!(snap.snake.len(), 25);
        assert_eq!(snap.food, None);
        assert_eq!(snap.score, 10);
        assert_eq!(game.store.load_scores().best(), 10);
        game.submit(Intent::Confirm);
        let snap = game.tick();
        assert_eq!(snap.phase, Phase::Running);
        assert_eq!(snap.snake, cells(&[(2, 2)]));
    }

    #[test]
    fn sliders() {
        let mut game = new_game();
        game.submit(Intent::SetSpeed(Percent::MAX));
        assert_eq!(game.tick_interval(), Duration::from_millis(20));
        game.submit(Intent::SetVolume(Percent::new(30)));
        assert_eq!(game.drain_cues(), [Cue::Volume(Percent::new(30))]);
        let saved = game.store.load_settings();
        assert_eq!(saved.speed, Percent::MAX);
        assert_eq!(saved.volume, Percent::new(30));
        assert_eq!(game.snapshot().settings, saved);
    }

    #[test]
    fn random_play_keeps_invariants() {
        let mut game = new_game_with(Grid::new(8), Settings::default());
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED ^ 0xFFFF);
        let mut games_over = 0;
        for _ in 0..5000 {
            match rng.random_range(0..6) {
                0 => game.submit(Intent::Turn(Direction::Up)),
                1 => game.submit(Intent::Turn(Direction::Down)),
                2 => game.submit(Intent::Turn(Direction::Left)),
                3 => game.submit(Intent::Turn(Direction::Right)),
                _ => (),
            }
            let before = game.snapshot();
            let snap = game.tick();
            let distinct = snap.snake.iter().collect::<HashSet<_>>();
            assert_eq!(distinct.len(), snap.snake.len());
            assert!(snap.snake.iter().all(|&c| game.grid.contains(c)));
            if let Some(food) = snap.food {
                assert!(game.grid.contains(food.position));
                assert!(!snap.snake.contains(&food.position));
            }
            if snap.phase == Phase::Running && before.phase == Phase::Running {
                let grown = snap.snake.len() - before.snake.len();
                let gained = snap.score - before.score;
                match grown {
                    0 => assert_eq!(gained, 0),
                    1 => assert!(gained == 10 || gained == 30, "gained {gained}"),
                    _ => panic!("snake grew by {grown}"),
                }
            }
            if snap.is_game_over() {
                games_over += 1;
                game.submit(Intent::Confirm);
            }
        }
        assert!(games_over > 0);
        let scores = game.store.load_scores();
        assert!(scores.len() <= 10);
        assert!(scores.entries().windows(2).all(|w| w[0].score >= w[1].score));
    }
}
