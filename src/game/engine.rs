use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

use super::{
    action::Command,
    border::Border,
    collision::is_collided,
    config::GameConfig,
    fruit::Fruit,
    sink::Sinks,
    snake::Snake,
};

/// Lifecycle state of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Waiting for a start command; ticks only count down the grace period
    Pause,
    Play,
    /// The snake ran into itself; only reset + start leaves this state
    End,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The snake moved (false outside PLAY)
    pub advanced: bool,
    /// The head left the border while no grace period was active
    pub border_shrunk: bool,
    pub fruit_eaten: bool,
    /// The head overlapped its own body and the round ended
    pub self_collision: bool,
}

/// The game controller: owns the entities, the score and the state machine
pub struct Game<S: Sinks> {
    config: GameConfig,
    state: GameState,
    score: u32,
    previous_score: Option<u32>,
    grace_period: Duration,
    snake: Snake,
    border: Border,
    fruit: Fruit,
    rng: StdRng,
    sinks: S,
}

impl<S: Sinks> Game<S> {
    /// Create a paused game. The fruit's relocation timer starts at `now`.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails [`GameConfig::validate`]: an empty fruit
    /// expiry range or a zero spawn range cannot be sampled.
    pub fn new(config: GameConfig, sinks: S, now: Instant) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let snake = Snake::new(0.0, 0.0, config.initial_segments);
        let border = Border::new(&config);
        let fruit = Self::spawn_fruit(&config, &mut rng, now);

        Self {
            config,
            state: GameState::Pause,
            score: 0,
            previous_score: None,
            grace_period: Duration::ZERO,
            snake,
            border,
            fruit,
            rng,
            sinks,
        }
    }

    fn spawn_fruit(config: &GameConfig, rng: &mut StdRng, now: Instant) -> Fruit {
        Fruit::new(config, is_collided, StdRng::seed_from_u64(rng.gen()), now)
    }

    /// Run one fixed-period step of the game loop.
    ///
    /// Movement and the three collision checks only run in PLAY. The checks
    /// all look at the same post-move head with no early exit, so one tick
    /// can both shrink the border and end the game. The grace period counts
    /// down in every state.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        if self.state == GameState::Play {
            self.snake.advance();
            outcome.advanced = true;

            let head = *self.snake.head();

            if !is_collided(&head, self.border.entity()) && self.grace_period.is_zero() {
                self.border.shrink();
                self.set_grace(self.config.grace_period());
                outcome.border_shrunk = true;
                log::debug!("border shrunk to {}", self.border.size());

                if !is_collided(self.fruit.entity(), self.border.entity()) {
                    self.fruit.move_to_new_position(&self.border, now);
                }
            }

            if is_collided(&head, self.fruit.entity()) {
                self.snake.grow(1);
                self.fruit.move_to_new_position(&self.border, now);
                self.add_points(1);
                outcome.fruit_eaten = true;
            }

            if self.snake.body().iter().any(|segment| is_collided(&head, segment)) {
                outcome.self_collision = true;
                self.end();
            }

            self.draw();
            self.sinks.update_score_display(self.score);
        }

        self.grace_period = self.grace_period.saturating_sub(self.config.tick_period());

        outcome
    }

    fn draw(&mut self) {
        for segment in self.snake.segments() {
            self.sinks.draw(&segment.view());
        }
        self.sinks.draw(&self.border.entity().view());
        self.sinks.draw(&self.fruit.entity().view());
    }

    /// Fruit timer callback. Runs regardless of the game state.
    pub fn expire_fruit(&mut self, now: Instant) -> bool {
        self.fruit.fire_if_due(&self.border, now)
    }

    /// Apply a command from the input layer
    pub fn handle_command(&mut self, command: Command, now: Instant) {
        match command {
            Command::Turn(direction) => self.snake.change_direction(direction),
            Command::Start => {
                if self.state == GameState::Pause {
                    self.start();
                }
            }
            Command::Replay => {
                self.reset(now);
                self.start();
            }
            Command::Pause => {
                if self.state == GameState::Play {
                    self.pause();
                }
            }
        }
    }

    pub fn start(&mut self) {
        self.state = GameState::Play;
        self.sinks.hide_replay();
        log::info!("game started");
    }

    /// Enter PAUSE. Not guarded; callers decide when pausing makes sense.
    pub fn pause(&mut self) {
        self.state = GameState::Pause;
        log::info!("game paused");
    }

    pub fn end(&mut self) {
        self.sinks.show_replay();
        self.state = GameState::End;
        log::info!("game over with {} points", self.score);
    }

    /// Archive the score and rebuild the snake, border and fruit.
    ///
    /// The old fruit is dropped together with its pending relocation.
    pub fn reset(&mut self, now: Instant) {
        self.previous_score = Some(self.score);
        self.snake = Snake::new(0.0, 0.0, self.config.initial_segments);
        self.border = Border::new(&self.config);
        self.fruit = Self::spawn_fruit(&self.config, &mut self.rng, now);
        self.score = 0;
        self.sinks.clear();
        log::info!("game reset, previous score {}", self.previous_score.unwrap_or(0));
        self.pause();
    }

    pub fn add_points(&mut self, points: u32) {
        self.score += points;
    }

    pub fn set_grace(&mut self, period: Duration) {
        self.grace_period = period;
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Score of the round before the last reset, if there was one
    pub fn previous_score(&self) -> Option<u32> {
        self.previous_score
    }

    pub fn grace_period(&self) -> Duration {
        self.grace_period
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn border(&self) -> &Border {
        &self.border
    }

    pub fn fruit(&self) -> &Fruit {
        &self.fruit
    }

    /// When the fruit's pending relocation is due
    pub fn fruit_deadline(&self) -> Option<Instant> {
        self.fruit.deadline()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn sinks(&self) -> &S {
        &self.sinks
    }

    pub fn sinks_mut(&mut self) -> &mut S {
        &mut self.sinks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::action::Direction;
    use crate::game::entity::EntityKind;
    use crate::game::sink::RecordingSinks;

    fn game_with(config: GameConfig) -> (Game<RecordingSinks>, Instant) {
        let now = Instant::now();
        (Game::new(config, RecordingSinks::default(), now), now)
    }

    fn game() -> (Game<RecordingSinks>, Instant) {
        game_with(GameConfig::seeded(11))
    }

    fn positions(game: &Game<RecordingSinks>) -> Vec<(f64, f64)> {
        game.snake().segments().iter().map(|s| (s.x, s.y)).collect()
    }

    #[test]
    fn test_new_game() {
        let (game, _) = game();
        assert_eq!(game.state(), GameState::Pause);
        assert_eq!(game.score(), 0);
        assert_eq!(game.previous_score(), None);
        assert_eq!(game.grace_period(), Duration::ZERO);
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.border().size(), 50.0);
        let fruit = game.fruit().entity();
        assert_eq!((fruit.x, fruit.y), (25.0, 25.0));
        assert!(game.fruit_deadline().is_some());
    }

    #[test]
    #[should_panic]
    fn test_new_panics_on_empty_expiry_range() {
        let config = GameConfig {
            fruit_expiry_min_secs: 6,
            fruit_expiry_max_secs: 6,
            ..GameConfig::seeded(1)
        };
        assert!(config.validate().is_err());
        game_with(config);
    }

    #[test]
    fn test_paused_tick_does_nothing() {
        let (mut game, now) = game();
        let outcome = game.tick(now);

        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(positions(&game), vec![(0.0, 0.0); 4]);
        assert!(game.sinks().drawn.is_empty());
        assert!(game.sinks().scores.is_empty());
    }

    #[test]
    fn test_first_tick_moves_down() {
        let (mut game, now) = game();
        game.start();

        let outcome = game.tick(now);

        assert!(outcome.advanced);
        assert!(!outcome.fruit_eaten && !outcome.border_shrunk && !outcome.self_collision);
        assert_eq!(
            positions(&game),
            vec![(0.0, 1.0), (0.0, 0.0), (0.0, 0.0), (0.0, 0.0)]
        );
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().len(), 4);
        assert_eq!(game.state(), GameState::Play);
    }

    #[test]
    fn test_tick_draws_every_entity_and_score() {
        let (mut game, now) = game();
        game.start();
        game.tick(now);

        let drawn = game.sinks_mut().take_drawn();
        let kinds: Vec<EntityKind> = drawn.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Snake,
                EntityKind::Snake,
                EntityKind::Snake,
                EntityKind::Snake,
                EntityKind::Border,
                EntityKind::Fruit,
            ]
        );
        assert_eq!(game.sinks().scores, vec![0]);
    }

    #[test]
    fn test_eating_fruit() {
        let (mut game, now) = game_with(GameConfig {
            fruit_start: (0.0, 1.0),
            ..GameConfig::seeded(3)
        });
        // Keep the eaten cell outside the border so the new spot must differ
        game.border.shrink();
        game.set_grace(Duration::from_secs(2));
        game.start();

        let outcome = game.tick(now);

        assert!(outcome.fruit_eaten);
        assert!(!outcome.border_shrunk);
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake().len(), 5);
        let fruit = game.fruit().entity();
        assert_ne!((fruit.x, fruit.y), (0.0, 1.0));
        assert_eq!(game.sinks().scores, vec![1]);
    }

    #[test]
    fn test_reversing_into_body_ends_game() {
        let (mut game, now) = game();
        unfold(&mut game, now);
        assert_eq!(game.state(), GameState::Play);
        assert_eq!(
            positions(&game),
            vec![(0.0, 3.0), (0.0, 2.0), (0.0, 1.0), (0.0, 0.0)]
        );

        game.handle_command(Command::Turn(Direction::Up), now);
        let outcome = game.tick(now);

        assert!(outcome.self_collision);
        assert_eq!(game.state(), GameState::End);
        assert_eq!(game.sinks().replay_visible, Some(true));
    }

    #[test]
    fn test_ended_game_stops_moving() {
        let (mut game, now) = game();
        game.start();
        game.end();
        let before = positions(&game);

        let outcome = game.tick(now);

        assert!(!outcome.advanced);
        assert_eq!(positions(&game), before);
    }

    #[test]
    fn test_leaving_border_shrinks_and_sets_grace() {
        let (mut game, now) = game();
        game.start();
        game.handle_command(Command::Turn(Direction::Left), now);

        let outcome = game.tick(now);

        assert!(outcome.border_shrunk);
        assert_eq!(game.border().size(), 50.0 - 113.0 / 16.0);
        assert_eq!(game.grace_period(), Duration::from_millis(1900));
    }

    #[test]
    fn test_grace_period_blocks_second_shrink() {
        let (mut game, now) = game();
        game.start();
        game.handle_command(Command::Turn(Direction::Left), now);
        game.tick(now);
        let size = game.border().size();

        for _ in 0..19 {
            let outcome = game.tick(now);
            assert!(!outcome.border_shrunk);
        }
        assert_eq!(game.border().size(), size);
        assert_eq!(game.grace_period(), Duration::ZERO);

        let outcome = game.tick(now);
        assert!(outcome.border_shrunk);
        assert_eq!(game.border().size(), size - 113.0 / 16.0);
    }

    #[test]
    fn test_shrink_at_minimum_still_resets_grace() {
        let (mut game, now) = game();
        for _ in 0..10 {
            game.border.shrink();
        }
        assert!(game.border().is_at_minimum());
        game.start();

        let outcome = game.tick(now);

        assert!(outcome.border_shrunk);
        assert_eq!(game.border().size(), 113.0 / 16.0);
        assert_eq!(
            game.grace_period(),
            Duration::from_millis(2000) - Duration::from_millis(100)
        );
    }

    #[test]
    fn test_shrink_relocates_stranded_fruit() {
        // Fruit in the corner is outside the border after one shrink
        let (mut game, now) = game_with(GameConfig {
            fruit_start: (49.0, 49.0),
            ..GameConfig::seeded(9)
        });
        game.start();
        game.handle_command(Command::Turn(Direction::Left), now);

        game.tick(now);

        assert!(is_collided(game.fruit().entity(), game.border().entity()));
    }

    #[test]
    fn test_grace_counts_down_while_paused() {
        let (mut game, now) = game();
        game.set_grace(Duration::from_millis(250));

        game.tick(now);
        assert_eq!(game.grace_period(), Duration::from_millis(150));
        game.tick(now);
        game.tick(now);
        assert_eq!(game.grace_period(), Duration::ZERO);
    }

    /// Three ticks down: head (0,3), body (0,2), (0,1), (0,0)
    fn unfold(game: &mut Game<RecordingSinks>, now: Instant) {
        game.start();
        for _ in 0..3 {
            game.tick(now);
        }
    }

    #[test]
    fn test_shrink_and_death_in_one_tick() {
        let (mut game, now) = game();
        unfold(&mut game, now);
        game.border.shrink();
        let size = game.border().size();

        game.handle_command(Command::Turn(Direction::Up), now);
        let outcome = game.tick(now);

        assert!(outcome.border_shrunk);
        assert!(outcome.self_collision);
        assert_eq!(game.border().size(), size - 113.0 / 16.0);
        assert_eq!(game.state(), GameState::End);
    }

    #[test]
    fn test_eat_and_death_in_one_tick() {
        let (mut game, now) = game();
        unfold(&mut game, now);
        let on_body = GameConfig {
            fruit_start: (0.0, 2.0),
            ..GameConfig::seeded(5)
        };
        game.fruit = Fruit::new(&on_body, is_collided, StdRng::seed_from_u64(5), now);

        game.handle_command(Command::Turn(Direction::Up), now);
        let outcome = game.tick(now);

        assert!(outcome.fruit_eaten);
        assert!(outcome.self_collision);
        assert_eq!(game.score(), 1);
        assert_eq!(game.snake().len(), 5);
        assert_eq!(game.state(), GameState::End);
    }

    #[test]
    fn test_start_only_from_pause() {
        let (mut game, now) = game();
        game.end();
        game.handle_command(Command::Start, now);
        assert_eq!(game.state(), GameState::End);

        game.handle_command(Command::Replay, now);
        assert_eq!(game.state(), GameState::Play);
        assert_eq!(game.sinks().replay_visible, Some(false));
    }

    #[test]
    fn test_pause_command_only_from_play() {
        let (mut game, now) = game();
        game.end();
        game.handle_command(Command::Pause, now);
        assert_eq!(game.state(), GameState::End);

        game.handle_command(Command::Replay, now);
        game.handle_command(Command::Pause, now);
        assert_eq!(game.state(), GameState::Pause);
        game.handle_command(Command::Start, now);
        assert_eq!(game.state(), GameState::Play);
    }

    #[test]
    fn test_pause_is_unguarded() {
        let (mut game, _) = game();
        game.end();
        game.pause();
        assert_eq!(game.state(), GameState::Pause);
    }

    #[test]
    fn test_reset_after_scoring() {
        let (mut game, now) = game();
        game.start();
        game.tick(now);
        game.add_points(5);

        game.reset(now);

        assert_eq!(game.previous_score(), Some(5));
        assert_eq!(game.score(), 0);
        assert_eq!(game.state(), GameState::Pause);
        assert_eq!(positions(&game), vec![(0.0, 0.0); 4]);
        assert_eq!(game.border().size(), 50.0);
        assert_eq!(game.sinks().clears, 1);
        assert!(game.sinks().drawn.is_empty());
    }

    #[test]
    fn test_reset_keeps_grace_countdown() {
        let (mut game, now) = game();
        game.set_grace(Duration::from_millis(500));
        game.reset(now);
        assert_eq!(game.grace_period(), Duration::from_millis(500));
    }

    #[test]
    fn test_fruit_timer_fires_in_any_state() {
        let (mut game, now) = game();
        let deadline = game.fruit_deadline().unwrap();

        assert!(!game.expire_fruit(now));
        assert!(game.expire_fruit(deadline));
        assert!(game.fruit_deadline().unwrap() > deadline);
        assert_eq!(game.state(), GameState::Pause);
    }

    #[test]
    fn test_seeded_games_are_reproducible() {
        let now = Instant::now();
        let mut a = Game::new(GameConfig::seeded(99), RecordingSinks::default(), now);
        let mut b = Game::new(GameConfig::seeded(99), RecordingSinks::default(), now);
        let later = now + Duration::from_secs(30);

        a.expire_fruit(later);
        b.expire_fruit(later);

        assert_eq!(a.fruit().entity(), b.fruit().entity());
        assert_eq!(a.fruit_deadline(), b.fruit_deadline());
    }
}
