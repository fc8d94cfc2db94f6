use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::future;
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::{interval, sleep_until};

use crate::game::{Command, Game, GameConfig, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, Scene};

/// Resolves at the fruit's relocation deadline; never resolves when none is armed
async fn fruit_timer(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => future::pending::<()>().await,
    }
}

pub struct HumanMode {
    game: Game<Scene>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            game: Game::new(config, Scene::new(), Instant::now()),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The tick timer is never stopped; pausing only gates the game logic
        let mut tick_timer = interval(self.game.config().tick_period());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        log::info!(
            "session started, tick period {:?}",
            self.game.config().tick_period()
        );

        loop {
            // Rebuilt every iteration so a relocation inside a tick replaces
            // the pending sleep instead of adding a second one
            let fruit_expiry = fruit_timer(self.game.fruit_deadline());

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game(Instant::now());
                }

                // Fruit relocation timer
                _ = fruit_expiry => {
                    self.game.expire_fruit(tokio::time::Instant::now().into_std());
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.game, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        log::info!(
            "session finished after {} games, best score {}",
            self.metrics.games_played,
            self.metrics.best_score
        );

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::GameCommand(command) => self.apply_command(command, Instant::now()),
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn apply_command(&mut self, command: Command, now: Instant) {
        let was = self.game.state();
        self.game.handle_command(command, now);

        // A replay, or the very first start, begins a fresh round
        let fresh_round = command == Command::Replay
            || (was == GameState::Pause
                && self.game.state() == GameState::Play
                && !self.metrics.is_running());
        if fresh_round {
            self.metrics.on_game_start();
        }
    }

    fn update_game(&mut self, now: Instant) {
        let outcome = self.game.tick(now);
        self.metrics.on_tick(&outcome);

        if outcome.self_collision {
            self.metrics.on_game_over(self.game.score());
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
