use std::time::{Duration, Instant};

use crate::game::TickOutcome;

/// Stats for the current terminal session. Nothing here is persisted.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Best score seen since the program started
    pub best_score: u32,
    pub games_played: u32,
    /// Border shrinks in the current round
    pub shrinks: u32,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
            shrinks: 0,
            running: false,
        }
    }

    /// Refresh the round clock; frozen until the first start and after game over
    pub fn update(&mut self) {
        if self.running {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.shrinks = 0;
        self.running = true;
    }

    /// Whether a round is in progress (started and not yet over)
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn on_tick(&mut self, outcome: &TickOutcome) {
        if outcome.border_shrunk {
            self.shrinks += 1;
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.running = false;
        self.games_played += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
