use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors produced while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// The settings a config file may carry. The arena and difficulty rules are
/// fixed, so any other key is rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    tick_ms: Option<u64>,
    seed: Option<u64>,
}

/// Configuration for the game
///
/// The defaults are the classic rules. Only `tick_ms` and `seed` can be
/// changed from a config file or the command line; the remaining fields are
/// public so tests can stage specific layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Edge length of the square arena, in grid units
    pub arena_size: f64,
    /// Number of segments a new snake starts with
    pub initial_segments: usize,
    /// Milliseconds between game ticks
    pub tick_ms: u64,
    /// Cooldown after a border shrink, in milliseconds
    pub grace_period_ms: u64,

    // Border
    /// Amount the border edge shrinks per trigger
    pub border_step: f64,
    /// Smallest edge the border can reach
    pub border_min_size: f64,

    // Fruit
    /// Fruit coordinates are sampled from `0..fruit_spawn_range`
    pub fruit_spawn_range: u32,
    /// Where the first fruit of every round appears
    pub fruit_start: (f64, f64),
    /// Resamples allowed before an out-of-border position is accepted
    pub fruit_max_retries: u32,
    /// Shortest relocation delay, in whole seconds (inclusive)
    pub fruit_expiry_min_secs: u64,
    /// Longest relocation delay, in whole seconds (exclusive)
    pub fruit_expiry_max_secs: u64,

    /// Seed for reproducible fruit placement; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_size: 50.0,
            initial_segments: 4,
            tick_ms: 100,
            grace_period_ms: 2000,
            border_step: 113.0 / 16.0,
            border_min_size: 113.0 / 16.0,
            fruit_spawn_range: 50,
            fruit_start: (25.0, 25.0),
            fruit_max_retries: 1000,
            fruit_expiry_min_secs: 4,
            fruit_expiry_max_secs: 10,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Default rules with a fixed RNG seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Load `tick_ms` and `seed` from a JSON file on top of the defaults,
    /// then validate the result
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = GameConfig::default();
        if let Some(tick_ms) = file.tick_ms {
            config.tick_ms = tick_ms;
        }
        config.seed = file.seed;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are in usable ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::Invalid("tick_ms must be > 0".into()));
        }
        if self.initial_segments == 0 {
            return Err(ConfigError::Invalid("initial_segments must be >= 1".into()));
        }
        if !(self.arena_size > 0.0) {
            return Err(ConfigError::Invalid("arena_size must be > 0".into()));
        }
        if !(self.border_step > 0.0) {
            return Err(ConfigError::Invalid("border_step must be > 0".into()));
        }
        if !(self.border_min_size >= 0.0 && self.border_min_size <= self.arena_size) {
            return Err(ConfigError::Invalid(format!(
                "border_min_size must be within 0..={}, got {}",
                self.arena_size, self.border_min_size
            )));
        }
        if f64::from(self.fruit_spawn_range) != self.arena_size {
            return Err(ConfigError::Invalid(format!(
                "fruit_spawn_range must match arena_size {}, got {}",
                self.arena_size, self.fruit_spawn_range
            )));
        }
        let (fx, fy) = self.fruit_start;
        let inside = |v: f64| v >= 0.0 && v < self.arena_size;
        if !(inside(fx) && inside(fy)) {
            return Err(ConfigError::Invalid(format!(
                "fruit_start must lie within the arena, got ({}, {})",
                fx, fy
            )));
        }
        if self.fruit_expiry_min_secs >= self.fruit_expiry_max_secs {
            return Err(ConfigError::Invalid(format!(
                "fruit expiry range is empty: {}..{}",
                self.fruit_expiry_min_secs, self.fruit_expiry_max_secs
            )));
        }
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }
}
