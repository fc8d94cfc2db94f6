//! Core game logic module for the shrinking-border snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Front ends plug in through the traits in [`sink`].

pub mod action;
pub mod border;
pub mod collision;
pub mod config;
pub mod engine;
pub mod entity;
pub mod fruit;
pub mod sink;
pub mod snake;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use border::Border;
pub use collision::{is_collided, CollisionFn};
pub use config::{ConfigError, GameConfig};
pub use engine::{Game, GameState, TickOutcome};
pub use entity::{Entity, EntityKind, EntityView};
pub use fruit::Fruit;
pub use sink::{NullSinks, RenderSink, ReplaySink, ScoreSink, Sinks};
pub use snake::Snake;
