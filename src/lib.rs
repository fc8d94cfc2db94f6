//! Shrink Snake - a Snake game whose border closes in on you
//!
//! This library provides:
//! - Core game logic (game module): entities, collisions, the tick controller
//! - TUI rendering (render module) built on the game's sink traits
//! - Keyboard mapping (input module)
//! - In-session stats (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
