//! Output interfaces the game controller calls into
//!
//! The core never touches a terminal. A front end implements these traits
//! and hands them to [`Game`](super::Game).

use super::entity::EntityView;

/// Materializes entities on some visual surface
pub trait RenderSink {
    /// Create or update the visual for `view`, keyed by its kind and id
    fn draw(&mut self, view: &EntityView);
    /// Remove every visual (called on reset)
    fn clear(&mut self);
}

/// Shows or hides the "play again" affordance
pub trait ReplaySink {
    fn show_replay(&mut self);
    fn hide_replay(&mut self);
}

pub trait ScoreSink {
    fn update_score_display(&mut self, score: u32);
}

/// Everything the controller needs from a front end
pub trait Sinks: RenderSink + ReplaySink + ScoreSink {}

impl<T: RenderSink + ReplaySink + ScoreSink> Sinks for T {}

/// Sinks that discard everything, for headless runs
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSinks;

impl RenderSink for NullSinks {
    fn draw(&mut self, _view: &EntityView) {}
    fn clear(&mut self) {}
}

impl ReplaySink for NullSinks {
    fn show_replay(&mut self) {}
    fn hide_replay(&mut self) {}
}

impl ScoreSink for NullSinks {
    fn update_score_display(&mut self, _score: u32) {}
}

/// Test double that records every call
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSinks {
    pub drawn: Vec<EntityView>,
    pub clears: usize,
    pub replay_visible: Option<bool>,
    pub scores: Vec<u32>,
}

#[cfg(test)]
impl RecordingSinks {
    pub fn take_drawn(&mut self) -> Vec<EntityView> {
        std::mem::take(&mut self.drawn)
    }
}

#[cfg(test)]
impl RenderSink for RecordingSinks {
    fn draw(&mut self, view: &EntityView) {
        self.drawn.push(*view);
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.drawn.clear();
    }
}

#[cfg(test)]
impl ReplaySink for RecordingSinks {
    fn show_replay(&mut self) {
        self.replay_visible = Some(true);
    }

    fn hide_replay(&mut self) {
        self.replay_visible = Some(false);
    }
}

#[cfg(test)]
impl ScoreSink for RecordingSinks {
    fn update_score_display(&mut self, score: u32) {
        self.scores.push(score);
    }
}
