//! In-memory scene the game draws into and the renderer reads from

use std::collections::BTreeMap;

use crate::game::{EntityKind, EntityView, RenderSink, ReplaySink, ScoreSink};

/// Latest view of every drawn entity plus the HUD values
#[derive(Debug, Default, Clone)]
pub struct Scene {
    entities: BTreeMap<(EntityKind, usize), EntityView>,
    replay_visible: bool,
    score: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, kind: EntityKind, id: usize) -> Option<&EntityView> {
        self.entities.get(&(kind, id))
    }

    /// All views of one kind, ordered by id
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &EntityView> {
        self.entities
            .range((kind, 0)..=(kind, usize::MAX))
            .map(|(_, view)| view)
    }

    pub fn border(&self) -> Option<&EntityView> {
        self.get(EntityKind::Border, 0)
    }

    pub fn replay_visible(&self) -> bool {
        self.replay_visible
    }

    /// Score as last pushed by the game
    pub fn score(&self) -> u32 {
        self.score
    }
}

impl RenderSink for Scene {
    fn draw(&mut self, view: &EntityView) {
        self.entities.insert(view.key(), *view);
    }

    fn clear(&mut self) {
        self.entities.clear();
    }
}

impl ReplaySink for Scene {
    fn show_replay(&mut self) {
        self.replay_visible = true;
    }

    fn hide_replay(&mut self) {
        self.replay_visible = false;
    }
}

impl ScoreSink for Scene {
    fn update_score_display(&mut self, score: u32) {
        self.score = score;
    }
}
