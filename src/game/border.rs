use super::config::GameConfig;
use super::entity::{Entity, EntityKind};

/// The square that bounds the playable area.
///
/// Its edge only ever shrinks, and it stays centered in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    entity: Entity,
    arena_size: f64,
    step: f64,
    min_size: f64,
}

impl Border {
    /// A border covering the whole arena
    pub fn new(config: &GameConfig) -> Self {
        Self {
            entity: Entity::new(EntityKind::Border, 0, 0.0, 0.0, config.arena_size),
            arena_size: config.arena_size,
            step: config.border_step,
            min_size: config.border_min_size,
        }
    }

    /// Shrink by one step (clamped to the minimum) and re-center
    pub fn shrink(&mut self) {
        let size = (self.entity.size - self.step).max(self.min_size);
        self.entity.resize(size);
        let offset = (self.arena_size - size) / 2.0;
        self.entity.move_to(offset, offset);
    }

    /// Restore the full arena size without re-centering.
    ///
    /// The controller rebuilds the border on reset; this is the alternate
    /// in-place path.
    pub fn reset(&mut self) {
        self.entity.resize(self.arena_size);
    }

    pub fn is_at_minimum(&self) -> bool {
        self.entity.size <= self.min_size
    }

    pub fn size(&self) -> f64 {
        self.entity.size
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }
}
