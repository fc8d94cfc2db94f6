//! Positioned, sized boxes shared by every collidable game object

/// What an entity represents; render sinks use it to pick a style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Snake,
    Fruit,
    Border,
}

/// An axis-aligned square on the grid.
///
/// Coordinates and size are in grid units. They are stored as `f64` because
/// the border shrinks by fractional steps; every constant the game uses is
/// exactly representable, so arithmetic stays exact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    /// Identity within its kind (segment index for snake segments)
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Entity {
    pub fn new(kind: EntityKind, id: usize, x: f64, y: f64, size: f64) -> Self {
        Self {
            kind,
            id,
            x,
            y,
            size,
        }
    }

    /// Absolute reposition, no bounds checking
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn resize(&mut self, size: f64) {
        self.size = size;
    }

    /// Snapshot handed to render sinks
    pub fn view(&self) -> EntityView {
        EntityView {
            kind: self.kind,
            id: self.id,
            x: self.x,
            y: self.y,
            size: self.size,
        }
    }
}

/// Read-only copy of an entity as seen by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityView {
    pub kind: EntityKind,
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl EntityView {
    /// Key that identifies the visual element this view updates
    pub fn key(&self) -> (EntityKind, usize) {
        (self.kind, self.id)
    }
}
