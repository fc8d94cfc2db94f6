use super::action::Direction;
use super::entity::{Entity, EntityKind};

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Segments, with the head at index 0. Never empty.
    segments: Vec<Entity>,
    /// Direction applied on the next `advance`
    direction: Direction,
}

impl Snake {
    /// Create a snake with `length` segments stacked at `(x, y)`, facing down.
    ///
    /// A length of zero is bumped to one so the snake always has a head.
    pub fn new(x: f64, y: f64, length: usize) -> Self {
        let segments = (0..length.max(1))
            .map(|i| Self::segment(i, x, y))
            .collect();

        Self {
            segments,
            direction: Direction::Down,
        }
    }

    fn segment(index: usize, x: f64, y: f64) -> Entity {
        Entity::new(EntityKind::Snake, index, x, y, 1.0)
    }

    /// Set the direction for the next move. Reversing is not rejected.
    pub fn change_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Move the snake one cell.
    ///
    /// Followers take the position their predecessor had before this call,
    /// read from a snapshot so the chain does not collapse onto the head.
    pub fn advance(&mut self) {
        let previous: Vec<(f64, f64)> = self.segments.iter().map(|s| (s.x, s.y)).collect();

        for (segment, &(x, y)) in self.segments.iter_mut().skip(1).zip(previous.iter()) {
            segment.move_to(x, y);
        }

        let (dx, dy) = self.direction.delta();
        let head = &mut self.segments[0];
        head.move_to(head.x + dx, head.y + dy);
    }

    /// Append `count` segments at the tail's current position
    pub fn grow(&mut self, count: usize) {
        let tail = self.tail();
        let start = self.segments.len();
        self.segments
            .extend((start..start + count).map(|i| Self::segment(i, tail.x, tail.y)));
    }

    pub fn head(&self) -> &Entity {
        &self.segments[0]
    }

    pub fn tail(&self) -> Entity {
        self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> &[Entity] {
        &self.segments
    }

    /// Every segment except the head
    pub fn body(&self) -> &[Entity] {
        &self.segments[1..]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// A snake is never shorter than its head
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
