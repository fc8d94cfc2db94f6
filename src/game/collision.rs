//! Axis-aligned box overlap

use super::entity::Entity;

/// Signature of the collision predicate injected into [`Fruit`](super::Fruit)
pub type CollisionFn = fn(&Entity, &Entity) -> bool;

/// Returns true if the boxes of `a` and `b` overlap.
///
/// Edges are open: two unit cells that only touch do not collide.
pub fn is_collided(a: &Entity, b: &Entity) -> bool {
    a.x < b.x + b.size && a.x + a.size > b.x && a.y < b.y + b.size && a.y + a.size > b.y
}
