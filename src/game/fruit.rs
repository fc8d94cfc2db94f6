//! The fruit and its self-rescheduling relocation timer
//!
//! A fruit owns exactly one pending relocation deadline. Every relocation
//! overwrites it, which cancels the previous timer and arms a new one. The
//! runtime sleeps until [`Fruit::deadline`] and then calls
//! [`Fruit::fire_if_due`].

use rand::rngs::StdRng;
use rand::Rng;
use std::time::{Duration, Instant};

use super::border::Border;
use super::collision::CollisionFn;
use super::config::GameConfig;
use super::entity::{Entity, EntityKind};

#[derive(Debug)]
pub struct Fruit {
    entity: Entity,
    is_collided: CollisionFn,
    rng: StdRng,
    deadline: Option<Instant>,
    spawn_range: u32,
    max_retries: u32,
    expiry_secs: (u64, u64),
}

impl Fruit {
    /// Create a fruit at `config.fruit_start` and arm its first relocation.
    ///
    /// `config` must pass [`GameConfig::validate`]; sampling from an empty
    /// expiry range panics.
    pub fn new(config: &GameConfig, is_collided: CollisionFn, rng: StdRng, now: Instant) -> Self {
        let (x, y) = config.fruit_start;
        let mut fruit = Self {
            entity: Entity::new(EntityKind::Fruit, 0, x, y, 1.0),
            is_collided,
            rng,
            deadline: None,
            spawn_range: config.fruit_spawn_range,
            max_retries: config.fruit_max_retries,
            expiry_secs: (config.fruit_expiry_min_secs, config.fruit_expiry_max_secs),
        };
        fruit.expire(now);
        fruit
    }

    /// A uniformly random unit cell inside the spawn range
    pub fn random_position(&mut self) -> Entity {
        let x = self.rng.gen_range(0..self.spawn_range);
        let y = self.rng.gen_range(0..self.spawn_range);
        Entity::new(EntityKind::Fruit, self.entity.id, x as f64, y as f64, 1.0)
    }

    /// Move to a random cell inside `border` and re-arm the timer.
    ///
    /// Gives up after `max_retries` resamples and keeps the last sample even
    /// if it lies outside the border. Returns the number of resamples made.
    pub fn move_to_new_position(&mut self, border: &Border, now: Instant) -> u32 {
        self.cancel();

        let mut candidate = self.random_position();
        let mut retries = 0;
        while !(self.is_collided)(border.entity(), &candidate) && retries < self.max_retries {
            candidate = self.random_position();
            retries += 1;
        }

        if (self.is_collided)(border.entity(), &candidate) {
            log::debug!(
                "fruit moved to ({}, {}) after {} retries",
                candidate.x,
                candidate.y,
                retries
            );
        } else {
            log::warn!(
                "fruit placement gave up after {} retries, accepting ({}, {}) outside border",
                retries,
                candidate.x,
                candidate.y
            );
        }

        self.entity.move_to(candidate.x, candidate.y);
        self.expire(now);
        retries
    }

    /// Arm the relocation timer with a random whole-second delay.
    ///
    /// Any previously pending deadline is replaced.
    pub fn expire(&mut self, now: Instant) {
        let (min, max) = self.expiry_secs;
        let delay = Duration::from_secs(self.rng.gen_range(min..max));
        self.deadline = Some(now + delay);
    }

    /// Drop the pending relocation, if any
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Timer callback: relocate if the deadline has been reached
    pub fn fire_if_due(&mut self, border: &Border, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.move_to_new_position(border, now);
                true
            }
            _ => false,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }
}
