//! Live buff/debuff instances on an entity

use super::definition::BuffDefinition;
use crate::types::EntityId;
use serde::{Deserialize, Serialize};

/// A running application of a [`BuffDefinition`] on one entity.
///
/// Created by the tracker with an already-clamped duration; counted down
/// every update tick and discarded once `remaining_duration` hits zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuffInstance {
    /// Definition this instance was applied from (duration pre-clamped)
    pub definition: BuffDefinition,
    /// Seconds left before the effect expires
    pub remaining_duration: f64,
    /// Seconds this instance has been active
    pub elapsed: f64,
    /// Seconds until the next periodic tick
    pub next_tick: f64,
    /// Entity that applied the effect
    pub source_id: EntityId,
    /// Current stack count
    pub stacks: u32,
    /// Periodic ticks fired so far
    pub ticks_fired: u32,
}

impl BuffInstance {
    /// Create a fresh instance. `definition.duration` must already be
    /// clamped to the legal range.
    pub fn new(definition: BuffDefinition, source_id: EntityId) -> Self {
        let next_tick = if definition.is_periodic {
            definition.tick_interval
        } else {
            0.0
        };
        BuffInstance {
            remaining_duration: definition.duration,
            elapsed: 0.0,
            next_tick,
            source_id,
            stacks: 1,
            ticks_fired: 0,
            definition,
        }
    }

    /// Effect id shorthand
    pub fn effect_id(&self) -> &str {
        &self.definition.id
    }

    /// Whether the instance has run out
    pub fn is_expired(&self) -> bool {
        self.remaining_duration <= 0.0
    }

    /// Advance timers by `dt` seconds
    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
        self.remaining_duration -= dt;
        if self.definition.is_periodic {
            self.next_tick -= dt;
        }
    }

    /// Number of periodic ticks due after the most recent [`advance`].
    ///
    /// Catches up across large steps, and tops up the final partial tick
    /// once the instance expires, so the lifetime total always equals
    /// `ceil(duration / tick_interval)`.
    ///
    /// [`advance`]: BuffInstance::advance
    pub fn take_due_ticks(&mut self) -> u32 {
        if !self.definition.is_periodic || self.definition.tick_interval <= 0.0 {
            return 0;
        }
        let expected = self.definition.expected_ticks();
        let mut due = 0;
        while self.next_tick <= 0.0 && self.ticks_fired < expected {
            self.ticks_fired += 1;
            self.next_tick += self.definition.tick_interval;
            due += 1;
        }
        if self.is_expired() && self.ticks_fired < expected {
            due += expected - self.ticks_fired;
            self.ticks_fired = expected;
        }
        due
    }

    /// Damage one tick deals, scaled by stacks
    pub fn tick_damage(&self) -> f64 {
        self.definition.tick_damage * self.stacks as f64
    }

    /// Healing one tick applies, scaled by stacks
    pub fn tick_healing(&self) -> f64 {
        self.definition.tick_healing * self.stacks as f64
    }

    /// Reset the countdown to the full (clamped) duration
    pub fn refresh(&mut self) {
        self.remaining_duration = self.definition.duration;
    }

    /// Add a stack if the definition allows another.
    /// Returns true if the stack was added.
    pub fn add_stack(&mut self) -> bool {
        if !self.definition.stackable || self.stacks >= self.definition.max_stacks {
            return false;
        }
        self.stacks += 1;
        true
    }
}
