//! Stealth state tracking
//!
//! An entity is either visible or stealthed. Any break (damage taken,
//! attacking, or stepping out manually) starts a short re-entry cooldown.

use crate::events::{CombatEvent, EventQueue};
use crate::types::{EntityId, StealthBreakReason};
use std::collections::{HashMap, HashSet};

/// Movement speed factor while stealthed (70%).
pub const STEALTH_SPEED_MULTIPLIER: f64 = 0.7;

/// Seconds before stealth can be re-entered after it breaks.
pub const STEALTH_REENTRY_COOLDOWN: f64 = 2.0;

/// Tracks which entities are stealthed and their re-entry cooldowns.
#[derive(Debug, Default)]
pub struct StealthTracker {
    stealthed: HashSet<EntityId>,
    // entity -> absolute time the re-entry cooldown ends
    cooldown_until: HashMap<EntityId, f64>,
    now: f64,
    events: EventQueue,
}

impl StealthTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to enter stealth. Succeeds unless the re-entry cooldown is
    /// still running; already being stealthed counts as success without
    /// re-raising the entered event.
    pub fn try_enter(&mut self, entity: EntityId) -> bool {
        if self.is_in_stealth(entity) {
            return true;
        }
        if !self.can_enter(entity) {
            return false;
        }
        self.stealthed.insert(entity);
        self.events.push(CombatEvent::StealthEntered { entity });
        true
    }

    /// Incoming damage breaks stealth. No-op while visible.
    pub fn on_damage_received(&mut self, entity: EntityId) {
        self.break_stealth(entity, StealthBreakReason::DamageReceived);
    }

    /// Performing an attack breaks stealth. No-op while visible.
    pub fn on_attack_performed(&mut self, entity: EntityId) {
        self.break_stealth(entity, StealthBreakReason::Attack);
    }

    /// Step out of stealth manually. Starts the same re-entry cooldown.
    pub fn exit(&mut self, entity: EntityId) {
        self.break_stealth(entity, StealthBreakReason::Manual);
    }

    fn break_stealth(&mut self, entity: EntityId, reason: StealthBreakReason) {
        if !self.stealthed.remove(&entity) {
            return;
        }
        self.cooldown_until
            .insert(entity, self.now + STEALTH_REENTRY_COOLDOWN);
        self.events
            .push(CombatEvent::StealthBroken { entity, reason });
    }

    /// Whether the entity is currently stealthed
    pub fn is_in_stealth(&self, entity: EntityId) -> bool {
        self.stealthed.contains(&entity)
    }

    /// Whether the re-entry cooldown has elapsed
    pub fn can_enter(&self, entity: EntityId) -> bool {
        self.cooldown_remaining(entity) <= 0.0
    }

    /// Seconds left on the re-entry cooldown; 0 when ready
    pub fn cooldown_remaining(&self, entity: EntityId) -> f64 {
        self.cooldown_until
            .get(&entity)
            .map_or(0.0, |&until| (until - self.now).max(0.0))
    }

    /// Movement speed factor: 0.7 while stealthed, otherwise 1.0
    pub fn movement_speed_multiplier(&self, entity: EntityId) -> f64 {
        if self.is_in_stealth(entity) {
            STEALTH_SPEED_MULTIPLIER
        } else {
            1.0
        }
    }

    /// How many entities are stealthed right now
    pub fn stealthed_count(&self) -> usize {
        self.stealthed.len()
    }

    /// Reset everything (zone or instance transition)
    pub fn clear_all(&mut self) {
        self.stealthed.clear();
        self.cooldown_until.clear();
    }

    /// Advance the cooldown clock and drop elapsed entries.
    pub fn update(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        self.now += dt;
        let now = self.now;
        self.cooldown_until.retain(|_, &mut until| until > now);
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.events.drain()
    }
}
