//! Secondary resource tracking
//!
//! One scalar pool per entity (Mana, Rage, Energy, Runic Power, Holy
//! Power, Focus) plus the non-scalar pools: runes and combo points.
//! Pools register at zero; callers that want a full bar add `max` right
//! after registering.

mod types;

pub use types::{CharacterClass, ResourceType};

use crate::config::ResourceTuning;
use crate::events::{CombatEvent, EventQueue};
use crate::types::EntityId;
use std::collections::HashMap;

/// Runes a rune-using entity starts with and is capped at.
pub const MAX_RUNES: u8 = 6;

/// Hard cap on combo points.
pub const MAX_COMBO_POINTS: u8 = 5;

#[derive(Debug, Clone)]
struct ResourcePool {
    resource_type: ResourceType,
    current: f64,
    max: f64,
}

/// Apply a signed delta to a pool, clamped to `[0, max]`.
/// Returns whether the stored value actually moved.
fn bump(pool: &mut ResourcePool, delta: f64) -> bool {
    let next = (pool.current + delta).clamp(0.0, pool.max);
    let changed = (next - pool.current).abs() > f64::EPSILON;
    pool.current = next;
    changed
}

/// Tracks class resources, runes, and combo points per entity.
#[derive(Debug, Default)]
pub struct ResourceTracker {
    pools: HashMap<EntityId, ResourcePool>,
    runes: HashMap<EntityId, u8>,
    combo_points: HashMap<EntityId, u8>,
    tuning: ResourceTuning,
    events: EventQueue,
}

impl ResourceTracker {
    /// Create a tracker with default rates
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker with custom rates
    pub fn with_tuning(tuning: ResourceTuning) -> Self {
        ResourceTracker {
            tuning,
            ..Self::default()
        }
    }

    /// Register an entity's scalar pool. The pool starts at 0.
    ///
    /// Re-registering the same type updates `max`; registering a
    /// *different* type in an occupied slot is caller misuse and is
    /// refused with `false`, leaving the existing pool untouched.
    pub fn register(&mut self, entity: EntityId, resource_type: ResourceType, max: f64) -> bool {
        let max = max.max(0.0);
        match self.pools.get_mut(&entity) {
            Some(pool) if pool.resource_type != resource_type => false,
            Some(pool) => {
                pool.max = max;
                pool.current = pool.current.min(max);
                true
            }
            None => {
                self.pools.insert(
                    entity,
                    ResourcePool {
                        resource_type,
                        current: 0.0,
                        max,
                    },
                );
                true
            }
        }
    }

    /// Register everything an entity of `class` needs: its scalar pool at
    /// the default max, plus runes and combo points where the class uses
    /// them. Returns the scalar type registered, if any.
    pub fn register_for_class(
        &mut self,
        entity: EntityId,
        class: CharacterClass,
    ) -> Option<ResourceType> {
        let resource_type = ResourceType::for_class(class)?;
        self.register(entity, resource_type, resource_type.default_max());
        if class.uses_runes() {
            self.register_runes(entity);
        }
        if class.uses_combo_points() {
            self.register_combo_points(entity);
        }
        Some(resource_type)
    }

    /// Add resource, capped at max. Non-positive amounts are ignored.
    pub fn add(&mut self, entity: EntityId, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        if let Some(pool) = self.pools.get_mut(&entity) {
            bump(pool, amount);
            self.events.push(CombatEvent::ResourceChanged {
                entity,
                current: pool.current,
                max: pool.max,
            });
        }
    }

    /// Spend resource if the full amount is available.
    ///
    /// Returns `false` and leaves the pool untouched when it is not; a
    /// pool never goes negative.
    pub fn try_spend(&mut self, entity: EntityId, amount: f64) -> bool {
        if amount < 0.0 {
            return false;
        }
        let Some(pool) = self.pools.get_mut(&entity) else {
            return false;
        };
        if pool.current < amount {
            return false;
        }
        pool.current -= amount;
        self.events.push(CombatEvent::ResourceChanged {
            entity,
            current: pool.current,
            max: pool.max,
        });
        true
    }

    /// Apply one step of per-type regeneration or decay.
    ///
    /// Rage-like resources drain only out of combat; Energy and Focus
    /// refill regardless of combat state; Mana refills faster out of
    /// combat than in it; Holy Power (and the rune/combo pools) never
    /// move on their own.
    pub fn apply_decay(&mut self, entity: EntityId, dt: f64, in_combat: bool) {
        if dt <= 0.0 {
            return;
        }
        let Some(pool) = self.pools.get_mut(&entity) else {
            return;
        };

        let rates = &self.tuning;
        let delta = match pool.resource_type {
            ResourceType::Energy => rates.energy_regen_rate * dt,
            ResourceType::Focus => rates.focus_regen_rate * dt,
            ResourceType::Mana => {
                if in_combat {
                    rates.mana_regen_in_combat * dt
                } else {
                    rates.mana_regen_out_of_combat * dt
                }
            }
            ResourceType::Rage if !in_combat => -(rates.rage_decay_rate * dt),
            ResourceType::RunicPower if !in_combat => -(rates.runic_power_decay_rate * dt),
            _ => 0.0,
        };

        if delta != 0.0 && bump(pool, delta) {
            self.events.push(CombatEvent::ResourceChanged {
                entity,
                current: pool.current,
                max: pool.max,
            });
        }
    }

    /// Award the fixed per-event rage for dealing damage. The damage
    /// magnitude does not scale the award.
    pub fn generate_from_damage_dealt(&mut self, entity: EntityId, _damage: f64) {
        let gain = self.tuning.rage_per_damage_dealt;
        if self.resource_type(entity) == Some(ResourceType::Rage) {
            self.add(entity, gain);
        }
    }

    /// Award the fixed per-event rage for taking damage.
    pub fn generate_from_damage_taken(&mut self, entity: EntityId, _damage: f64) {
        let gain = self.tuning.rage_per_damage_taken;
        if self.resource_type(entity) == Some(ResourceType::Rage) {
            self.add(entity, gain);
        }
    }

    /// Current value of the scalar pool; 0 for unregistered entities
    pub fn resource(&self, entity: EntityId) -> f64 {
        self.pools.get(&entity).map_or(0.0, |p| p.current)
    }

    /// Pool maximum; 0 for unregistered entities
    pub fn max_resource(&self, entity: EntityId) -> f64 {
        self.pools.get(&entity).map_or(0.0, |p| p.max)
    }

    /// Which resource the entity runs on, if registered
    pub fn resource_type(&self, entity: EntityId) -> Option<ResourceType> {
        self.pools.get(&entity).map(|p| p.resource_type)
    }

    // --- Runes ---

    /// Seed an entity's rune pool at the full count.
    pub fn register_runes(&mut self, entity: EntityId) {
        self.runes.insert(entity, MAX_RUNES);
    }

    /// Spend `count` runes atomically: either all are deducted or none.
    pub fn try_spend_runes(&mut self, entity: EntityId, count: u8) -> bool {
        let Some(available) = self.runes.get_mut(&entity) else {
            return false;
        };
        if count > *available {
            return false;
        }
        *available -= count;
        true
    }

    /// Runes currently available; 0 for unregistered entities
    pub fn available_runes(&self, entity: EntityId) -> u8 {
        self.runes.get(&entity).copied().unwrap_or(0)
    }

    /// Restore runes up to the cap (ability or cooldown driven; runes
    /// never recharge automatically).
    pub fn restore_runes(&mut self, entity: EntityId, count: u8) {
        if let Some(available) = self.runes.get_mut(&entity) {
            *available = (*available + count).min(MAX_RUNES);
        }
    }

    // --- Combo points ---

    /// Start tracking combo points for an entity, at zero.
    pub fn register_combo_points(&mut self, entity: EntityId) {
        self.combo_points.insert(entity, 0);
    }

    /// Add one combo point, capped at [`MAX_COMBO_POINTS`].
    pub fn add_combo_point(&mut self, entity: EntityId) {
        if let Some(points) = self.combo_points.get_mut(&entity) {
            if *points < MAX_COMBO_POINTS {
                *points += 1;
                self.events.push(CombatEvent::ComboPointsChanged {
                    entity,
                    current: *points,
                    max: MAX_COMBO_POINTS,
                });
            }
        }
    }

    /// Consume every combo point, returning how many were spent.
    pub fn consume_all_combo_points(&mut self, entity: EntityId) -> u8 {
        let Some(points) = self.combo_points.get_mut(&entity) else {
            return 0;
        };
        let consumed = *points;
        if consumed > 0 {
            *points = 0;
            self.events.push(CombatEvent::ComboPointsChanged {
                entity,
                current: 0,
                max: MAX_COMBO_POINTS,
            });
        }
        consumed
    }

    /// Current combo points; 0 for unregistered entities
    pub fn combo_points(&self, entity: EntityId) -> u8 {
        self.combo_points.get(&entity).copied().unwrap_or(0)
    }

    /// Whether the entity has at least one combo point banked
    pub fn has_combo_points(&self, entity: EntityId) -> bool {
        self.combo_points(entity) > 0
    }

    /// Finisher damage multiplier for consuming `points` combo points:
    /// `1 + points × step`.
    pub fn combo_point_damage_multiplier(&self, points: u8) -> f64 {
        1.0 + points as f64 * self.tuning.combo_point_damage_step
    }

    /// Drop all resource state for an entity
    pub fn unregister_entity(&mut self, entity: EntityId) {
        self.pools.remove(&entity);
        self.runes.remove(&entity);
        self.combo_points.remove(&entity);
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.events.drain()
    }
}
