//! Per-entity buff and debuff bookkeeping
//!
//! Buffs and debuffs live in two independent per-entity lists, each capped;
//! applying past the cap evicts the oldest instance. Periodic instances
//! fire their DoT/HoT ticks from `update`, including the final partial tick
//! before removal, so a lifetime always produces `ceil(duration /
//! tick_interval)` ticks.

use super::definition::BuffDefinition;
use super::instance::BuffInstance;
use crate::config::EffectTuning;
use crate::events::{CombatEvent, EventQueue};
use crate::types::{CcCategory, EntityId};
use std::collections::HashMap;

/// Tracks every timed effect on every entity.
#[derive(Debug, Default)]
pub struct BuffTracker {
    buffs: HashMap<EntityId, Vec<BuffInstance>>,
    debuffs: HashMap<EntityId, Vec<BuffInstance>>,
    tuning: EffectTuning,
    events: EventQueue,
}

impl BuffTracker {
    /// Create a tracker with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tracker with custom limits
    pub fn with_tuning(tuning: EffectTuning) -> Self {
        BuffTracker {
            tuning,
            ..Self::default()
        }
    }

    /// Apply an effect, routing by its definition's kind
    pub fn apply(&mut self, target: EntityId, def: &BuffDefinition, source: EntityId) {
        if def.effect_type.is_beneficial() {
            self.apply_buff(target, def, source);
        } else {
            self.apply_debuff(target, def, source);
        }
    }

    /// Apply a buff to `target`. The duration is clamped, never rejected.
    ///
    /// Re-applying an effect already present refreshes it (and adds a stack
    /// when stackable) instead of inserting a second instance.
    pub fn apply_buff(&mut self, target: EntityId, def: &BuffDefinition, source: EntityId) {
        let mut def = def.clone();
        def.duration = self.tuning.clamp_duration(def.duration);

        let list = self.buffs.entry(target).or_default();
        if let Some(existing) = list.iter_mut().find(|b| b.definition.id == def.id) {
            existing.add_stack();
            existing.refresh();
            return;
        }

        if list.len() >= self.tuning.max_buffs_per_entity {
            let evicted = list.remove(0);
            self.events.push(CombatEvent::BuffExpired {
                target,
                effect_id: evicted.definition.id,
            });
        }

        self.events.push(CombatEvent::BuffApplied {
            target,
            effect_id: def.id.clone(),
        });
        list.push(BuffInstance::new(def, source));
    }

    /// Apply a debuff to `target`, with the same clamp/refresh/evict rules
    /// as [`apply_buff`]. Crowd-control debuffs additionally raise
    /// [`CombatEvent::CcApplied`].
    ///
    /// [`apply_buff`]: BuffTracker::apply_buff
    pub fn apply_debuff(&mut self, target: EntityId, def: &BuffDefinition, source: EntityId) {
        let mut def = def.clone();
        def.duration = self.tuning.clamp_duration(def.duration);

        let list = self.debuffs.entry(target).or_default();
        if let Some(existing) = list.iter_mut().find(|d| d.definition.id == def.id) {
            existing.add_stack();
            existing.refresh();
            return;
        }

        if list.len() >= self.tuning.max_debuffs_per_entity {
            let evicted = list.remove(0);
            self.events.push(CombatEvent::DebuffExpired {
                target,
                effect_id: evicted.definition.id,
            });
        }

        self.events.push(CombatEvent::DebuffApplied {
            target,
            effect_id: def.id.clone(),
        });
        if let Some(category) = def.cc_category {
            self.events.push(CombatEvent::CcApplied {
                target,
                category,
                duration: def.duration,
                source,
            });
        }
        list.push(BuffInstance::new(def, source));
    }

    /// Advance every tracked instance, firing periodic ticks and removing
    /// whatever expired this step.
    pub fn update(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }

        for (&target, list) in self.buffs.iter_mut() {
            for instance in list.iter_mut() {
                instance.advance(dt);
                let due = instance.take_due_ticks();
                if instance.definition.tick_healing > 0.0 {
                    for _ in 0..due {
                        self.events.push(CombatEvent::HotTick {
                            target,
                            healing: instance.tick_healing(),
                            source: instance.source_id,
                        });
                    }
                }
            }
            let mut i = 0;
            while i < list.len() {
                if list[i].is_expired() {
                    let expired = list.remove(i);
                    self.events.push(CombatEvent::BuffExpired {
                        target,
                        effect_id: expired.definition.id,
                    });
                } else {
                    i += 1;
                }
            }
        }

        for (&target, list) in self.debuffs.iter_mut() {
            for instance in list.iter_mut() {
                instance.advance(dt);
                let due = instance.take_due_ticks();
                if instance.definition.tick_damage > 0.0 {
                    for _ in 0..due {
                        self.events.push(CombatEvent::DotTick {
                            target,
                            damage: instance.tick_damage(),
                            damage_type: instance.definition.damage_type,
                            source: instance.source_id,
                        });
                    }
                }
            }
            let mut i = 0;
            while i < list.len() {
                if list[i].is_expired() {
                    let expired = list.remove(i);
                    self.events.push(CombatEvent::DebuffExpired {
                        target,
                        effect_id: expired.definition.id.clone(),
                    });
                    if let Some(category) = expired.definition.cc_category {
                        self.events.push(CombatEvent::CcExpired { target, category });
                    }
                } else {
                    i += 1;
                }
            }
        }
    }

    /// Whether `target` currently has the buff `effect_id`
    pub fn has_buff(&self, target: EntityId, effect_id: &str) -> bool {
        self.buffs
            .get(&target)
            .is_some_and(|list| list.iter().any(|b| b.definition.id == effect_id))
    }

    /// Whether `target` currently has the debuff `effect_id`
    pub fn has_debuff(&self, target: EntityId, effect_id: &str) -> bool {
        self.debuffs
            .get(&target)
            .is_some_and(|list| list.iter().any(|d| d.definition.id == effect_id))
    }

    /// Seconds left on an effect, searching buffs first. 0 when absent.
    pub fn remaining_duration(&self, target: EntityId, effect_id: &str) -> f64 {
        let find = |map: &HashMap<EntityId, Vec<BuffInstance>>| {
            map.get(&target)
                .and_then(|list| list.iter().find(|i| i.definition.id == effect_id))
                .map(|i| i.remaining_duration)
        };
        find(&self.buffs).or_else(|| find(&self.debuffs)).unwrap_or(0.0)
    }

    /// Number of active buffs on `target`
    pub fn buff_count(&self, target: EntityId) -> usize {
        self.buffs.get(&target).map_or(0, Vec::len)
    }

    /// Number of active debuffs on `target`
    pub fn debuff_count(&self, target: EntityId) -> usize {
        self.debuffs.get(&target).map_or(0, Vec::len)
    }

    /// Read-only snapshot of active buffs, oldest first
    pub fn active_buffs(&self, target: EntityId) -> &[BuffInstance] {
        self.buffs.get(&target).map_or(&[], Vec::as_slice)
    }

    /// Read-only snapshot of active debuffs, oldest first
    pub fn active_debuffs(&self, target: EntityId) -> &[BuffInstance] {
        self.debuffs.get(&target).map_or(&[], Vec::as_slice)
    }

    /// Remove one buff early (dispel). No-op when absent.
    pub fn remove_buff(&mut self, target: EntityId, effect_id: &str) {
        if let Some(list) = self.buffs.get_mut(&target) {
            if let Some(pos) = list.iter().position(|b| b.definition.id == effect_id) {
                let removed = list.remove(pos);
                self.events.push(CombatEvent::BuffExpired {
                    target,
                    effect_id: removed.definition.id,
                });
            }
        }
    }

    /// Remove one debuff early. No-op when absent.
    pub fn remove_debuff(&mut self, target: EntityId, effect_id: &str) {
        if let Some(list) = self.debuffs.get_mut(&target) {
            if let Some(pos) = list.iter().position(|d| d.definition.id == effect_id) {
                let removed = list.remove(pos);
                self.events.push(CombatEvent::DebuffExpired {
                    target,
                    effect_id: removed.definition.id,
                });
            }
        }
    }

    /// Strip every buff from `target`
    pub fn remove_all_buffs(&mut self, target: EntityId) {
        if let Some(list) = self.buffs.get_mut(&target) {
            for instance in list.drain(..) {
                self.events.push(CombatEvent::BuffExpired {
                    target,
                    effect_id: instance.definition.id,
                });
            }
        }
    }

    /// Strip every debuff from `target`
    pub fn remove_all_debuffs(&mut self, target: EntityId) {
        if let Some(list) = self.debuffs.get_mut(&target) {
            for instance in list.drain(..) {
                self.events.push(CombatEvent::DebuffExpired {
                    target,
                    effect_id: instance.definition.id,
                });
            }
        }
    }

    /// Strip everything from `target` (death, zone transition)
    pub fn clear_all_effects(&mut self, target: EntityId) {
        self.remove_all_buffs(target);
        self.remove_all_debuffs(target);
    }

    /// Drop all tracking data for an entity without raising events
    pub fn unregister_entity(&mut self, target: EntityId) {
        self.buffs.remove(&target);
        self.debuffs.remove(&target);
    }

    /// Whether `target` is under a crowd-control debuff of `category`
    pub fn is_affected_by_cc(&self, target: EntityId, category: CcCategory) -> bool {
        self.debuffs.get(&target).is_some_and(|list| {
            list.iter().any(|d| d.definition.cc_category == Some(category))
        })
    }

    /// The active CC debuff of `category` on `target`, if any
    pub fn active_cc(&self, target: EntityId, category: CcCategory) -> Option<&BuffInstance> {
        self.debuffs
            .get(&target)?
            .iter()
            .find(|d| d.definition.cc_category == Some(category))
    }

    /// Whether `target` is stunned (no actions)
    pub fn is_stunned(&self, target: EntityId) -> bool {
        self.is_affected_by_cc(target, CcCategory::Stun)
    }

    /// Whether `target` is feared (uncontrolled movement)
    pub fn is_feared(&self, target: EntityId) -> bool {
        self.is_affected_by_cc(target, CcCategory::Fear)
    }

    /// Whether `target` is rooted (no movement)
    pub fn is_rooted(&self, target: EntityId) -> bool {
        self.is_affected_by_cc(target, CcCategory::Root)
    }

    /// Strongest slow fraction on `target` in `[0, 1]`. Slows do not
    /// stack; the highest wins.
    pub fn slow_fraction(&self, target: EntityId) -> f64 {
        self.debuffs.get(&target).map_or(0.0, |list| {
            list.iter()
                .filter(|d| d.definition.cc_category == Some(CcCategory::Slow))
                .map(|d| d.definition.slow_fraction)
                .fold(0.0, f64::max)
        })
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.events.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DamageType, EffectType};

    fn make_buff(id: &str, duration: f64) -> BuffDefinition {
        BuffDefinition::new(id, id, EffectType::Buff, duration)
    }

    fn make_dot(id: &str, duration: f64, interval: f64, damage: f64) -> BuffDefinition {
        BuffDefinition::new(id, id, EffectType::Dot, duration)
            .with_periodic_damage(interval, damage, DamageType::Shadow)
    }

    fn make_hot(id: &str, duration: f64, interval: f64, healing: f64) -> BuffDefinition {
        BuffDefinition::new(id, id, EffectType::Hot, duration)
            .with_periodic_healing(interval, healing)
    }

    #[test]
    fn test_apply_clamps_duration() {
        let mut tracker = BuffTracker::new();
        tracker.apply_buff(1, &make_buff("short", 0.2), 0);
        tracker.apply_buff(1, &make_buff("long", 9000.0), 0);

        assert!((tracker.remaining_duration(1, "short") - 1.0).abs() < 0.01);
        assert!((tracker.remaining_duration(1, "long") - 300.0).abs() < 0.01);
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut tracker = BuffTracker::new();
        for i in 0..=20 {
            tracker.apply_buff(1, &make_buff(&format!("buff_{i}"), 60.0), 0);
        }

        assert_eq!(tracker.buff_count(1), 20);
        assert!(!tracker.has_buff(1, "buff_0"));
        assert!(tracker.has_buff(1, "buff_1"));
        assert!(tracker.has_buff(1, "buff_20"));
    }

    #[test]
    fn test_reapply_refreshes_instead_of_duplicating() {
        let mut tracker = BuffTracker::new();
        tracker.apply_buff(1, &make_buff("shout", 10.0), 0);
        tracker.update(6.0);
        tracker.apply_buff(1, &make_buff("shout", 10.0), 0);

        assert_eq!(tracker.buff_count(1), 1);
        assert!((tracker.remaining_duration(1, "shout") - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_stackable_reapply_adds_stack() {
        let mut tracker = BuffTracker::new();
        let sunder = BuffDefinition::new("sunder", "Sunder", EffectType::Debuff, 30.0)
            .with_stacking(5);
        tracker.apply_debuff(1, &sunder, 2);
        tracker.apply_debuff(1, &sunder, 2);
        tracker.apply_debuff(1, &sunder, 2);

        assert_eq!(tracker.debuff_count(1), 1);
        assert_eq!(tracker.active_debuffs(1)[0].stacks, 3);
    }

    #[test]
    fn test_dot_tick_count_matches_expected() {
        let mut tracker = BuffTracker::new();
        // 5s / 2s interval: ceil = 3 ticks over the lifetime
        tracker.apply_debuff(1, &make_dot("rend", 5.0, 2.0, 20.0), 9);

        for _ in 0..12 {
            tracker.update(0.5);
        }

        let events = tracker.drain_events();
        let ticks = events
            .iter()
            .filter(|e| matches!(e, CombatEvent::DotTick { .. }))
            .count();
        assert_eq!(ticks, 3);
        assert!(events.iter().any(|e| matches!(
            e,
            CombatEvent::DebuffExpired { target: 1, effect_id } if effect_id == "rend"
        )));
        assert_eq!(tracker.debuff_count(1), 0);
    }

    #[test]
    fn test_dot_tick_payload() {
        let mut tracker = BuffTracker::new();
        tracker.apply_debuff(4, &make_dot("corruption", 6.0, 3.0, 18.0), 7);
        tracker.update(3.0);

        let events = tracker.drain_events();
        assert!(events.contains(&CombatEvent::DotTick {
            target: 4,
            damage: 18.0,
            damage_type: DamageType::Shadow,
            source: 7,
        }));
    }

    #[test]
    fn test_hot_ticks_heal() {
        let mut tracker = BuffTracker::new();
        tracker.apply_buff(2, &make_hot("renew", 6.0, 2.0, 15.0), 3);

        tracker.update(2.0);
        tracker.update(2.0);
        tracker.update(2.0);

        let heals: Vec<_> = tracker
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, CombatEvent::HotTick { .. }))
            .collect();
        assert_eq!(heals.len(), 3);
        assert_eq!(
            heals[0],
            CombatEvent::HotTick {
                target: 2,
                healing: 15.0,
                source: 3
            }
        );
    }

    #[test]
    fn test_cc_events_and_queries() {
        let mut tracker = BuffTracker::new();
        let stun = BuffDefinition::new("kidney_shot", "Kidney Shot", EffectType::Debuff, 2.0)
            .with_cc(CcCategory::Stun);
        tracker.apply_debuff(5, &stun, 8);

        assert!(tracker.is_stunned(5));
        assert!(!tracker.is_feared(5));
        assert!(tracker
            .drain_events()
            .contains(&CombatEvent::CcApplied {
                target: 5,
                category: CcCategory::Stun,
                duration: 2.0,
                source: 8,
            }));

        tracker.update(2.5);
        assert!(!tracker.is_stunned(5));
        assert!(tracker
            .drain_events()
            .contains(&CombatEvent::CcExpired {
                target: 5,
                category: CcCategory::Stun
            }));
    }

    #[test]
    fn test_strongest_slow_wins() {
        let mut tracker = BuffTracker::new();
        let crippling = BuffDefinition::new("crippling", "Crippling Poison", EffectType::Debuff, 12.0)
            .with_slow(0.7);
        let hamstring = BuffDefinition::new("hamstring", "Hamstring", EffectType::Debuff, 15.0)
            .with_slow(0.5);
        tracker.apply_debuff(1, &hamstring, 2);
        tracker.apply_debuff(1, &crippling, 3);

        assert!((tracker.slow_fraction(1) - 0.7).abs() < 0.01);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut tracker = BuffTracker::new();
        tracker.apply_buff(1, &make_buff("a", 30.0), 0);
        tracker.apply_buff(1, &make_buff("b", 30.0), 0);
        tracker.apply_debuff(1, &make_dot("dot", 30.0, 1.0, 5.0), 0);

        tracker.remove_buff(1, "a");
        assert!(!tracker.has_buff(1, "a"));
        assert_eq!(tracker.buff_count(1), 1);

        tracker.clear_all_effects(1);
        assert_eq!(tracker.buff_count(1), 0);
        assert_eq!(tracker.debuff_count(1), 0);
    }

    #[test]
    fn test_unknown_entity_queries_are_empty() {
        let tracker = BuffTracker::new();
        assert!(!tracker.has_buff(99, "anything"));
        assert_eq!(tracker.buff_count(99), 0);
        assert!(tracker.active_debuffs(99).is_empty());
        assert!((tracker.remaining_duration(99, "anything")).abs() < f64::EPSILON);
        assert!((tracker.slow_fraction(99)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_entities_are_independent() {
        let mut tracker = BuffTracker::new();
        tracker.apply_buff(1, &make_buff("shout", 10.0), 0);
        assert!(tracker.has_buff(1, "shout"));
        assert!(!tracker.has_buff(2, "shout"));
    }
}
