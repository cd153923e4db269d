//! Probability-gated effect triggers ("procs")
//!
//! Procs register per owning entity and roll on matching gameplay
//! triggers. A proc that fires starts its internal cooldown; the cooldown
//! gates even 100%-probability procs.

use crate::events::{CombatEvent, EventQueue};
use crate::types::EntityId;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Gameplay moments a proc can roll on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcTrigger {
    DamageDealt,
    DamageTaken,
    HealingDone,
    HealingReceived,
    CriticalHit,
    AbilityUse,
    SpellCast,
    MeleeHit,
    Dodge,
    Parry,
    Block,
}

/// What a fired proc does (interpreted by the combat resolver)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcEffect {
    InstantDamage,
    InstantHealing,
    DamageOverTime,
    HealingOverTime,
    BuffStat,
    DebuffStat,
    ResetCooldown,
    RestoreMana,
    RestoreResource,
}

/// Authored description of one proc.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcDefinition {
    /// Unique id; re-registering the same id replaces the entry
    pub id: String,
    /// Display name
    pub name: String,
    /// Chance to fire per evaluation, in `[0, 1]`
    pub probability: f64,
    /// Seconds before this proc may fire again
    #[serde(default)]
    pub internal_cooldown: f64,
    /// Which gameplay moment this proc rolls on
    pub trigger: ProcTrigger,
    /// What happens when it fires
    pub effect: ProcEffect,
    /// Damage/healing/buff magnitude
    #[serde(default)]
    pub effect_value: f64,
    /// Duration for timed effects
    #[serde(default)]
    pub effect_duration: f64,
    /// Entity this proc belongs to
    pub owner: EntityId,
}

/// Evaluates registered procs against gameplay triggers.
#[derive(Debug, Default)]
pub struct ProcEngine {
    procs: HashMap<EntityId, Vec<ProcDefinition>>,
    // (owner, proc id) -> absolute time the internal cooldown ends
    cooldown_until: HashMap<EntityId, HashMap<String, f64>>,
    now: f64,
    events: EventQueue,
}

impl ProcEngine {
    /// Create an empty engine
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a proc for its owner. A proc with the same id replaces
    /// the existing entry; an empty id is ignored.
    pub fn register(&mut self, proc: ProcDefinition) {
        if proc.id.is_empty() {
            return;
        }
        let list = self.procs.entry(proc.owner).or_default();
        list.retain(|p| p.id != proc.id);
        list.push(proc);
    }

    /// Remove a proc by id from every owner
    pub fn unregister(&mut self, proc_id: &str) {
        for list in self.procs.values_mut() {
            list.retain(|p| p.id != proc_id);
        }
    }

    /// Advance the internal-cooldown clock.
    pub fn update(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        self.now += dt;
        let now = self.now;
        self.cooldown_until.retain(|_, cooldowns| {
            cooldowns.retain(|_, &mut until| until > now);
            !cooldowns.is_empty()
        });
    }

    /// Whether a proc is still inside its internal cooldown
    pub fn is_on_cooldown(&self, owner: EntityId, proc_id: &str) -> bool {
        self.cooldown_until
            .get(&owner)
            .and_then(|cooldowns| cooldowns.get(proc_id))
            .is_some_and(|&until| self.now < until)
    }

    /// Roll one proc. Returns whether it fired.
    ///
    /// A probability of 0 never fires, 1 always fires, but the internal
    /// cooldown gates both; a successful roll stamps the cooldown.
    pub fn try_trigger(&mut self, proc: &ProcDefinition) -> bool {
        let mut rng = rand::thread_rng();
        self.try_trigger_with_rng(proc, &mut rng)
    }

    /// Roll one proc with a caller-supplied RNG (deterministic testing).
    pub fn try_trigger_with_rng(&mut self, proc: &ProcDefinition, rng: &mut impl Rng) -> bool {
        if self.is_on_cooldown(proc.owner, &proc.id) {
            return false;
        }

        let fired = if proc.probability <= 0.0 {
            false
        } else if proc.probability >= 1.0 {
            true
        } else {
            rng.gen::<f64>() < proc.probability
        };

        if fired && proc.internal_cooldown > 0.0 {
            self.cooldown_until
                .entry(proc.owner)
                .or_default()
                .insert(proc.id.clone(), self.now + proc.internal_cooldown);
        }
        fired
    }

    /// Evaluate every proc of `owner` whose trigger matches, firing each
    /// independently. Non-matching procs are not rolled at all.
    pub fn check_procs(&mut self, owner: EntityId, trigger: ProcTrigger) {
        let mut rng = rand::thread_rng();
        self.check_procs_with_rng(owner, trigger, &mut rng);
    }

    /// [`check_procs`] with a caller-supplied RNG.
    ///
    /// [`check_procs`]: ProcEngine::check_procs
    pub fn check_procs_with_rng(
        &mut self,
        owner: EntityId,
        trigger: ProcTrigger,
        rng: &mut impl Rng,
    ) {
        let Some(list) = self.procs.get(&owner) else {
            return;
        };
        let matching: Vec<ProcDefinition> = list
            .iter()
            .filter(|p| p.trigger == trigger)
            .cloned()
            .collect();

        for proc in matching {
            if self.try_trigger_with_rng(&proc, rng) {
                self.events.push(CombatEvent::ProcTriggered {
                    owner,
                    proc_id: proc.id,
                });
            }
        }
    }

    /// Procs registered to an entity
    pub fn procs_for(&self, owner: EntityId) -> &[ProcDefinition] {
        self.procs.get(&owner).map_or(&[], Vec::as_slice)
    }

    /// Number of procs registered to an entity
    pub fn proc_count(&self, owner: EntityId) -> usize {
        self.procs.get(&owner).map_or(0, Vec::len)
    }

    /// Drop all procs and cooldown state for one entity
    pub fn clear_entity(&mut self, owner: EntityId) {
        self.procs.remove(&owner);
        self.cooldown_until.remove(&owner);
    }

    /// Drop everything
    pub fn clear_all(&mut self) {
        self.procs.clear();
        self.cooldown_until.clear();
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.events.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn make_proc(id: &str, owner: EntityId, probability: f64, icd: f64) -> ProcDefinition {
        ProcDefinition {
            id: id.to_string(),
            name: id.to_string(),
            probability,
            internal_cooldown: icd,
            trigger: ProcTrigger::DamageDealt,
            effect: ProcEffect::InstantDamage,
            effect_value: 100.0,
            effect_duration: 0.0,
            owner,
        }
    }

    #[test]
    fn test_zero_probability_never_fires() {
        let mut engine = ProcEngine::new();
        let proc = make_proc("never", 1, 0.0, 0.0);
        for _ in 0..100 {
            assert!(!engine.try_trigger(&proc));
        }
    }

    #[test]
    fn test_full_probability_always_fires() {
        let mut engine = ProcEngine::new();
        let proc = make_proc("always", 1, 1.0, 0.0);
        for _ in 0..100 {
            assert!(engine.try_trigger(&proc));
        }
    }

    #[test]
    fn test_trigger_rate_approximates_probability() {
        let mut engine = ProcEngine::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let proc = make_proc("maybe", 1, 0.3, 0.0);

        let trials = 1000;
        let mut fired = 0;
        for _ in 0..trials {
            if engine.try_trigger_with_rng(&proc, &mut rng) {
                fired += 1;
            }
        }

        let rate = fired as f64 / trials as f64;
        assert!((rate - 0.3).abs() < 0.1, "rate {rate} outside 0.3 ± 0.1");
    }

    #[test]
    fn test_internal_cooldown_gates_guaranteed_proc() {
        let mut engine = ProcEngine::new();
        let proc = make_proc("icd", 1, 1.0, 5.0);

        assert!(engine.try_trigger(&proc));
        assert!(engine.is_on_cooldown(1, "icd"));
        assert!(!engine.try_trigger(&proc));

        engine.update(4.0);
        assert!(!engine.try_trigger(&proc));

        engine.update(1.0);
        assert!(!engine.is_on_cooldown(1, "icd"));
        assert!(engine.try_trigger(&proc));
    }

    #[test]
    fn test_register_replaces_duplicate_id() {
        let mut engine = ProcEngine::new();
        engine.register(make_proc("same", 1, 0.3, 0.0));
        let mut second = make_proc("same", 1, 0.7, 0.0);
        second.name = "Second".to_string();
        engine.register(second);

        assert_eq!(engine.proc_count(1), 1);
        let stored = &engine.procs_for(1)[0];
        assert_eq!(stored.name, "Second");
        assert!((stored.probability - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_check_procs_fires_event_on_match() {
        let mut engine = ProcEngine::new();
        engine.register(make_proc("hit_proc", 1, 1.0, 0.0));

        engine.check_procs(1, ProcTrigger::DamageDealt);
        assert!(engine.drain_events().contains(&CombatEvent::ProcTriggered {
            owner: 1,
            proc_id: "hit_proc".to_string(),
        }));
    }

    #[test]
    fn test_check_procs_ignores_other_triggers() {
        let mut engine = ProcEngine::new();
        engine.register(make_proc("hit_proc", 1, 1.0, 0.0));

        engine.check_procs(1, ProcTrigger::HealingDone);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_procs_evaluate_independently() {
        let mut engine = ProcEngine::new();
        engine.register(make_proc("a", 1, 1.0, 0.0));
        engine.register(make_proc("b", 1, 1.0, 0.0));
        engine.register(make_proc("c", 1, 0.0, 0.0));

        engine.check_procs(1, ProcTrigger::DamageDealt);
        let events = engine.drain_events();
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_unregister_and_clear() {
        let mut engine = ProcEngine::new();
        engine.register(make_proc("gone", 1, 0.5, 0.0));
        engine.register(make_proc("stays", 1, 0.5, 0.0));

        engine.unregister("gone");
        assert_eq!(engine.proc_count(1), 1);

        engine.clear_all();
        assert_eq!(engine.proc_count(1), 0);
        assert!(engine.procs_for(1).is_empty());
    }

    #[test]
    fn test_empty_id_is_ignored() {
        let mut engine = ProcEngine::new();
        engine.register(make_proc("", 1, 0.5, 0.0));
        assert_eq!(engine.proc_count(1), 0);
    }

    #[test]
    fn test_proc_definition_toml() {
        let toml = r#"
id = "flame_burst"
name = "Flame Burst"
probability = 0.15
internal_cooldown = 8.0
trigger = "spell_cast"
effect = "instant_damage"
effect_value = 120.0
owner = 3
"#;
        let proc: ProcDefinition = toml::from_str(toml).unwrap();
        assert_eq!(proc.trigger, ProcTrigger::SpellCast);
        assert_eq!(proc.effect, ProcEffect::InstantDamage);
        assert!((proc.effect_duration).abs() < f64::EPSILON);
    }
}
