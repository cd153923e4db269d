//! Example Arena - A minimal headless bout demonstrating combat_core
//!
//! This driver shows:
//! - Registering entities with class resources (rogue vs warrior)
//! - Applying buffs, DoTs, and crowd control through diminishing returns
//! - Proc rolls with a seeded RNG so the log is reproducible
//! - Stealth, interrupt lockouts, and resource regen/decay over time
//! - Draining tracker events each step into a JSON combat log

use combat_core::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Fixed simulation step, seconds
const TICK: f64 = 0.5;

/// How long the bout runs, seconds
const BOUT_LENGTH: f64 = 20.0;

const ROGUE: EntityId = 1;
const WARRIOR: EntityId = 2;

/// All trackers the arena drives, advanced together once per step
struct Arena {
    buffs: BuffTracker,
    dr: DiminishingReturnsTracker,
    resources: ResourceTracker,
    procs: ProcEngine,
    stealth: StealthTracker,
    interrupts: InterruptTracker,
    registry: BuffRegistry,
    rng: ChaCha8Rng,
    time: f64,
}

impl Arena {
    fn new(seed: u64) -> Self {
        Arena {
            buffs: BuffTracker::new(),
            dr: DiminishingReturnsTracker::new(),
            resources: ResourceTracker::new(),
            procs: ProcEngine::new(),
            stealth: StealthTracker::new(),
            interrupts: InterruptTracker::new(),
            registry: BuffRegistry::with_defaults(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            time: 0.0,
        }
    }

    /// Register both combatants: class resources, full starting pools
    /// where the class expects them, and the warrior's on-hit proc.
    fn setup(&mut self) {
        self.resources.register_for_class(ROGUE, CharacterClass::Rogue);
        // Energy users start full: register + fill is the contract
        self.resources.add(ROGUE, 100.0);

        self.resources.register_for_class(WARRIOR, CharacterClass::Warrior);

        self.procs.register(ProcDefinition {
            id: "sword_specialization".to_string(),
            name: "Sword Specialization".to_string(),
            probability: 0.25,
            internal_cooldown: 3.0,
            trigger: ProcTrigger::MeleeHit,
            effect: ProcEffect::InstantDamage,
            effect_value: 45.0,
            effect_duration: 0.0,
            owner: WARRIOR,
        });
    }

    /// Apply a crowd-control debuff honoring diminishing returns. A fully
    /// diminished (immune) application is skipped entirely.
    fn apply_cc(&mut self, target: EntityId, source: EntityId, effect_id: &str) {
        let Some(def) = self.registry.get(effect_id).cloned() else {
            return;
        };
        let Some(category) = def.cc_category else {
            return;
        };

        let effective = self.dr.apply(target, category, def.duration);
        if effective <= 0.0 {
            return;
        }
        let mut shortened = def;
        shortened.duration = effective;
        self.buffs.apply_debuff(target, &shortened, source);
    }

    /// One melee swing from `attacker`, with all the side effects the
    /// resolver would normally wire up.
    fn melee_swing(&mut self, attacker: EntityId, defender: EntityId) {
        self.stealth.on_attack_performed(attacker);
        self.stealth.on_damage_received(defender);
        self.resources.generate_from_damage_dealt(attacker, 30.0);
        self.resources.generate_from_damage_taken(defender, 30.0);
        self.procs
            .check_procs_with_rng(attacker, ProcTrigger::MeleeHit, &mut self.rng);
    }

    /// Scripted actions for the current step
    fn act(&mut self) {
        let t = self.time;

        if at(t, 0.5) {
            self.stealth.try_enter(ROGUE);
        }
        if at(t, 2.0) {
            // Opener from stealth: costs energy, builds combo points
            if self.resources.try_spend(ROGUE, 60.0) {
                self.melee_swing(ROGUE, WARRIOR);
                self.resources.add_combo_point(ROGUE);
                self.resources.add_combo_point(ROGUE);
                if let Some(rend) = self.registry.get("rend").cloned() {
                    self.buffs.apply_debuff(WARRIOR, &rend, ROGUE);
                }
            }
        }
        if at(t, 3.0) || at(t, 6.0) || at(t, 9.0) || at(t, 12.0) {
            // Repeated stuns walk down the DR ladder until immunity
            self.apply_cc(WARRIOR, ROGUE, "kidney_shot");
        }
        if at(t, 4.0) {
            self.melee_swing(WARRIOR, ROGUE);
        }
        if at(t, 5.0) {
            // The warrior kicks the rogue's (pretend) cast
            self.interrupts.try_interrupt(WARRIOR, ROGUE);
        }
        if at(t, 7.0) {
            // Finisher: consume combo points for a scaled strike
            let points = self.resources.consume_all_combo_points(ROGUE);
            let multiplier = self.resources.combo_point_damage_multiplier(points);
            log_line(t, &format!("finisher with {points} combo points, x{multiplier:.1} damage"));
            self.melee_swing(ROGUE, WARRIOR);
        }
        if at(t, 10.0) {
            // Cooldown has elapsed since the opener broke stealth
            self.stealth.try_enter(ROGUE);
        }
        if at(t, 14.0) {
            if let Some(renew) = self.registry.get("renew").cloned() {
                self.buffs.apply_buff(WARRIOR, &renew, WARRIOR);
            }
        }
    }

    /// Advance every tracker one step and drain their notifications
    fn step(&mut self) -> Vec<CombatEvent> {
        let in_combat = self.time < 15.0;

        self.buffs.update(TICK);
        self.dr.update(TICK);
        self.procs.update(TICK);
        self.stealth.update(TICK);
        self.interrupts.update(TICK);
        self.resources.apply_decay(ROGUE, TICK, in_combat);
        self.resources.apply_decay(WARRIOR, TICK, in_combat);

        let mut events = Vec::new();
        events.extend(self.buffs.drain_events());
        events.extend(self.dr.drain_events());
        events.extend(self.resources.drain_events());
        events.extend(self.procs.drain_events());
        events.extend(self.stealth.drain_events());
        events.extend(self.interrupts.drain_events());
        events
    }
}

/// Whether the current step lands on scripted time `when`
fn at(now: f64, when: f64) -> bool {
    now <= when && when < now + TICK
}

fn log_line(time: f64, message: &str) {
    println!("[{time:5.1}s] {message}");
}

fn main() {
    let mut arena = Arena::new(42);
    arena.setup();

    println!("=== arena bout: rogue vs warrior ===");
    while arena.time < BOUT_LENGTH {
        arena.act();
        for event in arena.step() {
            match serde_json::to_string(&event) {
                Ok(json) => log_line(arena.time, &json),
                Err(err) => eprintln!("failed to encode event: {err}"),
            }
        }
        arena.time += TICK;
    }

    println!("=== bout over ===");
    println!(
        "warrior rage: {:.1}/{:.1}, lockouts active: {}, rogue stealthed: {}",
        arena.resources.resource(WARRIOR),
        arena.resources.max_resource(WARRIOR),
        arena.interrupts.active_lockout_count(),
        arena.stealth.is_in_stealth(ROGUE),
    );
}
