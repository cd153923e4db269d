//! End-to-end scenarios driving several trackers through a simulated loop

use combat_core::config::ResourceTuning;
use combat_core::prelude::*;

const STEP: f64 = 0.1;

/// Advance a set of trackers together, the way a host loop would
fn run(
    seconds: f64,
    buffs: &mut BuffTracker,
    dr: &mut DiminishingReturnsTracker,
    stealth: &mut StealthTracker,
    interrupts: &mut InterruptTracker,
) -> Vec<CombatEvent> {
    let steps = (seconds / STEP).round() as usize;
    let mut events = Vec::new();
    for _ in 0..steps {
        buffs.update(STEP);
        dr.update(STEP);
        stealth.update(STEP);
        interrupts.update(STEP);
        events.extend(buffs.drain_events());
        events.extend(dr.drain_events());
        events.extend(stealth.drain_events());
        events.extend(interrupts.drain_events());
    }
    events
}

#[test]
fn mana_pool_scenario() {
    // The canonical resource walk-through: register at zero, fill, spend
    // half, then regenerate for one second at 10 mana per second.
    let tuning = ResourceTuning {
        mana_regen_out_of_combat: 10.0,
        ..ResourceTuning::default()
    };
    let mut resources = ResourceTracker::with_tuning(tuning);

    resources.register(7, ResourceType::Mana, 100.0);
    assert!((resources.resource(7)).abs() < f64::EPSILON);

    resources.add(7, 100.0);
    assert!((resources.resource(7) - 100.0).abs() < 0.01);

    assert!(resources.try_spend(7, 50.0));
    assert!((resources.resource(7) - 50.0).abs() < 0.01);

    resources.apply_decay(7, 1.0, false);
    assert!((resources.resource(7) - 60.0).abs() < 0.01);
}

#[test]
fn stealth_opener_with_cc_and_lockout() {
    let mut buffs = BuffTracker::new();
    let mut dr = DiminishingReturnsTracker::new();
    let mut stealth = StealthTracker::new();
    let mut interrupts = InterruptTracker::new();
    let registry = BuffRegistry::with_defaults();

    let rogue: EntityId = 1;
    let target: EntityId = 2;

    // Open from stealth: the attack breaks it and starts the cooldown
    assert!(stealth.try_enter(rogue));
    stealth.on_attack_performed(rogue);
    assert!(!stealth.is_in_stealth(rogue));
    assert!(!stealth.try_enter(rogue));

    // Stun through diminishing returns, full duration on first application
    let stun = registry.get("kidney_shot").unwrap().clone();
    let effective = dr.apply(target, CcCategory::Stun, stun.duration);
    assert!((effective - stun.duration).abs() < 0.001);

    let mut shortened = stun;
    shortened.duration = effective;
    buffs.apply_debuff(target, &shortened, rogue);
    assert!(buffs.is_stunned(target));

    // Lock the target's school while it is stunned
    interrupts.try_interrupt(rogue, target);
    assert!(!interrupts.can_cast(target));

    // After 2.1 simulated seconds the stealth cooldown has elapsed but
    // the 6s stun and 4s lockout are still running
    run(2.1, &mut buffs, &mut dr, &mut stealth, &mut interrupts);
    assert!(stealth.try_enter(rogue));
    assert!(buffs.is_stunned(target));
    assert!(interrupts.is_locked_out(target));

    // After another 4 seconds (6.1 total) everything has run out
    let events = run(4.1, &mut buffs, &mut dr, &mut stealth, &mut interrupts);
    assert!(!buffs.is_stunned(target));
    assert!(interrupts.can_cast(target));
    assert!(events.contains(&CombatEvent::CcExpired {
        target,
        category: CcCategory::Stun,
    }));
    assert!(events.contains(&CombatEvent::LockoutExpired { target }));
}

#[test]
fn dr_ladder_decays_while_dot_rolls() {
    let mut buffs = BuffTracker::new();
    let mut dr = DiminishingReturnsTracker::new();
    let mut stealth = StealthTracker::new();
    let mut interrupts = InterruptTracker::new();
    let registry = BuffRegistry::with_defaults();

    let target: EntityId = 5;

    // An 18s corruption outlives the 15s DR reset window
    let corruption = registry.get("corruption").unwrap().clone();
    buffs.apply_debuff(target, &corruption, 9);

    let first = dr.apply(target, CcCategory::Fear, 8.0);
    assert!((first - 8.0).abs() < 0.001);
    let second = dr.apply(target, CcCategory::Fear, 8.0);
    assert!((second - 4.0).abs() < 0.001);

    let events = run(15.5, &mut buffs, &mut dr, &mut stealth, &mut interrupts);

    // The fear ladder reset from inactivity; the DoT kept ticking
    assert_eq!(dr.dr_level(target, CcCategory::Fear), 0);
    assert!(events.contains(&CombatEvent::DrReset {
        target,
        category: CcCategory::Fear,
    }));
    let ticks = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::DotTick { .. }))
        .count();
    // 15.5s into an 18s effect with 3s ticks: boundaries 3..15 have passed
    assert_eq!(ticks, 5);
    assert!(buffs.has_debuff(target, "corruption"));

    // Run the effect out; lifetime ticks must reach ceil(18 / 3) = 6
    let tail = run(3.0, &mut buffs, &mut dr, &mut stealth, &mut interrupts);
    let tail_ticks = tail
        .iter()
        .filter(|e| matches!(e, CombatEvent::DotTick { .. }))
        .count();
    assert_eq!(ticks + tail_ticks, 6);
    assert!(!buffs.has_debuff(target, "corruption"));
}
