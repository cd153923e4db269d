//! Diminishing returns on crowd control
//!
//! Repeated CC of the same category inside a 15 second window shortens
//! each application (100% → 50% → 25%), and the third lands the target in
//! a 15 second immunity. Categories are fully independent: stunning a
//! target never touches its fear ladder.

use crate::events::{CombatEvent, EventQueue};
use crate::types::{CcCategory, EntityId};
use std::collections::HashMap;

/// Seconds without an application before a category's ladder resets.
pub const DR_RESET_TIME: f64 = 15.0;

/// Seconds of immunity once a category reaches the top of the ladder.
pub const DR_IMMUNITY_DURATION: f64 = 15.0;

/// Duration multiplier per DR level; level 3 is immune.
const DR_MULTIPLIERS: [f64; 4] = [1.0, 0.5, 0.25, 0.0];

#[derive(Debug, Clone)]
struct DrState {
    applications: u32,
    since_last: f64,
    immune: bool,
    immunity_remaining: f64,
}

impl DrState {
    fn new() -> Self {
        DrState {
            applications: 0,
            since_last: 0.0,
            immune: false,
            immunity_remaining: 0.0,
        }
    }

    fn level(&self) -> u8 {
        if self.immune {
            return 3;
        }
        self.applications.min(3) as u8
    }

    fn reset(&mut self) {
        self.applications = 0;
        self.since_last = 0.0;
        self.immune = false;
        self.immunity_remaining = 0.0;
    }

    fn is_idle(&self) -> bool {
        self.applications == 0 && !self.immune
    }
}

/// Per-entity, per-category diminishing-returns ledger.
#[derive(Debug, Default)]
pub struct DiminishingReturnsTracker {
    states: HashMap<EntityId, HashMap<CcCategory, DrState>>,
    events: EventQueue,
}

impl DiminishingReturnsTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a CC application and return the duration it should actually
    /// run for: `base_duration` times the current level's multiplier, 0
    /// while immune. Non-positive base durations pass through untouched.
    pub fn apply(
        &mut self,
        target: EntityId,
        category: CcCategory,
        base_duration: f64,
    ) -> f64 {
        if base_duration <= 0.0 {
            return base_duration;
        }

        let state = self
            .states
            .entry(target)
            .or_default()
            .entry(category)
            .or_insert_with(DrState::new);

        if state.immune {
            self.events.push(CombatEvent::DrApplied {
                target,
                category,
                level: 3,
                effective_duration: 0.0,
            });
            return 0.0;
        }

        let level = state.applications.min(3) as usize;
        let effective_duration = base_duration * DR_MULTIPLIERS[level];
        state.applications += 1;
        state.since_last = 0.0;

        self.events.push(CombatEvent::DrApplied {
            target,
            category,
            level: level as u8,
            effective_duration,
        });

        if state.applications >= 3 {
            state.immune = true;
            state.immunity_remaining = DR_IMMUNITY_DURATION;
            self.events.push(CombatEvent::ImmunityStarted { target, category });
        }

        effective_duration
    }

    /// Whether `target` is currently immune to `category`
    pub fn is_immune(&self, target: EntityId, category: CcCategory) -> bool {
        self.state(target, category).is_some_and(|s| s.immune)
    }

    /// Current DR level for `(target, category)`: 0 = full duration,
    /// 1 = half, 2 = quarter, 3 = immune.
    pub fn dr_level(&self, target: EntityId, category: CcCategory) -> u8 {
        self.state(target, category).map_or(0, DrState::level)
    }

    /// Duration multiplier the next application of `category` would get
    pub fn duration_multiplier(&self, target: EntityId, category: CcCategory) -> f64 {
        DR_MULTIPLIERS[self.dr_level(target, category) as usize]
    }

    /// Seconds of immunity left; 0 when not immune
    pub fn immunity_remaining(&self, target: EntityId, category: CcCategory) -> f64 {
        self.state(target, category)
            .filter(|s| s.immune)
            .map_or(0.0, |s| s.immunity_remaining)
    }

    /// Forget all DR state for an entity (death, zone transition)
    pub fn clear(&mut self, target: EntityId) {
        self.states.remove(&target);
    }

    /// Advance the reset and immunity windows.
    pub fn update(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }

        for (&target, categories) in self.states.iter_mut() {
            for (&category, state) in categories.iter_mut() {
                if state.immune {
                    state.immunity_remaining -= dt;
                    if state.immunity_remaining <= 0.0 {
                        state.reset();
                        self.events
                            .push(CombatEvent::ImmunityExpired { target, category });
                    }
                } else {
                    state.since_last += dt;
                    if state.applications > 0 && state.since_last >= DR_RESET_TIME {
                        state.reset();
                        self.events.push(CombatEvent::DrReset { target, category });
                    }
                }
            }
        }

        // Prune entities whose ladders are all idle
        self.states.retain(|_, categories| {
            categories.retain(|_, state| !state.is_idle());
            !categories.is_empty()
        });
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.events.drain()
    }

    fn state(&self, target: EntityId, category: CcCategory) -> Option<&DrState> {
        self.states.get(&target)?.get(&category)
    }
}
