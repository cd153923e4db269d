//! Cast interrupt lockouts
//!
//! An interrupted entity is banned from casting for a fixed window.
//! Lockouts are absolute expiry times against the tracker clock; applying
//! a new lockout overwrites whatever was there.

use crate::events::{CombatEvent, EventQueue};
use crate::types::EntityId;
use std::collections::HashMap;

/// Seconds of cast lockout a successful interrupt applies.
pub const DEFAULT_LOCKOUT_DURATION: f64 = 4.0;

/// Tracks cast lockouts per entity.
#[derive(Debug, Default)]
pub struct InterruptTracker {
    // target -> absolute time the lockout ends
    lockouts: HashMap<EntityId, f64>,
    now: f64,
    events: EventQueue,
}

impl InterruptTracker {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Interrupt `target`'s cast, applying the default lockout.
    ///
    /// Always succeeds for a valid target; whether the target was actually
    /// casting is the combat resolver's concern.
    pub fn try_interrupt(&mut self, interrupter: EntityId, target: EntityId) -> bool {
        self.events.push(CombatEvent::CastInterrupted {
            interrupter,
            target,
        });
        self.apply_lockout(target, DEFAULT_LOCKOUT_DURATION);
        true
    }

    /// Lock `target` out of casting for `duration` seconds from now.
    /// Non-positive durations are no-ops; an existing lockout is
    /// overwritten with the new expiry, shorter or longer.
    pub fn apply_lockout(&mut self, target: EntityId, duration: f64) {
        if duration <= 0.0 {
            return;
        }
        self.lockouts.insert(target, self.now + duration);
        self.events.push(CombatEvent::LockoutApplied { target, duration });
    }

    /// Whether `target` is currently locked out
    pub fn is_locked_out(&self, target: EntityId) -> bool {
        self.lockouts
            .get(&target)
            .is_some_and(|&until| self.now < until)
    }

    /// Whether `target` may cast
    pub fn can_cast(&self, target: EntityId) -> bool {
        !self.is_locked_out(target)
    }

    /// Seconds of lockout left; 0 when not locked
    pub fn lockout_remaining(&self, target: EntityId) -> f64 {
        self.lockouts
            .get(&target)
            .map_or(0.0, |&until| (until - self.now).max(0.0))
    }

    /// Lift a lockout early (e.g. on dispel or encounter reset)
    pub fn clear(&mut self, target: EntityId) {
        if self.lockouts.remove(&target).is_some() {
            self.events.push(CombatEvent::LockoutExpired { target });
        }
    }

    /// Lift every lockout
    pub fn clear_all(&mut self) {
        let targets: Vec<EntityId> = self.lockouts.drain().map(|(target, _)| target).collect();
        for target in targets {
            self.events.push(CombatEvent::LockoutExpired { target });
        }
    }

    /// Number of lockouts still running
    pub fn active_lockout_count(&self) -> usize {
        self.lockouts
            .values()
            .filter(|&&until| self.now < until)
            .count()
    }

    /// Advance the clock, expiring lockouts that ran out this step.
    pub fn update(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        self.now += dt;

        let now = self.now;
        let expired: Vec<EntityId> = self
            .lockouts
            .iter()
            .filter(|&(_, &until)| until <= now)
            .map(|(&target, _)| target)
            .collect();
        for target in expired {
            self.lockouts.remove(&target);
            self.events.push(CombatEvent::LockoutExpired { target });
        }
    }

    /// Take all pending notifications
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        self.events.drain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupt_applies_default_lockout() {
        let mut interrupts = InterruptTracker::new();
        assert!(interrupts.try_interrupt(1, 2));

        assert!(interrupts.is_locked_out(2));
        assert!(!interrupts.can_cast(2));
        assert!(
            (interrupts.lockout_remaining(2) - DEFAULT_LOCKOUT_DURATION).abs() < 0.001
        );
        // The interrupter itself is unaffected
        assert!(interrupts.can_cast(1));
    }

    #[test]
    fn test_interrupt_event_order() {
        let mut interrupts = InterruptTracker::new();
        interrupts.try_interrupt(1, 2);

        let events = interrupts.drain_events();
        assert_eq!(
            events[0],
            CombatEvent::CastInterrupted {
                interrupter: 1,
                target: 2
            }
        );
        assert_eq!(
            events[1],
            CombatEvent::LockoutApplied {
                target: 2,
                duration: DEFAULT_LOCKOUT_DURATION
            }
        );
    }

    #[test]
    fn test_lockout_expires_over_time() {
        let mut interrupts = InterruptTracker::new();
        interrupts.try_interrupt(1, 2);

        interrupts.update(3.9);
        assert!(interrupts.is_locked_out(2));
        assert!((interrupts.lockout_remaining(2) - 0.1).abs() < 0.001);

        interrupts.update(0.1);
        assert!(interrupts.can_cast(2));
        assert!((interrupts.lockout_remaining(2)).abs() < f64::EPSILON);
        assert!(interrupts
            .drain_events()
            .contains(&CombatEvent::LockoutExpired { target: 2 }));
    }

    #[test]
    fn test_non_positive_duration_is_noop() {
        let mut interrupts = InterruptTracker::new();
        interrupts.apply_lockout(2, 0.0);
        interrupts.apply_lockout(2, -3.0);

        assert!(interrupts.can_cast(2));
        assert!(interrupts.drain_events().is_empty());
    }

    #[test]
    fn test_new_lockout_overwrites_old() {
        let mut interrupts = InterruptTracker::new();
        interrupts.apply_lockout(2, 10.0);
        interrupts.apply_lockout(2, 1.0);
        assert!((interrupts.lockout_remaining(2) - 1.0).abs() < 0.001);

        interrupts.apply_lockout(2, 6.0);
        assert!((interrupts.lockout_remaining(2) - 6.0).abs() < 0.001);
    }

    #[test]
    fn test_clear_and_count() {
        let mut interrupts = InterruptTracker::new();
        interrupts.try_interrupt(1, 2);
        interrupts.try_interrupt(1, 3);
        assert_eq!(interrupts.active_lockout_count(), 2);

        interrupts.clear(2);
        assert!(interrupts.can_cast(2));
        assert_eq!(interrupts.active_lockout_count(), 1);

        interrupts.clear_all();
        assert_eq!(interrupts.active_lockout_count(), 0);
        assert!(interrupts.can_cast(3));
    }

    #[test]
    fn test_unknown_target_queries() {
        let interrupts = InterruptTracker::new();
        assert!(!interrupts.is_locked_out(99));
        assert!(interrupts.can_cast(99));
        assert!((interrupts.lockout_remaining(99)).abs() < f64::EPSILON);
    }
}
