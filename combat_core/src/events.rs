//! Tracker event notifications
//!
//! Every tracker records the notifications it would have raised while
//! mutating state. The host drains them once per simulation step and fans
//! them out to whoever cares (combat log, floating text, UI). Delivery is
//! same-tick and in emission order.

use crate::types::{CcCategory, DamageType, EntityId, StealthBreakReason};
use serde::Serialize;

/// A notification emitted by one of the trackers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CombatEvent {
    BuffApplied {
        target: EntityId,
        effect_id: String,
    },
    BuffExpired {
        target: EntityId,
        effect_id: String,
    },
    DebuffApplied {
        target: EntityId,
        effect_id: String,
    },
    DebuffExpired {
        target: EntityId,
        effect_id: String,
    },
    /// A damage-over-time instance ticked
    DotTick {
        target: EntityId,
        damage: f64,
        damage_type: DamageType,
        source: EntityId,
    },
    /// A healing-over-time instance ticked
    HotTick {
        target: EntityId,
        healing: f64,
        source: EntityId,
    },
    CcApplied {
        target: EntityId,
        category: CcCategory,
        duration: f64,
        source: EntityId,
    },
    CcExpired {
        target: EntityId,
        category: CcCategory,
    },
    /// Diminishing returns were consulted for a CC application
    DrApplied {
        target: EntityId,
        category: CcCategory,
        level: u8,
        effective_duration: f64,
    },
    ImmunityStarted {
        target: EntityId,
        category: CcCategory,
    },
    ImmunityExpired {
        target: EntityId,
        category: CcCategory,
    },
    DrReset {
        target: EntityId,
        category: CcCategory,
    },
    ResourceChanged {
        entity: EntityId,
        current: f64,
        max: f64,
    },
    ComboPointsChanged {
        entity: EntityId,
        current: u8,
        max: u8,
    },
    ProcTriggered {
        owner: EntityId,
        proc_id: String,
    },
    StealthEntered {
        entity: EntityId,
    },
    StealthBroken {
        entity: EntityId,
        reason: StealthBreakReason,
    },
    CastInterrupted {
        interrupter: EntityId,
        target: EntityId,
    },
    LockoutApplied {
        target: EntityId,
        duration: f64,
    },
    LockoutExpired {
        target: EntityId,
    },
}

/// Pending notifications for one tracker.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<CombatEvent>,
}

impl EventQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        EventQueue { events: Vec::new() }
    }

    /// Record a notification
    pub fn push(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    /// Take all pending notifications, leaving the queue empty
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of pending notifications
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether anything is pending
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Peek at pending notifications without draining them
    pub fn pending(&self) -> &[CombatEvent] {
        &self.events
    }
}
