//! combat_core - Combat effect and resource tracking engine
//!
//! This library provides the entity-keyed state trackers behind a
//! real-time combat simulation:
//! - BuffTracker: timed buffs/debuffs including periodic DoT/HoT effects
//! - DiminishingReturnsTracker: CC duration scaling and immunity
//! - ResourceTracker: class resources, runes, and combo points
//! - ProcEngine: probability-gated effect triggers with internal cooldowns
//! - StealthTracker / InterruptTracker: stealth and cast-lockout state
//!
//! Every tracker is a plain struct advanced by an external game loop
//! calling `update(dt)` once per simulation step; the combat resolver
//! mutates and queries through small total operations, and observers
//! drain [`events::CombatEvent`] notifications each tick.

pub mod config;
pub mod dr;
pub mod duration;
pub mod effect;
pub mod events;
pub mod interrupt;
pub mod prelude;
pub mod proc;
pub mod resource;
pub mod stealth;
pub mod types;

// Re-export core types for convenience
pub use config::{BuffRegistry, ConfigError, EngineTuning};
pub use dr::DiminishingReturnsTracker;
pub use effect::{BuffDefinition, BuffInstance, BuffTracker};
pub use events::{CombatEvent, EventQueue};
pub use interrupt::InterruptTracker;
pub use proc::{ProcDefinition, ProcEffect, ProcEngine, ProcTrigger};
pub use resource::{CharacterClass, ResourceTracker, ResourceType};
pub use stealth::StealthTracker;
pub use types::{CcCategory, DamageType, EffectType, EntityId, StealthBreakReason};
