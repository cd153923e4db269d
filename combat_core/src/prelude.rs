//! Prelude module for convenient imports
//!
//! ```rust
//! use combat_core::prelude::*;
//! ```

// Core types
pub use crate::types::{CcCategory, DamageType, EffectType, EntityId, StealthBreakReason};

// Trackers
pub use crate::dr::DiminishingReturnsTracker;
pub use crate::effect::{BuffDefinition, BuffInstance, BuffTracker};
pub use crate::interrupt::InterruptTracker;
pub use crate::proc::{ProcDefinition, ProcEffect, ProcEngine, ProcTrigger};
pub use crate::resource::{CharacterClass, ResourceTracker, ResourceType};
pub use crate::stealth::StealthTracker;

// Events
pub use crate::events::{CombatEvent, EventQueue};

// Config
pub use crate::config::{BuffRegistry, EngineTuning};
