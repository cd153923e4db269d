//! Core types shared across the trackers

use serde::{Deserialize, Serialize};

/// Opaque handle identifying an actor (player or AI-controlled).
///
/// Trackers key their per-entity state on this id. They never allocate or
/// destroy entities; they only start and stop tracking state for an id.
pub type EntityId = u64;

/// Damage school carried by damaging effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageType {
    Physical,
    Fire,
    Frost,
    Holy,
    Shadow,
    Nature,
    Arcane,
}

/// Kind of timed effect tracked by the buff/debuff tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    Buff,
    Debuff,
    /// Damage over time (periodic, hostile)
    Dot,
    /// Healing over time (periodic, friendly)
    Hot,
}

impl EffectType {
    /// Whether effects of this kind live in the buff list (true) or the
    /// debuff list (false).
    pub fn is_beneficial(self) -> bool {
        matches!(self, EffectType::Buff | EffectType::Hot)
    }
}

/// Crowd-control categories subject to diminishing returns.
///
/// Each category diminishes independently; a debuff with no category is
/// not crowd control at all (`Option<CcCategory>` on the definition).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CcCategory {
    Slow,
    Stun,
    Fear,
    Root,
}

impl CcCategory {
    /// Get all crowd-control categories
    pub fn all() -> &'static [CcCategory] {
        &[
            CcCategory::Slow,
            CcCategory::Stun,
            CcCategory::Fear,
            CcCategory::Root,
        ]
    }
}

/// Why an entity left stealth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StealthBreakReason {
    DamageReceived,
    Attack,
    Manual,
}
