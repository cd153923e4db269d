//! Authored buff/debuff definitions

use crate::duration::expected_ticks;
use crate::types::{CcCategory, DamageType, EffectType};
use serde::{Deserialize, Serialize};

/// Immutable, authored description of a timed effect.
///
/// Definitions are plain data records, loadable from TOML through the
/// `config` module; no behavior hangs off them beyond derived math.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuffDefinition {
    /// Unique identifier for this effect
    pub id: String,
    /// Display name shown in UI
    pub name: String,
    /// Kind of effect (decides which list it lives in)
    pub effect_type: EffectType,
    /// Authored duration in seconds; clamped to the legal range when applied
    pub duration: f64,
    /// Whether the effect ticks periodically (DoT/HoT)
    #[serde(default)]
    pub is_periodic: bool,
    /// Seconds between ticks for periodic effects
    #[serde(default = "default_tick_interval")]
    pub tick_interval: f64,
    /// Damage dealt per tick (DoT)
    #[serde(default)]
    pub tick_damage: f64,
    /// Healing applied per tick (HoT)
    #[serde(default)]
    pub tick_healing: f64,
    /// Damage school for DoT ticks
    #[serde(default = "default_damage_type")]
    pub damage_type: DamageType,
    /// Crowd-control classification, if this debuff is CC
    #[serde(default)]
    pub cc_category: Option<CcCategory>,
    /// Movement slow fraction in `[0, 1]` for Slow effects
    #[serde(default)]
    pub slow_fraction: f64,
    /// Whether a dispel can remove this effect early
    #[serde(default = "default_true")]
    pub dispellable: bool,
    /// Whether re-application adds a stack instead of only refreshing
    #[serde(default)]
    pub stackable: bool,
    /// Stack cap when stackable
    #[serde(default = "default_max_stacks")]
    pub max_stacks: u32,
}

fn default_tick_interval() -> f64 {
    1.0
}
fn default_damage_type() -> DamageType {
    DamageType::Physical
}
fn default_true() -> bool {
    true
}
fn default_max_stacks() -> u32 {
    1
}

impl BuffDefinition {
    /// Create a plain non-periodic effect
    pub fn new(id: &str, name: &str, effect_type: EffectType, duration: f64) -> Self {
        BuffDefinition {
            id: id.to_string(),
            name: name.to_string(),
            effect_type,
            duration,
            is_periodic: false,
            tick_interval: default_tick_interval(),
            tick_damage: 0.0,
            tick_healing: 0.0,
            damage_type: default_damage_type(),
            cc_category: None,
            slow_fraction: 0.0,
            dispellable: true,
            stackable: false,
            max_stacks: 1,
        }
    }

    /// Make this a damaging periodic effect
    pub fn with_periodic_damage(
        mut self,
        tick_interval: f64,
        tick_damage: f64,
        damage_type: DamageType,
    ) -> Self {
        self.is_periodic = true;
        self.tick_interval = tick_interval;
        self.tick_damage = tick_damage;
        self.damage_type = damage_type;
        self
    }

    /// Make this a healing periodic effect
    pub fn with_periodic_healing(mut self, tick_interval: f64, tick_healing: f64) -> Self {
        self.is_periodic = true;
        self.tick_interval = tick_interval;
        self.tick_healing = tick_healing;
        self
    }

    /// Classify this effect as crowd control
    pub fn with_cc(mut self, category: CcCategory) -> Self {
        self.cc_category = Some(category);
        self
    }

    /// Set the slow fraction (implies a Slow CC classification)
    pub fn with_slow(mut self, fraction: f64) -> Self {
        self.cc_category = Some(CcCategory::Slow);
        self.slow_fraction = fraction.clamp(0.0, 1.0);
        self
    }

    /// Allow stacking up to `max_stacks`
    pub fn with_stacking(mut self, max_stacks: u32) -> Self {
        self.stackable = true;
        self.max_stacks = max_stacks.max(1);
        self
    }

    /// Ticks this effect produces over its full authored duration:
    /// `ceil(duration / tick_interval)`, 0 when not periodic.
    pub fn expected_ticks(&self) -> u32 {
        if !self.is_periodic {
            return 0;
        }
        expected_ticks(self.duration, self.tick_interval)
    }
}
