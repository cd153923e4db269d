//! Tunable engine constants
//!
//! Every knob has a canonical default pinned by the test suite; hosts can
//! override them from a TOML file without recompiling.

use crate::duration::{MAX_EFFECT_DURATION, MIN_EFFECT_DURATION};
use serde::{Deserialize, Serialize};

/// Top-level tuning table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineTuning {
    #[serde(default)]
    pub effects: EffectTuning,
    #[serde(default)]
    pub resources: ResourceTuning,
}

impl Default for EngineTuning {
    fn default() -> Self {
        EngineTuning {
            effects: EffectTuning::default(),
            resources: ResourceTuning::default(),
        }
    }
}

/// Limits for the buff/debuff tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectTuning {
    /// Shortest applied duration in seconds
    #[serde(default = "default_min_duration")]
    pub min_duration: f64,
    /// Longest applied duration in seconds
    #[serde(default = "default_max_duration")]
    pub max_duration: f64,
    /// Buff list cap per entity; the oldest is evicted beyond this
    #[serde(default = "default_max_per_entity")]
    pub max_buffs_per_entity: usize,
    /// Debuff list cap per entity
    #[serde(default = "default_max_per_entity")]
    pub max_debuffs_per_entity: usize,
}

impl Default for EffectTuning {
    fn default() -> Self {
        EffectTuning {
            min_duration: MIN_EFFECT_DURATION,
            max_duration: MAX_EFFECT_DURATION,
            max_buffs_per_entity: 20,
            max_debuffs_per_entity: 20,
        }
    }
}

impl EffectTuning {
    /// Clamp an authored duration into this table's legal range
    pub fn clamp_duration(&self, duration: f64) -> f64 {
        crate::duration::clamp_to(duration, self.min_duration, self.max_duration)
    }
}

fn default_min_duration() -> f64 {
    MIN_EFFECT_DURATION
}
fn default_max_duration() -> f64 {
    MAX_EFFECT_DURATION
}
fn default_max_per_entity() -> usize {
    20
}

/// Regeneration, decay, and generation rates for secondary resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceTuning {
    /// Energy gained per second, combat state irrelevant
    #[serde(default = "default_fast_regen")]
    pub energy_regen_rate: f64,
    /// Focus gained per second, combat state irrelevant
    #[serde(default = "default_fast_regen")]
    pub focus_regen_rate: f64,
    /// Mana gained per second while out of combat
    #[serde(default = "default_mana_regen_ooc")]
    pub mana_regen_out_of_combat: f64,
    /// Mana gained per second while in combat (slower)
    #[serde(default = "default_mana_regen_combat")]
    pub mana_regen_in_combat: f64,
    /// Rage lost per second while out of combat
    #[serde(default = "default_decay_rate")]
    pub rage_decay_rate: f64,
    /// Runic power lost per second while out of combat
    #[serde(default = "default_decay_rate")]
    pub runic_power_decay_rate: f64,
    /// Flat rage gained per damage-dealt event, magnitude-independent
    #[serde(default = "default_rage_dealt")]
    pub rage_per_damage_dealt: f64,
    /// Flat rage gained per damage-taken event, magnitude-independent
    #[serde(default = "default_rage_taken")]
    pub rage_per_damage_taken: f64,
    /// Finisher damage bonus per combo point consumed
    #[serde(default = "default_combo_step")]
    pub combo_point_damage_step: f64,
}

impl Default for ResourceTuning {
    fn default() -> Self {
        ResourceTuning {
            energy_regen_rate: 10.0,
            focus_regen_rate: 10.0,
            mana_regen_out_of_combat: 2.0,
            mana_regen_in_combat: 0.5,
            rage_decay_rate: 1.5,
            runic_power_decay_rate: 1.5,
            rage_per_damage_dealt: 5.0,
            rage_per_damage_taken: 2.5,
            combo_point_damage_step: 0.2,
        }
    }
}

fn default_fast_regen() -> f64 {
    10.0
}
fn default_mana_regen_ooc() -> f64 {
    2.0
}
fn default_mana_regen_combat() -> f64 {
    0.5
}
fn default_decay_rate() -> f64 {
    1.5
}
fn default_rage_dealt() -> f64 {
    5.0
}
fn default_rage_taken() -> f64 {
    2.5
}
fn default_combo_step() -> f64 {
    0.2
}
