//! Resource and class tables
//!
//! Which class runs on which resource, and the fixed, type-level behavior
//! of each resource (whether it regenerates, decays out of combat, and its
//! default pool size). These are static game rules, not tuning knobs.

use serde::{Deserialize, Serialize};

/// Class-specific secondary resource kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Mana,
    Rage,
    Energy,
    RunicPower,
    HolyPower,
    Focus,
}

/// Playable character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Warrior,
    Paladin,
    Mage,
    Priest,
    Rogue,
    Hunter,
    Warlock,
    DeathKnight,
}

impl ResourceType {
    /// The scalar resource a class runs on, if any.
    pub fn for_class(class: CharacterClass) -> Option<ResourceType> {
        match class {
            CharacterClass::Warrior => Some(ResourceType::Rage),
            CharacterClass::Paladin => Some(ResourceType::HolyPower),
            CharacterClass::Mage => Some(ResourceType::Mana),
            CharacterClass::Priest => Some(ResourceType::Mana),
            CharacterClass::Rogue => Some(ResourceType::Energy),
            CharacterClass::Hunter => Some(ResourceType::Focus),
            CharacterClass::Warlock => Some(ResourceType::Mana),
            CharacterClass::DeathKnight => Some(ResourceType::RunicPower),
        }
    }

    /// Default pool size when the caller does not supply one
    pub fn default_max(self) -> f64 {
        match self {
            ResourceType::HolyPower => 5.0,
            ResourceType::Mana
            | ResourceType::Rage
            | ResourceType::Energy
            | ResourceType::RunicPower
            | ResourceType::Focus => 100.0,
        }
    }

    /// Whether this resource drains while out of combat
    pub fn decays_out_of_combat(self) -> bool {
        matches!(self, ResourceType::Rage | ResourceType::RunicPower)
    }

    /// Whether this resource refills automatically over time
    pub fn regenerates(self) -> bool {
        matches!(
            self,
            ResourceType::Mana | ResourceType::Energy | ResourceType::Focus
        )
    }
}

impl CharacterClass {
    /// Whether this class additionally tracks a rune pool
    pub fn uses_runes(self) -> bool {
        matches!(self, CharacterClass::DeathKnight)
    }

    /// Whether this class builds combo points
    pub fn uses_combo_points(self) -> bool {
        matches!(self, CharacterClass::Rogue)
    }

    /// Get all playable classes
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Warrior,
            CharacterClass::Paladin,
            CharacterClass::Mage,
            CharacterClass::Priest,
            CharacterClass::Rogue,
            CharacterClass::Hunter,
            CharacterClass::Warlock,
            CharacterClass::DeathKnight,
        ]
    }
}
