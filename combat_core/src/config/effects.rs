//! Effect definition loading
//!
//! Buff/debuff definitions are authored data. They can be loaded from a
//! TOML file or taken from the embedded default table.

use super::ConfigError;
use crate::effect::BuffDefinition;
use crate::types::{CcCategory, DamageType, EffectType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Container for authored effect definitions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectsConfig {
    pub effects: Vec<BuffDefinition>,
}

/// Registry of authored effects, keyed by id
#[derive(Debug, Clone, Default)]
pub struct BuffRegistry {
    definitions: HashMap<String, BuffDefinition>,
}

impl BuffRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        BuffRegistry {
            definitions: HashMap::new(),
        }
    }

    /// Register a definition, replacing any previous entry with its id
    pub fn register(&mut self, definition: BuffDefinition) {
        self.definitions.insert(definition.id.clone(), definition);
    }

    /// Look up a definition by id
    pub fn get(&self, id: &str) -> Option<&BuffDefinition> {
        self.definitions.get(id)
    }

    /// Number of registered definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Built-in effect table used when no data file is supplied
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // Warrior bleed
        registry.register(
            BuffDefinition::new("rend", "Rend", EffectType::Dot, 15.0)
                .with_periodic_damage(3.0, 12.0, DamageType::Physical),
        );

        // Warlock shadow DoT
        registry.register(
            BuffDefinition::new("corruption", "Corruption", EffectType::Dot, 18.0)
                .with_periodic_damage(3.0, 20.0, DamageType::Shadow),
        );

        // Mage fire DoT, short and fast
        registry.register(
            BuffDefinition::new("ignite", "Ignite", EffectType::Dot, 4.0)
                .with_periodic_damage(1.0, 15.0, DamageType::Fire),
        );

        // Priest heal over time
        registry.register(
            BuffDefinition::new("renew", "Renew", EffectType::Hot, 12.0)
                .with_periodic_healing(3.0, 25.0),
        );

        // Flat attack-power buff
        registry.register(BuffDefinition::new(
            "battle_shout",
            "Battle Shout",
            EffectType::Buff,
            120.0,
        ));

        // Stacking armor shred
        registry.register(
            BuffDefinition::new("sunder_armor", "Sunder Armor", EffectType::Debuff, 30.0)
                .with_stacking(5),
        );

        // Crowd control
        registry.register(
            BuffDefinition::new("kidney_shot", "Kidney Shot", EffectType::Debuff, 6.0)
                .with_cc(CcCategory::Stun),
        );
        registry.register(
            BuffDefinition::new("intimidating_roar", "Intimidating Roar", EffectType::Debuff, 8.0)
                .with_cc(CcCategory::Fear),
        );
        registry.register(
            BuffDefinition::new("frost_nova", "Frost Nova", EffectType::Debuff, 8.0)
                .with_cc(CcCategory::Root),
        );
        registry.register(
            BuffDefinition::new("hamstring", "Hamstring", EffectType::Debuff, 15.0)
                .with_slow(0.5),
        );

        registry
    }
}

/// Load effect definitions from a TOML file
pub fn load_effect_configs(path: &Path) -> Result<BuffRegistry, ConfigError> {
    let config: EffectsConfig = super::load_toml(path)?;
    Ok(registry_from(config))
}

/// Load effect definitions from a TOML string
pub fn parse_effect_configs(content: &str) -> Result<BuffRegistry, ConfigError> {
    let config: EffectsConfig = super::parse_toml(content)?;
    Ok(registry_from(config))
}

fn registry_from(config: EffectsConfig) -> BuffRegistry {
    let mut registry = BuffRegistry::new();
    for definition in config.effects {
        registry.register(definition);
    }
    registry
}
