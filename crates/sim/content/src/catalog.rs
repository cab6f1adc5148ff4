//! Ability and character catalogue.
//!
//! A [`Catalog`] maps ids to shared abilities and to [`Character`]
//! templates. Characters turn into engine configs via
//! [`Character::to_config`] once a speed and ability policy are chosen.

use std::collections::BTreeMap;
use std::sync::Arc;

use sim_core::{Ability, AbilitySlot, AvertingPassive, ConfigError, EntityConfig};

use crate::builtin;

/// Errors raised while resolving names against a catalogue.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown character '{0}'")]
    UnknownCharacter(String),

    #[error("character '{character}' references unknown ability '{ability}'")]
    UnknownAbility { character: String, ability: String },

    #[error("unknown boss preset '{0}'")]
    UnknownBossPreset(String),

    #[error("'{0}' needs a speed or a speed range")]
    MissingSpeed(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A named ability list, optionally carrying an averting passive.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    pub name: String,
    pub abilities: Vec<Arc<Ability>>,
    pub passive: Option<AvertingPassive>,
}

impl Character {
    pub fn new(name: impl Into<String>, abilities: Vec<Arc<Ability>>) -> Self {
        Self {
            name: name.into(),
            abilities,
            passive: None,
        }
    }

    pub fn with_passive(mut self, passive: AvertingPassive) -> Self {
        self.passive = Some(passive);
        self
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    /// Binds the abilities to priorities and delays at a given speed.
    ///
    /// Missing delays default to all zero. The result is validated.
    pub fn to_config(
        &self,
        speed: f64,
        priorities: &[u32],
        delays: Option<&[u32]>,
    ) -> Result<EntityConfig, ConfigError> {
        let count = self.ability_count();
        let zeros = vec![0; count];
        let delays = delays.unwrap_or(&zeros);

        for (field, given) in [("priority", priorities.len()), ("delay", delays.len())] {
            if given != count {
                return Err(ConfigError::LengthMismatch {
                    entity: self.name.clone(),
                    field,
                    abilities: count,
                    given,
                });
            }
        }

        let slots = self
            .abilities
            .iter()
            .zip(priorities.iter().zip(delays))
            .map(|(ability, (priority, delay))| {
                AbilitySlot::new(Arc::clone(ability), *priority, *delay)
            })
            .collect();

        let mut config = EntityConfig::new(self.name.clone(), speed, slots);
        config.passive = self.passive;
        config.validate()?;
        Ok(config)
    }

    /// Config with priorities `1..=N` in slot order and no delays.
    pub fn default_config(&self, speed: f64) -> Result<EntityConfig, ConfigError> {
        let priorities: Vec<u32> = (1..=self.ability_count() as u32).collect();
        self.to_config(speed, &priorities, None)
    }
}

/// A named boss setup: catalogue character plus speed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossPreset {
    pub name: &'static str,
    pub character: &'static str,
    pub speed: f64,
}

impl BossPreset {
    pub const DEMON_LORD_NM: Self = Self {
        name: "demon_lord_nm",
        character: "demon_lord",
        speed: 170.0,
    };

    pub const DEMON_LORD_UNM: Self = Self {
        name: "demon_lord_unm",
        character: "demon_lord",
        speed: 190.0,
    };

    pub const ALL: [Self; 2] = [Self::DEMON_LORD_NM, Self::DEMON_LORD_UNM];
}

/// Abilities and characters addressable by id.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    abilities: BTreeMap<String, Arc<Ability>>,
    characters: BTreeMap<String, Character>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every ability and character of the stock roster.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        builtin::install(&mut catalog);
        catalog
    }

    /// Registers an ability under its own name, replacing any previous one.
    pub fn insert_ability(&mut self, ability: Arc<Ability>) {
        self.abilities.insert(ability.name.clone(), ability);
    }

    pub fn insert_character(&mut self, id: impl Into<String>, character: Character) {
        self.characters.insert(id.into(), character);
    }

    pub fn ability(&self, name: &str) -> Option<&Arc<Ability>> {
        self.abilities.get(name)
    }

    pub fn character(&self, id: &str) -> Result<&Character, CatalogError> {
        self.characters
            .get(id)
            .ok_or_else(|| CatalogError::UnknownCharacter(id.to_owned()))
    }

    /// Characters sorted by id.
    pub fn characters(&self) -> impl Iterator<Item = (&str, &Character)> {
        self.characters.iter().map(|(id, c)| (id.as_str(), c))
    }

    pub fn abilities(&self) -> impl Iterator<Item = &Arc<Ability>> {
        self.abilities.values()
    }

    /// Builds a character from ability names already in the catalogue.
    pub fn assemble(
        &self,
        name: &str,
        ability_names: &[impl AsRef<str>],
    ) -> Result<Character, CatalogError> {
        let abilities = ability_names
            .iter()
            .map(|ability| {
                let ability = ability.as_ref();
                self.ability(ability)
                    .cloned()
                    .ok_or_else(|| CatalogError::UnknownAbility {
                        character: name.to_owned(),
                        ability: ability.to_owned(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Character::new(name, abilities))
    }

    /// Resolves a boss preset into a config with priorities `1..=N`.
    pub fn boss_preset(&self, name: &str) -> Result<EntityConfig, CatalogError> {
        let preset = BossPreset::ALL
            .iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CatalogError::UnknownBossPreset(name.to_owned()))?;

        Ok(self
            .character(preset.character)?
            .default_config(preset.speed)?)
    }
}
