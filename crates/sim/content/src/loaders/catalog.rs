//! Catalogue extension loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sim_core::{Ability, AvertingPassive, Buff, Debuff, Effect};

use crate::catalog::{Catalog, CatalogError};
use crate::loaders::{LoadResult, read_file};

/// One ability definition in a catalogue file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilitySpec {
    pub name: String,
    pub cooldown: u32,
    #[serde(default)]
    pub effects: Vec<Effect>,
    #[serde(default)]
    pub buffs: Vec<Buff>,
    #[serde(default)]
    pub debuffs: Vec<Debuff>,
}

impl From<AbilitySpec> for Ability {
    fn from(spec: AbilitySpec) -> Self {
        Ability::new(spec.name, spec.cooldown)
            .with_effects(spec.effects)
            .with_buffs(spec.buffs)
            .with_debuffs(spec.debuffs)
    }
}

/// One character definition in a catalogue file.
///
/// Abilities are referenced by name and may come from the same file or from
/// the catalogue being extended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSpec {
    pub id: String,
    /// Display name; defaults to `id`.
    #[serde(default)]
    pub name: Option<String>,
    pub abilities: Vec<String>,
    #[serde(default)]
    pub passive: Option<AvertingPassive>,
}

/// Catalogue file structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub abilities: Vec<AbilitySpec>,
    #[serde(default)]
    pub characters: Vec<CharacterSpec>,
}

impl CatalogFile {
    /// Adds the file's definitions to `catalog`, abilities first.
    ///
    /// Definitions with an existing id replace the previous entry.
    pub fn apply(self, catalog: &mut Catalog) -> Result<(), CatalogError> {
        for spec in self.abilities {
            catalog.insert_ability(Ability::from(spec).shared());
        }

        for spec in self.characters {
            let name = spec.name.as_deref().unwrap_or(&spec.id);
            let mut character = catalog.assemble(name, spec.abilities.as_slice())?;
            character.passive = spec.passive;
            catalog.insert_character(spec.id, character);
        }

        Ok(())
    }
}

/// Loader for catalogue extensions from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load a catalogue file without resolving it.
    pub fn load(path: &Path) -> LoadResult<CatalogFile> {
        let content = read_file(path)?;
        let file: CatalogFile = ron::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse catalog RON {}: {}", path.display(), e)
        })?;

        Ok(file)
    }

    /// Load a catalogue file and merge it into `catalog`.
    pub fn extend(catalog: &mut Catalog, path: &Path) -> LoadResult<()> {
        let file = Self::load(path)?;
        let (abilities, characters) = (file.abilities.len(), file.characters.len());
        file.apply(catalog)
            .map_err(|e| anyhow::anyhow!("Invalid catalog {}: {}", path.display(), e))?;

        tracing::debug!(path = %path.display(), abilities, characters, "catalog extended");
        Ok(())
    }
}
