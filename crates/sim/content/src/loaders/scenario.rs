//! Scenario loader.
//!
//! A scenario names a boss, a fixed roster and, optionally, the characters a
//! search should vary:
//!
//! ```toml
//! budget = 50
//!
//! [boss]
//! preset = "demon_lord_unm"
//!
//! [[allies]]
//! character = "demytha"
//! speed = 257
//! priorities = [1, 3, 2]
//! delays = [0, 1, 0]
//!
//! # Searched over its speeds only, keeping this policy
//! [[allies]]
//! character = "donnie_mine"
//! speeds = [184, 190]
//! priorities = [1, 3, 2]
//!
//! [search]
//! speeds = [250, 300]
//! variable = ["dps_1", "dps_2"]
//! ```

use std::num::NonZeroU32;
use std::ops::Range;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sim_core::{EntityConfig, SimConfig};

use crate::catalog::{BossPreset, Catalog, CatalogError, Character};
use crate::loaders::{LoadResult, read_file};

/// A catalogue character at a chosen speed and policy.
///
/// `speeds` turns the ally into a speed sweep for searches; a plain run uses
/// `speed`, or the start of the range when only a range is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllySpec {
    pub character: String,
    #[serde(default)]
    pub speed: Option<f64>,
    /// Half-open `[start, end)` speed range searched with this policy.
    #[serde(default)]
    pub speeds: Option<[u32; 2]>,
    /// Stride through `speeds`. Defaults to 1.
    #[serde(default)]
    pub speed_step: Option<NonZeroU32>,
    /// Defaults to `1..=N` in slot order.
    #[serde(default)]
    pub priorities: Option<Vec<u32>>,
    /// Defaults to all zero.
    #[serde(default)]
    pub delays: Option<Vec<u32>>,
}

impl AllySpec {
    pub fn resolve(&self, catalog: &Catalog) -> Result<EntityConfig, CatalogError> {
        let speed = match (self.speed, self.speeds) {
            (Some(speed), _) => speed,
            (None, Some([start, _])) => f64::from(start),
            (None, None) => return Err(CatalogError::MissingSpeed(self.character.clone())),
        };
        self.config_at(catalog.character(&self.character)?, speed)
    }

    /// Every config this ally may take in a search: one per swept speed, or
    /// just the resolved config when no range is given.
    pub fn resolve_sweep(&self, catalog: &Catalog) -> Result<Vec<EntityConfig>, CatalogError> {
        let Some([start, end]) = self.speeds else {
            return Ok(vec![self.resolve(catalog)?]);
        };

        let character = catalog.character(&self.character)?;
        let step = self.speed_step.map_or(1, NonZeroU32::get) as usize;
        (start..end)
            .step_by(step)
            .map(|speed| self.config_at(character, f64::from(speed)))
            .collect()
    }

    fn config_at(&self, character: &Character, speed: f64) -> Result<EntityConfig, CatalogError> {
        let config = match &self.priorities {
            Some(priorities) => character.to_config(speed, priorities, self.delays.as_deref())?,
            None => {
                let priorities: Vec<u32> = (1..=character.ability_count() as u32).collect();
                character.to_config(speed, &priorities, self.delays.as_deref())?
            }
        };
        Ok(config)
    }
}

/// Either a named preset or an explicit character setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BossSpec {
    Preset { preset: String },
    Custom(AllySpec),
}

impl Default for BossSpec {
    fn default() -> Self {
        BossSpec::Preset {
            preset: BossPreset::DEMON_LORD_UNM.name.to_owned(),
        }
    }
}

impl BossSpec {
    pub fn resolve(&self, catalog: &Catalog) -> Result<EntityConfig, CatalogError> {
        match self {
            BossSpec::Preset { preset } => catalog.boss_preset(preset),
            BossSpec::Custom(spec) => spec.resolve(catalog),
        }
    }
}

/// Search settings as written in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSpec {
    /// Half-open `[start, end)` speed range.
    pub speeds: [u32; 2],
    /// Characters to vary, appended after the fixed allies.
    pub variable: Vec<String>,
    #[serde(default)]
    pub threads: Option<usize>,
}

/// Scenario file structure for TOML files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default = "default_budget")]
    pub budget: u32,
    #[serde(default)]
    pub boss: BossSpec,
    #[serde(default)]
    pub allies: Vec<AllySpec>,
    #[serde(default)]
    pub search: Option<SearchSpec>,
}

fn default_budget() -> u32 {
    SimConfig::DEFAULT_BOSS_TURN_LIMIT
}

/// Search settings resolved against a catalogue.
#[derive(Debug, Clone)]
pub struct SearchPlan {
    pub speeds: Range<u32>,
    pub variable: Vec<Character>,
    pub threads: Option<usize>,
}

/// A scenario with every name resolved to engine configs.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub budget: u32,
    pub boss: EntityConfig,
    pub allies: Vec<EntityConfig>,
    /// Candidate configs per ally, in roster order. Allies without a speed
    /// range contribute their single config.
    pub sweeps: Vec<Vec<EntityConfig>>,
    pub search: Option<SearchPlan>,
}

impl Scenario {
    /// True when any ally sweeps a speed range.
    pub fn has_sweeps(&self) -> bool {
        self.sweeps.iter().any(|sweep| sweep.len() != 1)
    }
}

impl ScenarioFile {
    pub fn resolve(&self, catalog: &Catalog) -> Result<Scenario, CatalogError> {
        let boss = self.boss.resolve(catalog)?;
        let allies = self
            .allies
            .iter()
            .map(|ally| ally.resolve(catalog))
            .collect::<Result<Vec<_>, _>>()?;
        let sweeps = self
            .allies
            .iter()
            .map(|ally| ally.resolve_sweep(catalog))
            .collect::<Result<Vec<_>, _>>()?;

        let search = match &self.search {
            Some(spec) => Some(SearchPlan {
                speeds: spec.speeds[0]..spec.speeds[1],
                variable: spec
                    .variable
                    .iter()
                    .map(|id| catalog.character(id).cloned())
                    .collect::<Result<Vec<_>, _>>()?,
                threads: spec.threads,
            }),
            None => None,
        };

        Ok(Scenario {
            budget: self.budget,
            boss,
            allies,
            sweeps,
            search,
        })
    }
}

/// Loader for scenarios from TOML files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Load a scenario file without resolving names.
    pub fn load(path: &Path) -> LoadResult<ScenarioFile> {
        let content = read_file(path)?;
        let file: ScenarioFile = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse scenario TOML {}: {}", path.display(), e)
        })?;

        Ok(file)
    }

    /// Load a scenario file and resolve it against `catalog`.
    pub fn load_resolved(path: &Path, catalog: &Catalog) -> LoadResult<Scenario> {
        let file = Self::load(path)?;
        let scenario = file
            .resolve(catalog)
            .map_err(|e| anyhow::anyhow!("Invalid scenario {}: {}", path.display(), e))?;

        tracing::debug!(
            path = %path.display(),
            allies = scenario.allies.len(),
            budget = scenario.budget,
            "scenario loaded"
        );
        Ok(scenario)
    }
}
