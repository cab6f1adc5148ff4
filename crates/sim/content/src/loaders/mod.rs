//! Loaders for custom catalogue and scenario files.
//!
//! Catalogue extensions are RON, scenarios are TOML. Both resolve names
//! against a [`Catalog`](crate::Catalog) after parsing.

pub mod catalog;
pub mod scenario;

pub use catalog::{AbilitySpec, CatalogFile, CatalogLoader, CharacterSpec};
pub use scenario::{
    AllySpec, BossSpec, Scenario, ScenarioFile, ScenarioLoader, SearchPlan, SearchSpec,
};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
