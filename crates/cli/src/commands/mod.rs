//! Subcommand implementations.
//!
//! Each command owns its CLI args and execution logic.

mod catalog;
mod search;
mod simulate;

pub use catalog::ListCatalog;
pub use search::Search;
pub use simulate::Simulate;

use std::path::Path;

use anyhow::Result;
use sim_content::{Catalog, CatalogLoader};

/// Built-in content, extended with `extra` when given.
pub fn load_catalog(extra: Option<&Path>) -> Result<Catalog> {
    let mut catalog = Catalog::builtin();
    if let Some(path) = extra {
        CatalogLoader::extend(&mut catalog, path)?;
        tracing::info!(path = %path.display(), "catalogue extended");
    }
    Ok(catalog)
}
