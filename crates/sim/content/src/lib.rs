//! Content definitions and loaders for the clan boss simulator.
//!
//! This crate houses the stock catalogue and everything that turns
//! human-written content into engine configs:
//! - Built-in abilities and characters, plus boss presets
//! - The combinatorial config generator used by searches
//! - Catalogue extensions (data-driven via RON)
//! - Scenarios (data-driven via TOML)
//!
//! The engine never sees names; it only receives resolved `EntityConfig`s.

mod builtin;
pub mod catalog;
pub mod generator;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::{BossPreset, Catalog, CatalogError, Character};
pub use generator::{character_configs, delay_vectors, priority_orders};

#[cfg(feature = "loaders")]
pub use loaders::{
    AllySpec, BossSpec, CatalogFile, CatalogLoader, Scenario, ScenarioFile, ScenarioLoader,
    SearchPlan,
};
