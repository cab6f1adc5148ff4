//! Error types for configuration validation and run-time contract checks.
//!
//! Two families exist:
//!
//! - [`ConfigError`]: rejected input, detected before the first tick.
//! - [`SimError`]: everything a run can return, including contract
//!   violations that abort a run mid-way.
//!
//! Every error reports an [`ErrorSeverity`] so callers (the search driver in
//! particular) can tell a bad candidate apart from an engine bug.

use crate::entity::EntityId;

/// Severity level of an error, used for categorization and reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not be retried without changes.
    ///
    /// Examples: duplicate priorities, zero budget
    Validation,

    /// A rule of the engine was broken while the run was in progress.
    ///
    /// Examples: several debuffs present on a single-debuff removal, an
    /// ally chaining extra turns forever.
    /// These indicate inconsistent content and should be investigated.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Rejected entity or run configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("entity '{entity}' has an empty loadout")]
    EmptyLoadout { entity: String },

    #[error("entity '{entity}' must have delay 0 on its first ability (got {delay})")]
    FirstSlotDelayed { entity: String, delay: u32 },

    #[error("entity '{entity}' priorities {priorities:?} are not a permutation of 1..={len}")]
    InvalidPriorities {
        entity: String,
        priorities: Vec<u32>,
        len: usize,
    },

    #[error("entity '{entity}' has {abilities} abilities but {given} {field} values")]
    LengthMismatch {
        entity: String,
        field: &'static str,
        abilities: usize,
        given: usize,
    },

    #[error("entity '{entity}' has invalid speed {speed}")]
    InvalidSpeed { entity: String, speed: f64 },

    #[error("boss turn limit must be at least 1")]
    ZeroBudget,

    #[error("averting slot {slot} is out of range for boss '{boss}' ({slots} slots)")]
    AvertingSlotOutOfRange {
        boss: String,
        slot: usize,
        slots: usize,
    },
}

/// Errors surfaced by a simulation run.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Unreachable with the stock content: there is a single debuff kind
    /// and same-kind grants merge, so a ledger never holds two debuffs.
    /// Kept for content that adds further kinds.
    #[error(
        "single-debuff removal on entity {entity} found {count} debuffs (at most one expected)"
    )]
    MultipleDebuffsOnRemoveOne { entity: EntityId, count: usize },

    /// An ally kept granting itself extra turns, so the timeline never
    /// advanced.
    #[error("entity {entity} took {turns} extra turns in a row")]
    ExtraTurnLoop { entity: EntityId, turns: u32 },
}

impl SimError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SimError::Config(_) => ErrorSeverity::Validation,
            SimError::MultipleDebuffsOnRemoveOne { .. } | SimError::ExtraTurnLoop { .. } => {
                ErrorSeverity::Internal
            }
        }
    }

    /// Returns a static string identifier for this error variant.
    pub fn error_code(&self) -> &'static str {
        match self {
            SimError::Config(_) => "config",
            SimError::MultipleDebuffsOnRemoveOne { .. } => "multiple_debuffs_on_remove_one",
            SimError::ExtraTurnLoop { .. } => "extra_turn_loop",
        }
    }
}
