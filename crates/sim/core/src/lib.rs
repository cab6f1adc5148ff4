//! Deterministic turn-resolution engine for clan boss encounters.
//!
//! `sim-core` models a roster of allies fighting a single boss on a shared
//! turn-meter timeline. Each run answers one question: how many boss actions
//! does this roster survive before the boss enrages? All mutation flows
//! through [`engine::Simulation`]; the free function [`run_simulation`] is the
//! convenience entry point used by the search driver.
//!
//! Runs perform no I/O and share nothing mutable, so any number of them may
//! execute on separate threads.
pub mod ability;
pub mod config;
pub mod engine;
pub mod entity;
pub mod error;
pub mod status;

pub use ability::{Ability, AbilitySlot, Effect};
pub use config::SimConfig;
pub use engine::{
    ActionReport, ActionSnapshot, EnrageVerdict, MeterSnapshot, NoopObserver, Outcome,
    SimObserver, Simulation, TraceEvent, TraceRecorder, effective_speed, run_simulation,
};
pub use entity::{AvertingPassive, EntityConfig, EntityId, EntityState, Registry};
pub use error::{ConfigError, ErrorSeverity, SimError};
pub use status::{
    ActiveStatus, Buff, BuffKind, BuffLedger, BuffScope, Debuff, DebuffKind, DebuffLedger,
    StatusLedger,
};
