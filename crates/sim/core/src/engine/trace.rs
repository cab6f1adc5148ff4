//! Observers that watch a run as it progresses.
//!
//! Observers never influence the result. [`NoopObserver`] reports itself as
//! disabled so the engine can skip building snapshots entirely.

use std::fmt;

use crate::entity::{EntityId, EntityState, Registry};
use crate::status::{ActiveStatus, BuffKind, DebuffKind};

use super::enrage::EnrageVerdict;

/// Receives trace events from a running simulation.
pub trait SimObserver {
    /// Returns false to skip snapshot construction.
    fn is_enabled(&self) -> bool {
        true
    }

    fn on_event(&mut self, event: TraceEvent);
}

/// Observer that discards everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SimObserver for NoopObserver {
    fn is_enabled(&self) -> bool {
        false
    }

    fn on_event(&mut self, _event: TraceEvent) {}
}

/// Observer that keeps every event in order.
#[derive(Clone, Debug, Default)]
pub struct TraceRecorder {
    events: Vec<TraceEvent>,
}

impl TraceRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<TraceEvent> {
        self.events
    }

    /// Actions taken by one entity, in order.
    pub fn actions_of(&self, entity: EntityId) -> impl Iterator<Item = &ActionSnapshot> {
        self.events.iter().filter_map(move |event| match event {
            TraceEvent::Action(action) if action.actor == entity => Some(action),
            _ => None,
        })
    }
}

impl SimObserver for TraceRecorder {
    fn on_event(&mut self, event: TraceEvent) {
        self.events.push(event);
    }
}

/// One step of a run.
#[derive(Clone, Debug, PartialEq)]
pub enum TraceEvent {
    Action(ActionSnapshot),
    Enrage {
        boss_turn: u32,
        verdict: EnrageVerdict,
    },
    Tick(Vec<MeterSnapshot>),
}

/// The actor's view right after resolving its action.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionSnapshot {
    pub actor: EntityId,
    pub name: String,
    pub is_boss: bool,
    /// `None` for a passive action with nothing eligible.
    pub ability: Option<String>,
    pub extra_turn: bool,
    pub buffs: Vec<ActiveStatus<BuffKind>>,
    pub debuffs: Vec<ActiveStatus<DebuffKind>>,
}

impl ActionSnapshot {
    pub(crate) fn capture(
        state: &EntityState,
        is_boss: bool,
        ability: Option<String>,
        extra_turn: bool,
    ) -> Self {
        Self {
            actor: state.id,
            name: state.name().to_owned(),
            is_boss,
            ability,
            extra_turn,
            buffs: state.buffs.iter().copied().collect(),
            debuffs: state.debuffs.iter().copied().collect(),
        }
    }
}

/// One entity's meter and cooldowns after a tick advance.
#[derive(Clone, Debug, PartialEq)]
pub struct MeterSnapshot {
    pub entity: EntityId,
    pub name: String,
    pub turn_meter: f64,
    pub cooldowns: Vec<u32>,
}

impl MeterSnapshot {
    pub(crate) fn capture_all(registry: &Registry) -> Vec<Self> {
        registry
            .iter()
            .map(|state| Self {
                entity: state.id,
                name: state.name().to_owned(),
                turn_meter: state.turn_meter,
                cooldowns: state.cooldowns.clone(),
            })
            .collect()
    }
}

fn write_statuses<K: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    statuses: &[ActiveStatus<K>],
) -> fmt::Result {
    write!(f, "[")?;
    for (index, status) in statuses.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}:{}", status.kind, status.duration)?;
    }
    write!(f, "]")
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Action(action) => {
                let label = if action.is_boss { "boss turn" } else { "turn" };
                write!(
                    f,
                    "[{label}] {} uses {}",
                    action.name,
                    action.ability.as_deref().unwrap_or("nothing")
                )?;
                if action.extra_turn {
                    write!(f, " (extra turn)")?;
                }
                write!(f, ", buffs ")?;
                write_statuses(f, &action.buffs)?;
                write!(f, ", debuffs ")?;
                write_statuses(f, &action.debuffs)
            }
            TraceEvent::Enrage { boss_turn, verdict } => match verdict {
                EnrageVerdict::Averted { by } => {
                    write!(f, "[enrage] boss turn {boss_turn}: averted by {by}")
                }
                _ => write!(f, "[enrage] boss turn {boss_turn}: {verdict}"),
            },
            TraceEvent::Tick(meters) => {
                write!(f, "[tick]")?;
                for meter in meters {
                    write!(
                        f,
                        "\n\t{}: turn meter {:.2}, cooldowns {:?}",
                        meter.name, meter.turn_meter, meter.cooldowns
                    )?;
                }
                Ok(())
            }
        }
    }
}
