//! Turn scheduling and action resolution pipeline.
//!
//! A [`Simulation`] owns the runtime state of one run. Every tick it selects
//! at most one actor, consumes that actor's turn, resolves its ability, and
//! checks for enrage after boss actions. Meters then accrue unless the action
//! granted an extra turn. The run stops on the first failed enrage check or
//! once the boss-action budget is spent.

mod enrage;
mod resolve;
mod scheduler;
mod trace;

pub use enrage::EnrageVerdict;
pub use resolve::ActionReport;
pub use scheduler::effective_speed;
pub use trace::{
    ActionSnapshot, MeterSnapshot, NoopObserver, SimObserver, TraceEvent, TraceRecorder,
};

use crate::config::SimConfig;
use crate::entity::{EntityConfig, EntityId, Registry};
use crate::error::{ConfigError, SimError};

/// Final result of a completed run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Outcome {
    /// Boss actions reached. Equals `limit` on success; on failure it counts
    /// the failing action.
    pub boss_turns: u32,
    pub limit: u32,
}

impl Outcome {
    pub const fn is_success(&self) -> bool {
        self.boss_turns == self.limit
    }
}

/// One run over a validated roster and boss.
#[derive(Clone, Debug)]
pub struct Simulation {
    registry: Registry,
    config: SimConfig,
    boss_turns: u32,
}

impl Simulation {
    /// Validates the inputs and builds fresh runtime state.
    pub fn new(
        allies: &[EntityConfig],
        boss: &EntityConfig,
        config: SimConfig,
    ) -> Result<Self, SimError> {
        if config.boss_turn_limit == 0 {
            return Err(ConfigError::ZeroBudget.into());
        }
        for ally in allies {
            ally.validate()?;
        }
        boss.validate()?;
        if boss.speed <= 0.0 {
            return Err(ConfigError::InvalidSpeed {
                entity: boss.name.clone(),
                speed: boss.speed,
            }
            .into());
        }
        if config.averting_slot >= boss.slots.len() {
            return Err(ConfigError::AvertingSlotOutOfRange {
                boss: boss.name.clone(),
                slot: config.averting_slot,
                slots: boss.slots.len(),
            }
            .into());
        }

        Ok(Self {
            registry: Registry::new(allies, boss),
            config,
            boss_turns: 0,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Runs to completion.
    pub fn run(self) -> Result<Outcome, SimError> {
        self.run_with_observer(&mut NoopObserver)
    }

    /// Runs to completion, streaming trace events to `observer`.
    pub fn run_with_observer<O: SimObserver>(
        mut self,
        observer: &mut O,
    ) -> Result<Outcome, SimError> {
        let limit = self.config.boss_turn_limit;
        let mut chained_turns: u32 = 0;

        while self.boss_turns < limit - 1 {
            let mut extra_turn = false;

            if let Some(actor) = scheduler::select_actor(&self.registry) {
                let report = self.take_turn(actor, observer)?;
                extra_turn = report.extra_turn;

                if self.registry.is_boss(actor) {
                    self.boss_turns += 1;
                    chained_turns = 0;

                    let verdict = enrage::evaluate(
                        &mut self.registry,
                        report.slot,
                        self.config.averting_slot,
                    );
                    tracing::debug!(boss_turn = self.boss_turns, %verdict, "enrage check");
                    if observer.is_enabled() {
                        observer.on_event(TraceEvent::Enrage {
                            boss_turn: self.boss_turns,
                            verdict,
                        });
                    }

                    if verdict.is_failed() {
                        tracing::debug!(boss_turn = self.boss_turns, "run failed");
                        return Ok(Outcome {
                            boss_turns: self.boss_turns,
                            limit,
                        });
                    }
                } else if extra_turn {
                    chained_turns += 1;
                    if chained_turns > self.config.max_chained_turns {
                        return Err(SimError::ExtraTurnLoop {
                            entity: actor,
                            turns: chained_turns,
                        });
                    }
                }
            }

            if !extra_turn {
                chained_turns = 0;
                scheduler::advance_turn_meters(&mut self.registry);
                if observer.is_enabled() {
                    let meters = MeterSnapshot::capture_all(&self.registry);
                    observer.on_event(TraceEvent::Tick(meters));
                }
            }
        }

        Ok(Outcome {
            boss_turns: limit,
            limit,
        })
    }

    fn take_turn<O: SimObserver>(
        &mut self,
        actor: EntityId,
        observer: &mut O,
    ) -> Result<ActionReport, SimError> {
        scheduler::begin_turn(self.registry.get_mut(actor));
        let report = resolve::resolve_action(&mut self.registry, actor)?;

        let state = self.registry.get(actor);
        let ability = report.ability.as_ref().map(|ability| ability.name.as_str());
        tracing::trace!(
            actor = state.name(),
            ability = ability.unwrap_or("-"),
            extra_turn = report.extra_turn,
            "action resolved"
        );

        if observer.is_enabled() {
            observer.on_event(TraceEvent::Action(ActionSnapshot::capture(
                state,
                self.registry.is_boss(actor),
                ability.map(str::to_owned),
                report.extra_turn,
            )));
        }

        Ok(report)
    }
}

/// Runs one simulation with the default config and the given budget.
///
/// Returns the boss-action count reached: `budget` on success, otherwise the
/// count at which the roster failed.
pub fn run_simulation(
    allies: &[EntityConfig],
    boss: &EntityConfig,
    budget: u32,
) -> Result<u32, SimError> {
    let config = SimConfig::default().with_boss_turn_limit(budget);
    Simulation::new(allies, boss, config)?
        .run()
        .map(|outcome| outcome.boss_turns)
}
