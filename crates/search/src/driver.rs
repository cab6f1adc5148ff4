//! Parallel evaluation of a candidate space.

use std::ops::Range;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use rayon::prelude::*;
use sim_content::{Character, character_configs};
use sim_core::{EntityConfig, SimError, run_simulation};

use crate::SearchError;
use crate::report::{SearchReport, Solution, Tally};
use crate::space::CandidateSpace;

/// Runs every candidate roster against one boss.
#[derive(Clone, Debug)]
pub struct SearchDriver {
    boss: EntityConfig,
    budget: u32,
    threads: Option<usize>,
    progress_interval: u64,
}

impl SearchDriver {
    pub const DEFAULT_PROGRESS_INTERVAL: u64 = 100_000;

    pub fn new(boss: EntityConfig, budget: u32) -> Self {
        Self {
            boss,
            budget,
            threads: None,
            progress_interval: Self::DEFAULT_PROGRESS_INTERVAL,
        }
    }

    /// Worker count; defaults to one per logical core.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Candidates between two progress log lines.
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = interval.max(1);
        self
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Searches every policy of every character, in the given roster order.
    pub fn run_exhaustive(
        &self,
        characters: &[Character],
        speeds: Range<u32>,
    ) -> Result<SearchReport, SearchError> {
        self.run_variable(&[], characters, speeds)
    }

    /// Keeps `fixed` in front and searches every policy of `variable`.
    pub fn run_variable(
        &self,
        fixed: &[EntityConfig],
        variable: &[Character],
        speeds: Range<u32>,
    ) -> Result<SearchReport, SearchError> {
        let lists = variable
            .iter()
            .map(|character| character_configs(character, speeds.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        self.run_space(&CandidateSpace::new(fixed.to_vec(), lists)?)
    }

    /// Picks one config from each of `selections` (e.g. an ally swept over
    /// speeds with a fixed policy), then searches every policy of `variable`
    /// behind them.
    pub fn run_selections(
        &self,
        selections: &[Vec<EntityConfig>],
        variable: &[Character],
        speeds: Range<u32>,
    ) -> Result<SearchReport, SearchError> {
        let mut lists = selections.to_vec();
        for character in variable {
            lists.push(character_configs(character, speeds.clone())?);
        }

        self.run_space(&CandidateSpace::new(Vec::new(), lists)?)
    }

    /// Evaluates an explicit candidate space.
    pub fn run_space(&self, space: &CandidateSpace) -> Result<SearchReport, SearchError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads.unwrap_or(0))
            .build()?;

        let total = space.len();
        tracing::info!(
            candidates = total,
            threads = pool.current_num_threads(),
            budget = self.budget,
            "search started"
        );

        let progress = Progress {
            done: AtomicU64::new(0),
            best: AtomicU32::new(0),
            total,
        };
        let tally = pool.install(|| {
            (0..total)
                .into_par_iter()
                .map(|index| (index, self.evaluate(space, index, &progress)))
                .fold(Tally::default, |tally, (index, result)| {
                    tally.record(index, result, self.budget)
                })
                .reduce(Tally::default, Tally::merge)
        });

        if let Some((index, source)) = tally.error {
            return Err(SearchError::Candidate { index, source });
        }

        let mut solutions = tally.solutions;
        solutions.sort_unstable();
        let solutions: Vec<Solution> = solutions
            .into_iter()
            .map(|index| Solution {
                index,
                team: space.team(index),
            })
            .collect();

        let best = tally.best.map(|(_, index)| Solution {
            index,
            team: space.team(index),
        });

        let best_turns = tally.best.map_or(0, |(turns, _)| turns);
        tracing::info!(
            evaluated = tally.evaluated,
            best_turns,
            solutions = solutions.len(),
            "search finished"
        );

        Ok(SearchReport {
            budget: self.budget,
            evaluated: tally.evaluated,
            best_turns,
            best,
            solutions,
        })
    }

    fn evaluate(
        &self,
        space: &CandidateSpace,
        index: u64,
        progress: &Progress,
    ) -> Result<u32, SimError> {
        let team = space.team(index);
        let result = run_simulation(&team, &self.boss, self.budget);

        if let Ok(turns) = result {
            let previous = progress.best.fetch_max(turns, Ordering::Relaxed);
            if turns > previous {
                let speeds: Vec<f64> = team.iter().map(|member| member.speed).collect();
                tracing::info!(index, turns, ?speeds, "new best");
            }
            if turns == self.budget {
                let names: Vec<String> = team.iter().map(ToString::to_string).collect();
                tracing::info!(index, team = ?names, "solution found");
            }
        }

        let finished = progress.done.fetch_add(1, Ordering::Relaxed) + 1;
        if finished % self.progress_interval == 0 {
            tracing::info!(finished, total = progress.total, "search progress");
        }

        result
    }
}

/// Shared counters for log lines emitted while the pool runs.
struct Progress {
    done: AtomicU64,
    best: AtomicU32,
    total: u64,
}
