//! Run a single scenario.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use sim_content::{Catalog, ScenarioLoader};
use sim_core::{SimConfig, Simulation, TraceEvent, TraceRecorder};

/// Run one scenario and report how far it got
#[derive(Parser)]
pub struct Simulate {
    /// Scenario file (TOML)
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Print every action and enrage check
    #[arg(short, long)]
    trace: bool,

    /// With --trace, also print turn meters after every tick
    #[arg(long, requires = "trace")]
    ticks: bool,

    /// Override the scenario's boss-turn budget
    #[arg(short, long, value_name = "TURNS")]
    budget: Option<u32>,
}

impl Simulate {
    pub fn execute(self, catalog: &Catalog) -> Result<()> {
        let scenario = ScenarioLoader::load_resolved(&self.scenario, catalog)?;
        let budget = self.budget.unwrap_or(scenario.budget);

        println!("{} {}", style("Boss:").bold().cyan(), scenario.boss);
        for ally in &scenario.allies {
            println!("{} {}", style("Ally:").bold().cyan(), ally);
        }
        println!();

        let config = SimConfig::default().with_boss_turn_limit(budget);
        let simulation = Simulation::new(&scenario.allies, &scenario.boss, config)?;

        let outcome = if self.trace {
            let mut recorder = TraceRecorder::new();
            let outcome = simulation.run_with_observer(&mut recorder)?;
            for event in recorder.events() {
                if matches!(event, TraceEvent::Tick(_)) && !self.ticks {
                    continue;
                }
                println!("{event}");
            }
            println!();
            outcome
        } else {
            simulation.run()?
        };

        if outcome.is_success() {
            println!("{}", style("Run successful").bold().green());
        } else {
            println!(
                "{} {}",
                style("Run failed at boss turn").bold().red(),
                outcome.boss_turns
            );
        }

        Ok(())
    }
}
