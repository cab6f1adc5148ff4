//! Exhaustive roster search.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use search::SearchDriver;
use sim_content::{Catalog, ScenarioLoader};

/// Search the scenario's variable characters for surviving rosters
#[derive(Parser)]
pub struct Search {
    /// Scenario file (TOML) with a [search] section or ally speed ranges
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Worker threads (defaults to the scenario, then one per core)
    #[arg(short = 'j', long, value_name = "N")]
    threads: Option<usize>,

    /// Candidates between progress log lines
    #[arg(long, value_name = "N", default_value_t = SearchDriver::DEFAULT_PROGRESS_INTERVAL)]
    progress: u64,

    /// Only print the summary, not every solution
    #[arg(short, long)]
    quiet: bool,
}

impl Search {
    pub fn execute(self, catalog: &Catalog) -> Result<()> {
        let scenario = ScenarioLoader::load_resolved(&self.scenario, catalog)?;
        let has_sweeps = scenario.has_sweeps();
        let (variable, speeds, plan_threads) = match scenario.search {
            Some(plan) => (plan.variable, plan.speeds, plan.threads),
            None if has_sweeps => (Vec::new(), 0..0, None),
            None => anyhow::bail!(
                "Scenario {} has no [search] section and no ally speed ranges",
                self.scenario.display()
            ),
        };

        let mut driver =
            SearchDriver::new(scenario.boss, scenario.budget).with_progress_interval(self.progress);
        if let Some(threads) = self.threads.or(plan_threads) {
            driver = driver.with_threads(threads);
        }

        let report = driver.run_selections(&scenario.sweeps, &variable, speeds)?;

        if !self.quiet {
            for solution in &report.solutions {
                println!("{solution}");
            }
            if report.is_solved() {
                println!();
            }
        }

        println!(
            "{} {}",
            style("Candidates evaluated:").bold().cyan(),
            report.evaluated
        );
        println!(
            "{} {}",
            style("Solutions found:").bold().cyan(),
            report.solutions.len()
        );
        println!(
            "{} {} / {}",
            style("Best boss turns:").bold().cyan(),
            report.best_turns,
            report.budget
        );
        if !report.is_solved() {
            if let Some(best) = &report.best {
                println!("{} {best}", style("Best:").bold().cyan());
            }
        }

        Ok(())
    }
}
