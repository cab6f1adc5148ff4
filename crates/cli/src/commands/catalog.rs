//! List catalogue content.

use anyhow::Result;
use clap::Parser;
use console::style;
use sim_content::{BossPreset, Catalog};

/// List characters and abilities
#[derive(Parser)]
pub struct ListCatalog {
    /// Also print every ability's cooldown, effects and statuses
    #[arg(short, long)]
    abilities: bool,
}

impl ListCatalog {
    pub fn execute(self, catalog: &Catalog) -> Result<()> {
        println!("{}", style("Characters:").bold().cyan());
        for (id, character) in catalog.characters() {
            let names: Vec<&str> = character
                .abilities
                .iter()
                .map(|ability| ability.name.as_str())
                .collect();
            let passive = match character.passive {
                Some(passive) => format!(" (averts enrage, cooldown {})", passive.cooldown),
                None => String::new(),
            };
            println!("  {id}: {}{passive}", names.join(", "));
        }

        println!();
        println!("{}", style("Boss presets:").bold().cyan());
        for preset in BossPreset::ALL {
            println!(
                "  {}: {} at speed {}",
                preset.name, preset.character, preset.speed
            );
        }

        if self.abilities {
            println!();
            println!("{}", style("Abilities:").bold().cyan());
            for ability in catalog.abilities() {
                println!(
                    "  {}: cooldown {}, effects {:?}, buffs {:?}, debuffs {:?}",
                    ability.name, ability.cooldown, ability.effects, ability.buffs, ability.debuffs
                );
            }
        }

        Ok(())
    }
}
