//! Compile the data set and report what was built.

use anyhow::Result;
use clap::Parser;
use console::style;

use super::{SourceArgs, compile};

/// Compile every table and report record counts
#[derive(Parser)]
pub struct Check {
    #[command(flatten)]
    source: SourceArgs,
}

impl Check {
    pub fn execute(self) -> Result<()> {
        let config = self.source.config()?;
        let (registry, counts) = compile(&config)?;

        println!(
            "{} {}",
            style("Data directory:").bold().cyan(),
            config.data_dir.display()
        );
        println!();

        println!("{}", style("Tables:").bold().yellow());
        for (table, records) in counts {
            println!(
                "  {:<12} {:>5} records {:>6} slots",
                table.to_string(),
                records,
                registry.slots(table)
            );
        }
        println!();

        let singletons = registry.singletons()?;
        println!("{}", style("Singleton kinds:").bold().yellow());
        for (name, kind) in [
            ("<unknown item>", singletons.unknown_item),
            ("<unknown treasure>", singletons.unknown_treasure),
            ("<pile>", singletons.pile),
            ("<curse object>", singletons.curse_object),
        ] {
            match kind {
                Some(kidx) => println!("  {name:<20} {kidx}"),
                None => println!("  {name:<20} {}", style("missing").red()),
            }
        }
        println!();

        println!("{}", style("OK").bold().green());
        Ok(())
    }
}
