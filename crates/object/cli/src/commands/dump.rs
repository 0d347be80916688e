//! Print a compiled table.

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use object_content::{ContentRegistry, TableKind};
use serde::Serialize;

use super::{SourceArgs, compile, parse_table};

/// Compile the data set and print one table
#[derive(Parser)]
pub struct Dump {
    /// Table to print (e.g. object, ego_item)
    #[arg(value_name = "TABLE", value_parser = parse_table)]
    table: TableKind,

    #[command(flatten)]
    source: SourceArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per declared record
    Summary,
    /// Full JSON output
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl Dump {
    pub fn execute(self) -> Result<()> {
        let config = self.source.config()?;
        let (registry, _) = compile(&config)?;

        match self.format {
            OutputFormat::Summary => print_summary(&registry, self.table),
            OutputFormat::Json => print_json(&registry, self.table),
            OutputFormat::Debug => print_debug(&registry, self.table),
        }
    }
}

fn print_summary(registry: &ContentRegistry, table: TableKind) -> Result<()> {
    println!(
        "{} {} ({} slots)",
        style("Table:").bold().cyan(),
        table,
        registry.slots(table)
    );
    println!();

    match table {
        TableKind::ObjectBase => {
            for base in registry.object_bases()?.iter().filter(|b| b.is_declared()) {
                println!(
                    "  {:<12} {:<16} break {}%",
                    base.tval.to_string(),
                    base.name.as_deref().unwrap_or("-"),
                    base.break_perc
                );
            }
        }
        TableKind::Slay => {
            for (index, slay) in registry.slays()?.iter().enumerate().skip(1) {
                let target = slay.race_flag.as_deref().or(slay.base.as_deref());
                println!(
                    "  {index:>3} {:<10} x{} vs {}",
                    slay.code,
                    slay.multiplier,
                    target.unwrap_or("-")
                );
            }
        }
        TableKind::Brand => {
            for (index, brand) in registry.brands()?.iter().enumerate().skip(1) {
                println!("  {index:>3} {:<10} x{} {}", brand.code, brand.multiplier, brand.name);
            }
        }
        TableKind::Curse => {
            for (index, curse) in registry.curses()?.iter().enumerate().skip(1) {
                println!("  {index:>3} {:<16} {}", curse.name, curse.desc);
            }
        }
        TableKind::Activation => {
            for activation in registry.activations()?.iter().skip(1) {
                println!(
                    "  {:>3} {:<20} power {}",
                    activation.index.0, activation.name, activation.power
                );
            }
        }
        TableKind::Object => {
            for kind in registry.kinds()?.iter_declared() {
                println!(
                    "  {:>4} {:<12} {:>3} {}",
                    kind.kidx.0,
                    kind.tval.to_string(),
                    kind.sval,
                    kind.name
                );
            }
        }
        TableKind::EgoItem => {
            for ego in registry.egos()?.iter_declared() {
                println!(
                    "  {:>4} {:<24} {} kinds",
                    ego.eidx.0,
                    ego.name,
                    ego.possible.len()
                );
            }
        }
        TableKind::Artifact => {
            for artifact in registry.artifacts()?.iter_declared() {
                println!(
                    "  {:>4} {:<24} {}:{}",
                    artifact.aidx.0, artifact.name, artifact.tval, artifact.sval
                );
            }
        }
    }

    Ok(())
}

fn print_json(registry: &ContentRegistry, table: TableKind) -> Result<()> {
    fn emit<T: Serialize + ?Sized>(records: &T) -> Result<()> {
        let json =
            serde_json::to_string_pretty(records).context("Failed to serialize table to JSON")?;
        println!("{}", json);
        Ok(())
    }

    match table {
        TableKind::ObjectBase => emit(registry.object_bases()?),
        TableKind::Slay => emit(registry.slays()?),
        TableKind::Brand => emit(registry.brands()?),
        TableKind::Curse => emit(registry.curses()?),
        TableKind::Activation => emit(registry.activations()?),
        TableKind::Object => emit(registry.kinds()?.as_slice()),
        TableKind::EgoItem => emit(registry.egos()?.as_slice()),
        TableKind::Artifact => emit(registry.artifacts()?.as_slice()),
    }
}

fn print_debug(registry: &ContentRegistry, table: TableKind) -> Result<()> {
    match table {
        TableKind::ObjectBase => println!("{:#?}", registry.object_bases()?),
        TableKind::Slay => println!("{:#?}", registry.slays()?),
        TableKind::Brand => println!("{:#?}", registry.brands()?),
        TableKind::Curse => println!("{:#?}", registry.curses()?),
        TableKind::Activation => println!("{:#?}", registry.activations()?),
        TableKind::Object => println!("{:#?}", registry.kinds()?.as_slice()),
        TableKind::EgoItem => println!("{:#?}", registry.egos()?.as_slice()),
        TableKind::Artifact => println!("{:#?}", registry.artifacts()?.as_slice()),
    }
    Ok(())
}
