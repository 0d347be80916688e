//! Command implementations for objc
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod check;
mod dump;

pub use check::Check;
pub use dump::Dump;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use object_content::{CompilerConfig, ContentRegistry, DataDir, TableKind};

/// Where the data set comes from.
#[derive(Args)]
pub struct SourceArgs {
    /// Compiler config file (TOML); environment settings apply otherwise
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the `<table>.txt` files
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Table whose data file may be missing (repeatable)
    #[arg(long = "optional", value_name = "TABLE", value_parser = parse_table)]
    optional: Vec<TableKind>,
}

impl SourceArgs {
    /// Resolves the compiler config: file or environment, then flags.
    pub fn config(&self) -> Result<CompilerConfig> {
        let mut config = match &self.config {
            Some(path) => CompilerConfig::load(path)?,
            None => CompilerConfig::from_env()?,
        };
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        config.optional_tables.extend(self.optional.iter().copied());
        Ok(config)
    }
}

pub fn parse_table(name: &str) -> Result<TableKind, String> {
    name.parse()
        .map_err(|_| format!("unknown table '{name}'"))
}

/// Compiles every table in load order, returning the records declared per
/// table.
pub fn compile(config: &CompilerConfig) -> Result<(ContentRegistry, Vec<(TableKind, usize)>)> {
    let source = DataDir::new(&config.data_dir);
    let mut registry = ContentRegistry::new();
    let mut counts = Vec::with_capacity(TableKind::ORDER.len());

    tracing::info!("Compiling object data from {}", config.data_dir.display());
    for table in TableKind::ORDER {
        let records = registry
            .load_table(table, &source, config.is_optional(table))
            .with_context(|| format!("Failed to compile {}", source.path(table).display()))?;
        counts.push((table, records));
    }

    Ok((registry, counts))
}
