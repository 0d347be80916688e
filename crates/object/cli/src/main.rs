//! Object content compiler.
//!
//! Compiles the object data files and reports on the resulting tables.
//! Run with: `objc <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Check, Dump};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Object content compiler
#[derive(Parser)]
#[command(name = "objc")]
#[command(about = "Compiles and inspects object content tables", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Compile every table and report record counts
    Check(Check),

    /// Compile the data set and print one table
    Dump(Dump),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for OBJECT_DATA_DIR and friends)
    let _ = dotenvy::dotenv();

    setup_logging();

    let cli = Cli::parse();

    match cli.command {
        Command::Check(cmd) => cmd.execute(),
        Command::Dump(cmd) => cmd.execute(),
    }
}

/// Logs to stderr so table dumps on stdout stay clean.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
