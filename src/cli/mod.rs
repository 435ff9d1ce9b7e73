//! Command-line interface for layerconf
//!
//! Provides `get`, `show`, and `completions` subcommands over the merged
//! configuration view.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod completions;
mod get;
mod show;
mod utils;

/// Inspect layered YAML configuration
#[derive(Parser)]
#[command(name = "layerconf")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the value at a dotted path in the merged configuration
    Get(get::GetArgs),

    /// Print the whole merged configuration tree
    Show(show::ShowArgs),

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Wire verbose flag to the tracing log level.
    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Get(args) => get::run(args),
        Commands::Show(args) => show::run(args),
        Commands::Completions(args) => completions::run(args),
    }
}
