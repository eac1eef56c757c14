//! resmod CLI - TypeScript declarations for css and svg resources.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use commands::generate::GenerateArgs;
use commands::inspect::InspectArgs;

#[derive(Parser)]
#[command(name = "resmod")]
#[command(about = "Generate TypeScript declarations for css and svg resource modules")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to resmod.toml config file
    #[arg(short, long, global = true, default_value = "resmod.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate declaration files
    Generate(GenerateArgs),

    /// Generate, then regenerate whenever a resource changes
    Watch(GenerateArgs),

    /// Print the identifiers found in a single resource as JSON
    Inspect(InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Generate(args) => {
            commands::generate::run(args, &cli.config)?;
        }
        Commands::Watch(args) => {
            commands::watch::run(args, &cli.config)?;
        }
        Commands::Inspect(args) => {
            commands::inspect::run(args, &cli.config)?;
        }
    }

    Ok(())
}
