//! Ladder CLI - Command-line interface for the ladder synth.

mod commands;
mod patch_source;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ladder")]
#[command(author, version, about = "Monophonic ladder synth CLI", long_about = None)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a note sequence to a WAV file
    Render(commands::render::RenderArgs),

    /// List synth parameters
    Params(commands::params::ParamsArgs),

    /// Create, inspect and list patches
    Patch(commands::patch::PatchArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Params(args) => commands::params::run(args),
        Commands::Patch(args) => commands::patch::run(args),
    }
}
