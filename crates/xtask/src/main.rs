//! Development tasks for the forge workspace
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Validate};

/// Development tasks for the forge workspace
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for forge content", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Load a content directory and report problems
    Validate(Validate),

    /// Rebuild a saved artifact and print its state
    Inspect(Inspect),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for FORGE_CONTENT_DIR and other env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Validate(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
    }
}
