//! verihash - Desktop checksum verifier
//!
//! Entry point for CLI and GUI modes.

mod cli;
mod config;
mod core;
mod gui;

use clap::Parser;
use cli::{Args, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    // Handle subcommands first
    if let Some(command) = args.command {
        return handle_command(command).await;
    }

    if args.list {
        // List supported algorithms
        cli::list_algorithms();
    } else {
        // GUI mode: Start the verifier UI
        tracing::info!("Starting verihash GUI");
        gui::run()?;
    }

    Ok(())
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Digest {
            file,
            algorithm,
            save,
        } => cli::digest_file(file, algorithm, save).await,
        Commands::Verify {
            file,
            expected,
            algorithm,
        } => cli::verify_file(file, expected, algorithm).await,
        Commands::Check { checksum_file } => cli::check_file(checksum_file).await,
    }
}
