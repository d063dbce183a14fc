#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod build_tree;
mod proof;
mod simulate;
mod verify;

#[derive(Parser, Debug)]
#[command(name = "airdrop")]
#[command(about = "Merkle drop commitment tools", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the commitment artifact from an allocation CSV
    #[command(name = "build")]
    BuildTree(build_tree::Args),
    /// Re-check every proof and the token total of an artifact
    Verify(verify::Args),
    /// Print the claim entry for one address
    Proof(proof::Args),
    /// Rehearse claims and close against an in-memory ledger
    Simulate(simulate::Args),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::BuildTree(args) => build_tree::run(&args)?,
        Commands::Verify(args) => verify::run(&args)?,
        Commands::Proof(args) => proof::run(&args)?,
        Commands::Simulate(args) => simulate::run(&args)?,
    }

    Ok(())
}
