use std::path::PathBuf;

use airdrop_cli::Artifact;
use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

#[derive(Parser, Debug)]
pub struct Args {
    /// Commitment artifact (JSON)
    #[arg(short = 't', long)]
    pub artifact: PathBuf,

    /// Recipient address (base58 or 0x-hex)
    #[arg(short, long)]
    pub address: String,
}

pub fn run(args: &Args) -> Result<()> {
    let artifact = Artifact::load(&args.artifact)?;
    let (address, record) = artifact.record(&args.address)?;

    let claim = json!({
        "merkleRoot": artifact.merkle_root,
        "address": address,
        "index": record.index,
        "amount": record.amount,
        "proof": record.proof,
    });
    let output = serde_json::to_string_pretty(&claim).context("Failed to serialize claim")?;
    println!("{}", output);
    Ok(())
}
