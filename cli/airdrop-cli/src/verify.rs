use std::collections::HashSet;
use std::path::PathBuf;

use airdrop_cli::{read_allocations, Artifact};
use anyhow::{Context, Result};
use clap::Parser;
use drop_commitment::{verify_claim, Commitment};
use tracing::{info, warn};

#[derive(Parser, Debug)]
pub struct Args {
    /// Commitment artifact (JSON)
    #[arg(short, long)]
    pub artifact: PathBuf,

    /// Optionally rebuild from this allocation CSV and compare roots
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Token decimals used when rebuilding from `--input`
    #[arg(short, long, default_value_t = 0)]
    pub decimals: u8,
}

/// Summary of a successful check.
#[derive(Debug, PartialEq, Eq)]
pub struct Report {
    pub claims: usize,
    pub token_total: u64,
}

pub fn check(artifact: &Artifact) -> Result<Report> {
    let root = artifact.root()?;
    let token_total = artifact.token_total()?;
    let entries = artifact.entries()?;

    let mut indices = HashSet::with_capacity(entries.len());
    let mut failures = 0usize;
    let mut sum = 0u64;
    for entry in &entries {
        let a = entry.allocation;
        if !indices.insert(a.index) {
            anyhow::bail!("Index {} appears more than once", a.index);
        }
        if !verify_claim(&root, a.index, &a.address, a.amount, &entry.proof) {
            warn!("Proof does not verify for index {} ({})", a.index, a.address);
            failures += 1;
        }
        sum = sum
            .checked_add(a.amount)
            .context("Claim amounts overflow u64")?;
    }

    if failures > 0 {
        anyhow::bail!("{} of {} proofs failed verification", failures, entries.len());
    }
    if sum != token_total {
        anyhow::bail!(
            "tokenTotal mismatch: artifact says {}, claims sum to {}",
            token_total,
            sum
        );
    }

    Ok(Report {
        claims: entries.len(),
        token_total,
    })
}

pub fn run(args: &Args) -> Result<()> {
    info!("Loading artifact from {:?}", args.artifact);
    let artifact = Artifact::load(&args.artifact)?;
    let report = check(&artifact)?;

    if let Some(input) = &args.input {
        info!("Rebuilding commitment from {:?}", input);
        let allocations = read_allocations(input, args.decimals)?;
        let rebuilt = Commitment::build(&allocations).context("Failed to rebuild commitment")?;
        if rebuilt.root != artifact.root()? {
            anyhow::bail!("Rebuilt root does not match artifact merkleRoot");
        }
    }

    println!(
        "OK: {} claims verified against {}, token total {}",
        report.claims, artifact.merkle_root, report.token_total
    );
    Ok(())
}
