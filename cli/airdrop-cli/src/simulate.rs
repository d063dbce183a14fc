use std::collections::HashSet;
use std::path::PathBuf;

use airdrop_cli::Artifact;
use anyhow::{Context, Result};
use clap::Parser;
use drop_commitment::{ClaimLedger, LedgerConfig, MemoryVault, TokenVault};
use solana_program::pubkey::Pubkey;
use tracing::{debug, info};

#[derive(Parser, Debug)]
pub struct Args {
    /// Commitment artifact (JSON)
    #[arg(short, long)]
    pub artifact: PathBuf,

    /// Leaf indices to leave unclaimed before closing
    #[arg(short, long)]
    pub skip: Vec<u64>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Outcome {
    pub claimed: u64,
    pub total_amount_claimed: u64,
    pub swept: u64,
}

/// Funds a fresh ledger with `tokenTotal`, claims every entry not in `skip`,
/// then closes it. Fails if any claim is rejected or the books don't balance.
pub fn rehearse(artifact: &Artifact, skip: &HashSet<u64>) -> Result<Outcome> {
    let token_total = artifact.token_total()?;
    let administrator = Pubkey::new_unique();
    let treasury = Pubkey::new_unique();
    let mut ledger = ClaimLedger::new(
        LedgerConfig {
            root: artifact.root()?,
            administrator,
            treasury,
            max_total_claim: token_total,
        },
        MemoryVault::funded(token_total),
    );

    for entry in artifact.entries()? {
        let a = entry.allocation;
        if skip.contains(&a.index) {
            debug!("Skipping index {}", a.index);
            continue;
        }
        ledger
            .claim(a.index, &a.address, a.amount, &entry.proof)
            .with_context(|| format!("Claim for index {} ({}) rejected", a.index, a.address))?;
        if ledger.vault().balance_of(&a.address) != a.amount {
            anyhow::bail!("Recipient {} was not paid {}", a.address, a.amount);
        }
    }

    let remaining = ledger.vault().balance();
    let swept = ledger.close(&administrator).context("Close rejected")?;
    if swept != remaining || ledger.vault().balance_of(&treasury) != swept {
        anyhow::bail!("Sweep moved {} but the vault held {}", swept, remaining);
    }

    let total_amount_claimed = ledger.total_amount_claimed();
    let accounted = total_amount_claimed
        .checked_add(swept)
        .context("Claimed plus swept overflows u64")?;
    if accounted != token_total {
        anyhow::bail!(
            "Conservation violated: claimed {} + swept {} != tokenTotal {}",
            total_amount_claimed,
            swept,
            token_total
        );
    }

    Ok(Outcome {
        claimed: ledger.num_claimed(),
        total_amount_claimed,
        swept,
    })
}

pub fn run(args: &Args) -> Result<()> {
    info!("Loading artifact from {:?}", args.artifact);
    let artifact = Artifact::load(&args.artifact)?;
    let skip: HashSet<u64> = args.skip.iter().copied().collect();

    info!("Rehearsing {} claims, skipping {}", artifact.claims.len(), skip.len());
    let outcome = rehearse(&artifact, &skip)?;

    println!("Claims paid: {}", outcome.claimed);
    println!("Amount claimed: {}", outcome.total_amount_claimed);
    println!("Swept to treasury: {}", outcome.swept);
    Ok(())
}
