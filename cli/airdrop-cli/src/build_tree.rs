use std::path::PathBuf;

use airdrop_cli::{read_allocations, Artifact};
use anyhow::{Context, Result};
use clap::Parser;
use drop_commitment::Commitment;
use tracing::info;

#[derive(Parser, Debug)]
pub struct Args {
    /// Allocation CSV with `address,amount` header
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output file for the commitment artifact (JSON)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Token decimals; when set, amounts may be decimal token amounts
    #[arg(short, long, default_value_t = 0)]
    pub decimals: u8,
}

pub fn run(args: &Args) -> Result<()> {
    info!("Reading allocations from {:?}", args.input);
    let allocations = read_allocations(&args.input, args.decimals)?;
    info!("Total allocations: {}", allocations.len());

    info!("Building Merkle tree...");
    let commitment = Commitment::build(&allocations).context("Failed to build commitment")?;
    let artifact = Artifact::from(&commitment);

    info!("Writing artifact to {:?}", args.output);
    artifact.save(&args.output)?;

    println!("Merkle root: {}", artifact.merkle_root);
    println!("Token total: {}", artifact.token_total);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_program::pubkey::Pubkey;
    use std::fs;

    #[test]
    fn test_build_writes_verifiable_artifact() {
        let dir = std::env::temp_dir().join(format!("airdrop-build-{}", Pubkey::new_unique()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("rewards.csv");
        let output = dir.join("result.json");

        let addresses: Vec<Pubkey> = (0..7).map(|_| Pubkey::new_unique()).collect();
        let mut csv = String::from("address,amount\n");
        for (i, address) in addresses.iter().enumerate() {
            csv.push_str(&format!("{},{}.5\n", address, i));
        }
        fs::write(&input, csv).unwrap();

        run(&Args {
            input: input.clone(),
            output: output.clone(),
            decimals: 1,
        })
        .unwrap();

        let artifact = Artifact::load(&output).unwrap();
        assert_eq!(artifact.token_total().unwrap(), (0..7).map(|i| i * 10 + 5).sum::<u64>());
        assert_eq!(artifact.claims.len(), 7);
        assert_eq!(artifact.claims[&addresses[4].to_string()].index, 4);
        assert_eq!(artifact.claims[&addresses[4].to_string()].amount, "45");
        assert!(!output.with_extension("tmp").exists());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_build_fails_without_writing_on_bad_row() {
        let dir = std::env::temp_dir().join(format!("airdrop-build-{}", Pubkey::new_unique()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("rewards.csv");
        let output = dir.join("result.json");
        fs::write(
            &input,
            format!("address,amount\n{},1\nnot-an-address,2\n", Pubkey::new_unique()),
        )
        .unwrap();

        let result = run(&Args {
            input,
            output: output.clone(),
            decimals: 0,
        });
        assert!(result.is_err());
        assert!(!output.exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
