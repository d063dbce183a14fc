use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use drop_commitment::{Allocation, ClaimEntry, Commitment, Digest};
use serde::{Deserialize, Serialize};

use crate::common::{hex_encode, parse_address, parse_digest, write_file_atomic};

/// The commitment as exchanged between the builder, ledger creation and
/// claimants. Amounts are base-unit strings so they survive JSON tooling
/// that reads numbers as doubles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub merkle_root: String,
    pub token_total: String,
    /// Keyed by canonical base58 address.
    pub claims: BTreeMap<String, ClaimRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub index: u64,
    pub amount: String,
    pub proof: Vec<String>,
}

impl From<&Commitment> for Artifact {
    fn from(commitment: &Commitment) -> Self {
        let claims = commitment
            .entries
            .iter()
            .map(|entry| {
                let record = ClaimRecord {
                    index: entry.allocation.index,
                    amount: entry.allocation.amount.to_string(),
                    proof: entry.proof.iter().map(hex_encode).collect(),
                };
                (entry.allocation.address.to_string(), record)
            })
            .collect();

        Self {
            merkle_root: hex_encode(commitment.root),
            token_total: commitment.token_total.to_string(),
            claims,
        }
    }
}

impl Artifact {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read artifact {:?}", path))?;
        serde_json::from_str(&content).context("Failed to parse artifact JSON")
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize artifact")?;
        write_file_atomic(path, &json).context("Failed to write artifact")
    }

    pub fn root(&self) -> Result<Digest> {
        parse_digest(&self.merkle_root).context("Invalid merkleRoot")
    }

    pub fn token_total(&self) -> Result<u64> {
        self.token_total
            .parse()
            .with_context(|| format!("Invalid tokenTotal '{}'", self.token_total))
    }

    /// Looks up a claim by any textual form of the address.
    pub fn record(&self, address: &str) -> Result<(String, &ClaimRecord)> {
        let canonical = parse_address(address)?.to_string();
        let record = self
            .claims
            .get(&canonical)
            .with_context(|| format!("Address {} not found in artifact", canonical))?;
        Ok((canonical, record))
    }

    /// Decodes every claim into typed entries, sorted by index.
    pub fn entries(&self) -> Result<Vec<ClaimEntry>> {
        let mut entries = self
            .claims
            .iter()
            .map(|(address, record)| {
                let allocation = Allocation {
                    index: record.index,
                    address: parse_address(address)?,
                    amount: record.amount.parse().with_context(|| {
                        format!("Invalid amount '{}' for {}", record.amount, address)
                    })?,
                };
                let proof = record
                    .proof
                    .iter()
                    .map(|node| parse_digest(node))
                    .collect::<Result<Vec<_>>>()
                    .with_context(|| format!("Invalid proof for {}", address))?;
                Ok(ClaimEntry { allocation, proof })
            })
            .collect::<Result<Vec<_>>>()?;
        entries.sort_by_key(|entry| entry.allocation.index);
        Ok(entries)
    }
}
