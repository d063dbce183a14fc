use std::collections::HashSet;

use solana_program::pubkey::Pubkey;

use crate::{
    error::MerkleError,
    hash::{leaf_hash, Digest},
    tree::{verify_proof, MerkleTree},
};

/// One committed entry of the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    pub index: u64,
    pub address: Pubkey,
    pub amount: u64,
}

impl Allocation {
    pub fn leaf_hash(&self) -> Digest {
        leaf_hash(self.index, &self.address, self.amount)
    }
}

/// An allocation together with the proof that places it under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimEntry {
    pub allocation: Allocation,
    pub proof: Vec<Digest>,
}

/// Output of the builder: everything the ledger and the claimants need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commitment {
    pub root: Digest,
    pub token_total: u64,
    pub entries: Vec<ClaimEntry>,
}

impl Commitment {
    /// Builds the commitment over `(address, amount)` pairs; the index of each
    /// allocation is its position in `allocations`.
    ///
    /// An address may appear only once: claims are looked up by address, so a
    /// second index for the same address would be unreachable.
    pub fn build(allocations: &[(Pubkey, u64)]) -> Result<Self, MerkleError> {
        if allocations.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let mut seen = HashSet::with_capacity(allocations.len());
        let mut token_total = 0u64;
        let mut leaves = Vec::with_capacity(allocations.len());
        let mut entries = Vec::with_capacity(allocations.len());

        for (position, (address, amount)) in allocations.iter().enumerate() {
            if !seen.insert(*address) {
                return Err(MerkleError::DuplicateAddress {
                    index: position,
                    address: address.to_string(),
                });
            }
            token_total = token_total
                .checked_add(*amount)
                .ok_or(MerkleError::ArithmeticOverflow)?;

            let allocation = Allocation {
                index: position as u64,
                address: *address,
                amount: *amount,
            };
            leaves.push(allocation.leaf_hash());
            entries.push(ClaimEntry {
                allocation,
                proof: Vec::new(),
            });
        }

        let tree = MerkleTree::from_leaves(leaves)?;
        for (position, entry) in entries.iter_mut().enumerate() {
            entry.proof = tree.proof(position)?;
        }

        Ok(Self {
            root: tree.root(),
            token_total,
            entries,
        })
    }

    pub fn entry(&self, address: &Pubkey) -> Option<&ClaimEntry> {
        self.entries
            .iter()
            .find(|entry| entry.allocation.address == *address)
    }
}

/// Checks that `(index, address, amount)` sits under `root` via `proof`.
/// A wrong index, address, amount, or proof all fail the same way.
pub fn verify_claim(
    root: &Digest,
    index: u64,
    address: &Pubkey,
    amount: u64,
    proof: &[Digest],
) -> bool {
    verify_proof(root, leaf_hash(index, address, amount), index, proof)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allocations(count: usize) -> Vec<(Pubkey, u64)> {
        (0..count)
            .map(|i| (Pubkey::new_unique(), 1_000 + i as u64))
            .collect()
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(Commitment::build(&[]), Err(MerkleError::EmptyInput));
    }

    #[test]
    fn test_duplicate_address_rejected() {
        let address = Pubkey::new_unique();
        let result = Commitment::build(&[(address, 1), (Pubkey::new_unique(), 2), (address, 3)]);
        assert!(matches!(
            result,
            Err(MerkleError::DuplicateAddress { index: 2, .. })
        ));
    }

    #[test]
    fn test_token_total_overflow() {
        let result = Commitment::build(&[
            (Pubkey::new_unique(), u64::MAX),
            (Pubkey::new_unique(), 1),
        ]);
        assert_eq!(result, Err(MerkleError::ArithmeticOverflow));
    }

    #[test]
    fn test_build_assigns_positions_and_total() {
        let input = allocations(5);
        let commitment = Commitment::build(&input).unwrap();
        assert_eq!(commitment.token_total, 1_000 * 5 + 10);
        for (position, entry) in commitment.entries.iter().enumerate() {
            assert_eq!(entry.allocation.index, position as u64);
            assert_eq!(entry.allocation.address, input[position].0);
            assert_eq!(entry.proof.len(), 3);
        }
    }

    #[test]
    fn test_every_entry_verifies() {
        let commitment = Commitment::build(&allocations(11)).unwrap();
        for entry in &commitment.entries {
            let a = entry.allocation;
            assert!(verify_claim(&commitment.root, a.index, &a.address, a.amount, &entry.proof));
        }
    }

    #[test]
    fn test_entry_lookup() {
        let input = allocations(3);
        let commitment = Commitment::build(&input).unwrap();
        assert_eq!(commitment.entry(&input[1].0).unwrap().allocation.index, 1);
        assert!(commitment.entry(&Pubkey::new_unique()).is_none());
    }
}
