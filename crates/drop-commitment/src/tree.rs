use crate::{
    error::MerkleError,
    hash::{hash_nodes, Digest},
};

/// Binary Merkle tree kept level by level, leaves first.
///
/// Odd levels pair their last node with itself, so every leaf's proof has
/// exactly `depth()` siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    levels: Vec<Vec<Digest>>,
}

impl MerkleTree {
    pub fn from_leaves(leaves: Vec<Digest>) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }

        let mut levels = vec![leaves];
        while let Some(level) = levels.last().filter(|level| level.len() > 1) {
            let next_level = level
                .chunks(2)
                .map(|chunk| {
                    let left = &chunk[0];
                    let right = chunk.get(1).unwrap_or(left);
                    hash_nodes(left, right)
                })
                .collect();
            levels.push(next_level);
        }

        Ok(Self { levels })
    }

    pub fn root(&self) -> Digest {
        // from_leaves guarantees a non-empty top level
        self.levels[self.levels.len() - 1][0]
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    pub fn depth(&self) -> usize {
        self.levels.len() - 1
    }

    pub fn leaves(&self) -> &[Digest] {
        &self.levels[0]
    }

    /// Sibling hashes from the leaf at `index` up to (but excluding) the root.
    pub fn proof(&self, index: usize) -> Result<Vec<Digest>, MerkleError> {
        if index >= self.leaf_count() {
            return Err(MerkleError::IndexOutOfRange {
                index,
                leaves: self.leaf_count(),
            });
        }

        let mut proof = Vec::with_capacity(self.depth());
        let mut position = index;
        for level in &self.levels[..self.depth()] {
            let sibling = level.get(position ^ 1).unwrap_or(&level[position]);
            proof.push(*sibling);
            position /= 2;
        }

        Ok(proof)
    }
}

/// Replays `proof` from `leaf` at position `index` and returns the root it
/// implies, or `None` when `index` has bits above the proof length.
pub fn compute_root(leaf: Digest, index: u64, proof: &[Digest]) -> Option<Digest> {
    let mut computed = leaf;
    let mut position = index;
    for sibling in proof {
        computed = if position & 1 == 0 {
            hash_nodes(&computed, sibling)
        } else {
            hash_nodes(sibling, &computed)
        };
        position >>= 1;
    }

    (position == 0).then_some(computed)
}

pub fn verify_proof(root: &Digest, leaf: Digest, index: u64, proof: &[Digest]) -> bool {
    compute_root(leaf, index, proof).is_some_and(|computed| computed == *root)
}
