use solana_program::{keccak::hashv, pubkey::Pubkey};

pub type Digest = [u8; 32];

/// Domain prefix for leaf hashes.
pub const LEAF_PREFIX: &[u8] = &[0];
/// Domain prefix for internal nodes, so a leaf can never be replayed as a branch.
pub const NODE_PREFIX: &[u8] = &[1];

/// Leaf = keccak256(0x00 || index_le || address || amount_le)
pub fn leaf_hash(index: u64, address: &Pubkey, amount: u64) -> Digest {
    hashv(&[
        LEAF_PREFIX,
        &index.to_le_bytes(),
        address.as_ref(),
        &amount.to_le_bytes(),
    ])
    .0
}

/// Node = keccak256(0x01 || left || right). Children are never sorted;
/// `left` is always the child at the even position.
pub fn hash_nodes(left: &Digest, right: &Digest) -> Digest {
    hashv(&[NODE_PREFIX, left, right]).0
}
