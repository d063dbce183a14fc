//! Shared primitives for the merkle-drop program and its off-chain builder.
//!
//! Leaves are `keccak256(0x00 || index_le || address || amount_le)` and
//! internal nodes `keccak256(0x01 || left || right)`, concatenated by
//! position. Odd levels pair their last node with itself.

pub mod bitmap;
pub mod commitment;
pub mod error;
pub mod hash;
pub mod ledger;
pub mod tree;

pub use bitmap::ClaimBitmap;
pub use commitment::{verify_claim, Allocation, ClaimEntry, Commitment};
pub use error::{LedgerError, MerkleError};
pub use hash::{hash_nodes, leaf_hash, Digest};
pub use ledger::{ClaimLedger, LedgerConfig, LedgerEvent, MemoryVault, TokenVault};
pub use tree::{compute_root, verify_proof, MerkleTree};
