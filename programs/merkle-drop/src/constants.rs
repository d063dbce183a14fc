/// Program constants for the Merkle drop

/// PDA seed for the distributor account
pub const DISTRIBUTOR_SEED: &[u8] = b"distributor";

/// PDA seed for the bitmap account
pub const BITMAP_SEED: &[u8] = b"bitmap";

/// PDA seed for the token vault
pub const VAULT_SEED: &[u8] = b"vault";

/// Longest proof accepted by `claim` (trees of up to 2^32 leaves)
pub const MAX_PROOF_LEN: usize = 32;

/// Largest bitmap that can be allocated in a single `init` (CPI account
/// creation is capped at 10 KiB including the discriminator and vec prefix)
pub const MAX_BITMAP_BYTES: usize = 10_240 - DISCRIMINATOR_SIZE - 4;

/// Account discriminator size (Anchor adds this automatically)
pub const DISCRIMINATOR_SIZE: usize = 8;
