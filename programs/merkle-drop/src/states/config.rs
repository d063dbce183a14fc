use anchor_lang::prelude::*;
use drop_commitment::bitmap;

use crate::constants::{DISCRIMINATOR_SIZE, MAX_BITMAP_BYTES};
use crate::errors::MerkleDropError;

/// Main distributor state account
#[account]
pub struct MerkleDistributor {
    /// Administrator who may end the drop
    pub authority: Pubkey,          // 32 bytes

    /// Mint of the distributed token
    pub mint: Pubkey,               // 32 bytes

    /// Merkle root committed at creation; never changes
    pub root: [u8; 32],             // 32 bytes

    /// Token vault holding the airdrop funds
    pub vault: Pubkey,              // 32 bytes

    /// Token account that receives the sweep on close
    pub treasury: Pubkey,           // 32 bytes

    /// Bitmap account for tracking claims
    pub bitmap_account: Pubkey,     // 32 bytes

    /// Upper bound on the sum of all claims (the commitment's token total)
    pub max_total_claim: u64,       // 8 bytes

    /// Number of leaves in the committed tree
    pub num_leaves: u64,            // 8 bytes

    /// Total amount paid out by claims so far
    pub total_amount_claimed: u64,  // 8 bytes

    /// Number of claims paid so far
    pub num_claimed: u64,           // 8 bytes

    /// Set once by `end_airdrop`; never cleared
    pub closed: bool,               // 1 byte

    /// Bump seed for PDA verification
    pub bump: u8,                   // 1 byte
}

impl MerkleDistributor {
    /// Calculate account size for rent
    pub const LEN: usize = DISCRIMINATOR_SIZE +
        32 +                         // authority
        32 +                         // mint
        32 +                         // root
        32 +                         // vault
        32 +                         // treasury
        32 +                         // bitmap_account
        8 * 4 +                      // max_total_claim, num_leaves, totals
        1 +                          // closed
        1;                           // bump
}

/// Bitmap to track which indices have claimed
#[account]
pub struct ClaimBitmap {
    /// One bit per leaf (1 = claimed, 0 = not claimed), sized at creation
    pub claimed: Vec<u8>,
}

impl ClaimBitmap {
    /// Account size for a tree with `num_leaves` leaves
    pub fn space(num_leaves: u64) -> usize {
        DISCRIMINATOR_SIZE + 4 + bitmap::bytes_for(num_leaves)
    }

    /// Rejects leaf counts that cannot be tracked in one bitmap account
    pub fn validate_size(num_leaves: u64) -> Result<()> {
        require!(
            num_leaves > 0 && bitmap::bytes_for(num_leaves) <= MAX_BITMAP_BYTES,
            MerkleDropError::InvalidBitmapSize
        );
        Ok(())
    }

    /// Check if a leaf index has been claimed
    pub fn is_claimed(&self, index: u64) -> bool {
        bitmap::is_set(&self.claimed, index)
    }

    /// Mark a leaf index as claimed
    pub fn set_claimed(&mut self, index: u64) -> Result<()> {
        require!(
            bitmap::try_set(&mut self.claimed, index),
            MerkleDropError::InvalidLeafIndex
        );
        Ok(())
    }
}
