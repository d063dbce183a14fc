use anchor_lang::prelude::*;

/// Event emitted when a distributor is initialized
#[event]
pub struct DistributorInitialized {
    pub authority: Pubkey,
    pub distributor: Pubkey,
    pub vault: Pubkey,
    pub treasury: Pubkey,
    pub merkle_root: [u8; 32],
    pub max_total_claim: u64,
    pub num_leaves: u64,
    pub timestamp: i64,
}

/// Event emitted when an allocation is claimed
#[event]
pub struct Claimed {
    pub distributor: Pubkey,
    /// Signer that submitted the claim; may be a relayer
    pub claimant: Pubkey,
    /// Address the allocation was committed to and paid out to
    pub recipient: Pubkey,
    pub leaf_index: u64,
    pub amount: u64,
    pub timestamp: i64,
}

/// Event emitted when the authority ends the drop and sweeps the vault
#[event]
pub struct AirdropEnded {
    pub distributor: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
