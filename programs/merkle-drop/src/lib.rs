use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod states;

use instructions::*;

declare_id!("HopC35nDjfRjRGYEvao9y3j3EN2iqtqKJ6Zkj6MaeshD");

#[program]
pub mod merkle_drop {
    use super::*;

    /// Creates the distributor, its claim bitmap and its vault. Fund the
    /// vault with the commitment's token total afterwards.
    pub fn initialize_distributor(
        ctx: Context<InitializeDistributor>,
        merkle_root: [u8; 32],
        max_total_claim: u64,
        num_leaves: u64,
    ) -> Result<()> {
        instructions::initialize_distributor(ctx, merkle_root, max_total_claim, num_leaves)
    }

    /// Pays `amount` to `recipient` once, given a proof that
    /// `(leaf_index, recipient, amount)` is under the committed root.
    /// Any signer may relay the claim.
    pub fn claim(
        ctx: Context<Claim>,
        leaf_index: u64,
        recipient: Pubkey,
        amount: u64,
        proof: Vec<[u8; 32]>,
    ) -> Result<()> {
        instructions::claim(ctx, leaf_index, recipient, amount, proof)
    }

    /// Authority only. Sweeps the vault to the treasury and closes the drop.
    pub fn end_airdrop(ctx: Context<EndAirdrop>) -> Result<()> {
        instructions::end_airdrop(ctx)
    }

    pub fn is_claimed(ctx: Context<IsClaimed>, leaf_index: u64) -> Result<bool> {
        instructions::is_claimed(ctx, leaf_index)
    }
}
