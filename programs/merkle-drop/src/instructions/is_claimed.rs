use anchor_lang::prelude::*;
use crate::constants::*;
use crate::states::*;

#[derive(Accounts)]
pub struct IsClaimed<'info> {
    pub distributor: Account<'info, MerkleDistributor>,

    #[account(
        seeds = [BITMAP_SEED, distributor.key().as_ref()],
        bump
    )]
    pub bitmap: Account<'info, ClaimBitmap>,
}

/// Read-only view; the answer is returned through return data and stays
/// available after the drop is ended.
pub fn is_claimed(ctx: Context<IsClaimed>, leaf_index: u64) -> Result<bool> {
    Ok(ctx.accounts.bitmap.is_claimed(leaf_index))
}
