use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};
use crate::constants::*;
use crate::states::*;
use crate::events::*;
use crate::errors::*;

#[derive(Accounts)]
#[instruction(merkle_root: [u8; 32], max_total_claim: u64, num_leaves: u64)]
pub struct InitializeDistributor<'info> {
    // Step 1: Authority pays for account creation, signs, and becomes the administrator
    #[account(mut)]
    pub authority: Signer<'info>,

    // Step 2: Mint of the token being distributed
    pub mint: Account<'info, Mint>,

    // Step 3: Create distributor PDA (one per mint and authority)
    #[account(
        init,
        payer = authority,
        space = MerkleDistributor::LEN,
        seeds = [DISTRIBUTOR_SEED, mint.key().as_ref(), authority.key().as_ref()],
        bump
    )]
    pub distributor: Account<'info, MerkleDistributor>,

    // Step 4: Create bitmap PDA sized for every leaf of the tree
    #[account(
        init,
        payer = authority,
        space = ClaimBitmap::space(num_leaves),
        seeds = [BITMAP_SEED, distributor.key().as_ref()],
        bump
    )]
    pub bitmap: Account<'info, ClaimBitmap>,

    // Step 5: Create the vault token account, owned by the distributor PDA
    #[account(
        init,
        payer = authority,
        token::mint = mint,
        token::authority = distributor,
        seeds = [VAULT_SEED, distributor.key().as_ref()],
        bump
    )]
    pub vault: Account<'info, TokenAccount>,

    // Step 6: Treasury token account that receives the sweep on close
    #[account(
        constraint = treasury.mint == mint.key() @ MerkleDropError::TreasuryMismatch
    )]
    pub treasury: Account<'info, TokenAccount>,

    // Step 7: Programs for account creation
    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn initialize_distributor(
    ctx: Context<InitializeDistributor>,
    merkle_root: [u8; 32],
    max_total_claim: u64,
    num_leaves: u64,
) -> Result<()> {
    // Step 1: Reject leaf counts the bitmap cannot track
    ClaimBitmap::validate_size(num_leaves)?;

    // Step 2: Record the commitment and its parameters; the root is never written again
    let distributor = &mut ctx.accounts.distributor;
    distributor.authority = ctx.accounts.authority.key();
    distributor.mint = ctx.accounts.mint.key();
    distributor.root = merkle_root;
    distributor.vault = ctx.accounts.vault.key();
    distributor.treasury = ctx.accounts.treasury.key();
    distributor.bitmap_account = ctx.accounts.bitmap.key();
    distributor.max_total_claim = max_total_claim;
    distributor.num_leaves = num_leaves;
    distributor.total_amount_claimed = 0;
    distributor.num_claimed = 0;
    distributor.closed = false;
    distributor.bump = ctx.bumps.distributor;

    // Step 3: Initialize the bitmap with one zeroed bit per leaf
    let bitmap = &mut ctx.accounts.bitmap;
    bitmap.claimed = vec![0u8; drop_commitment::bitmap::bytes_for(num_leaves)];

    // Step 4: Emit initialization event
    let clock = Clock::get()?;
    emit!(DistributorInitialized {
        authority: distributor.authority,
        distributor: distributor.key(),
        vault: distributor.vault,
        treasury: distributor.treasury,
        merkle_root,
        max_total_claim,
        num_leaves,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Distributor initialized with root: {:?}, leaves: {}, total: {}",
        merkle_root,
        num_leaves,
        max_total_claim
    );

    Ok(())
}
