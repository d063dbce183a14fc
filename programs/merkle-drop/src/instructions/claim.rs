use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use drop_commitment::verify_claim;
use crate::constants::*;
use crate::states::*;
use crate::events::*;
use crate::errors::*;

#[derive(Accounts)]
#[instruction(leaf_index: u64, recipient: Pubkey)]
pub struct Claim<'info> {
    // Step 1: Distributor must exist and match its PDA
    #[account(
        mut,
        seeds = [DISTRIBUTOR_SEED, distributor.mint.as_ref(), distributor.authority.as_ref()],
        bump = distributor.bump
    )]
    pub distributor: Account<'info, MerkleDistributor>,

    // Step 2: Bitmap must exist and match distributor
    #[account(
        mut,
        seeds = [BITMAP_SEED, distributor.key().as_ref()],
        bump,
        constraint = bitmap.key() == distributor.bitmap_account
    )]
    pub bitmap: Account<'info, ClaimBitmap>,

    // Step 3: Vault must match distributor's vault
    #[account(
        mut,
        constraint = vault.key() == distributor.vault @ MerkleDropError::VaultMismatch
    )]
    pub vault: Account<'info, TokenAccount>,

    // Step 4: Tokens always go to the committed recipient, never to the signer
    #[account(
        mut,
        constraint = recipient_token_account.owner == recipient @ MerkleDropError::RecipientMismatch,
        constraint = recipient_token_account.mint == distributor.mint @ MerkleDropError::RecipientMismatch
    )]
    pub recipient_token_account: Account<'info, TokenAccount>,

    // Step 5: Any signer may submit the claim (recipient or relayer)
    pub claimant: Signer<'info>,

    // Step 6: Token program for CPI
    pub token_program: Program<'info, Token>,
}

pub fn claim(
    ctx: Context<Claim>,
    leaf_index: u64,
    recipient: Pubkey,
    amount: u64,
    proof: Vec<[u8; 32]>,
) -> Result<()> {
    // Step 1: Get references to accounts
    let distributor = &ctx.accounts.distributor;

    // Step 2: Check if this leaf has already been claimed
    require!(
        !ctx.accounts.bitmap.is_claimed(leaf_index),
        MerkleDropError::AlreadyClaimed
    );

    // Step 3: No claims once the drop has been ended
    require!(!distributor.closed, MerkleDropError::DropClosed);

    // Step 4: Verify the Merkle proof against the committed root.
    // A wrong index, recipient, amount, or proof all fail here.
    check_proof(&distributor.root, leaf_index, &recipient, amount, &proof)?;

    // Step 5: Never pay out more than the committed total
    let total_amount_claimed = distributor
        .total_amount_claimed
        .checked_add(amount)
        .ok_or(MerkleDropError::ArithmeticOverflow)?;
    require!(
        total_amount_claimed <= distributor.max_total_claim,
        MerkleDropError::ExceededMaxClaim
    );

    // Step 6: Mark this leaf as claimed in the bitmap
    ctx.accounts.bitmap.set_claimed(leaf_index)?;

    // Step 7: Transfer from the vault, signed by the distributor PDA
    let mint = distributor.mint;
    let authority = distributor.authority;
    let bump = [distributor.bump];
    let seeds = &[
        DISTRIBUTOR_SEED,
        mint.as_ref(),
        authority.as_ref(),
        &bump,
    ];
    let signer = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.recipient_token_account.to_account_info(),
        authority: ctx.accounts.distributor.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer);
    token::transfer(cpi_ctx, amount)?;

    // Step 8: Update the running totals
    let distributor = &mut ctx.accounts.distributor;
    distributor.total_amount_claimed = total_amount_claimed;
    distributor.num_claimed = distributor
        .num_claimed
        .checked_add(1)
        .ok_or(MerkleDropError::ArithmeticOverflow)?;

    // Step 9: Emit claim event
    let clock = Clock::get()?;
    emit!(Claimed {
        distributor: distributor.key(),
        claimant: ctx.accounts.claimant.key(),
        recipient,
        leaf_index,
        amount,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Claim successful - Recipient: {}, Amount: {}, Leaf: {}",
        recipient,
        amount,
        leaf_index
    );

    Ok(())
}

/// Rejects oversized proofs before hashing, then replays the proof against `root`
pub fn check_proof(
    root: &[u8; 32],
    leaf_index: u64,
    recipient: &Pubkey,
    amount: u64,
    proof: &[[u8; 32]],
) -> Result<()> {
    require!(proof.len() <= MAX_PROOF_LEN, MerkleDropError::InvalidProof);
    require!(
        verify_claim(root, leaf_index, recipient, amount, proof),
        MerkleDropError::InvalidProof
    );
    Ok(())
}
