use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};
use crate::constants::*;
use crate::states::*;
use crate::events::*;
use crate::errors::*;

#[derive(Accounts)]
pub struct EndAirdrop<'info> {
    // Step 1: Distributor must exist and signer must be authority
    #[account(
        mut,
        seeds = [DISTRIBUTOR_SEED, distributor.mint.as_ref(), distributor.authority.as_ref()],
        bump = distributor.bump,
        has_one = authority @ MerkleDropError::Unauthorized,
        has_one = vault @ MerkleDropError::VaultMismatch,
        has_one = treasury @ MerkleDropError::TreasuryMismatch
    )]
    pub distributor: Account<'info, MerkleDistributor>,

    // Step 2: Vault must be mutable for the sweep
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    // Step 3: Treasury fixed at initialization
    #[account(mut)]
    pub treasury: Account<'info, TokenAccount>,

    // Step 4: Authority must sign
    pub authority: Signer<'info>,

    // Step 5: Token program for CPI
    pub token_program: Program<'info, Token>,
}

pub fn end_airdrop(ctx: Context<EndAirdrop>) -> Result<()> {
    // Step 1: Signer is the authority (enforced by `has_one = authority`)
    let distributor = &ctx.accounts.distributor;

    // Step 2: The drop can only be ended once
    require!(!distributor.closed, MerkleDropError::DropClosed);

    // Step 3: Sweep exactly what the vault holds right now
    let amount = ctx.accounts.vault.amount;

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

    if amount > 0 {
        let cpi_accounts = Transfer {
            from: ctx.accounts.vault.to_account_info(),
            to: ctx.accounts.treasury.to_account_info(),
            authority: ctx.accounts.distributor.to_account_info(),
        };
        let cpi_program = ctx.accounts.token_program.to_account_info();
        let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer);
        token::transfer(cpi_ctx, amount)?;
    }

    // Step 4: Close the drop; there is no way to reopen it
    let distributor = &mut ctx.accounts.distributor;
    distributor.closed = true;

    // Step 5: Emit sweep event
    let clock = Clock::get()?;
    emit!(AirdropEnded {
        distributor: distributor.key(),
        destination: ctx.accounts.treasury.key(),
        amount,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Airdrop ended - swept {} tokens to {}",
        amount,
        ctx.accounts.treasury.key()
    );

    Ok(())
}
