use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::LendError;
use crate::state::{AssetMarket, Config, Position};
use crate::utils::split_repayment;

#[derive(Accounts)]
pub struct Repay<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [MARKET_SEED, market.mint.as_ref()],
        bump = market.bump
    )]
    pub market: Account<'info, AssetMarket>,

    #[account(
        mut,
        seeds = [POSITION_SEED, owner.key().as_ref(), market.mint.as_ref()],
        bump = position.bump,
        constraint = position.owner == owner.key() @ LendError::Unauthorized
    )]
    pub position: Account<'info, Position>,

    /// User's token account the repayment is pulled from
    #[account(
        mut,
        constraint = user_token_account.owner == owner.key() @ LendError::Unauthorized,
        constraint = user_token_account.mint == market.mint @ LendError::UnsupportedAsset
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    /// Program's vault for this asset
    #[account(
        mut,
        seeds = [VAULT_SEED, market.mint.as_ref()],
        bump = market.vault_bump,
        token::mint = market.mint,
        token::authority = vault_authority
    )]
    pub vault: Account<'info, TokenAccount>,

    /// PDA authority for the vault
    /// CHECK: This is the PDA that has authority over the vault
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub owner: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Repay>, amount: u64) -> Result<()> {
    let config = &ctx.accounts.config;
    let market = &mut ctx.accounts.market;
    let position = &mut ctx.accounts.position;
    let clock = Clock::get()?;

    require!(!config.paused, LendError::ProtocolPaused);
    require!(amount > 0, LendError::ZeroAmount);

    // Settle accrued interest before measuring the debt
    position.settle_interest(clock.unix_timestamp, config.interest_rate_bps)?;

    let total_debt = position.total_debt()?;
    require!(total_debt > 0, LendError::NoOutstandingDebt);

    // Never pull more than is owed
    let repay_amount = amount.min(total_debt);

    // Interest is paid down first, the remainder reduces principal
    let (interest_payment, principal_payment) =
        split_repayment(repay_amount, position.interest_accrued);

    // Pull the capped repayment from user to vault
    let cpi_accounts = Transfer {
        from: ctx.accounts.user_token_account.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        authority: ctx.accounts.owner.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new(cpi_program, cpi_accounts);
    token::transfer(cpi_ctx, repay_amount)?;

    // Update position
    position.interest_accrued = position
        .interest_accrued
        .checked_sub(interest_payment)
        .ok_or(LendError::MathOverflow)?;
    position.borrowed_amount = position
        .borrowed_amount
        .checked_sub(principal_payment)
        .ok_or(LendError::MathOverflow)?;
    position.lifetime_repaid = position
        .lifetime_repaid
        .checked_add(repay_amount)
        .ok_or(LendError::MathOverflow)?;

    // Interest is not part of the borrowed aggregate, only principal is
    market.total_borrowed = market
        .total_borrowed
        .checked_sub(principal_payment)
        .ok_or(LendError::MathOverflow)?;

    // A fully repaid position closes its accrual checkpoint
    let remaining_debt = position.total_debt()?;
    if remaining_debt == 0 {
        position.last_accrual_time = 0;
    }

    msg!(
        "Repaid {} of {} for user: {} (interest {}, principal {})",
        repay_amount,
        market.mint,
        ctx.accounts.owner.key(),
        interest_payment,
        principal_payment
    );
    msg!("Remaining debt: {}", remaining_debt);

    emit!(DebtRepaid {
        owner: position.owner,
        mint: market.mint,
        amount: repay_amount,
        interest_paid: interest_payment,
        principal_paid: principal_payment,
        remaining_debt,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[event]
pub struct DebtRepaid {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub interest_paid: u64,
    pub principal_paid: u64,
    pub remaining_debt: u64,
    pub timestamp: i64,
}
