use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::LendError;
use crate::state::{AssetMarket, Config, Position};
use crate::utils::{available_liquidity, required_collateral};

#[derive(Accounts)]
pub struct Borrow<'info> {
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

    /// User's token account receiving the borrowed asset
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

pub fn handler(ctx: Context<Borrow>, amount: u64) -> Result<()> {
    let config = &ctx.accounts.config;
    let market = &mut ctx.accounts.market;
    let position = &mut ctx.accounts.position;
    let clock = Clock::get()?;

    require!(!config.paused, LendError::ProtocolPaused);
    require!(amount > 0, LendError::ZeroAmount);

    // Settle accrued interest so the new debt builds on current numbers
    position.settle_interest(clock.unix_timestamp, config.interest_rate_bps)?;

    // Only liquidity actually free to lend can go out, collateral on paper
    // does not count
    require!(
        available_liquidity(ctx.accounts.vault.amount, market.total_borrowed) >= amount,
        LendError::InsufficientLiquidity
    );

    // The position must carry the full new debt, interest included
    let new_debt = position
        .total_debt()?
        .checked_add(amount)
        .ok_or(LendError::MathOverflow)?;
    require!(
        position.collateral_amount >= required_collateral(new_debt, config.collateral_ratio_bps)?,
        LendError::CollateralRatioTooLow
    );

    // Update position
    position.borrowed_amount = position
        .borrowed_amount
        .checked_add(amount)
        .ok_or(LendError::MathOverflow)?;
    position.lifetime_borrowed = position
        .lifetime_borrowed
        .checked_add(amount)
        .ok_or(LendError::MathOverflow)?;

    // Update market aggregates
    market.total_borrowed = market
        .total_borrowed
        .checked_add(amount)
        .ok_or(LendError::MathOverflow)?;

    // Push borrowed tokens from vault to user
    let vault_authority_bump = ctx.bumps.vault_authority;
    let vault_authority_seeds = &[VAULT_AUTHORITY_SEED, &[vault_authority_bump]];
    let signer_seeds = &[&vault_authority_seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.user_token_account.to_account_info(),
        authority: ctx.accounts.vault_authority.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, amount)?;

    msg!(
        "Borrowed {} of {} for user: {}",
        amount,
        market.mint,
        ctx.accounts.owner.key()
    );
    msg!("Total debt: {}", new_debt);

    emit!(AssetBorrowed {
        owner: position.owner,
        mint: market.mint,
        amount,
        total_debt: new_debt,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[event]
pub struct AssetBorrowed {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub total_debt: u64,
    pub timestamp: i64,
}
