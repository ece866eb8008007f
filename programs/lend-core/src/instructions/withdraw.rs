use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::LendError;
use crate::state::{AssetMarket, Config, Position};
use crate::utils::required_collateral;

#[derive(Accounts)]
pub struct Withdraw<'info> {
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

    /// User's token account for the withdrawn asset
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

pub fn handler(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    let config = &ctx.accounts.config;
    let market = &mut ctx.accounts.market;
    let position = &mut ctx.accounts.position;
    let clock = Clock::get()?;

    require!(!config.paused, LendError::ProtocolPaused);
    require!(amount > 0, LendError::ZeroAmount);

    // Settle accrued interest so the solvency check sees current debt
    position.settle_interest(clock.unix_timestamp, config.interest_rate_bps)?;

    require!(
        position.collateral_amount >= amount,
        LendError::InsufficientCollateral
    );
    let remaining_collateral = position.collateral_amount - amount;

    // With open debt, the remainder must still cover the required collateral
    let total_debt = position.total_debt()?;
    if total_debt > 0 {
        require!(
            remaining_collateral >= required_collateral(total_debt, config.collateral_ratio_bps)?,
            LendError::CollateralRatioTooLow
        );
    }

    // Update position
    position.collateral_amount = remaining_collateral;

    // Update market aggregates
    market.total_collateral = market
        .total_collateral
        .checked_sub(amount)
        .ok_or(LendError::MathOverflow)?;

    // Push tokens from vault to user
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
        "Withdrew {} of {} for user: {}",
        amount,
        market.mint,
        ctx.accounts.owner.key()
    );

    emit!(CollateralWithdrawn {
        owner: position.owner,
        mint: market.mint,
        amount,
        total_collateral: position.collateral_amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[event]
pub struct CollateralWithdrawn {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub total_collateral: u64,
    pub timestamp: i64,
}
