use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::LendError;
use crate::state::{AssetMarket, Config, Position};

#[derive(Accounts)]
pub struct Deposit<'info> {
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

    /// Created zero-valued on the owner's first deposit for this asset
    #[account(
        init_if_needed,
        payer = owner,
        space = Position::LEN,
        seeds = [POSITION_SEED, owner.key().as_ref(), market.mint.as_ref()],
        bump
    )]
    pub position: Account<'info, Position>,

    /// User's token account for the deposited asset
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
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Deposit>, amount: u64) -> Result<()> {
    let config = &ctx.accounts.config;
    let market = &mut ctx.accounts.market;
    let position = &mut ctx.accounts.position;
    let clock = Clock::get()?;

    // Check protocol is not paused
    require!(!config.paused, LendError::ProtocolPaused);
    require!(amount > 0, LendError::ZeroAmount);

    // Stamp ownership on first use
    if position.owner == Pubkey::default() {
        position.owner = ctx.accounts.owner.key();
        position.mint = market.mint;
        position.bump = ctx.bumps.position;
    }

    // Settle accrued interest before touching the position
    position.settle_interest(clock.unix_timestamp, config.interest_rate_bps)?;

    // Update position
    position.collateral_amount = position
        .collateral_amount
        .checked_add(amount)
        .ok_or(LendError::MathOverflow)?;

    // Update market aggregates
    market.total_collateral = market
        .total_collateral
        .checked_add(amount)
        .ok_or(LendError::MathOverflow)?;

    // Pull tokens from user to vault
    let cpi_accounts = Transfer {
        from: ctx.accounts.user_token_account.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        authority: ctx.accounts.owner.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new(cpi_program, cpi_accounts);
    token::transfer(cpi_ctx, amount)?;

    msg!(
        "Deposited {} of {} for user: {}",
        amount,
        market.mint,
        ctx.accounts.owner.key()
    );

    emit!(CollateralDeposited {
        owner: position.owner,
        mint: market.mint,
        amount,
        total_collateral: position.collateral_amount,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[event]
pub struct CollateralDeposited {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub total_collateral: u64,
    pub timestamp: i64,
}
