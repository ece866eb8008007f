use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::LendError;
use crate::state::{AssetMarket, Config, Position};
use crate::utils::{is_liquidatable, seize_amount};

#[derive(Accounts)]
pub struct Liquidate<'info> {
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

    /// Position being liquidated, addressed by its owner
    #[account(
        mut,
        seeds = [POSITION_SEED, position.owner.as_ref(), market.mint.as_ref()],
        bump = position.bump
    )]
    pub position: Account<'info, Position>,

    /// Liquidator's token account the debt repayment is pulled from,
    /// and that receives the seized collateral
    #[account(
        mut,
        constraint = liquidator_token_account.owner == liquidator.key() @ LendError::Unauthorized,
        constraint = liquidator_token_account.mint == market.mint @ LendError::UnsupportedAsset
    )]
    pub liquidator_token_account: Account<'info, TokenAccount>,

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
    pub liquidator: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler(ctx: Context<Liquidate>) -> Result<()> {
    let config = &ctx.accounts.config;
    let market = &mut ctx.accounts.market;
    let position = &mut ctx.accounts.position;
    let clock = Clock::get()?;

    require!(!config.paused, LendError::ProtocolPaused);
    require_keys_neq!(
        ctx.accounts.liquidator.key(),
        position.owner,
        LendError::SelfLiquidation
    );

    // Eligibility is judged on settled debt
    position.settle_interest(clock.unix_timestamp, config.interest_rate_bps)?;

    let total_debt = position.total_debt()?;
    require!(total_debt > 0, LendError::NoOutstandingDebt);
    require!(
        is_liquidatable(
            position.collateral_amount,
            total_debt,
            config.liquidation_threshold_bps
        ),
        LendError::PositionHealthy
    );

    // Payout: repaid debt plus bonus, capped to the position's collateral
    let collateral_seized = seize_amount(
        total_debt,
        config.liquidation_bonus_bps,
        position.collateral_amount,
    )?;

    // Liquidator repays the full debt into the vault
    let cpi_accounts = Transfer {
        from: ctx.accounts.liquidator_token_account.to_account_info(),
        to: ctx.accounts.vault.to_account_info(),
        authority: ctx.accounts.liquidator.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new(cpi_program, cpi_accounts);
    token::transfer(cpi_ctx, total_debt)?;

    // Seized collateral goes out to the liquidator
    let vault_authority_bump = ctx.bumps.vault_authority;
    let vault_authority_seeds = &[VAULT_AUTHORITY_SEED, &[vault_authority_bump]];
    let signer_seeds = &[&vault_authority_seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.liquidator_token_account.to_account_info(),
        authority: ctx.accounts.vault_authority.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, collateral_seized)?;

    // Aggregates drop by the position's pre-reset fields; any collateral
    // remainder beyond the seizure stays in the vault as protocol surplus
    market.total_borrowed = market
        .total_borrowed
        .checked_sub(position.borrowed_amount)
        .ok_or(LendError::MathOverflow)?;
    market.total_collateral = market
        .total_collateral
        .checked_sub(position.collateral_amount)
        .ok_or(LendError::MathOverflow)?;

    // Full liquidation only: clear the position
    let owner = position.owner;
    position.collateral_amount = 0;
    position.borrowed_amount = 0;
    position.interest_accrued = 0;
    position.last_accrual_time = 0;
    position.liquidation_count += 1;

    msg!("Liquidated position of user: {}", owner);
    msg!(
        "Repaid: {}, Seized: {} of {}",
        total_debt,
        collateral_seized,
        market.mint
    );

    emit!(PositionLiquidated {
        owner,
        liquidator: ctx.accounts.liquidator.key(),
        mint: market.mint,
        debt_repaid: total_debt,
        collateral_seized,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[event]
pub struct PositionLiquidated {
    pub owner: Pubkey,
    pub liquidator: Pubkey,
    pub mint: Pubkey,
    pub debt_repaid: u64,
    pub collateral_seized: u64,
    pub timestamp: i64,
}
