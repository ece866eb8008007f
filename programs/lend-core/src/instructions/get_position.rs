use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::*;
use crate::state::{AssetMarket, Config, Position};
use crate::utils::{available_liquidity, health_factor};

/// Snapshot of a position with interest projected to the current time.
/// None of the view instructions mutate the accrual checkpoint.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct PositionView {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub collateral_amount: u64,
    pub borrowed_amount: u64,
    pub interest_accrued: u64,
    pub total_debt: u64,
    pub health_factor_bps: u64,
    pub last_accrual_time: i64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct AssetLiquidityView {
    pub mint: Pubkey,
    pub total_collateral: u64,
    pub total_borrowed: u64,
}

#[derive(Accounts)]
pub struct GetPosition<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [POSITION_SEED, position.owner.as_ref(), position.mint.as_ref()],
        bump = position.bump
    )]
    pub position: Account<'info, Position>,
}

pub fn get_position(ctx: Context<GetPosition>) -> Result<PositionView> {
    let config = &ctx.accounts.config;
    let position = &ctx.accounts.position;
    let now = Clock::get()?.unix_timestamp;

    let pending = position.pending_interest(now, config.interest_rate_bps)?;
    let interest_accrued = position
        .interest_accrued
        .checked_add(pending)
        .ok_or(crate::errors::LendError::MathOverflow)?;
    let total_debt = position.projected_debt(now, config.interest_rate_bps)?;

    Ok(PositionView {
        owner: position.owner,
        mint: position.mint,
        collateral_amount: position.collateral_amount,
        borrowed_amount: position.borrowed_amount,
        interest_accrued,
        total_debt,
        health_factor_bps: health_factor(
            position.collateral_amount,
            total_debt,
            config.collateral_ratio_bps,
        )?,
        last_accrual_time: position.last_accrual_time,
    })
}

#[derive(Accounts)]
pub struct GetAssetLiquidity<'info> {
    #[account(
        seeds = [MARKET_SEED, market.mint.as_ref()],
        bump = market.bump
    )]
    pub market: Account<'info, AssetMarket>,
}

pub fn get_asset_liquidity(ctx: Context<GetAssetLiquidity>) -> Result<AssetLiquidityView> {
    let market = &ctx.accounts.market;

    Ok(AssetLiquidityView {
        mint: market.mint,
        total_collateral: market.total_collateral,
        total_borrowed: market.total_borrowed,
    })
}

#[derive(Accounts)]
pub struct GetAvailableToBorrow<'info> {
    #[account(
        seeds = [MARKET_SEED, market.mint.as_ref()],
        bump = market.bump
    )]
    pub market: Account<'info, AssetMarket>,

    #[account(
        seeds = [VAULT_SEED, market.mint.as_ref()],
        bump = market.vault_bump
    )]
    pub vault: Account<'info, TokenAccount>,
}

pub fn get_available_to_borrow(ctx: Context<GetAvailableToBorrow>) -> Result<u64> {
    Ok(available_liquidity(
        ctx.accounts.vault.amount,
        ctx.accounts.market.total_borrowed,
    ))
}
