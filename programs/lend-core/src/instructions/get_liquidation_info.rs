use anchor_lang::prelude::*;

use crate::constants::*;
use crate::state::{Config, Position};
use crate::utils::{
    health_factor, is_liquidatable, min_safe_collateral, seconds_until_liquidatable,
};

/// Liquidation quote for a position, projected to the current time.
#[derive(AnchorSerialize, AnchorDeserialize, Clone)]
pub struct LiquidationInfo {
    /// Whether the position can be seized right now
    pub liquidatable: bool,

    /// Debt projected to now, principal plus interest
    pub total_debt: u64,

    pub health_factor_bps: u64,

    /// Smallest collateral amount at which the position stays safe at its
    /// current debt; collateral below this level is seizable
    pub min_safe_collateral: u64,

    /// Estimated seconds until interest accrual alone trips the threshold,
    /// assuming no balance changes; u64::MAX when that can never happen
    pub seconds_until_liquidatable: u64,
}

#[derive(Accounts)]
pub struct GetLiquidationInfo<'info> {
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

pub fn handler(ctx: Context<GetLiquidationInfo>) -> Result<LiquidationInfo> {
    let config = &ctx.accounts.config;
    let position = &ctx.accounts.position;
    let now = Clock::get()?.unix_timestamp;

    let total_debt = position.projected_debt(now, config.interest_rate_bps)?;
    let projected_interest = total_debt
        .checked_sub(position.borrowed_amount)
        .ok_or(crate::errors::LendError::MathOverflow)?;

    Ok(LiquidationInfo {
        liquidatable: is_liquidatable(
            position.collateral_amount,
            total_debt,
            config.liquidation_threshold_bps,
        ),
        total_debt,
        health_factor_bps: health_factor(
            position.collateral_amount,
            total_debt,
            config.collateral_ratio_bps,
        )?,
        min_safe_collateral: min_safe_collateral(total_debt, config.liquidation_threshold_bps)?,
        seconds_until_liquidatable: seconds_until_liquidatable(
            position.collateral_amount,
            position.borrowed_amount,
            projected_interest,
            config.interest_rate_bps,
            config.liquidation_threshold_bps,
        )?,
    })
}
