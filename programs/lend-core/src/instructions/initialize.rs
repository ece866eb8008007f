use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LendError;
use crate::state::Config;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct InitializeParams {
    pub interest_rate_bps: u16,
    pub collateral_ratio_bps: u16,
    pub liquidation_threshold_bps: u16,
    pub liquidation_bonus_bps: u16,
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(
        init,
        payer = admin,
        space = Config::LEN,
        seeds = [CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    let config = &mut ctx.accounts.config;

    // Validate parameters
    require!(
        params.interest_rate_bps as u64 <= BPS_PRECISION,
        LendError::InvalidPercentage
    );
    require!(
        params.collateral_ratio_bps as u64 >= BPS_PRECISION,
        LendError::InvalidRiskParams
    );
    require!(
        params.liquidation_threshold_bps as u64 >= BPS_PRECISION,
        LendError::InvalidRiskParams
    );
    require!(
        params.liquidation_bonus_bps as u64 >= BPS_PRECISION,
        LendError::InvalidRiskParams
    );
    require!(
        params.liquidation_threshold_bps < params.collateral_ratio_bps,
        LendError::InvalidRiskParams
    );

    // Initialize config
    config.admin = ctx.accounts.admin.key();
    config.paused = false;
    config.interest_rate_bps = params.interest_rate_bps;
    config.collateral_ratio_bps = params.collateral_ratio_bps;
    config.liquidation_threshold_bps = params.liquidation_threshold_bps;
    config.liquidation_bonus_bps = params.liquidation_bonus_bps;
    config.bump = ctx.bumps.config;
    config._reserved = [0; 8];

    msg!("Protocol initialized with admin: {}", ctx.accounts.admin.key());
    msg!(
        "Rate: {} bps APR, Ratio: {} bps, Threshold: {} bps, Bonus: {} bps",
        params.interest_rate_bps,
        params.collateral_ratio_bps,
        params.liquidation_threshold_bps,
        params.liquidation_bonus_bps
    );

    Ok(())
}
