use anchor_lang::prelude::*;

use crate::constants::*;
use crate::errors::LendError;
use crate::state::Config;

#[derive(AnchorSerialize, AnchorDeserialize)]
pub struct UpdateParams {
    pub interest_rate_bps: Option<u16>,
    pub collateral_ratio_bps: Option<u16>,
    pub liquidation_threshold_bps: Option<u16>,
    pub liquidation_bonus_bps: Option<u16>,
    pub new_admin: Option<Pubkey>,
}

#[derive(Accounts)]
pub struct AdminSetParams<'info> {
    #[account(
        mut,
        seeds = [CONFIG_SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ LendError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

pub fn handler(ctx: Context<AdminSetParams>, params: UpdateParams) -> Result<()> {
    let config = &mut ctx.accounts.config;

    // Validate the effective post-update values, so a single-field change
    // cannot break the parameter ordering
    let interest_rate_bps = params.interest_rate_bps.unwrap_or(config.interest_rate_bps);
    let collateral_ratio_bps = params
        .collateral_ratio_bps
        .unwrap_or(config.collateral_ratio_bps);
    let liquidation_threshold_bps = params
        .liquidation_threshold_bps
        .unwrap_or(config.liquidation_threshold_bps);
    let liquidation_bonus_bps = params
        .liquidation_bonus_bps
        .unwrap_or(config.liquidation_bonus_bps);

    require!(
        interest_rate_bps as u64 <= BPS_PRECISION,
        LendError::InvalidPercentage
    );
    require!(
        collateral_ratio_bps as u64 >= BPS_PRECISION,
        LendError::InvalidRiskParams
    );
    require!(
        liquidation_threshold_bps as u64 >= BPS_PRECISION,
        LendError::InvalidRiskParams
    );
    require!(
        liquidation_bonus_bps as u64 >= BPS_PRECISION,
        LendError::InvalidRiskParams
    );
    require!(
        liquidation_threshold_bps < collateral_ratio_bps,
        LendError::InvalidRiskParams
    );

    config.interest_rate_bps = interest_rate_bps;
    config.collateral_ratio_bps = collateral_ratio_bps;
    config.liquidation_threshold_bps = liquidation_threshold_bps;
    config.liquidation_bonus_bps = liquidation_bonus_bps;

    if let Some(new_admin) = params.new_admin {
        config.admin = new_admin;
        msg!("Transferred admin to {}", new_admin);
    }

    msg!(
        "Params updated: rate {} bps, ratio {} bps, threshold {} bps, bonus {} bps",
        interest_rate_bps,
        collateral_ratio_bps,
        liquidation_threshold_bps,
        liquidation_bonus_bps
    );

    emit!(ParamsUpdated {
        admin: config.admin,
        interest_rate_bps,
        collateral_ratio_bps,
        liquidation_threshold_bps,
        liquidation_bonus_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[event]
pub struct ParamsUpdated {
    pub admin: Pubkey,
    pub interest_rate_bps: u16,
    pub collateral_ratio_bps: u16,
    pub liquidation_threshold_bps: u16,
    pub liquidation_bonus_bps: u16,
    pub timestamp: i64,
}
