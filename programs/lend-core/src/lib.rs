use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod constants;
pub mod errors;
pub mod instructions;
pub mod state;
pub mod utils;

use instructions::*;

#[program]
pub mod lend_core {
    use super::*;

    /// Initialize the protocol configuration
    /// Can only be called once by the deployer
    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    /// Register a mint as a supported asset and create its vault
    pub fn init_asset(ctx: Context<InitAsset>) -> Result<()> {
        instructions::init_asset::handler(ctx)
    }

    /// Deposit collateral into the caller's position for an asset
    /// The position is created zero-valued on first use
    pub fn deposit(ctx: Context<Deposit>, amount: u64) -> Result<()> {
        instructions::deposit::handler(ctx, amount)
    }

    /// Withdraw collateral, as long as remaining collateral still covers
    /// the required ratio for any open debt
    pub fn withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
        instructions::withdraw::handler(ctx, amount)
    }

    /// Borrow against deposited collateral at the protocol rate
    pub fn borrow(ctx: Context<Borrow>, amount: u64) -> Result<()> {
        instructions::borrow::handler(ctx, amount)
    }

    /// Repay debt; interest is paid down before principal and the pulled
    /// amount is capped to the outstanding debt
    pub fn repay(ctx: Context<Repay>, amount: u64) -> Result<()> {
        instructions::repay::handler(ctx, amount)
    }

    /// Clear an undercollateralized position
    /// Anyone but the owner can call once the threshold is crossed
    pub fn liquidate(ctx: Context<Liquidate>) -> Result<()> {
        instructions::liquidate::handler(ctx)
    }

    /// Lend pool liquidity for the duration of one transaction
    /// The receiver callback must return the amount plus fee before it exits
    pub fn flash_borrow<'info>(
        ctx: Context<'_, '_, '_, 'info, FlashBorrow<'info>>,
        amount: u64,
        callback_data: Vec<u8>,
    ) -> Result<()> {
        instructions::flash_borrow::handler(ctx, amount, callback_data)
    }

    /// Admin function to update protocol parameters
    pub fn admin_set_params(ctx: Context<AdminSetParams>, params: UpdateParams) -> Result<()> {
        instructions::admin_set_params::handler(ctx, params)
    }

    /// Admin function to pause/unpause protocol
    pub fn admin_set_paused(ctx: Context<AdminSetPaused>, paused: bool) -> Result<()> {
        instructions::admin_set_paused::handler(ctx, paused)
    }

    /// Read a position with interest projected to now
    pub fn get_position(ctx: Context<GetPosition>) -> Result<PositionView> {
        instructions::get_position::get_position(ctx)
    }

    /// Read a market's aggregate collateral and borrow totals
    pub fn get_asset_liquidity(ctx: Context<GetAssetLiquidity>) -> Result<AssetLiquidityView> {
        instructions::get_position::get_asset_liquidity(ctx)
    }

    /// Liquidity currently free to lend for an asset
    pub fn get_available_to_borrow(ctx: Context<GetAvailableToBorrow>) -> Result<u64> {
        instructions::get_position::get_available_to_borrow(ctx)
    }

    /// Liquidation quote for a position
    pub fn get_liquidation_info(ctx: Context<GetLiquidationInfo>) -> Result<LiquidationInfo> {
        instructions::get_liquidation_info::handler(ctx)
    }
}
