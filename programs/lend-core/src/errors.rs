use anchor_lang::prelude::*;

#[error_code]
pub enum LendError {
    #[msg("Protocol is currently paused")]
    ProtocolPaused,

    #[msg("Unauthorized access")]
    Unauthorized,

    #[msg("Asset is not supported by the protocol")]
    UnsupportedAsset,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Insufficient collateral deposited")]
    InsufficientCollateral,

    #[msg("Operation would leave the position undercollateralized")]
    CollateralRatioTooLow,

    #[msg("Not enough unborrowed liquidity in the pool")]
    InsufficientLiquidity,

    #[msg("Position has no outstanding debt")]
    NoOutstandingDebt,

    #[msg("Position is healthy, cannot liquidate")]
    PositionHealthy,

    #[msg("Cannot liquidate your own position")]
    SelfLiquidation,

    #[msg("Flash credit was not repaid with fee within the transaction")]
    FlashCreditUnrepaid,

    #[msg("Liquidation threshold must stay below the collateral ratio")]
    InvalidRiskParams,

    #[msg("Invalid percentage value")]
    InvalidPercentage,

    #[msg("Math overflow")]
    MathOverflow,
}
