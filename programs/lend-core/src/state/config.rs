use anchor_lang::prelude::*;

/// Global protocol configuration
/// Stores risk parameters and the admin allowed to change them
#[account]
pub struct Config {
    /// Protocol admin who can update parameters
    pub admin: Pubkey,

    /// Whether protocol is paused
    pub paused: bool,

    /// Annualized borrow rate in basis points (e.g., 500 = 5% APR)
    pub interest_rate_bps: u16,

    /// Required collateral per unit of debt, in basis points (>= 10000)
    pub collateral_ratio_bps: u16,

    /// Ratio below which a position becomes seizable (< collateral_ratio_bps)
    pub liquidation_threshold_bps: u16,

    /// Multiplier applied to repaid debt for the liquidator payout (>= 10000)
    pub liquidation_bonus_bps: u16,

    pub bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u64; 8],
}

impl Config {
    pub const LEN: usize = 8 + // discriminator
        32 + // admin
        1 + // paused
        2 + // interest_rate_bps
        2 + // collateral_ratio_bps
        2 + // liquidation_threshold_bps
        2 + // liquidation_bonus_bps
        1 + // bump
        (8 * 8); // _reserved
}
