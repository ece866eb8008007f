// PDA Seeds
pub const CONFIG_SEED: &[u8] = b"config";
pub const MARKET_SEED: &[u8] = b"asset_market";
pub const POSITION_SEED: &[u8] = b"position";
pub const VAULT_SEED: &[u8] = b"vault";
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";

// Protocol Parameters (basis points)
pub const DEFAULT_INTEREST_RATE_BPS: u16 = 500; // 5% APR
pub const DEFAULT_COLLATERAL_RATIO_BPS: u16 = 15_000; // 150% collateral per unit of debt
pub const DEFAULT_LIQUIDATION_THRESHOLD_BPS: u16 = 12_500; // seizable below 125%
pub const DEFAULT_LIQUIDATION_BONUS_BPS: u16 = 10_500; // liquidator receives 105% of repaid debt

// Flash credit fee, taken on the borrowed amount
pub const FLASH_FEE_BPS: u64 = 9; // 0.09%

// Precision Constants
pub const BPS_PRECISION: u64 = 10_000; // Basis points precision
pub const SECONDS_PER_YEAR: u64 = 31_536_000; // 365 days
