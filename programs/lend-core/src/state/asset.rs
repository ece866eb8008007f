use anchor_lang::prelude::*;

/// Per-mint lending market
///
/// Existence of this account is what makes a mint a supported asset: every
/// position-mutating instruction resolves it by seed, so an unregistered mint
/// cannot reach the ledger. The aggregates must equal the sums of the same
/// fields over all positions of this mint between transactions.
#[account]
pub struct AssetMarket {
    /// Asset mint this market lends
    pub mint: Pubkey,

    /// Token vault holding collateral and unborrowed liquidity
    pub vault: Pubkey,

    /// Sum of collateral across all positions of this mint
    pub total_collateral: u64,

    /// Sum of outstanding principal across all positions of this mint
    pub total_borrowed: u64,

    pub bump: u8,

    pub vault_bump: u8,

    /// Reserved space for future upgrades
    pub _reserved: [u64; 8],
}

impl AssetMarket {
    pub const LEN: usize = 8 + // discriminator
        32 + // mint
        32 + // vault
        8 + // total_collateral
        8 + // total_borrowed
        1 + // bump
        1 + // vault_bump
        (8 * 8); // _reserved
}
