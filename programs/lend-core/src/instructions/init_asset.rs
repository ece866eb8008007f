use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::state::{AssetMarket, Config};

#[derive(Accounts)]
pub struct InitAsset<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump,
        constraint = config.admin == admin.key() @ crate::errors::LendError::Unauthorized
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = AssetMarket::LEN,
        seeds = [MARKET_SEED, mint.key().as_ref()],
        bump
    )]
    pub market: Account<'info, AssetMarket>,

    pub mint: Account<'info, Mint>,

    /// Vault holding this asset's collateral and unborrowed liquidity
    #[account(
        init,
        payer = admin,
        seeds = [VAULT_SEED, mint.key().as_ref()],
        bump,
        token::mint = mint,
        token::authority = vault_authority
    )]
    pub vault: Account<'info, TokenAccount>,

    /// PDA authority for all vaults
    /// CHECK: This is the PDA that has authority over the vault
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitAsset>) -> Result<()> {
    let market = &mut ctx.accounts.market;

    market.mint = ctx.accounts.mint.key();
    market.vault = ctx.accounts.vault.key();
    market.total_collateral = 0;
    market.total_borrowed = 0;
    market.bump = ctx.bumps.market;
    market.vault_bump = ctx.bumps.vault;
    market._reserved = [0; 8];

    msg!("Asset listed: {}", market.mint);

    emit!(AssetListed {
        mint: market.mint,
        vault: market.vault,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

#[event]
pub struct AssetListed {
    pub mint: Pubkey,
    pub vault: Pubkey,
    pub timestamp: i64,
}
