use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    hash,
    instruction::{AccountMeta, Instruction},
    program::invoke,
    program_error::ProgramError,
};
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::errors::LendError;
use crate::state::{AssetMarket, Config};
use crate::utils::{available_liquidity, flash_fee};

#[derive(Accounts)]
pub struct FlashBorrow<'info> {
    #[account(
        seeds = [CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [MARKET_SEED, market.mint.as_ref()],
        bump = market.bump
    )]
    pub market: Account<'info, AssetMarket>,

    /// Program's vault for this asset
    #[account(
        mut,
        seeds = [VAULT_SEED, market.mint.as_ref()],
        bump = market.vault_bump,
        token::mint = market.mint,
        token::authority = vault_authority
    )]
    pub vault: Account<'info, TokenAccount>,

    /// PDA authority for the vault
    /// CHECK: This is the PDA that has authority over the vault
    #[account(
        seeds = [VAULT_AUTHORITY_SEED],
        bump
    )]
    pub vault_authority: UncheckedAccount<'info>,

    /// Token account the borrowed liquidity is pushed to
    #[account(
        mut,
        constraint = receiver_token_account.mint == market.mint @ LendError::UnsupportedAsset
    )]
    pub receiver_token_account: Account<'info, TokenAccount>,

    /// Borrower-supplied program implementing on_flash_credit; it must return
    /// the borrowed amount plus the fee to the vault before it exits
    /// CHECK: Only required to be executable, the balance check is what holds
    #[account(executable)]
    pub receiver_program: UncheckedAccount<'info>,

    pub borrower: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

pub fn handler<'info>(
    ctx: Context<'_, '_, '_, 'info, FlashBorrow<'info>>,
    amount: u64,
    callback_data: Vec<u8>,
) -> Result<()> {
    let config = &ctx.accounts.config;
    let market = &ctx.accounts.market;
    let clock = Clock::get()?;

    require!(!config.paused, LendError::ProtocolPaused);
    require!(amount > 0, LendError::ZeroAmount);

    // Pre-call balance, recorded before the outbound transfer
    let balance_before = ctx.accounts.vault.amount;
    require!(
        available_liquidity(balance_before, market.total_borrowed) >= amount,
        LendError::InsufficientLiquidity
    );

    let fee = flash_fee(amount)?;

    // Push the loan to the receiver
    let vault_authority_bump = ctx.bumps.vault_authority;
    let vault_authority_seeds = &[VAULT_AUTHORITY_SEED, &[vault_authority_bump]];
    let signer_seeds = &[&vault_authority_seeds[..]];

    let cpi_accounts = Transfer {
        from: ctx.accounts.vault.to_account_info(),
        to: ctx.accounts.receiver_token_account.to_account_info(),
        authority: ctx.accounts.vault_authority.to_account_info(),
    };
    let cpi_program = ctx.accounts.token_program.to_account_info();
    let cpi_ctx = CpiContext::new_with_signer(cpi_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, amount)?;

    // Hand control to the receiver program within the same transaction.
    // The runtime refuses re-entry into this program from the callback, so
    // no ledger instruction can run underneath us.
    let mut data = hash::hash(b"global:on_flash_credit").to_bytes()[..8].to_vec();
    let args = (market.mint, amount, fee, callback_data)
        .try_to_vec()
        .map_err(|_| ProgramError::InvalidInstructionData)?;
    data.extend_from_slice(&args);

    let account_metas: Vec<AccountMeta> = ctx
        .remaining_accounts
        .iter()
        .map(|acc| AccountMeta {
            pubkey: *acc.key,
            is_signer: acc.is_signer,
            is_writable: acc.is_writable,
        })
        .collect();

    let callback_ix = Instruction {
        program_id: ctx.accounts.receiver_program.key(),
        accounts: account_metas,
        data,
    };

    let mut callback_infos = ctx.remaining_accounts.to_vec();
    callback_infos.push(ctx.accounts.receiver_program.to_account_info());
    invoke(&callback_ix, &callback_infos)?;

    // The loan plus fee must be back, or everything above unwinds
    ctx.accounts.vault.reload()?;
    let required_balance = balance_before
        .checked_add(fee)
        .ok_or(LendError::MathOverflow)?;
    require!(
        ctx.accounts.vault.amount >= required_balance,
        LendError::FlashCreditUnrepaid
    );

    msg!(
        "Flash credit of {} of {} repaid with fee {}",
        amount,
        market.mint,
        fee
    );

    emit!(FlashCredit {
        borrower: ctx.accounts.borrower.key(),
        mint: market.mint,
        amount,
        fee,
        timestamp: clock.unix_timestamp,
    });

    Ok(())
}

#[event]
pub struct FlashCredit {
    pub borrower: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub fee: u64,
    pub timestamp: i64,
}
