use anchor_lang::prelude::*;

use crate::constants::{BPS_PRECISION, FLASH_FEE_BPS, SECONDS_PER_YEAR};
use crate::errors::LendError;

/// Simple (non-compounding) interest owed on `principal` over `elapsed_secs`.
///
/// floor(principal * rate * elapsed / (seconds_per_year * 10000)) — integer
/// division truncates toward zero, so rounding dust stays with the protocol
/// and is never minted.
pub fn accrued_interest(principal: u64, interest_rate_bps: u16, elapsed_secs: u64) -> Result<u64> {
    let interest = (principal as u128)
        .checked_mul(interest_rate_bps as u128)
        .ok_or(error!(LendError::MathOverflow))?
        .checked_mul(elapsed_secs as u128)
        .ok_or(error!(LendError::MathOverflow))?
        .checked_div(SECONDS_PER_YEAR as u128 * BPS_PRECISION as u128)
        .ok_or(error!(LendError::MathOverflow))?;

    u64::try_from(interest).map_err(|_| error!(LendError::MathOverflow))
}

/// Minimum collateral a position must hold to support `debt`.
pub fn required_collateral(debt: u64, collateral_ratio_bps: u16) -> Result<u64> {
    let required = (debt as u128)
        .checked_mul(collateral_ratio_bps as u128)
        .ok_or(error!(LendError::MathOverflow))?
        .checked_div(BPS_PRECISION as u128)
        .ok_or(error!(LendError::MathOverflow))?;

    u64::try_from(required).map_err(|_| error!(LendError::MathOverflow))
}

/// Largest debt `collateral` can support under the collateral ratio.
pub fn max_borrowable(collateral: u64, collateral_ratio_bps: u16) -> Result<u64> {
    let max_borrow = (collateral as u128)
        .checked_mul(BPS_PRECISION as u128)
        .ok_or(error!(LendError::MathOverflow))?
        .checked_div(collateral_ratio_bps as u128)
        .ok_or(error!(LendError::MathOverflow))?;

    u64::try_from(max_borrow).map_err(|_| error!(LendError::MathOverflow))
}

/// A position is seizable when collateral * threshold < debt * 10000.
///
/// Cross-multiplied in u128 to avoid precision loss from division; strict
/// inequality, so a position sitting exactly on the threshold is safe.
pub fn is_liquidatable(collateral: u64, total_debt: u64, liquidation_threshold_bps: u16) -> bool {
    if total_debt == 0 {
        return false;
    }
    let collateral_side = (collateral as u128) * (liquidation_threshold_bps as u128);
    let debt_side = (total_debt as u128) * (BPS_PRECISION as u128);
    collateral_side < debt_side
}

/// Collateral sufficiency relative to required collateral, in basis points.
/// Values >= 10000 are healthy; u64::MAX when the position has no debt.
pub fn health_factor(collateral: u64, total_debt: u64, collateral_ratio_bps: u16) -> Result<u64> {
    if total_debt == 0 {
        return Ok(u64::MAX);
    }
    let required = required_collateral(total_debt, collateral_ratio_bps)?;
    if required == 0 {
        return Ok(u64::MAX);
    }
    let factor = (collateral as u128)
        .checked_mul(BPS_PRECISION as u128)
        .ok_or(error!(LendError::MathOverflow))?
        .checked_div(required as u128)
        .ok_or(error!(LendError::MathOverflow))?;

    Ok(u64::try_from(factor).unwrap_or(u64::MAX))
}

/// Splits a repayment into (interest_payment, principal_payment).
/// Interest is always paid down first.
pub fn split_repayment(repay_amount: u64, interest_accrued: u64) -> (u64, u64) {
    let interest_payment = repay_amount.min(interest_accrued);
    let principal_payment = repay_amount - interest_payment;
    (interest_payment, principal_payment)
}

/// Collateral paid to a liquidator: debt plus bonus, capped to what the
/// position actually holds.
pub fn seize_amount(total_debt: u64, liquidation_bonus_bps: u16, collateral: u64) -> Result<u64> {
    let with_bonus = (total_debt as u128)
        .checked_mul(liquidation_bonus_bps as u128)
        .ok_or(error!(LendError::MathOverflow))?
        .checked_div(BPS_PRECISION as u128)
        .ok_or(error!(LendError::MathOverflow))?;

    let with_bonus = u64::try_from(with_bonus).map_err(|_| error!(LendError::MathOverflow))?;
    Ok(with_bonus.min(collateral))
}

/// Fee charged on a flash credit of `amount`.
pub fn flash_fee(amount: u64) -> Result<u64> {
    let fee = (amount as u128)
        .checked_mul(FLASH_FEE_BPS as u128)
        .ok_or(error!(LendError::MathOverflow))?
        .checked_div(BPS_PRECISION as u128)
        .ok_or(error!(LendError::MathOverflow))?;

    u64::try_from(fee).map_err(|_| error!(LendError::MathOverflow))
}

/// Liquidity actually free to lend: tokens held by the vault minus the paper
/// debt already out. Collateral on paper does not count.
pub fn available_liquidity(vault_balance: u64, total_borrowed: u64) -> u64 {
    vault_balance.saturating_sub(total_borrowed)
}

/// Smallest collateral amount at which a position with `total_debt` is NOT
/// seizable: ceil(debt * 10000 / threshold). Below this the guard trips.
pub fn min_safe_collateral(total_debt: u64, liquidation_threshold_bps: u16) -> Result<u64> {
    if total_debt == 0 {
        return Ok(0);
    }
    require!(liquidation_threshold_bps > 0, LendError::InvalidRiskParams);
    let numerator = (total_debt as u128)
        .checked_mul(BPS_PRECISION as u128)
        .ok_or(error!(LendError::MathOverflow))?;
    let threshold = liquidation_threshold_bps as u128;
    let floor = numerator
        .checked_add(threshold - 1)
        .ok_or(error!(LendError::MathOverflow))?
        .checked_div(threshold)
        .ok_or(error!(LendError::MathOverflow))?;

    u64::try_from(floor).map_err(|_| error!(LendError::MathOverflow))
}

/// Estimated seconds until a currently-safe position crosses the liquidation
/// threshold, assuming constant simple accrual on the outstanding principal
/// and no balance changes. u64::MAX when it can never trigger.
pub fn seconds_until_liquidatable(
    collateral: u64,
    borrowed: u64,
    interest_accrued: u64,
    interest_rate_bps: u16,
    liquidation_threshold_bps: u16,
) -> Result<u64> {
    let total_debt = borrowed
        .checked_add(interest_accrued)
        .ok_or(error!(LendError::MathOverflow))?;
    if is_liquidatable(collateral, total_debt, liquidation_threshold_bps) {
        return Ok(0);
    }
    if borrowed == 0 || interest_rate_bps == 0 {
        return Ok(u64::MAX);
    }

    // Smallest total debt that trips the strict threshold comparison.
    let trigger_debt = (collateral as u128)
        .checked_mul(liquidation_threshold_bps as u128)
        .ok_or(error!(LendError::MathOverflow))?
        / (BPS_PRECISION as u128)
        + 1;
    let needed_interest = trigger_debt - total_debt as u128;

    let numerator = needed_interest
        .checked_mul(SECONDS_PER_YEAR as u128 * BPS_PRECISION as u128)
        .ok_or(error!(LendError::MathOverflow))?;
    let denominator = (borrowed as u128) * (interest_rate_bps as u128);
    let seconds = (numerator + denominator - 1) / denominator;

    Ok(u64::try_from(seconds).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accrued_interest_one_year() {
        // 1000 borrowed at 5% APR for exactly one year
        let interest = accrued_interest(1_000, 500, SECONDS_PER_YEAR).unwrap();
        assert_eq!(interest, 50);
    }

    #[test]
    fn accrued_interest_truncates_toward_zero() {
        // one second of accrual rounds down to nothing
        assert_eq!(accrued_interest(1_000, 500, 1).unwrap(), 0);
        // half a year on an odd principal loses the fractional unit
        assert_eq!(accrued_interest(999, 500, SECONDS_PER_YEAR / 2).unwrap(), 24);
    }

    #[test]
    fn accrued_interest_zero_rate() {
        assert_eq!(accrued_interest(1_000_000, 0, SECONDS_PER_YEAR).unwrap(), 0);
    }

    #[test]
    fn required_collateral_floors() {
        assert_eq!(required_collateral(1_050, 15_000).unwrap(), 1_575);
        // 1 * 1.5 truncates to 1
        assert_eq!(required_collateral(1, 15_000).unwrap(), 1);
        assert_eq!(required_collateral(0, 15_000).unwrap(), 0);
    }

    #[test]
    fn max_borrowable_matches_ratio() {
        assert_eq!(max_borrowable(1_500, 15_000).unwrap(), 1_000);
        assert_eq!(max_borrowable(0, 15_000).unwrap(), 0);
    }

    #[test]
    fn solvency_boundary_is_inclusive() {
        let collateral = 1_575;
        // collateral exactly equal to the requirement supports the debt
        assert!(collateral >= required_collateral(1_050, 15_000).unwrap());
        // one more unit of debt breaches the bound
        assert!(collateral < required_collateral(1_051, 15_000).unwrap());
    }

    #[test]
    fn liquidation_requires_strict_inequality() {
        // collateral * threshold == debt * 10000 sits exactly on the line
        assert!(!is_liquidatable(10_000, 12_500, 12_500));
        // one more unit of debt trips it
        assert!(is_liquidatable(10_000, 12_501, 12_500));
    }

    #[test]
    fn zero_debt_never_liquidatable() {
        assert!(!is_liquidatable(0, 0, 12_500));
        assert!(!is_liquidatable(1_000_000, 0, 12_500));
    }

    #[test]
    fn health_factor_reference_scenario() {
        // deposit 1500, debt 1050 after a year at 5%: required = 1575
        let hf = health_factor(1_500, 1_050, 15_000).unwrap();
        assert_eq!(hf, 9_523);
        // unhealthy by the ratio standard but still above the threshold
        assert!(!is_liquidatable(1_500, 1_050, 12_500));
    }

    #[test]
    fn health_factor_no_debt_is_max() {
        assert_eq!(health_factor(1_500, 0, 15_000).unwrap(), u64::MAX);
        assert_eq!(health_factor(0, 0, 15_000).unwrap(), u64::MAX);
    }

    #[test]
    fn split_repayment_interest_first() {
        // repay below accrued interest leaves principal untouched
        assert_eq!(split_repayment(30, 50), (30, 0));
        // repay above interest clears it and pays principal with the rest
        assert_eq!(split_repayment(80, 50), (50, 30));
        assert_eq!(split_repayment(0, 50), (0, 0));
    }

    #[test]
    fn seize_amount_applies_bonus_and_caps() {
        // 105% of the repaid debt
        assert_eq!(seize_amount(1_000, 10_500, 2_000).unwrap(), 1_050);
        // capped to what the position holds
        assert_eq!(seize_amount(1_000, 10_500, 900).unwrap(), 900);
    }

    #[test]
    fn flash_fee_is_nine_bps() {
        assert_eq!(flash_fee(10_000).unwrap(), 9);
        assert_eq!(flash_fee(1_000_000).unwrap(), 900);
        // small borrows truncate to a zero fee
        assert_eq!(flash_fee(1_000).unwrap(), 0);
    }

    #[test]
    fn available_liquidity_saturates() {
        assert_eq!(available_liquidity(1_500, 1_000), 500);
        assert_eq!(available_liquidity(500, 1_000), 0);
    }

    #[test]
    fn min_safe_collateral_rounds_up() {
        // debt 1000 at threshold 125%: 800_0000/12500 = 800 exactly
        assert_eq!(min_safe_collateral(1_000, 12_500).unwrap(), 800);
        // debt 1001: ceil(1001_0000/12500) = ceil(800.8) = 801
        assert_eq!(min_safe_collateral(1_001, 12_500).unwrap(), 801);
        assert_eq!(min_safe_collateral(0, 12_500).unwrap(), 0);
    }

    #[test]
    fn time_to_liquidation_already_seizable() {
        assert_eq!(
            seconds_until_liquidatable(100, 1_000, 0, 500, 12_500).unwrap(),
            0
        );
    }

    #[test]
    fn time_to_liquidation_never_without_principal_or_rate() {
        assert_eq!(
            seconds_until_liquidatable(1_500, 0, 0, 500, 12_500).unwrap(),
            u64::MAX
        );
        assert_eq!(
            seconds_until_liquidatable(1_500, 1_000, 0, 0, 12_500).unwrap(),
            u64::MAX
        );
    }

    #[test]
    fn time_to_liquidation_constant_accrual_estimate() {
        // collateral 1500, principal 1000, 5% APR, threshold 125%:
        // trigger debt = floor(1500 * 12500 / 10000) + 1 = 1876
        let secs = seconds_until_liquidatable(1_500, 1_000, 0, 500, 12_500).unwrap();
        assert_eq!(secs, 552_510_720);

        // at that moment the projected debt reaches the trigger
        let debt = 1_000 + accrued_interest(1_000, 500, secs).unwrap();
        assert_eq!(debt, 1_876);
        assert!(is_liquidatable(1_500, debt, 12_500));
        // one second earlier it does not
        let debt_before = 1_000 + accrued_interest(1_000, 500, secs - 1).unwrap();
        assert!(!is_liquidatable(1_500, debt_before, 12_500));
    }
}
