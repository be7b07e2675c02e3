//! Exact integer arithmetic for share pricing, fees and repayment.
//!
//! Every quotient is floored. All helpers return `Error::Overflow` on
//! overflow or division by zero instead of panicking.

use ina_common::BASIS_POINTS_DENOMINATOR;

use crate::Error;

/// Shares minted for a deposit of `amount`.
///
/// - First deposit (`total_shares == 0`): `shares = amount`
/// - Otherwise: `shares = amount * total_shares / total_assets`
pub fn shares_for_deposit(amount: i128, total_shares: i128, total_assets: i128) -> Result<i128, Error> {
    if total_shares == 0 {
        return Ok(amount);
    }
    mul_div(amount, total_shares, total_assets)
}

/// `value * basis_points / 10_000`.
pub fn apply_basis_points(value: i128, basis_points: u32) -> Result<i128, Error> {
    mul_div(value, basis_points as i128, BASIS_POINTS_DENOMINATOR)
}

/// Principal plus the estimated return on it.
pub fn repayment_amount(total_invested: i128, return_basis_points: u32) -> Result<i128, Error> {
    total_invested
        .checked_add(apply_basis_points(total_invested, return_basis_points)?)
        .ok_or(Error::Overflow)
}

/// An investor's cut of `repayment`, pro rata to `shares / total_shares`.
pub fn payout_for_shares(shares: i128, repayment: i128, total_shares: i128) -> Result<i128, Error> {
    mul_div(shares, repayment, total_shares)
}

fn mul_div(a: i128, b: i128, denominator: i128) -> Result<i128, Error> {
    a.checked_mul(b)
        .ok_or(Error::Overflow)?
        .checked_div(denominator)
        .ok_or(Error::Overflow)
}
