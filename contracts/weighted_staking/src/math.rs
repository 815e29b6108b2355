//! Fixed-point helpers.
//!
//! Every multiply-then-divide goes through [`mul_div_floor`], which falls back to the
//! host's 256-bit integer when the product does not fit in `i128`. Results are floored.

use soroban_sdk::{Env, U256};

use crate::constants::{BPS_DENOMINATOR, MULTIPLIER_SCALE, PRECISION};
use crate::errors::StakingError;

/// `floor(a * b / denominator)` for non-negative operands.
pub fn mul_div_floor(e: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, StakingError> {
    if a < 0 || b < 0 || denominator <= 0 {
        return Err(StakingError::ArithmeticOverflow);
    }
    if let Some(product) = a.checked_mul(b) {
        return Ok(product / denominator);
    }
    let wide = U256::from_u128(e, as_u128(a)?)
        .mul(&U256::from_u128(e, as_u128(b)?))
        .div(&U256::from_u128(e, as_u128(denominator)?));
    let narrow = wide.to_u128().ok_or(StakingError::ArithmeticOverflow)?;
    i128::try_from(narrow).map_err(|_| StakingError::ArithmeticOverflow)
}

fn as_u128(v: i128) -> Result<u128, StakingError> {
    u128::try_from(v).map_err(|_| StakingError::ArithmeticOverflow)
}

pub fn add(a: i128, b: i128) -> Result<i128, StakingError> {
    a.checked_add(b).ok_or(StakingError::ArithmeticOverflow)
}

pub fn sub(a: i128, b: i128) -> Result<i128, StakingError> {
    a.checked_sub(b).ok_or(StakingError::ArithmeticOverflow)
}

/// Token base units -> scaled units.
pub fn to_scaled(amount: i128) -> Result<i128, StakingError> {
    amount
        .checked_mul(PRECISION)
        .ok_or(StakingError::ArithmeticOverflow)
}

/// Scaled units -> token base units, truncating sub-unit dust.
pub fn to_token_units(scaled: i128) -> i128 {
    scaled / PRECISION
}

/// Splits scaled units into whole token base units and the scaled remainder below one unit.
pub fn split_token_units(scaled: i128) -> (i128, i128) {
    (scaled / PRECISION, scaled % PRECISION)
}

/// `principal * multiplier`, floored.
pub fn weight(e: &Env, principal: i128, multiplier: u32) -> Result<i128, StakingError> {
    mul_div_floor(
        e,
        principal,
        i128::from(multiplier),
        i128::from(MULTIPLIER_SCALE),
    )
}

/// A position's slice of `budget`, judged against the frozen pass denominator.
pub fn pro_rata_share(
    e: &Env,
    weighted_principal: i128,
    budget: i128,
    total_weight: i128,
) -> Result<i128, StakingError> {
    if total_weight == 0 {
        return Ok(0);
    }
    mul_div_floor(e, weighted_principal, budget, total_weight)
}

/// `amount * bps / 10_000`, floored.
pub fn apply_bps(e: &Env, amount: i128, bps: u32) -> Result<i128, StakingError> {
    mul_div_floor(e, amount, i128::from(bps), i128::from(BPS_DENOMINATOR))
}
