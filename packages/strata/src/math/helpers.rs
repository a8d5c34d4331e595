use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::Env;

use crate::{
    constants::{BPS_DENOMINATOR, PRICE_DECIMALS},
    error::{ErrorCode, StrataResult},
    math_error, validate,
};

use super::{bn::U256, safe_math::SafeMath};

/// `value * numerator / denominator` rounded down, evaluated in 256 bits so that
/// balance-times-price products never overflow. All inputs must be non-negative.
pub fn mul_div_floor(env: &Env, value: i128, numerator: i128, denominator: i128) -> StrataResult<i128> {
    validate!(
        env,
        value >= 0 && numerator >= 0 && denominator > 0,
        ErrorCode::MathError,
        "mul_div_floor: invalid operands"
    )?;

    if let Some(product) = value.checked_mul(numerator) {
        return product.safe_div(denominator, env);
    }

    let wide = U256::from(value as u128) * U256::from(numerator as u128)
        / U256::from(denominator as u128);

    let narrow = wide.checked_as_u128().ok_or_else(math_error!(env))?;
    i128::try_from(narrow).map_err(|_| math_error!(env)())
}

/// `value * bps / 10_000` rounded down
pub fn bps_of(env: &Env, value: i128, bps: u32) -> StrataResult<i128> {
    value
        .fixed_mul_floor(i128::from(bps), BPS_DENOMINATOR)
        .ok_or_else(math_error!(env))
}

pub fn pow10(env: &Env, exponent: u32) -> StrataResult<i128> {
    10_i128.checked_pow(exponent).ok_or_else(math_error!(env))
}

/// Rescales a native token amount to 18 fractional digits. Scaling down floors.
pub fn normalize_amount(env: &Env, amount: i128, decimals: u32) -> StrataResult<i128> {
    if decimals == PRICE_DECIMALS {
        Ok(amount)
    } else if decimals < PRICE_DECIMALS {
        amount.safe_mul(pow10(env, PRICE_DECIMALS - decimals)?, env)
    } else {
        amount.safe_div(pow10(env, decimals - PRICE_DECIMALS)?, env)
    }
}

/// Inverse of [`normalize_amount`]; scaling down floors.
pub fn denormalize_amount(env: &Env, amount: i128, decimals: u32) -> StrataResult<i128> {
    if decimals == PRICE_DECIMALS {
        Ok(amount)
    } else if decimals < PRICE_DECIMALS {
        amount.safe_div(pow10(env, PRICE_DECIMALS - decimals)?, env)
    } else {
        amount.safe_mul(pow10(env, decimals - PRICE_DECIMALS)?, env)
    }
}
