use soroban_sdk::Env;
use strata::{
    constants::{BPS_DENOMINATOR, PRICE_PRECISION},
    error::{ErrorCode, StrataResult},
    math::{
        helpers::{bps_of, denormalize_amount, mul_div_floor, normalize_amount},
        safe_math::SafeMath,
    },
    validate,
};

/// USD value (18 decimals) of a native `amount` priced at `price`
pub fn usd_value(env: &Env, amount: i128, decimals: u32, price: i128) -> StrataResult<i128> {
    let normalized = normalize_amount(env, amount, decimals)?;
    mul_div_floor(env, normalized, price, PRICE_PRECISION)
}

/// Native amount of an asset worth `usd` at `price`, rounded down
pub fn amount_for_usd(env: &Env, usd: i128, decimals: u32, price: i128) -> StrataResult<i128> {
    validate!(env, price > 0, ErrorCode::InvalidPrice)?;
    let normalized = mul_div_floor(env, usd, PRICE_PRECISION, price)?;
    denormalize_amount(env, normalized, decimals)
}

/// Splits `usd` into `(net, fee)`
pub fn apply_fee(env: &Env, usd: i128, fee_bps: u32) -> StrataResult<(i128, i128)> {
    let fee = bps_of(env, usd, fee_bps)?;
    Ok((usd.safe_sub(fee, env)?, fee))
}

/// Shares minted for `net_usd` of new value. `nav` already includes that value; the
/// first deposit mints one share per dollar.
pub fn shares_for_deposit(env: &Env, net_usd: i128, total_supply: i128, nav: i128) -> StrataResult<i128> {
    if total_supply == 0 {
        return Ok(net_usd);
    }

    validate!(
        env,
        nav > 0,
        ErrorCode::MathError,
        "Vault: Shares: outstanding supply against zero NAV"
    )?;

    mul_div_floor(env, net_usd, total_supply, nav)
}

/// The slice of `nav` owned by `shares`
pub fn usd_for_shares(env: &Env, shares: i128, total_supply: i128, nav: i128) -> StrataResult<i128> {
    validate!(env, total_supply > 0, ErrorCode::ZeroTotalSupply)?;
    mul_div_floor(env, nav, shares, total_supply)
}

pub fn nav_per_share(env: &Env, nav: i128, total_supply: i128) -> StrataResult<i128> {
    if total_supply == 0 {
        return Ok(PRICE_PRECISION);
    }
    mul_div_floor(env, nav, PRICE_PRECISION, total_supply)
}

pub fn weight_bps(env: &Env, value: i128, nav: i128) -> StrataResult<u32> {
    if nav == 0 {
        return Ok(0);
    }
    let weight = mul_div_floor(env, value, BPS_DENOMINATOR, nav)?;
    u32::try_from(weight).map_err(|_| ErrorCode::MathError)
}

/// Smallest output tolerated for an oracle-implied `expected` output
pub fn slippage_floor(env: &Env, expected: i128, max_slippage_bps: u32) -> StrataResult<i128> {
    expected.safe_sub(bps_of(env, expected, max_slippage_bps)?, env)
}
