use soroban_sdk::{log, token, Address, Env, Map, Vec};
use strata::{
    error::{ErrorCode, StrataResult},
    interfaces::PriceOracleClient,
    math::safe_math::SafeMath,
    validate,
};

use crate::{
    events::VaultEvents,
    math::shares::usd_value,
    storage::{get_held_assets, save_held_assets, AssetEntry, Config},
};

/// USD value of every held asset plus their sum
pub struct Valuation {
    pub values: Map<Address, i128>,
    pub nav: i128,
}

impl Valuation {
    pub fn value_of(&self, asset: &Address) -> i128 {
        self.values.get(asset.clone()).unwrap_or(0)
    }
}

pub fn balance_of(env: &Env, asset: &Address) -> i128 {
    token::Client::new(env, asset).balance(&env.current_contract_address())
}

pub fn held_entry(env: &Env, asset: &Address) -> StrataResult<AssetEntry> {
    get_held_assets(env).get(asset.clone()).ok_or_else(|| {
        log!(env, "Vault: asset is not held", asset.clone());
        ErrorCode::UnsupportedAsset
    })
}

/// Decimals of `asset`, from the held set when tracked, else from the token itself
pub fn decimals_of(env: &Env, asset: &Address) -> u32 {
    match get_held_assets(env).get(asset.clone()) {
        Some(entry) => entry.decimals,
        None => token::Client::new(env, asset).decimals(),
    }
}

/// Adds `asset` to the held set, caching its decimals. Returns the entry and whether it
/// was newly added.
pub fn register_asset(env: &Env, asset: &Address) -> (AssetEntry, bool) {
    let mut held = get_held_assets(env);
    if let Some(entry) = held.get(asset.clone()) {
        return (entry, false);
    }

    let entry = AssetEntry {
        decimals: token::Client::new(env, asset).decimals(),
    };
    held.set(asset.clone(), entry);
    save_held_assets(env, &held);

    VaultEvents::held_asset_added(env, asset.clone(), entry.decimals);

    (entry, true)
}

/// Drops `asset` from the held set if, and only if, the vault's balance of it is zero.
pub fn deregister_if_drained(env: &Env, asset: &Address) -> bool {
    let mut held = get_held_assets(env);
    if !held.contains_key(asset.clone()) || balance_of(env, asset) != 0 {
        return false;
    }

    held.remove(asset.clone());
    save_held_assets(env, &held);

    VaultEvents::held_asset_removed(env, asset.clone());

    true
}

pub fn price_of(env: &Env, config: &Config, asset: &Address) -> StrataResult<i128> {
    let price = match PriceOracleClient::new(env, &config.oracle).try_price(asset) {
        Ok(Ok(price)) => price,
        Err(Ok(error)) => {
            log!(env, "Vault: oracle rejected price request", asset.clone());
            return Err(error);
        }
        _ => {
            log!(env, "Vault: oracle call failed", asset.clone());
            return Err(ErrorCode::PriceUnavailable);
        }
    };

    validate!(
        env,
        price > 0,
        ErrorCode::InvalidPrice,
        "Vault: non-positive oracle price {}",
        price
    )?;

    Ok(price)
}

pub fn prices_of(env: &Env, config: &Config, assets: &Vec<Address>) -> StrataResult<Vec<i128>> {
    if assets.is_empty() {
        return Ok(Vec::new(env));
    }

    let prices = match PriceOracleClient::new(env, &config.oracle).try_prices(assets) {
        Ok(Ok(prices)) => prices,
        Err(Ok(error)) => {
            log!(env, "Vault: oracle rejected batch price request");
            return Err(error);
        }
        _ => {
            log!(env, "Vault: oracle batch call failed");
            return Err(ErrorCode::PriceUnavailable);
        }
    };

    validate!(
        env,
        prices.len() == assets.len(),
        ErrorCode::PriceUnavailable,
        "Vault: oracle returned {} prices for {} assets",
        prices.len(),
        assets.len()
    )?;

    for price in prices.iter() {
        validate!(env, price > 0, ErrorCode::InvalidPrice)?;
    }

    Ok(prices)
}

/// Prices every held asset with a nonzero balance in one oracle call. Zero balances are
/// valued at zero without touching the oracle.
pub fn valuation(env: &Env, config: &Config) -> StrataResult<Valuation> {
    let held = get_held_assets(env);

    let mut assets = Vec::new(env);
    let mut balances = Vec::new(env);
    let mut decimals = Vec::new(env);
    let mut values = Map::new(env);

    for (asset, entry) in held.iter() {
        let balance = balance_of(env, &asset);
        if balance == 0 {
            values.set(asset, 0);
            continue;
        }
        assets.push_back(asset);
        balances.push_back(balance);
        decimals.push_back(entry.decimals);
    }

    let prices = prices_of(env, config, &assets)?;

    let mut nav: i128 = 0;
    for i in 0..assets.len() {
        let value = usd_value(
            env,
            balances.get_unchecked(i),
            decimals.get_unchecked(i),
            prices.get_unchecked(i),
        )?;
        nav = nav.safe_add(value, env)?;
        values.set(assets.get_unchecked(i), value);
    }

    Ok(Valuation { values, nav })
}

pub fn nav(env: &Env, config: &Config) -> StrataResult<i128> {
    Ok(valuation(env, config)?.nav)
}

pub fn asset_value(env: &Env, config: &Config, asset: &Address) -> StrataResult<i128> {
    let entry = held_entry(env, asset)?;
    let balance = balance_of(env, asset);
    if balance == 0 {
        return Ok(0);
    }
    let price = price_of(env, config, asset)?;
    usd_value(env, balance, entry.decimals, price)
}
