use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env, Vec};
use strata::{
    error::{ErrorCode, StrataResult},
    interfaces::PriceOracleInterface,
    oracle::{resolve_price, PriceOutcome, PriceSource},
    types::Role,
    utils::require_role,
    validate,
};

use crate::{
    events::OracleEvents,
    storage::{
        delete_sources, get_config, get_sources, is_initialized, save_config, save_sources,
        set_initialized, Config,
    },
};

contractmeta!(
    key = "Description",
    val = "USD prices for index constituents with ordered fallback sources"
);

#[contract]
pub struct PriceOracle;

#[contractimpl]
impl PriceOracle {
    pub fn initialize(env: Env, admin: Address, max_price_age: u64) -> Result<(), ErrorCode> {
        if is_initialized(&env) {
            log!(&env, "Price Oracle: Initialize: initializing contract twice is not allowed");
            return Err(ErrorCode::AlreadyInitialized);
        }

        set_initialized(&env);
        save_config(
            &env,
            &Config {
                admin: admin.clone(),
                max_price_age,
            },
        );

        OracleEvents::initialize(&env, admin, max_price_age);

        Ok(())
    }

    /// Replaces the price sources of `asset`. Sources are tried in the given order.
    pub fn set_sources(
        env: Env,
        sender: Address,
        asset: Address,
        sources: Vec<PriceSource>,
    ) -> Result<(), ErrorCode> {
        let config = get_config(&env);
        require_role(&env, &config, Role::Admin, &sender, true)?;

        validate!(
            &env,
            !sources.is_empty(),
            ErrorCode::NoPriceFeed,
            "Price Oracle: Set Sources: at least one source is required"
        )?;

        for source in sources.iter() {
            if let PriceSource::Manual(price) = source {
                validate!(
                    &env,
                    price > 0,
                    ErrorCode::InvalidPrice,
                    "Price Oracle: Set Sources: manual price {} must be positive",
                    price
                )?;
            }
        }

        save_sources(&env, &asset, &sources);
        OracleEvents::sources_set(&env, asset, sources);

        Ok(())
    }

    pub fn remove_sources(env: Env, sender: Address, asset: Address) -> Result<(), ErrorCode> {
        let config = get_config(&env);
        require_role(&env, &config, Role::Admin, &sender, true)?;

        delete_sources(&env, &asset);
        OracleEvents::sources_removed(&env, asset);

        Ok(())
    }

    pub fn update_max_price_age(env: Env, sender: Address, max_price_age: u64) -> Result<(), ErrorCode> {
        let mut config = get_config(&env);
        require_role(&env, &config, Role::Admin, &sender, true)?;

        config.max_price_age = max_price_age;
        save_config(&env, &config);

        OracleEvents::max_price_age_updated(&env, max_price_age);

        Ok(())
    }

    // ################################################################
    //                             QUERIES
    // ################################################################

    pub fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    pub fn query_sources(env: Env, asset: Address) -> Vec<PriceSource> {
        get_sources(&env, &asset).unwrap_or(Vec::new(&env))
    }
}

fn price_of(env: &Env, config: &Config, asset: &Address) -> StrataResult<i128> {
    let sources = match get_sources(env, asset) {
        Some(sources) if !sources.is_empty() => sources,
        _ => {
            log!(env, "Price Oracle: no price source for asset", asset.clone());
            return Err(ErrorCode::NoPriceFeed);
        }
    };

    match resolve_price(
        env,
        &sources,
        asset,
        env.ledger().timestamp(),
        config.max_price_age,
    ) {
        PriceOutcome::Available(price) => Ok(price),
        PriceOutcome::Unavailable => {
            log!(env, "Price Oracle: every source failed for asset", asset.clone());
            Err(ErrorCode::PriceUnavailable)
        }
    }
}

#[contractimpl]
impl PriceOracleInterface for PriceOracle {
    fn price(env: Env, asset: Address) -> Result<i128, ErrorCode> {
        let config = get_config(&env);
        price_of(&env, &config, &asset)
    }

    fn prices(env: Env, assets: Vec<Address>) -> Result<Vec<i128>, ErrorCode> {
        let config = get_config(&env);
        let mut prices = Vec::new(&env);
        for asset in assets.iter() {
            prices.push_back(price_of(&env, &config, &asset)?);
        }
        Ok(prices)
    }

    fn has_feed(env: Env, asset: Address) -> bool {
        get_sources(&env, &asset).is_some_and(|sources| !sources.is_empty())
    }
}
