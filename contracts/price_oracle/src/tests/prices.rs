extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    vec, Address, Env,
};
use strata::{constants::PRICE_PRECISION, error::ErrorCode, oracle::PriceSource};

use super::setup::{deploy_mock_feed, deploy_price_oracle_contract, MAX_PRICE_AGE};

#[test]
fn initialize_twice_fails() {
    let env = Env::default();
    let admin = Address::generate(&env);
    let oracle = deploy_price_oracle_contract(&env, &admin);

    assert_eq!(oracle.query_config().max_price_age, MAX_PRICE_AGE);
    assert_eq!(
        oracle.try_initialize(&admin, &10),
        Err(Ok(ErrorCode::AlreadyInitialized))
    );
}

#[test]
fn manual_price_is_served() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let asset = Address::generate(&env);
    let oracle = deploy_price_oracle_contract(&env, &admin);

    assert!(!oracle.has_feed(&asset));
    oracle.set_sources(&admin, &asset, &vec![&env, PriceSource::Manual(2 * PRICE_PRECISION)]);

    assert!(oracle.has_feed(&asset));
    assert_eq!(oracle.price(&asset), 2 * PRICE_PRECISION);
}

#[test]
fn unknown_asset_has_no_feed() {
    let env = Env::default();
    let oracle = deploy_price_oracle_contract(&env, &Address::generate(&env));

    assert_eq!(
        oracle.try_price(&Address::generate(&env)),
        Err(Ok(ErrorCode::NoPriceFeed))
    );
}

#[test]
fn feed_price_is_served_while_fresh() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = 10_000);

    let admin = Address::generate(&env);
    let asset = Address::generate(&env);
    let oracle = deploy_price_oracle_contract(&env, &admin);
    let feed = deploy_mock_feed(&env);

    feed.set_price(&asset, &(PRICE_PRECISION / 2), &10_000);
    oracle.set_sources(&admin, &asset, &vec![&env, PriceSource::Feed(feed.address.clone())]);
    assert_eq!(oracle.price(&asset), PRICE_PRECISION / 2);

    env.ledger().with_mut(|li| li.timestamp = 10_000 + MAX_PRICE_AGE);
    assert_eq!(oracle.price(&asset), PRICE_PRECISION / 2);

    env.ledger().with_mut(|li| li.timestamp = 10_000 + MAX_PRICE_AGE + 1);
    assert_eq!(oracle.try_price(&asset), Err(Ok(ErrorCode::PriceUnavailable)));
}

#[test]
fn falls_back_to_next_source() {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().with_mut(|li| li.timestamp = 5_000);

    let admin = Address::generate(&env);
    let asset = Address::generate(&env);
    let oracle = deploy_price_oracle_contract(&env, &admin);
    let primary = deploy_mock_feed(&env);
    let secondary = deploy_mock_feed(&env);

    // primary has nothing for the asset, secondary is stale, manual is the last resort
    secondary.set_price(&asset, &(3 * PRICE_PRECISION), &1_000);
    oracle.set_sources(
        &admin,
        &asset,
        &vec![
            &env,
            PriceSource::Feed(primary.address.clone()),
            PriceSource::Feed(secondary.address.clone()),
            PriceSource::Manual(PRICE_PRECISION),
        ],
    );
    assert_eq!(oracle.price(&asset), PRICE_PRECISION);

    secondary.set_price(&asset, &(3 * PRICE_PRECISION), &5_000);
    assert_eq!(oracle.price(&asset), 3 * PRICE_PRECISION);

    primary.set_price(&asset, &(4 * PRICE_PRECISION), &4_900);
    assert_eq!(oracle.price(&asset), 4 * PRICE_PRECISION);
}

#[test]
fn non_positive_feed_price_is_skipped() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let asset = Address::generate(&env);
    let oracle = deploy_price_oracle_contract(&env, &admin);
    let feed = deploy_mock_feed(&env);

    feed.set_price(&asset, &0, &0);
    oracle.set_sources(&admin, &asset, &vec![&env, PriceSource::Feed(feed.address.clone())]);

    assert_eq!(oracle.try_price(&asset), Err(Ok(ErrorCode::PriceUnavailable)));
}

#[test]
fn prices_fails_if_any_asset_is_unpriced() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let a = Address::generate(&env);
    let b = Address::generate(&env);
    let oracle = deploy_price_oracle_contract(&env, &admin);

    oracle.set_sources(&admin, &a, &vec![&env, PriceSource::Manual(PRICE_PRECISION)]);
    assert_eq!(
        oracle.try_prices(&vec![&env, a.clone(), b.clone()]),
        Err(Ok(ErrorCode::NoPriceFeed))
    );

    oracle.set_sources(&admin, &b, &vec![&env, PriceSource::Manual(2 * PRICE_PRECISION)]);
    assert_eq!(
        oracle.prices(&vec![&env, a, b]),
        vec![&env, PRICE_PRECISION, 2 * PRICE_PRECISION]
    );
}

#[test]
fn set_sources_validates_input_and_auth() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let asset = Address::generate(&env);
    let oracle = deploy_price_oracle_contract(&env, &admin);

    assert_eq!(
        oracle.try_set_sources(&admin, &asset, &vec![&env]),
        Err(Ok(ErrorCode::NoPriceFeed))
    );
    assert_eq!(
        oracle.try_set_sources(&admin, &asset, &vec![&env, PriceSource::Manual(0)]),
        Err(Ok(ErrorCode::InvalidPrice))
    );
    assert_eq!(
        oracle.try_set_sources(
            &Address::generate(&env),
            &asset,
            &vec![&env, PriceSource::Manual(PRICE_PRECISION)]
        ),
        Err(Ok(ErrorCode::NotAuthorized))
    );
}

#[test]
fn removed_sources_leave_asset_unpriced() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let asset = Address::generate(&env);
    let oracle = deploy_price_oracle_contract(&env, &admin);

    oracle.set_sources(&admin, &asset, &vec![&env, PriceSource::Manual(PRICE_PRECISION)]);
    oracle.remove_sources(&admin, &asset);

    assert!(!oracle.has_feed(&asset));
    assert_eq!(oracle.query_sources(&asset).len(), 0);
    assert_eq!(oracle.try_price(&asset), Err(Ok(ErrorCode::NoPriceFeed)));
}

#[test]
fn update_max_price_age() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let oracle = deploy_price_oracle_contract(&env, &admin);

    oracle.update_max_price_age(&admin, &60);
    assert_eq!(oracle.query_config().max_price_age, 60);
}
