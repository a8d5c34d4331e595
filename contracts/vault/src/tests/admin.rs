extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    vec, Address,
};
use strata::{error::ErrorCode, oracle::PriceSource, types::TargetWeight};
use test_case::test_case;

use super::setup::{deploy_token_contract, mint, swap, VaultFixture, TOKEN, UNIT};
use crate::{
    contract::{Vault, VaultClient},
    storage::{Config, ConfigUpdate, RebalanceBudget, VaultMode, VaultParams},
};

fn params_of(config: Config) -> VaultParams {
    VaultParams {
        admin: config.admin,
        rebalancer: config.rebalancer,
        share_token: config.share_token,
        oracle: config.oracle,
        swap_venue: config.swap_venue,
        weight_registry: config.weight_registry,
        mode: config.mode,
        fee_bps: config.fee_bps,
        min_deposit_usd: config.min_deposit_usd,
        daily_cap_bps: config.daily_cap_bps,
        max_batch_size: config.max_batch_size,
        rebalance_threshold_bps: config.rebalance_threshold_bps,
        min_rebalance_interval: config.min_rebalance_interval,
        max_slippage_bps: config.max_slippage_bps,
        accepted_assets: config.accepted_assets,
        basket: config.basket,
    }
}

#[test]
fn initializing_twice_fails() {
    let f = VaultFixture::scaled();

    assert_eq!(
        f.vault.try_initialize(&params_of(f.vault.query_config())),
        Err(Ok(ErrorCode::AlreadyInitialized))
    );
}

#[test]
fn initialize_stores_params() {
    let f = VaultFixture::new(VaultMode::Basket, 30);
    let config = f.vault.query_config();

    assert_eq!(config.admin, f.admin);
    assert_eq!(config.rebalancer, f.rebalancer);
    assert_eq!(config.mode, VaultMode::Basket);
    assert_eq!(config.fee_bps, 30);
    assert_eq!(config.paused_operations, vec![&f.env]);
    assert_eq!(f.vault.query_last_rebalance_ts(), 0);
    assert!(!f.vault.query_is_locked());
}

#[test_case(|p| p.fee_bps = 101, ErrorCode::InvalidFee ; "fee above ceiling")]
#[test_case(|p| p.daily_cap_bps = 0, ErrorCode::InvalidBps ; "zero daily cap")]
#[test_case(|p| p.daily_cap_bps = 10_001, ErrorCode::InvalidBps ; "daily cap above 100%")]
#[test_case(|p| p.rebalance_threshold_bps = 10_001, ErrorCode::InvalidBps ; "threshold above 100%")]
#[test_case(|p| p.max_batch_size = 0, ErrorCode::BatchTooLarge ; "empty batch size")]
#[test_case(|p| p.max_batch_size = 31, ErrorCode::BatchTooLarge ; "batch size above limit")]
#[test_case(|p| p.min_deposit_usd = -1, ErrorCode::ZeroAmount ; "negative minimum deposit")]
#[test_case(|p| { p.mode = VaultMode::Scaled; p.weight_registry = None }, ErrorCode::InvalidMode ; "scaled without registry")]
#[test_case(|p| { p.basket.pop_back(); }, ErrorCode::InvalidWeights ; "basket short of 100%")]
fn initialize_rejects_invalid_params(mutate: fn(&mut VaultParams), expected: ErrorCode) {
    let f = VaultFixture::basket();
    let mut params = params_of(f.vault.query_config());
    mutate(&mut params);

    let vault = VaultClient::new(&f.env, &f.env.register(Vault, ()));

    assert_eq!(vault.try_initialize(&params), Err(Ok(expected)));
}

#[test]
fn basket_weights_must_be_distinct() {
    let f = VaultFixture::basket();
    let duplicated = vec![
        &f.env,
        TargetWeight {
            asset: f.a.clone(),
            weight_bps: 5_000,
        },
        TargetWeight {
            asset: f.a.clone(),
            weight_bps: 5_000,
        },
    ];

    assert_eq!(
        f.vault.try_update_basket(&f.admin, &duplicated),
        Err(Ok(ErrorCode::InvalidWeights))
    );
}

#[test]
fn update_config_is_admin_only_and_validated() {
    let f = VaultFixture::scaled();
    let raise_fee = ConfigUpdate {
        fee_bps: Some(50),
        ..Default::default()
    };

    assert_eq!(
        f.vault.try_update_config(&f.rebalancer, &raise_fee),
        Err(Ok(ErrorCode::NotAuthorized))
    );
    assert_eq!(
        f.vault.try_update_config(&Address::generate(&f.env), &raise_fee),
        Err(Ok(ErrorCode::NotAuthorized))
    );
    assert_eq!(
        f.vault.try_update_config(
            &f.admin,
            &ConfigUpdate {
                fee_bps: Some(101),
                ..Default::default()
            }
        ),
        Err(Ok(ErrorCode::InvalidFee))
    );

    let rebalancer = Address::generate(&f.env);
    f.vault.update_config(
        &f.admin,
        &ConfigUpdate {
            rebalancer: Some(rebalancer.clone()),
            fee_bps: Some(50),
            min_rebalance_interval: Some(7_200),
            ..Default::default()
        },
    );

    let config = f.vault.query_config();
    assert_eq!(config.rebalancer, rebalancer);
    assert_eq!(config.fee_bps, 50);
    assert_eq!(config.min_rebalance_interval, 7_200);
    // untouched
    assert_eq!(config.daily_cap_bps, 1_000);
    assert_eq!(config.max_slippage_bps, 100);
}

#[test]
fn replaced_rebalancer_loses_its_role() {
    let f = VaultFixture::scaled();
    f.seed_scaled();
    let rebalancer = Address::generate(&f.env);
    f.vault.update_config(
        &f.admin,
        &ConfigUpdate {
            rebalancer: Some(rebalancer.clone()),
            ..Default::default()
        },
    );
    let swaps = vec![&f.env, swap(&f.a, &f.c, TOKEN, 0)];

    assert_eq!(
        f.vault.try_execute_batch_swaps(&f.rebalancer, &swaps),
        Err(Ok(ErrorCode::NotAuthorized))
    );
    assert_eq!(f.vault.execute_batch_swaps(&rebalancer, &swaps), 2 * UNIT);
}

#[test]
fn accepted_assets_gate_deposits() {
    let f = VaultFixture::scaled();
    let d = deploy_token_contract(&f.env, &f.admin);
    f.oracle
        .set_sources(&f.admin, &d, &vec![&f.env, PriceSource::Manual(UNIT)]);
    let user = f.user_with(&[(&d, 10 * TOKEN), (&f.a, 10 * TOKEN)]);

    assert_eq!(
        f.vault.try_deposit(&user, &d, &(10 * TOKEN), &0),
        Err(Ok(ErrorCode::UnsupportedAsset))
    );

    f.vault
        .update_accepted_assets(&f.admin, &vec![&f.env, d.clone()], &vec![&f.env, f.a.clone()]);

    let accepted = f.vault.query_config().accepted_assets;
    assert!(accepted.contains(&d));
    assert!(!accepted.contains(&f.a));

    assert_eq!(f.vault.deposit(&user, &d, &(10 * TOKEN), &0), 10 * UNIT);
    assert_eq!(
        f.vault.try_deposit(&user, &f.a, &(10 * TOKEN), &0),
        Err(Ok(ErrorCode::UnsupportedAsset))
    );

    assert_eq!(
        f.vault.try_update_accepted_assets(
            &f.rebalancer,
            &vec![&f.env, f.a.clone()],
            &vec![&f.env]
        ),
        Err(Ok(ErrorCode::NotAuthorized))
    );
}

#[test]
fn held_assets_are_managed_by_the_rebalancer() {
    let f = VaultFixture::scaled();
    f.seed_scaled();
    let d = deploy_token_contract(&f.env, &f.admin);

    assert!(f.vault.add_held_asset(&f.rebalancer, &d));
    assert!(!f.vault.add_held_asset(&f.rebalancer, &d));
    assert_eq!(f.vault.query_asset_entry(&d).decimals, 7);

    // a held asset with a balance stays
    assert!(!f.vault.remove_held_asset(&f.rebalancer, &f.a));
    assert!(f.vault.query_held_assets().contains(&f.a));

    assert!(f.vault.remove_held_asset(&f.rebalancer, &d));
    assert!(!f.vault.query_held_assets().contains(&d));
    assert_eq!(
        f.vault.try_query_asset_entry(&d),
        Err(Ok(ErrorCode::UnsupportedAsset))
    );

    assert_eq!(
        f.vault
            .try_add_held_asset(&Address::generate(&f.env), &d),
        Err(Ok(ErrorCode::NotAuthorized))
    );
}

#[test]
fn donations_to_a_held_asset_raise_nav_per_share() {
    let f = VaultFixture::scaled();
    let user = f.user_with(&[(&f.c, 100 * TOKEN)]);
    f.vault.deposit(&user, &f.c, &(100 * TOKEN), &0);

    mint(&f.env, &f.c, &f.vault.address, 100 * TOKEN);

    assert_eq!(f.vault.query_nav(), 200 * UNIT);
    assert_eq!(f.vault.query_nav_per_share(), 2 * UNIT);
}

#[test]
fn price_moves_flow_into_nav() {
    let f = VaultFixture::scaled();
    let user = f.user_with(&[(&f.a, 100 * TOKEN)]);
    f.vault.deposit(&user, &f.a, &(100 * TOKEN), &0);

    f.oracle
        .set_sources(&f.admin, &f.a, &vec![&f.env, PriceSource::Manual(4 * UNIT)]);

    assert_eq!(f.vault.query_nav(), 400 * UNIT);
    assert_eq!(f.vault.query_nav_per_share(), 2 * UNIT);
}

#[test]
fn nav_per_share_starts_at_one_dollar() {
    let f = VaultFixture::scaled();

    assert_eq!(f.vault.query_nav(), 0);
    assert_eq!(f.vault.query_nav_per_share(), UNIT);
}

#[test]
fn budget_query_rolls_over_without_writes() {
    let f = VaultFixture::scaled();
    f.seed_scaled();
    f.vault
        .execute_batch_swaps(&f.rebalancer, &vec![&f.env, swap(&f.a, &f.c, 5 * TOKEN, 0)]);

    assert_eq!(
        f.vault.query_budget(),
        RebalanceBudget {
            value_moved_today: 10 * UNIT,
            day_index: 0,
        }
    );

    f.env
        .ledger()
        .with_mut(|li| li.timestamp = 3 * 86_400 + 10);

    assert_eq!(
        f.vault.query_budget(),
        RebalanceBudget {
            value_moved_today: 0,
            day_index: 3,
        }
    );
}
