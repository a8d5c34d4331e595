extern crate std;

use pretty_assertions::assert_eq;
use soroban_sdk::{testutils::Address as _, vec, Address, BytesN, Env, Vec};
use strata::{
    error::ErrorCode,
    merkle,
    testutils::{merkle_proof, merkle_root},
};

use super::setup::{deploy_weight_registry_contract, weight_leaves, weights_root};

#[test]
fn verify_weight_against_active_root() {
    let env = Env::default();
    let assets = vec![
        &env,
        Address::generate(&env),
        Address::generate(&env),
        Address::generate(&env),
    ];
    let weights = [5_000u32, 3_000, 2_000];
    let leaves = weight_leaves(&env, &assets, &weights);
    let root = merkle_root(&env, &leaves);

    let registry = deploy_weight_registry_contract(
        &env,
        &Address::generate(&env),
        &Address::generate(&env),
        Some(root),
    );

    for i in 0..assets.len() {
        let proof = merkle_proof(&env, &leaves, i);
        assert!(registry.verify_weight(&assets.get_unchecked(i), &weights[i as usize], &proof));
    }

    let proof = merkle_proof(&env, &leaves, 0);
    assert!(!registry.verify_weight(&assets.get_unchecked(0), &4_999, &proof));
    assert!(!registry.verify_weight(&assets.get_unchecked(1), &5_000, &proof));
}

#[test]
fn proofs_stop_verifying_after_root_rotation() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let assets = vec![&env, Address::generate(&env), Address::generate(&env)];
    let leaves = weight_leaves(&env, &assets, &[6_000, 4_000]);
    let registry = deploy_weight_registry_contract(
        &env,
        &admin,
        &Address::generate(&env),
        Some(merkle_root(&env, &leaves)),
    );

    let proof = merkle_proof(&env, &leaves, 1);
    assert!(registry.verify_weight(&assets.get_unchecked(1), &4_000, &proof));

    registry.emergency_set_root(&admin, &weights_root(&env, &assets, &[7_000, 3_000]));
    assert!(!registry.verify_weight(&assets.get_unchecked(1), &4_000, &proof));
}

#[test]
fn tiered_proof_binds_tier_and_rank() {
    let env = Env::default();
    let btc = Address::generate(&env);
    let eth = Address::generate(&env);
    let leaves: Vec<BytesN<32>> = vec![
        &env,
        merkle::compute_tiered_leaf(&env, &btc, 6_000, 1, 1),
        merkle::compute_tiered_leaf(&env, &eth, 4_000, 2, 2),
    ];

    let registry = deploy_weight_registry_contract(
        &env,
        &Address::generate(&env),
        &Address::generate(&env),
        Some(merkle_root(&env, &leaves)),
    );

    let proof = merkle_proof(&env, &leaves, 1);
    assert!(registry.verify_tiered_weight(&eth, &4_000, &2, &2, &proof));
    assert!(!registry.verify_tiered_weight(&eth, &4_000, &1, &2, &proof));
    assert!(!registry.verify_tiered_weight(&eth, &4_000, &2, &3, &proof));
    // the untiered leaf of the same pair is a different commitment
    assert!(!registry.verify_weight(&eth, &4_000, &proof));
}

#[test]
fn verify_weights_batch() {
    let env = Env::default();
    let assets = vec![
        &env,
        Address::generate(&env),
        Address::generate(&env),
        Address::generate(&env),
    ];
    let weights = [2_500u32, 2_500, 5_000];
    let leaves = weight_leaves(&env, &assets, &weights);

    let registry = deploy_weight_registry_contract(
        &env,
        &Address::generate(&env),
        &Address::generate(&env),
        Some(merkle_root(&env, &leaves)),
    );

    let proofs = vec![
        &env,
        merkle_proof(&env, &leaves, 0),
        merkle_proof(&env, &leaves, 1),
        merkle_proof(&env, &leaves, 2),
    ];
    let weight_vec = vec![&env, 2_500u32, 2_500, 5_000];
    assert!(registry.verify_weights(&assets, &weight_vec, &proofs));

    let bad_weights = vec![&env, 2_500u32, 2_500, 4_000];
    assert!(!registry.verify_weights(&assets, &bad_weights, &proofs));

    let short_weights = vec![&env, 2_500u32, 2_500];
    assert_eq!(
        registry.try_verify_weights(&assets, &short_weights, &proofs),
        Err(Ok(ErrorCode::ArrayLengthMismatch))
    );
}
