use soroban_sdk::{Address, BytesN, Env, Vec};
use strata::{merkle, testutils::merkle_root};

use crate::contract::{WeightRegistry, WeightRegistryClient};

pub fn deploy_weight_registry_contract<'a>(
    env: &Env,
    admin: &Address,
    indexer: &Address,
    initial_root: Option<BytesN<32>>,
) -> WeightRegistryClient<'a> {
    let registry = WeightRegistryClient::new(env, &env.register(WeightRegistry, ()));
    registry.initialize(admin, indexer, &initial_root);
    registry
}

pub fn weight_leaves(env: &Env, assets: &Vec<Address>, weights: &[u32]) -> Vec<BytesN<32>> {
    let mut leaves = Vec::new(env);
    for (i, asset) in assets.iter().enumerate() {
        leaves.push_back(merkle::compute_leaf(env, &asset, weights[i]));
    }
    leaves
}

pub fn weights_root(env: &Env, assets: &Vec<Address>, weights: &[u32]) -> BytesN<32> {
    merkle_root(env, &weight_leaves(env, assets, weights))
}
