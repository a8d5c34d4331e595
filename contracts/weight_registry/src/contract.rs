use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, BytesN, Env, Vec};
use strata::{
    constants::{INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, ROOT_DELAY},
    error::ErrorCode,
    interfaces::WeightRegistryInterface,
    merkle,
    types::Role,
    utils::require_role,
    validate,
};

use crate::{
    events::RegistryEvents,
    storage::{
        get_commitment, get_config, is_initialized, save_commitment, save_config,
        set_initialized, zero_root, Config, WeightCommitment,
    },
};

contractmeta!(
    key = "Description",
    val = "Staged merkle commitment to the target weights of an index basket"
);

#[contract]
pub struct WeightRegistry;

#[contractimpl]
impl WeightRegistry {
    pub fn initialize(
        env: Env,
        admin: Address,
        indexer: Address,
        initial_root: Option<BytesN<32>>,
    ) -> Result<(), ErrorCode> {
        if is_initialized(&env) {
            log!(&env, "Weight Registry: Initialize: initializing contract twice is not allowed");
            return Err(ErrorCode::AlreadyInitialized);
        }

        set_initialized(&env);

        let config = Config {
            admin: admin.clone(),
            indexer: indexer.clone(),
        };
        save_config(&env, &config);

        let active_root = initial_root.unwrap_or_else(|| zero_root(&env));
        save_commitment(&env, &WeightCommitment::new(&env, active_root.clone()));

        RegistryEvents::initialize(&env, admin, indexer, active_root);

        Ok(())
    }

    /// Stages `root` for activation after [`ROOT_DELAY`], replacing any root already
    /// waiting. Returns the activation timestamp.
    pub fn queue_root(env: Env, sender: Address, root: BytesN<32>) -> Result<u64, ErrorCode> {
        let config = get_config(&env);
        require_role(&env, &config, Role::Indexer, &sender, true)?;

        validate!(
            &env,
            root != zero_root(&env),
            ErrorCode::InvalidRoot,
            "Weight Registry: Queue Root: empty root"
        )?;

        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);

        let mut commitment = get_commitment(&env);
        let activation_ts = env.ledger().timestamp() + ROOT_DELAY;
        commitment.pending_root = root.clone();
        commitment.pending_activation_ts = activation_ts;
        save_commitment(&env, &commitment);

        RegistryEvents::root_queued(&env, sender, root, activation_ts);

        Ok(activation_ts)
    }

    /// Promotes the pending root once its delay has elapsed. Callable by anyone.
    pub fn activate_root(env: Env) -> Result<BytesN<32>, ErrorCode> {
        let mut commitment = get_commitment(&env);

        validate!(
            &env,
            commitment.has_pending(&env),
            ErrorCode::NoPendingRoot,
            "Weight Registry: Activate Root: nothing queued"
        )?;

        let now = env.ledger().timestamp();
        validate!(
            &env,
            now >= commitment.pending_activation_ts,
            ErrorCode::RootNotReady,
            "Weight Registry: Activate Root: ready at {}, now {}",
            commitment.pending_activation_ts,
            now
        )?;

        let previous_root = commitment.active_root.clone();
        let root = commitment.pending_root.clone();
        commitment.active_root = root.clone();
        commitment.clear_pending(&env);
        save_commitment(&env, &commitment);

        RegistryEvents::root_activated(&env, previous_root, root.clone());

        Ok(root)
    }

    /// Incident response: replaces the active root immediately and drops any pending root.
    pub fn emergency_set_root(env: Env, sender: Address, root: BytesN<32>) -> Result<(), ErrorCode> {
        let config = get_config(&env);
        require_role(&env, &config, Role::Admin, &sender, true)?;

        let mut commitment = get_commitment(&env);
        let previous_root = commitment.active_root.clone();
        commitment.active_root = root.clone();
        commitment.clear_pending(&env);
        save_commitment(&env, &commitment);

        log!(&env, "Weight Registry: Emergency Set Root: delay bypassed by admin");
        RegistryEvents::emergency_root_set(&env, sender, previous_root, root);

        Ok(())
    }

    pub fn update_indexer(env: Env, sender: Address, indexer: Address) -> Result<(), ErrorCode> {
        let mut config = get_config(&env);
        require_role(&env, &config, Role::Admin, &sender, true)?;

        config.indexer = indexer.clone();
        save_config(&env, &config);

        RegistryEvents::indexer_updated(&env, sender, indexer);

        Ok(())
    }

    // ################################################################
    //                             QUERIES
    // ################################################################

    pub fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    pub fn query_commitment(env: Env) -> WeightCommitment {
        get_commitment(&env)
    }

    /// Zero bytes when no root is pending
    pub fn query_pending_root(env: Env) -> BytesN<32> {
        get_commitment(&env).pending_root
    }
}

#[contractimpl]
impl WeightRegistryInterface for WeightRegistry {
    fn query_active_root(env: Env) -> BytesN<32> {
        get_commitment(&env).active_root
    }

    fn verify_weight(env: Env, asset: Address, weight_bps: u32, proof: Vec<BytesN<32>>) -> bool {
        let root = get_commitment(&env).active_root;
        merkle::verify(&env, &root, &asset, weight_bps, &proof)
    }

    fn verify_tiered_weight(
        env: Env,
        asset: Address,
        weight_bps: u32,
        tier: u32,
        rank: u32,
        proof: Vec<BytesN<32>>,
    ) -> bool {
        let root = get_commitment(&env).active_root;
        merkle::verify_tiered(&env, &root, &asset, weight_bps, tier, rank, &proof)
    }

    fn verify_weights(
        env: Env,
        assets: Vec<Address>,
        weights: Vec<u32>,
        proofs: Vec<Vec<BytesN<32>>>,
    ) -> Result<bool, ErrorCode> {
        let root = get_commitment(&env).active_root;
        merkle::verify_batch(&env, &root, &assets, &weights, &proofs)
    }
}
