use soroban_sdk::{contracttype, log, panic_with_error, Address, BytesN, Env};
use strata::{
    constants::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD},
    error::ErrorCode,
    types::Role,
    utils::RoleHolders,
};

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Config,
    Commitment,
    Initialized,
}

// ################################################################
//                             Config
// ################################################################

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// May replace the indexer and set a root without delay
    pub admin: Address,
    /// Publishes new weight roots through the delayed queue
    pub indexer: Address,
}

impl RoleHolders for Config {
    fn admin(&self) -> Address {
        self.admin.clone()
    }

    fn holder(&self, role: Role) -> Option<Address> {
        match role {
            Role::Admin => Some(self.admin.clone()),
            Role::Indexer => Some(self.indexer.clone()),
            Role::Rebalancer => None,
        }
    }
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().persistent().set(&DataKey::Config, config);
    env.storage().persistent().extend_ttl(
        &DataKey::Config,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_config(env: &Env) -> Config {
    let config = env
        .storage()
        .persistent()
        .get(&DataKey::Config)
        .unwrap_or_else(|| {
            log!(env, "Weight Registry: Config not set");
            panic_with_error!(env, ErrorCode::NotInitialized)
        });

    env.storage().persistent().extend_ttl(
        &DataKey::Config,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );

    config
}

// ################################################################
//                           Commitment
// ################################################################

/// Active and pending weight roots. An all-zero root means "none".
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeightCommitment {
    pub active_root: BytesN<32>,
    pub pending_root: BytesN<32>,
    pub pending_activation_ts: u64,
}

impl WeightCommitment {
    pub fn new(env: &Env, active_root: BytesN<32>) -> Self {
        WeightCommitment {
            active_root,
            pending_root: zero_root(env),
            pending_activation_ts: 0,
        }
    }

    pub fn has_pending(&self, env: &Env) -> bool {
        self.pending_root != zero_root(env)
    }

    pub fn clear_pending(&mut self, env: &Env) {
        self.pending_root = zero_root(env);
        self.pending_activation_ts = 0;
    }
}

pub fn zero_root(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0u8; 32])
}

pub fn save_commitment(env: &Env, commitment: &WeightCommitment) {
    env.storage().persistent().set(&DataKey::Commitment, commitment);
    env.storage().persistent().extend_ttl(
        &DataKey::Commitment,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

pub fn get_commitment(env: &Env) -> WeightCommitment {
    let commitment = env
        .storage()
        .persistent()
        .get(&DataKey::Commitment)
        .unwrap_or_else(|| {
            log!(env, "Weight Registry: Commitment not set");
            panic_with_error!(env, ErrorCode::NotInitialized)
        });

    env.storage().persistent().extend_ttl(
        &DataKey::Commitment,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );

    commitment
}

// ################################################################
//                             Utils
// ################################################################

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}
