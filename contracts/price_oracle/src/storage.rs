use soroban_sdk::{contracttype, log, panic_with_error, Address, Env, Vec};
use strata::{
    constants::{PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD},
    error::ErrorCode,
    oracle::PriceSource,
    types::Role,
    utils::RoleHolders,
};

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Config,
    Sources(Address),
    Initialized,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    /// Feed prices older than this many seconds are ignored
    pub max_price_age: u64,
}

impl RoleHolders for Config {
    fn admin(&self) -> Address {
        self.admin.clone()
    }

    fn holder(&self, role: Role) -> Option<Address> {
        match role {
            Role::Admin => Some(self.admin.clone()),
            _ => None,
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
            log!(env, "Price Oracle: Config not set");
            panic_with_error!(env, ErrorCode::NotInitialized)
        });

    env.storage().persistent().extend_ttl(
        &DataKey::Config,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );

    config
}

pub fn save_sources(env: &Env, asset: &Address, sources: &Vec<PriceSource>) {
    let key = DataKey::Sources(asset.clone());
    env.storage().persistent().set(&key, sources);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

pub fn get_sources(env: &Env, asset: &Address) -> Option<Vec<PriceSource>> {
    let key = DataKey::Sources(asset.clone());
    let sources = env.storage().persistent().get(&key);
    if sources.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
    }
    sources
}

pub fn delete_sources(env: &Env, asset: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Sources(asset.clone()));
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Initialized)
        .unwrap_or(false)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&DataKey::Initialized, &true);
}
