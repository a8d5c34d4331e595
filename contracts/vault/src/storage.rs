use soroban_sdk::{contracttype, log, panic_with_error, Address, Env, Map, Vec};
use strata::{
    constants::{
        INSTANCE_BUMP_AMOUNT, INSTANCE_LIFETIME_THRESHOLD, MAX_BATCH_SIZE, MAX_BPS, MAX_FEE_BPS,
        PERSISTENT_BUMP_AMOUNT, PERSISTENT_LIFETIME_THRESHOLD, SECONDS_PER_DAY,
    },
    error::{ErrorCode, StrataResult},
    types::{Role, TargetWeight},
    utils::RoleHolders,
    validate, validate_bps,
};

#[contracttype]
#[derive(Clone, Debug)]
pub enum DataKey {
    Config,
    HeldAssets,
    Budget,
    LastRebalanceTs,
    Metrics,
    Locked,
    Initialized,
}

// ################################################################
//                             Config
// ################################################################

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VaultMode {
    /// Small fixed basket with static target weights, multi-asset deposit and redeem
    Basket,
    /// Large index whose target weights are committed to by a merkle root
    Scaled,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    Deposit,
    Redeem,
    Rebalance,
}

/// Deployment parameters of a vault
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultParams {
    pub admin: Address,
    pub rebalancer: Address,
    pub share_token: Address,
    pub oracle: Address,
    pub swap_venue: Address,
    pub weight_registry: Option<Address>,
    pub mode: VaultMode,
    pub fee_bps: u32,
    /// Smallest accepted deposit, USD with 18 decimals
    pub min_deposit_usd: i128,
    pub daily_cap_bps: u32,
    pub max_batch_size: u32,
    pub rebalance_threshold_bps: u32,
    pub min_rebalance_interval: u64,
    pub max_slippage_bps: u32,
    pub accepted_assets: Vec<Address>,
    pub basket: Vec<TargetWeight>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub admin: Address,
    pub rebalancer: Address,
    pub share_token: Address,
    pub oracle: Address,
    pub swap_venue: Address,
    pub weight_registry: Option<Address>,
    pub mode: VaultMode,
    pub fee_bps: u32,
    pub min_deposit_usd: i128,
    pub daily_cap_bps: u32,
    pub max_batch_size: u32,
    pub rebalance_threshold_bps: u32,
    pub min_rebalance_interval: u64,
    pub max_slippage_bps: u32,
    pub accepted_assets: Vec<Address>,
    pub basket: Vec<TargetWeight>,
    pub paused_operations: Vec<Operation>,
}

/// Admin changes to a live config. `None` leaves a field untouched.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConfigUpdate {
    pub rebalancer: Option<Address>,
    pub swap_venue: Option<Address>,
    pub weight_registry: Option<Address>,
    pub fee_bps: Option<u32>,
    pub min_deposit_usd: Option<i128>,
    pub daily_cap_bps: Option<u32>,
    pub max_batch_size: Option<u32>,
    pub rebalance_threshold_bps: Option<u32>,
    pub min_rebalance_interval: Option<u64>,
    pub max_slippage_bps: Option<u32>,
}

impl Config {
    pub fn from_params(env: &Env, params: VaultParams) -> Self {
        Config {
            admin: params.admin,
            rebalancer: params.rebalancer,
            share_token: params.share_token,
            oracle: params.oracle,
            swap_venue: params.swap_venue,
            weight_registry: params.weight_registry,
            mode: params.mode,
            fee_bps: params.fee_bps,
            min_deposit_usd: params.min_deposit_usd,
            daily_cap_bps: params.daily_cap_bps,
            max_batch_size: params.max_batch_size,
            rebalance_threshold_bps: params.rebalance_threshold_bps,
            min_rebalance_interval: params.min_rebalance_interval,
            max_slippage_bps: params.max_slippage_bps,
            accepted_assets: params.accepted_assets,
            basket: params.basket,
            paused_operations: Vec::new(env),
        }
    }

    pub fn apply(&mut self, update: ConfigUpdate) {
        if let Some(rebalancer) = update.rebalancer {
            self.rebalancer = rebalancer;
        }
        if let Some(swap_venue) = update.swap_venue {
            self.swap_venue = swap_venue;
        }
        if let Some(weight_registry) = update.weight_registry {
            self.weight_registry = Some(weight_registry);
        }
        if let Some(fee_bps) = update.fee_bps {
            self.fee_bps = fee_bps;
        }
        if let Some(min_deposit_usd) = update.min_deposit_usd {
            self.min_deposit_usd = min_deposit_usd;
        }
        if let Some(daily_cap_bps) = update.daily_cap_bps {
            self.daily_cap_bps = daily_cap_bps;
        }
        if let Some(max_batch_size) = update.max_batch_size {
            self.max_batch_size = max_batch_size;
        }
        if let Some(rebalance_threshold_bps) = update.rebalance_threshold_bps {
            self.rebalance_threshold_bps = rebalance_threshold_bps;
        }
        if let Some(min_rebalance_interval) = update.min_rebalance_interval {
            self.min_rebalance_interval = min_rebalance_interval;
        }
        if let Some(max_slippage_bps) = update.max_slippage_bps {
            self.max_slippage_bps = max_slippage_bps;
        }
    }

    pub fn validate(&self, env: &Env) -> StrataResult {
        validate!(
            env,
            self.fee_bps <= MAX_FEE_BPS,
            ErrorCode::InvalidFee,
            "Vault: Config: fee {} bps above the {} bps ceiling",
            self.fee_bps,
            MAX_FEE_BPS
        )?;

        validate_bps!(
            env,
            self.daily_cap_bps,
            self.rebalance_threshold_bps,
            self.max_slippage_bps
        )?;

        validate!(
            env,
            self.daily_cap_bps > 0,
            ErrorCode::InvalidBps,
            "Vault: Config: daily cap must be positive"
        )?;

        validate!(
            env,
            self.max_batch_size > 0 && self.max_batch_size <= MAX_BATCH_SIZE,
            ErrorCode::BatchTooLarge,
            "Vault: Config: batch size {} outside 1..={}",
            self.max_batch_size,
            MAX_BATCH_SIZE
        )?;

        validate!(
            env,
            self.min_deposit_usd >= 0,
            ErrorCode::ZeroAmount,
            "Vault: Config: negative minimum deposit"
        )?;

        match self.mode {
            VaultMode::Scaled => validate!(
                env,
                self.weight_registry.is_some(),
                ErrorCode::InvalidMode,
                "Vault: Config: scaled mode requires a weight registry"
            ),
            VaultMode::Basket => validate_basket(env, &self.basket),
        }
    }

    pub fn is_operation_paused(&self, operation: Operation) -> bool {
        self.paused_operations.contains(operation)
    }

    pub fn is_accepted(&self, asset: &Address) -> bool {
        self.accepted_assets.contains(asset)
    }

    pub fn basket_assets(&self, env: &Env) -> Vec<Address> {
        let mut assets = Vec::new(env);
        for target in self.basket.iter() {
            assets.push_back(target.asset);
        }
        assets
    }
}

/// Basket weights must name distinct assets and sum to exactly 100%.
pub fn validate_basket(env: &Env, basket: &Vec<TargetWeight>) -> StrataResult {
    let mut total: u32 = 0;
    let mut seen: Map<Address, bool> = Map::new(env);

    for target in basket.iter() {
        validate!(
            env,
            !seen.contains_key(target.asset.clone()),
            ErrorCode::InvalidWeights,
            "Vault: Basket: duplicate asset"
        )?;
        seen.set(target.asset.clone(), true);

        total = total
            .checked_add(target.weight_bps)
            .ok_or(ErrorCode::InvalidWeights)?;
    }

    validate!(
        env,
        !basket.is_empty() && total == MAX_BPS,
        ErrorCode::InvalidWeights,
        "Vault: Basket: weights sum to {} bps, expected {}",
        total,
        MAX_BPS
    )
}

impl RoleHolders for Config {
    fn admin(&self) -> Address {
        self.admin.clone()
    }

    fn holder(&self, role: Role) -> Option<Address> {
        match role {
            Role::Admin => Some(self.admin.clone()),
            Role::Rebalancer => Some(self.rebalancer.clone()),
            Role::Indexer => None,
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
            log!(env, "Vault: Config not set");
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
//                           Held assets
// ################################################################

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AssetEntry {
    /// Fractional digits of the asset's native amounts
    pub decimals: u32,
}

pub fn get_held_assets(env: &Env) -> Map<Address, AssetEntry> {
    let held = env
        .storage()
        .persistent()
        .get(&DataKey::HeldAssets)
        .unwrap_or(Map::new(env));

    if env.storage().persistent().has(&DataKey::HeldAssets) {
        env.storage().persistent().extend_ttl(
            &DataKey::HeldAssets,
            PERSISTENT_LIFETIME_THRESHOLD,
            PERSISTENT_BUMP_AMOUNT,
        );
    }

    held
}

pub fn save_held_assets(env: &Env, held: &Map<Address, AssetEntry>) {
    env.storage().persistent().set(&DataKey::HeldAssets, held);
    env.storage().persistent().extend_ttl(
        &DataKey::HeldAssets,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

// ################################################################
//                         Rebalance budget
// ################################################################

/// USD value moved by rebalancing during the current day
#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RebalanceBudget {
    pub value_moved_today: i128,
    pub day_index: u64,
}

impl RebalanceBudget {
    /// Returns the budget as seen at `now`, zeroed if a new day has started.
    pub fn rolled_over(self, now: u64) -> Self {
        let day_index = now / SECONDS_PER_DAY;
        if day_index > self.day_index {
            RebalanceBudget {
                value_moved_today: 0,
                day_index,
            }
        } else {
            self
        }
    }
}

pub fn get_budget(env: &Env) -> RebalanceBudget {
    env.storage()
        .persistent()
        .get(&DataKey::Budget)
        .unwrap_or_default()
}

pub fn save_budget(env: &Env, budget: &RebalanceBudget) {
    env.storage().persistent().set(&DataKey::Budget, budget);
    env.storage().persistent().extend_ttl(
        &DataKey::Budget,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

/// `None` until the first rebalance completes
pub fn get_last_rebalance_ts(env: &Env) -> Option<u64> {
    env.storage().persistent().get(&DataKey::LastRebalanceTs)
}

pub fn save_last_rebalance_ts(env: &Env, ts: u64) {
    env.storage().persistent().set(&DataKey::LastRebalanceTs, &ts);
    env.storage().persistent().extend_ttl(
        &DataKey::LastRebalanceTs,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
}

// ################################################################
//                             Metrics
// ################################################################

#[contracttype]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Metrics {
    pub total_minted: i128,
    pub total_burned: i128,
    /// USD with 18 decimals
    pub total_fees_usd: i128,
}

pub fn get_metrics(env: &Env) -> Metrics {
    env.storage()
        .persistent()
        .get(&DataKey::Metrics)
        .unwrap_or_default()
}

pub fn save_metrics(env: &Env, metrics: &Metrics) {
    env.storage().persistent().set(&DataKey::Metrics, metrics);
    env.storage().persistent().extend_ttl(
        &DataKey::Metrics,
        PERSISTENT_LIFETIME_THRESHOLD,
        PERSISTENT_BUMP_AMOUNT,
    );
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

pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Locked)
        .unwrap_or(false)
}

pub fn acquire_lock(env: &Env) -> StrataResult {
    validate!(
        env,
        !is_locked(env),
        ErrorCode::ReentrantCall,
        "Vault: operation entered while another is in flight"
    )?;

    env.storage().instance().set(&DataKey::Locked, &true);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    Ok(())
}

pub fn release_lock(env: &Env) {
    env.storage().instance().set(&DataKey::Locked, &false);
}

/// Runs `f` holding the reentrancy lock.
pub fn with_lock<T>(env: &Env, f: impl FnOnce() -> StrataResult<T>) -> StrataResult<T> {
    acquire_lock(env)?;
    let result = f();
    release_lock(env);
    result
}
