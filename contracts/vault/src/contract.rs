use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env, Vec};
use strata::{
    error::ErrorCode,
    interfaces::ShareTokenClient,
    types::{AssetDrift, Role, SwapRequest, TargetWeight, WeightProof},
    utils::require_role,
};

use crate::{
    controller::{self, ledger},
    events::VaultEvents,
    math::shares::{nav_per_share, weight_bps},
    storage::{
        get_budget, get_config, get_held_assets, get_last_rebalance_ts, get_metrics,
        is_initialized, is_locked, save_config, set_initialized, with_lock, AssetEntry, Config,
        ConfigUpdate, Metrics, Operation, RebalanceBudget, VaultParams,
    },
};

contractmeta!(
    key = "Description",
    val = "Index fund vault: NAV accounting, share issuance and budgeted rebalancing"
);

#[contract]
pub struct Vault;

#[contractimpl]
impl Vault {
    pub fn initialize(env: Env, params: VaultParams) -> Result<(), ErrorCode> {
        if is_initialized(&env) {
            log!(&env, "Vault: Initialize: initializing contract twice is not allowed");
            return Err(ErrorCode::AlreadyInitialized);
        }

        let config = Config::from_params(&env, params);
        config.validate(&env)?;

        set_initialized(&env);
        save_config(&env, &config);

        VaultEvents::initialize(&env, config.admin, config.share_token, config.mode);

        Ok(())
    }

    // ################################################################
    //                         Deposit / Redeem
    // ################################################################

    /// Deposits `amount` of an accepted `asset` and mints shares to `sender`.
    pub fn deposit(
        env: Env,
        sender: Address,
        asset: Address,
        amount: i128,
        min_shares_out: i128,
    ) -> Result<i128, ErrorCode> {
        sender.require_auth();
        let config = get_config(&env);

        with_lock(&env, || {
            controller::deposit::deposit(&env, &config, &sender, &asset, amount, min_shares_out)
        })
    }

    /// Burns `shares` of `sender` and pays their value, net of fee, in `asset`.
    pub fn redeem(
        env: Env,
        sender: Address,
        shares: i128,
        asset: Address,
        min_amount_out: i128,
    ) -> Result<i128, ErrorCode> {
        sender.require_auth();
        let config = get_config(&env);

        with_lock(&env, || {
            controller::deposit::redeem(&env, &config, &sender, shares, &asset, min_amount_out)
        })
    }

    /// `amounts` follow the order of the configured basket.
    pub fn deposit_basket(
        env: Env,
        sender: Address,
        amounts: Vec<i128>,
        min_shares_out: i128,
    ) -> Result<i128, ErrorCode> {
        sender.require_auth();
        let config = get_config(&env);

        with_lock(&env, || {
            controller::basket::deposit_basket(&env, &config, &sender, &amounts, min_shares_out)
        })
    }

    pub fn redeem_basket(
        env: Env,
        sender: Address,
        shares: i128,
        min_amounts_out: Vec<i128>,
    ) -> Result<Vec<i128>, ErrorCode> {
        sender.require_auth();
        let config = get_config(&env);

        with_lock(&env, || {
            controller::basket::redeem_basket(&env, &config, &sender, shares, &min_amounts_out)
        })
    }

    // ################################################################
    //                            Rebalance
    // ################################################################

    /// Returns the USD value moved.
    pub fn execute_batch_swaps(
        env: Env,
        sender: Address,
        swaps: Vec<SwapRequest>,
    ) -> Result<i128, ErrorCode> {
        let config = get_config(&env);
        require_role(&env, &config, Role::Rebalancer, &sender, false)?;

        let outcome = with_lock(&env, || {
            controller::rebalance::execute_scaled_batch(&env, &config, &swaps, None)
        })?;

        VaultEvents::rebalance(
            &env,
            sender,
            outcome.swaps,
            outcome.usd_moved,
            outcome.moved_today,
        );

        Ok(outcome.usd_moved)
    }

    /// Like [`Vault::execute_batch_swaps`], but every asset touched must come with a
    /// weight proof against the registry's active root.
    pub fn execute_verified_batch_swaps(
        env: Env,
        sender: Address,
        swaps: Vec<SwapRequest>,
        proofs: Vec<WeightProof>,
    ) -> Result<i128, ErrorCode> {
        let config = get_config(&env);
        require_role(&env, &config, Role::Rebalancer, &sender, false)?;

        let outcome = with_lock(&env, || {
            controller::rebalance::execute_scaled_batch(&env, &config, &swaps, Some(&proofs))
        })?;

        VaultEvents::rebalance(
            &env,
            sender,
            outcome.swaps,
            outcome.usd_moved,
            outcome.moved_today,
        );

        Ok(outcome.usd_moved)
    }

    pub fn rebalance(env: Env, sender: Address, swaps: Vec<SwapRequest>) -> Result<i128, ErrorCode> {
        let config = get_config(&env);
        require_role(&env, &config, Role::Rebalancer, &sender, false)?;

        let outcome = with_lock(&env, || controller::rebalance::rebalance_basket(&env, &config, &swaps))?;

        VaultEvents::rebalance(
            &env,
            sender,
            outcome.swaps,
            outcome.usd_moved,
            outcome.moved_today,
        );

        Ok(outcome.usd_moved)
    }

    /// Tracks `asset` in NAV. Returns false if it was already held.
    pub fn add_held_asset(env: Env, sender: Address, asset: Address) -> Result<bool, ErrorCode> {
        let config = get_config(&env);
        require_role(&env, &config, Role::Rebalancer, &sender, false)?;
        controller::basket::validate_held_asset(&env, &config, &asset)?;

        let (_, added) = ledger::register_asset(&env, &asset);
        Ok(added)
    }

    /// Stops tracking `asset`. A no-op returning false unless its balance is zero.
    pub fn remove_held_asset(env: Env, sender: Address, asset: Address) -> Result<bool, ErrorCode> {
        let config = get_config(&env);
        require_role(&env, &config, Role::Rebalancer, &sender, false)?;

        Ok(ledger::deregister_if_drained(&env, &asset))
    }

    // ################################################################
    //                              Admin
    // ################################################################

    pub fn update_config(env: Env, sender: Address, update: ConfigUpdate) -> Result<(), ErrorCode> {
        let mut config = get_config(&env);
        require_role(&env, &config, Role::Admin, &sender, true)?;

        config.apply(update.clone());
        config.validate(&env)?;
        save_config(&env, &config);

        VaultEvents::config_updated(&env, sender, update);

        Ok(())
    }

    pub fn update_accepted_assets(
        env: Env,
        sender: Address,
        to_add: Vec<Address>,
        to_remove: Vec<Address>,
    ) -> Result<(), ErrorCode> {
        let mut config = get_config(&env);
        require_role(&env, &config, Role::Admin, &sender, true)?;

        for asset in to_add.iter() {
            if !config.accepted_assets.contains(&asset) {
                config.accepted_assets.push_back(asset);
            }
        }
        for asset in to_remove.iter() {
            if let Some(index) = config.accepted_assets.first_index_of(&asset) {
                config.accepted_assets.remove(index);
            }
        }
        save_config(&env, &config);

        VaultEvents::accepted_assets_updated(&env, sender, config.accepted_assets);

        Ok(())
    }

    pub fn update_basket(env: Env, sender: Address, basket: Vec<TargetWeight>) -> Result<(), ErrorCode> {
        let mut config = get_config(&env);
        require_role(&env, &config, Role::Admin, &sender, true)?;

        controller::basket::validate_basket_update(&env, &config, &basket)?;

        config.basket = basket;
        save_config(&env, &config);

        VaultEvents::basket_updated(&env, sender);

        Ok(())
    }

    pub fn update_paused_operations(
        env: Env,
        sender: Address,
        to_add: Vec<Operation>,
        to_remove: Vec<Operation>,
    ) -> Result<(), ErrorCode> {
        let mut config = get_config(&env);
        require_role(&env, &config, Role::Admin, &sender, true)?;

        for operation in to_add.iter() {
            if !config.paused_operations.contains(operation) {
                config.paused_operations.push_back(operation);
            }
        }
        for operation in to_remove.iter() {
            if let Some(index) = config.paused_operations.first_index_of(operation) {
                config.paused_operations.remove(index);
            }
        }
        save_config(&env, &config);

        VaultEvents::paused_operations(&env, sender, config.paused_operations);

        Ok(())
    }

    // ################################################################
    //                             QUERIES
    // ################################################################

    pub fn query_config(env: Env) -> Config {
        get_config(&env)
    }

    pub fn query_nav(env: Env) -> Result<i128, ErrorCode> {
        ledger::nav(&env, &get_config(&env))
    }

    /// $1 (18 decimals) while no shares exist
    pub fn query_nav_per_share(env: Env) -> Result<i128, ErrorCode> {
        let config = get_config(&env);
        let total_supply = ShareTokenClient::new(&env, &config.share_token).total_supply();
        let nav = if total_supply == 0 {
            0
        } else {
            ledger::nav(&env, &config)?
        };
        nav_per_share(&env, nav, total_supply)
    }

    pub fn query_held_assets(env: Env) -> Vec<Address> {
        get_held_assets(&env).keys()
    }

    pub fn query_asset_entry(env: Env, asset: Address) -> Result<AssetEntry, ErrorCode> {
        ledger::held_entry(&env, &asset)
    }

    pub fn query_asset_value(env: Env, asset: Address) -> Result<i128, ErrorCode> {
        ledger::asset_value(&env, &get_config(&env), &asset)
    }

    pub fn query_current_weight(env: Env, asset: Address) -> Result<u32, ErrorCode> {
        let config = get_config(&env);
        let valuation = ledger::valuation(&env, &config)?;
        weight_bps(&env, valuation.value_of(&asset), valuation.nav)
    }

    /// Budget as of now, rolled over if the stored day has passed
    pub fn query_budget(env: Env) -> RebalanceBudget {
        get_budget(&env).rolled_over(env.ledger().timestamp())
    }

    pub fn query_basket_drifts(env: Env) -> Result<Vec<AssetDrift>, ErrorCode> {
        controller::rebalance::basket_drifts(&env, &get_config(&env))
    }

    pub fn query_asset_drifts(env: Env, proofs: Vec<WeightProof>) -> Result<Vec<AssetDrift>, ErrorCode> {
        controller::rebalance::asset_drifts(&env, &get_config(&env), &proofs)
    }

    /// Zero until the first basket rebalance
    pub fn query_last_rebalance_ts(env: Env) -> u64 {
        get_last_rebalance_ts(&env).unwrap_or(0)
    }

    pub fn query_metrics(env: Env) -> Metrics {
        get_metrics(&env)
    }

    pub fn query_is_locked(env: Env) -> bool {
        is_locked(&env)
    }
}
