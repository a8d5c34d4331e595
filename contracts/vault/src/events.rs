use soroban_sdk::{Address, Env, Symbol, Vec};

use crate::storage::{ConfigUpdate, Operation, VaultMode};

pub struct VaultEvents {}

impl VaultEvents {
    /// Emitted when the vault is initialized
    ///
    /// - topics - `["initialize", admin: Address]`
    /// - data - `[share_token: Address, mode: VaultMode]`
    pub fn initialize(env: &Env, admin: Address, share_token: Address, mode: VaultMode) {
        let topics = (Symbol::new(env, "initialize"), admin);
        env.events().publish(topics, (share_token, mode));
    }

    /// Emitted when a single asset is deposited
    ///
    /// - topics - `["deposit", sender: Address, asset: Address]`
    /// - data - `[amount: i128, usd_value: i128, fee_usd: i128, shares: i128]`
    pub fn deposit(
        env: &Env,
        sender: Address,
        asset: Address,
        amount: i128,
        usd_value: i128,
        fee_usd: i128,
        shares: i128,
    ) {
        let topics = (Symbol::new(env, "deposit"), sender, asset);
        env.events().publish(topics, (amount, usd_value, fee_usd, shares));
    }

    /// Emitted when shares are redeemed for a single asset
    ///
    /// - topics - `["redeem", sender: Address, asset: Address]`
    /// - data - `[shares: i128, usd_value: i128, fee_usd: i128, amount: i128]`
    pub fn redeem(
        env: &Env,
        sender: Address,
        asset: Address,
        shares: i128,
        usd_value: i128,
        fee_usd: i128,
        amount: i128,
    ) {
        let topics = (Symbol::new(env, "redeem"), sender, asset);
        env.events().publish(topics, (shares, usd_value, fee_usd, amount));
    }

    /// - topics - `["basket_deposit", sender: Address]`
    /// - data - `[amounts: Vec<i128>, usd_value: i128, shares: i128]`
    pub fn basket_deposit(env: &Env, sender: Address, amounts: Vec<i128>, usd_value: i128, shares: i128) {
        let topics = (Symbol::new(env, "basket_deposit"), sender);
        env.events().publish(topics, (amounts, usd_value, shares));
    }

    /// - topics - `["basket_redeem", sender: Address]`
    /// - data - `[shares: i128, amounts: Vec<i128>]`
    pub fn basket_redeem(env: &Env, sender: Address, shares: i128, amounts: Vec<i128>) {
        let topics = (Symbol::new(env, "basket_redeem"), sender);
        env.events().publish(topics, (shares, amounts));
    }

    /// Emitted for every swap executed during a rebalance
    ///
    /// - topics - `["swap", asset_in: Address, asset_out: Address]`
    /// - data - `[amount_in: i128, amount_out: i128, usd_value: i128]`
    pub fn swap(
        env: &Env,
        asset_in: Address,
        asset_out: Address,
        amount_in: i128,
        amount_out: i128,
        usd_value: i128,
    ) {
        let topics = (Symbol::new(env, "swap"), asset_in, asset_out);
        env.events().publish(topics, (amount_in, amount_out, usd_value));
    }

    /// Emitted once per completed batch
    ///
    /// - topics - `["rebalance", sender: Address]`
    /// - data - `[swaps: u32, usd_moved: i128, moved_today: i128]`
    pub fn rebalance(env: &Env, sender: Address, swaps: u32, usd_moved: i128, moved_today: i128) {
        let topics = (Symbol::new(env, "rebalance"), sender);
        env.events().publish(topics, (swaps, usd_moved, moved_today));
    }

    /// - topics - `["held_asset_added", asset: Address]`
    /// - data - `[decimals: u32]`
    pub fn held_asset_added(env: &Env, asset: Address, decimals: u32) {
        let topics = (Symbol::new(env, "held_asset_added"), asset);
        env.events().publish(topics, decimals);
    }

    /// - topics - `["held_asset_removed", asset: Address]`
    pub fn held_asset_removed(env: &Env, asset: Address) {
        let topics = (Symbol::new(env, "held_asset_removed"), asset);
        env.events().publish(topics, ());
    }

    /// - topics - `["config_updated", admin: Address]`
    /// - data - `[update: ConfigUpdate]`
    pub fn config_updated(env: &Env, admin: Address, update: ConfigUpdate) {
        let topics = (Symbol::new(env, "config_updated"), admin);
        env.events().publish(topics, update);
    }

    /// - topics - `["accepted_assets", admin: Address]`
    /// - data - `[accepted_assets: Vec<Address>]`
    pub fn accepted_assets_updated(env: &Env, admin: Address, accepted_assets: Vec<Address>) {
        let topics = (Symbol::new(env, "accepted_assets"), admin);
        env.events().publish(topics, accepted_assets);
    }

    /// - topics - `["basket_updated", admin: Address]`
    pub fn basket_updated(env: &Env, admin: Address) {
        let topics = (Symbol::new(env, "basket_updated"), admin);
        env.events().publish(topics, ());
    }

    /// - topics - `["paused_operations", admin: Address]`
    /// - data - `[paused_operations: Vec<Operation>]`
    pub fn paused_operations(env: &Env, admin: Address, paused_operations: Vec<Operation>) {
        let topics = (Symbol::new(env, "paused_operations"), admin);
        env.events().publish(topics, paused_operations);
    }
}
