use soroban_sdk::{contractclient, Address, BytesN, Env, Vec};

use crate::error::ErrorCode;

#[contractclient(name = "PriceOracleClient")]
pub trait PriceOracleInterface {
    /// USD price of `asset` with 18 decimals
    fn price(env: Env, asset: Address) -> Result<i128, ErrorCode>;

    fn prices(env: Env, assets: Vec<Address>) -> Result<Vec<i128>, ErrorCode>;

    fn has_feed(env: Env, asset: Address) -> bool;
}

#[contractclient(name = "SwapVenueClient")]
pub trait SwapVenueInterface {
    /// Swaps `amount_in` of `asset_in`, already transferred to the venue, for at least
    /// `min_amount_out` of `asset_out` delivered to `recipient`.
    fn swap(
        env: Env,
        recipient: Address,
        asset_in: Address,
        asset_out: Address,
        amount_in: i128,
        min_amount_out: i128,
    ) -> i128;
}

#[contractclient(name = "ShareTokenClient")]
pub trait ShareTokenInterface {
    fn mint(env: Env, to: Address, amount: i128);

    fn burn_from_holder(env: Env, holder: Address, amount: i128);

    fn total_supply(env: Env) -> i128;
}

#[contractclient(name = "WeightRegistryClient")]
pub trait WeightRegistryInterface {
    fn query_active_root(env: Env) -> BytesN<32>;

    fn verify_weight(env: Env, asset: Address, weight_bps: u32, proof: Vec<BytesN<32>>) -> bool;

    fn verify_tiered_weight(
        env: Env,
        asset: Address,
        weight_bps: u32,
        tier: u32,
        rank: u32,
        proof: Vec<BytesN<32>>,
    ) -> bool;

    fn verify_weights(
        env: Env,
        assets: Vec<Address>,
        weights: Vec<u32>,
        proofs: Vec<Vec<BytesN<32>>>,
    ) -> Result<bool, ErrorCode>;
}
