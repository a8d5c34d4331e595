use soroban_sdk::{Address, Env, Symbol, Vec};
use strata::oracle::PriceSource;

pub struct OracleEvents {}

impl OracleEvents {
    /// - topics - `["initialize", admin: Address]`
    /// - data - `[max_price_age: u64]`
    pub fn initialize(env: &Env, admin: Address, max_price_age: u64) {
        let topics = (Symbol::new(env, "initialize"), admin);
        env.events().publish(topics, max_price_age);
    }

    /// Emitted when the price sources of an asset are replaced
    ///
    /// - topics - `["sources_set", asset: Address]`
    /// - data - `[sources: Vec<PriceSource>]`
    pub fn sources_set(env: &Env, asset: Address, sources: Vec<PriceSource>) {
        let topics = (Symbol::new(env, "sources_set"), asset);
        env.events().publish(topics, sources);
    }

    /// - topics - `["sources_removed", asset: Address]`
    pub fn sources_removed(env: &Env, asset: Address) {
        let topics = (Symbol::new(env, "sources_removed"), asset);
        env.events().publish(topics, ());
    }

    /// - topics - `["max_price_age_updated"]`
    /// - data - `[max_price_age: u64]`
    pub fn max_price_age_updated(env: &Env, max_price_age: u64) {
        let topics = (Symbol::new(env, "max_price_age_updated"),);
        env.events().publish(topics, max_price_age);
    }
}
