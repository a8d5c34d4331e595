use soroban_sdk::{Address, BytesN, Env, Symbol};

pub struct RegistryEvents {}

impl RegistryEvents {
    /// Emitted when the registry is initialized
    ///
    /// - topics - `["initialize", admin: Address]`
    /// - data - `[indexer: Address, active_root: BytesN<32>]`
    pub fn initialize(env: &Env, admin: Address, indexer: Address, active_root: BytesN<32>) {
        let topics = (Symbol::new(env, "initialize"), admin);
        env.events().publish(topics, (indexer, active_root));
    }

    /// Emitted when a root is queued for delayed activation
    ///
    /// - topics - `["root_queued", indexer: Address]`
    /// - data - `[root: BytesN<32>, activation_ts: u64]`
    pub fn root_queued(env: &Env, indexer: Address, root: BytesN<32>, activation_ts: u64) {
        let topics = (Symbol::new(env, "root_queued"), indexer);
        env.events().publish(topics, (root, activation_ts));
    }

    /// - topics - `["root_activated"]`
    /// - data - `[previous_root: BytesN<32>, root: BytesN<32>]`
    pub fn root_activated(env: &Env, previous_root: BytesN<32>, root: BytesN<32>) {
        let topics = (Symbol::new(env, "root_activated"),);
        env.events().publish(topics, (previous_root, root));
    }

    /// Emitted when the admin bypasses the activation delay
    ///
    /// - topics - `["emergency_root_set", admin: Address]`
    /// - data - `[previous_root: BytesN<32>, root: BytesN<32>]`
    pub fn emergency_root_set(env: &Env, admin: Address, previous_root: BytesN<32>, root: BytesN<32>) {
        let topics = (Symbol::new(env, "emergency_root_set"), admin);
        env.events().publish(topics, (previous_root, root));
    }

    /// - topics - `["indexer_updated", admin: Address]`
    /// - data - `[indexer: Address]`
    pub fn indexer_updated(env: &Env, admin: Address, indexer: Address) {
        let topics = (Symbol::new(env, "indexer_updated"), admin);
        env.events().publish(topics, indexer);
    }
}
