// ################################################################
//                            Storage TTL
// ################################################################

pub const DAY_IN_LEDGERS: u32 = 17280;
pub const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
pub const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const PERSISTENT_LIFETIME_THRESHOLD: u32 = PERSISTENT_BUMP_AMOUNT - DAY_IN_LEDGERS;

pub const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
pub const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

// ################################################################
//                            Precision
// ################################################################

/// Fractional digits carried by prices, USD values and shares
pub const PRICE_DECIMALS: u32 = 18;
/// The fixed-point unit, i.e. $1 or one share
pub const PRICE_PRECISION: i128 = 1_000_000_000_000_000_000;

pub const BPS_DENOMINATOR: i128 = 10_000;
pub const MAX_BPS: u32 = 10_000;

// ################################################################
//                            Time
// ################################################################

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const ONE_HOUR: u64 = 3_600;

/// Delay between queueing a weight root and being able to activate it
pub const ROOT_DELAY: u64 = ONE_HOUR;

// ################################################################
//                            Vault limits
// ################################################################

pub const MAX_FEE_BPS: u32 = 100;
pub const MAX_BATCH_SIZE: u32 = 30;

/// Drift tolerated by tier 1 assets before a rebalance is warranted
pub const TIER_1_DRIFT_BPS: u32 = 500;
/// Drift tolerated by tier 2 assets before a rebalance is warranted
pub const TIER_2_DRIFT_BPS: u32 = 1_000;
