use soroban_sdk::{contracttype, Address, BytesN, Vec};

use crate::constants::{TIER_1_DRIFT_BPS, TIER_2_DRIFT_BPS};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Role {
    /// Owns the configuration and may act in place of any other role
    Admin,
    /// Publishes weight roots
    Indexer,
    /// Moves value between held assets
    Rebalancer,
}

pub const TIER_CORE: u32 = 1;
pub const TIER_MID: u32 = 2;
pub const TIER_LONG_TAIL: u32 = 3;

/// Drift an asset of the given tier tolerates before it needs rebalancing. Long tail
/// assets (and unknown tiers) are never proactively rebalanced.
pub fn drift_tolerance_bps(tier: u32) -> Option<u32> {
    match tier {
        TIER_CORE => Some(TIER_1_DRIFT_BPS),
        TIER_MID => Some(TIER_2_DRIFT_BPS),
        _ => None,
    }
}

/// Drift equal to the tolerance is still within bounds.
pub fn exceeds_tolerance(tier: u32, drift_bps: u32) -> bool {
    drift_tolerance_bps(tier).is_some_and(|tolerance| drift_bps > tolerance)
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SwapRequest {
    pub asset_in: Address,
    pub asset_out: Address,
    pub amount_in: i128,
    pub min_amount_out: i128,
}

/// A target weight claimed for an asset, proven against the active weight root
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeightProof {
    pub asset: Address,
    pub weight_bps: u32,
    pub tier: u32,
    pub rank: u32,
    pub proof: Vec<BytesN<32>>,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TargetWeight {
    pub asset: Address,
    pub weight_bps: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AssetDrift {
    pub asset: Address,
    pub current_bps: u32,
    pub target_bps: u32,
    pub drift_bps: u32,
    pub tier: u32,
    pub needs_rebalance: bool,
}
