use soroban_sdk::{log, token, Address, Env, Map, Vec};
use strata::{
    error::{ErrorCode, StrataResult},
    interfaces::{SwapVenueClient, WeightRegistryClient},
    math::{helpers::bps_of, safe_math::SafeMath},
    safe_increment,
    types::{exceeds_tolerance, AssetDrift, SwapRequest, WeightProof},
    utils::validate_positive_amount,
    validate,
};

use crate::{
    controller::{deposit::validate_operation, ledger},
    events::VaultEvents,
    math::shares::{amount_for_usd, slippage_floor, usd_value, weight_bps},
    storage::{
        get_budget, get_last_rebalance_ts, save_budget, save_last_rebalance_ts, Config, Operation,
        VaultMode,
    },
};

/// Outcome of a completed batch
pub struct BatchOutcome {
    pub swaps: u32,
    /// USD moved by this batch
    pub usd_moved: i128,
    /// USD moved so far today, this batch included
    pub moved_today: i128,
}

fn weight_registry<'a>(env: &'a Env, config: &Config) -> StrataResult<WeightRegistryClient<'a>> {
    match &config.weight_registry {
        Some(registry) => Ok(WeightRegistryClient::new(env, registry)),
        None => {
            log!(env, "Vault: no weight registry configured");
            Err(ErrorCode::InvalidMode)
        }
    }
}

/// Swaps through the venue and returns the oracle value of what was sold. The output is
/// measured as the change in the vault's own balance, not taken from the venue's answer.
fn execute_swap(env: &Env, config: &Config, request: &SwapRequest) -> StrataResult<i128> {
    validate_positive_amount(env, request.amount_in)?;
    validate!(
        env,
        request.asset_in != request.asset_out,
        ErrorCode::UnsupportedAsset,
        "Vault: Swap: asset swapped for itself"
    )?;

    let entry_in = ledger::held_entry(env, &request.asset_in)?;
    let vault = env.current_contract_address();
    let token_in = token::Client::new(env, &request.asset_in);
    let token_out = token::Client::new(env, &request.asset_out);

    let available = token_in.balance(&vault);
    validate!(
        env,
        available >= request.amount_in,
        ErrorCode::InsufficientLiquidity,
        "Vault: Swap: {} requested, {} held",
        request.amount_in,
        available
    )?;

    let price_in = ledger::price_of(env, config, &request.asset_in)?;
    let usd = usd_value(env, request.amount_in, entry_in.decimals, price_in)?;

    let balance_before = token_out.balance(&vault);
    token_in.transfer(&vault, &config.swap_venue, &request.amount_in);
    SwapVenueClient::new(env, &config.swap_venue).swap(
        &vault,
        &request.asset_in,
        &request.asset_out,
        &request.amount_in,
        &request.min_amount_out,
    );
    let received = token_out.balance(&vault).safe_sub(balance_before, env)?;

    validate!(
        env,
        received >= request.min_amount_out,
        ErrorCode::SlippageExceeded,
        "Vault: Swap: received {}, minimum {}",
        received,
        request.min_amount_out
    )?;

    if received > 0 {
        ledger::register_asset(env, &request.asset_out);
    }
    ledger::deregister_if_drained(env, &request.asset_in);

    VaultEvents::swap(
        env,
        request.asset_in.clone(),
        request.asset_out.clone(),
        request.amount_in,
        received,
        usd,
    );

    Ok(usd)
}

/// Executes `swaps` and charges their value to the daily budget. The cap is measured
/// against NAV before the batch and checked once the whole batch has run.
pub fn execute_batch(env: &Env, config: &Config, swaps: &Vec<SwapRequest>) -> StrataResult<BatchOutcome> {
    validate!(
        env,
        !swaps.is_empty(),
        ErrorCode::EmptyBatch,
        "Vault: Batch: no swaps"
    )?;
    validate!(
        env,
        swaps.len() <= config.max_batch_size,
        ErrorCode::BatchTooLarge,
        "Vault: Batch: {} swaps, at most {}",
        swaps.len(),
        config.max_batch_size
    )?;

    let nav = ledger::nav(env, config)?;
    let cap = bps_of(env, nav, config.daily_cap_bps)?;

    let mut usd_moved: i128 = 0;
    for request in swaps.iter() {
        safe_increment!(env, usd_moved, execute_swap(env, config, &request)?);
    }

    let mut budget = get_budget(env).rolled_over(env.ledger().timestamp());
    safe_increment!(env, budget.value_moved_today, usd_moved);

    validate!(
        env,
        budget.value_moved_today <= cap,
        ErrorCode::DailyLimitExceeded,
        "Vault: Batch: {} moved today, cap {}",
        budget.value_moved_today,
        cap
    )?;

    save_budget(env, &budget);

    Ok(BatchOutcome {
        swaps: swaps.len(),
        usd_moved,
        moved_today: budget.value_moved_today,
    })
}

/// Checks every supplied proof against the active root, then that each asset touched by
/// `swaps` is covered by one of them.
pub fn verify_swap_proofs(
    env: &Env,
    config: &Config,
    swaps: &Vec<SwapRequest>,
    proofs: &Vec<WeightProof>,
) -> StrataResult {
    let registry = weight_registry(env, config)?;

    let mut proven: Map<Address, u32> = Map::new(env);
    for proof in proofs.iter() {
        validate!(
            env,
            registry.verify_tiered_weight(
                &proof.asset,
                &proof.weight_bps,
                &proof.tier,
                &proof.rank,
                &proof.proof
            ),
            ErrorCode::InvalidProof,
            "Vault: Verified Batch: proof rejected for weight {}",
            proof.weight_bps
        )?;
        proven.set(proof.asset, proof.weight_bps);
    }

    for request in swaps.iter() {
        for asset in [request.asset_in, request.asset_out] {
            if !proven.contains_key(asset.clone()) {
                log!(env, "Vault: Verified Batch: no weight proof for asset", asset);
                return Err(ErrorCode::MissingProof);
            }
        }
    }

    Ok(())
}

pub fn execute_scaled_batch(
    env: &Env,
    config: &Config,
    swaps: &Vec<SwapRequest>,
    proofs: Option<&Vec<WeightProof>>,
) -> StrataResult<BatchOutcome> {
    validate_operation(env, config, Operation::Rebalance, VaultMode::Scaled)?;

    if let Some(proofs) = proofs {
        verify_swap_proofs(env, config, swaps, proofs)?;
    }

    execute_batch(env, config, swaps)
}

/// Drift of each proven asset from its committed weight. Tier 1 and 2 assets need a
/// rebalance once drift exceeds their tolerance; long tail assets never do.
pub fn asset_drifts(env: &Env, config: &Config, proofs: &Vec<WeightProof>) -> StrataResult<Vec<AssetDrift>> {
    validate!(env, config.mode == VaultMode::Scaled, ErrorCode::InvalidMode)?;

    let registry = weight_registry(env, config)?;
    let valuation = ledger::valuation(env, config)?;

    let mut drifts = Vec::new(env);
    for proof in proofs.iter() {
        validate!(
            env,
            registry.verify_tiered_weight(
                &proof.asset,
                &proof.weight_bps,
                &proof.tier,
                &proof.rank,
                &proof.proof
            ),
            ErrorCode::InvalidProof
        )?;

        let current_bps = weight_bps(env, valuation.value_of(&proof.asset), valuation.nav)?;
        let drift_bps = current_bps.abs_diff(proof.weight_bps);

        drifts.push_back(AssetDrift {
            asset: proof.asset,
            current_bps,
            target_bps: proof.weight_bps,
            drift_bps,
            tier: proof.tier,
            needs_rebalance: exceeds_tolerance(proof.tier, drift_bps),
        });
    }

    Ok(drifts)
}

/// Drift of each basket asset from its static weight. Basket entries carry no tier.
pub fn basket_drifts(env: &Env, config: &Config) -> StrataResult<Vec<AssetDrift>> {
    validate!(env, config.mode == VaultMode::Basket, ErrorCode::InvalidMode)?;

    let valuation = ledger::valuation(env, config)?;

    let mut drifts = Vec::new(env);
    for target in config.basket.iter() {
        let current_bps = weight_bps(env, valuation.value_of(&target.asset), valuation.nav)?;
        let drift_bps = current_bps.abs_diff(target.weight_bps);

        drifts.push_back(AssetDrift {
            asset: target.asset,
            current_bps,
            target_bps: target.weight_bps,
            drift_bps,
            tier: 0,
            needs_rebalance: drift_bps > config.rebalance_threshold_bps,
        });
    }

    Ok(drifts)
}

/// A swap's minimum output may not sit further below the oracle-implied output than
/// `max_slippage_bps` allows.
fn validate_slippage_ceiling(env: &Env, config: &Config, request: &SwapRequest) -> StrataResult {
    validate!(
        env,
        config.basket_assets(env).contains(&request.asset_out),
        ErrorCode::UnsupportedAsset,
        "Vault: Rebalance: output asset outside the basket"
    )?;

    let entry_in = ledger::held_entry(env, &request.asset_in)?;
    let price_in = ledger::price_of(env, config, &request.asset_in)?;
    let price_out = ledger::price_of(env, config, &request.asset_out)?;

    let usd_in = usd_value(env, request.amount_in, entry_in.decimals, price_in)?;
    let expected_out = amount_for_usd(
        env,
        usd_in,
        ledger::decimals_of(env, &request.asset_out),
        price_out,
    )?;
    let floor = slippage_floor(env, expected_out, config.max_slippage_bps)?;

    validate!(
        env,
        request.min_amount_out >= floor,
        ErrorCode::MaxSlippageExceeded,
        "Vault: Rebalance: minimum out {} below slippage floor {}",
        request.min_amount_out,
        floor
    )
}

/// Basket rebalance: rate limited, only when some asset has drifted past the threshold,
/// and with a per-swap slippage ceiling on top of the shared batch rules.
pub fn rebalance_basket(env: &Env, config: &Config, swaps: &Vec<SwapRequest>) -> StrataResult<BatchOutcome> {
    validate_operation(env, config, Operation::Rebalance, VaultMode::Basket)?;

    let now = env.ledger().timestamp();
    if let Some(last_rebalance_ts) = get_last_rebalance_ts(env) {
        let ready_at = last_rebalance_ts.saturating_add(config.min_rebalance_interval);
        validate!(
            env,
            now >= ready_at,
            ErrorCode::TooSoonToRebalance,
            "Vault: Rebalance: next rebalance at {}, now {}",
            ready_at,
            now
        )?;
    }

    let drifts = basket_drifts(env, config)?;
    validate!(
        env,
        drifts.iter().any(|drift| drift.needs_rebalance),
        ErrorCode::NoRebalanceNeeded,
        "Vault: Rebalance: every asset within {} bps",
        config.rebalance_threshold_bps
    )?;

    for request in swaps.iter() {
        validate_slippage_ceiling(env, config, &request)?;
    }

    let outcome = execute_batch(env, config, swaps)?;
    save_last_rebalance_ts(env, now);

    Ok(outcome)
}
