use soroban_sdk::{token, Address, Env};
use strata::{
    error::{ErrorCode, StrataResult},
    interfaces::ShareTokenClient,
    safe_increment,
    utils::validate_positive_amount,
    validate,
};

use crate::{
    controller::ledger,
    events::VaultEvents,
    math::shares::{amount_for_usd, apply_fee, shares_for_deposit, usd_for_shares, usd_value},
    storage::{get_metrics, save_metrics, Config, Operation, VaultMode},
};

pub fn validate_operation(env: &Env, config: &Config, operation: Operation, mode: VaultMode) -> StrataResult {
    validate!(
        env,
        !config.is_operation_paused(operation),
        ErrorCode::OperationPaused,
        "Vault: operation {} is paused",
        operation
    )?;

    validate!(
        env,
        config.mode == mode,
        ErrorCode::InvalidMode,
        "Vault: operation {} is not available in this mode",
        operation
    )
}

/// Balance of `holder` must cover `shares`
pub fn validate_share_balance(env: &Env, config: &Config, holder: &Address, shares: i128) -> StrataResult {
    let balance = token::Client::new(env, &config.share_token).balance(holder);
    validate!(
        env,
        balance >= shares,
        ErrorCode::InsufficientShares,
        "Vault: holder has {} shares, {} requested",
        balance,
        shares
    )
}

/// Single-asset deposit. Shares are priced against the NAV read after the deposited
/// asset has landed in the vault.
pub fn deposit(
    env: &Env,
    config: &Config,
    sender: &Address,
    asset: &Address,
    amount: i128,
    min_shares_out: i128,
) -> StrataResult<i128> {
    validate_operation(env, config, Operation::Deposit, VaultMode::Scaled)?;
    validate_positive_amount(env, amount)?;
    validate!(
        env,
        config.is_accepted(asset),
        ErrorCode::UnsupportedAsset,
        "Vault: Deposit: asset is not accepted"
    )?;

    token::Client::new(env, asset).transfer(sender, &env.current_contract_address(), &amount);
    let (entry, _) = ledger::register_asset(env, asset);

    let price = ledger::price_of(env, config, asset)?;
    let usd = usd_value(env, amount, entry.decimals, price)?;

    validate!(
        env,
        usd >= config.min_deposit_usd,
        ErrorCode::BelowMinimum,
        "Vault: Deposit: value {} below minimum {}",
        usd,
        config.min_deposit_usd
    )?;

    let (net_usd, fee_usd) = apply_fee(env, usd, config.fee_bps)?;

    let share_token = ShareTokenClient::new(env, &config.share_token);
    let total_supply = share_token.total_supply();
    let nav = if total_supply == 0 {
        0
    } else {
        ledger::nav(env, config)?
    };
    let shares = shares_for_deposit(env, net_usd, total_supply, nav)?;

    validate!(
        env,
        shares > 0,
        ErrorCode::ZeroSharesMinted,
        "Vault: Deposit: value {} mints no shares",
        net_usd
    )?;
    validate!(
        env,
        shares >= min_shares_out,
        ErrorCode::SlippageExceeded,
        "Vault: Deposit: {} shares below requested minimum {}",
        shares,
        min_shares_out
    )?;

    share_token.mint(sender, &shares);

    let mut metrics = get_metrics(env);
    safe_increment!(env, metrics.total_minted, shares);
    safe_increment!(env, metrics.total_fees_usd, fee_usd);
    save_metrics(env, &metrics);

    VaultEvents::deposit(
        env,
        sender.clone(),
        asset.clone(),
        amount,
        usd,
        fee_usd,
        shares,
    );

    Ok(shares)
}

/// Burns `shares` for their slice of NAV, net of fee, paid out in `asset`.
pub fn redeem(
    env: &Env,
    config: &Config,
    sender: &Address,
    shares: i128,
    asset: &Address,
    min_amount_out: i128,
) -> StrataResult<i128> {
    validate_operation(env, config, Operation::Redeem, VaultMode::Scaled)?;
    validate_positive_amount(env, shares)?;
    let entry = ledger::held_entry(env, asset)?;

    let share_token = ShareTokenClient::new(env, &config.share_token);
    let total_supply = share_token.total_supply();
    validate!(
        env,
        total_supply > 0,
        ErrorCode::ZeroTotalSupply,
        "Vault: Redeem: no shares outstanding"
    )?;
    validate_share_balance(env, config, sender, shares)?;

    let nav = ledger::nav(env, config)?;
    let usd = usd_for_shares(env, shares, total_supply, nav)?;
    let (net_usd, fee_usd) = apply_fee(env, usd, config.fee_bps)?;

    let price = ledger::price_of(env, config, asset)?;
    let amount = amount_for_usd(env, net_usd, entry.decimals, price)?;

    validate!(
        env,
        amount >= min_amount_out,
        ErrorCode::SlippageExceeded,
        "Vault: Redeem: {} out below requested minimum {}",
        amount,
        min_amount_out
    )?;

    let available = ledger::balance_of(env, asset);
    validate!(
        env,
        available >= amount,
        ErrorCode::InsufficientLiquidity,
        "Vault: Redeem: {} requested, {} held",
        amount,
        available
    )?;

    share_token.burn_from_holder(sender, &shares);
    token::Client::new(env, asset).transfer(&env.current_contract_address(), sender, &amount);
    ledger::deregister_if_drained(env, asset);

    let mut metrics = get_metrics(env);
    safe_increment!(env, metrics.total_burned, shares);
    safe_increment!(env, metrics.total_fees_usd, fee_usd);
    save_metrics(env, &metrics);

    VaultEvents::redeem(
        env,
        sender.clone(),
        asset.clone(),
        shares,
        usd,
        fee_usd,
        amount,
    );

    Ok(amount)
}
