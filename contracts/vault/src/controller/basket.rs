use soroban_sdk::{log, token, Address, Env, Vec};
use strata::{
    error::{ErrorCode, StrataResult},
    interfaces::ShareTokenClient,
    types::TargetWeight,
    math::{helpers::mul_div_floor, safe_math::SafeMath},
    safe_increment,
    utils::validate_positive_amount,
    validate,
};

use crate::{
    controller::{
        deposit::{validate_operation, validate_share_balance},
        ledger,
    },
    events::VaultEvents,
    math::shares::{shares_for_deposit, usd_value},
    storage::{
        get_held_assets, get_metrics, save_metrics, validate_basket, Config, Operation, VaultMode,
    },
};

/// Deposits `amounts[i]` of the i-th basket asset in one call. No fee is charged.
pub fn deposit_basket(
    env: &Env,
    config: &Config,
    sender: &Address,
    amounts: &Vec<i128>,
    min_shares_out: i128,
) -> StrataResult<i128> {
    validate_operation(env, config, Operation::Deposit, VaultMode::Basket)?;
    validate!(
        env,
        amounts.len() == config.basket.len(),
        ErrorCode::ArrayLengthMismatch,
        "Vault: Basket Deposit: {} amounts for {} basket assets",
        amounts.len(),
        config.basket.len()
    )?;

    let mut has_value = false;
    for amount in amounts.iter() {
        validate!(env, amount >= 0, ErrorCode::ZeroAmount)?;
        has_value |= amount > 0;
    }
    validate!(
        env,
        has_value,
        ErrorCode::ZeroAmount,
        "Vault: Basket Deposit: nothing to deposit"
    )?;

    let vault = env.current_contract_address();
    let mut assets = Vec::new(env);
    let mut deposited = Vec::new(env);
    let mut decimals = Vec::new(env);

    for (i, target) in config.basket.iter().enumerate() {
        let amount = amounts.get_unchecked(i as u32);
        if amount == 0 {
            continue;
        }
        token::Client::new(env, &target.asset).transfer(sender, &vault, &amount);
        let (entry, _) = ledger::register_asset(env, &target.asset);

        assets.push_back(target.asset);
        deposited.push_back(amount);
        decimals.push_back(entry.decimals);
    }

    let prices = ledger::prices_of(env, config, &assets)?;
    let mut usd: i128 = 0;
    for i in 0..assets.len() {
        let value = usd_value(
            env,
            deposited.get_unchecked(i),
            decimals.get_unchecked(i),
            prices.get_unchecked(i),
        )?;
        usd = usd.safe_add(value, env)?;
    }

    validate!(
        env,
        usd >= config.min_deposit_usd,
        ErrorCode::BelowMinimum,
        "Vault: Basket Deposit: value {} below minimum {}",
        usd,
        config.min_deposit_usd
    )?;

    let share_token = ShareTokenClient::new(env, &config.share_token);
    let total_supply = share_token.total_supply();
    let nav = if total_supply == 0 {
        0
    } else {
        ledger::nav(env, config)?
    };
    let shares = shares_for_deposit(env, usd, total_supply, nav)?;

    validate!(env, shares > 0, ErrorCode::ZeroSharesMinted)?;
    validate!(
        env,
        shares >= min_shares_out,
        ErrorCode::SlippageExceeded,
        "Vault: Basket Deposit: {} shares below requested minimum {}",
        shares,
        min_shares_out
    )?;

    share_token.mint(sender, &shares);

    let mut metrics = get_metrics(env);
    safe_increment!(env, metrics.total_minted, shares);
    save_metrics(env, &metrics);

    VaultEvents::basket_deposit(env, sender.clone(), amounts.clone(), usd, shares);

    Ok(shares)
}

/// Pays out `balance * shares / total_supply` of every basket asset. No fee is charged.
pub fn redeem_basket(
    env: &Env,
    config: &Config,
    sender: &Address,
    shares: i128,
    min_amounts_out: &Vec<i128>,
) -> StrataResult<Vec<i128>> {
    validate_operation(env, config, Operation::Redeem, VaultMode::Basket)?;
    validate_positive_amount(env, shares)?;
    validate!(
        env,
        min_amounts_out.len() == config.basket.len(),
        ErrorCode::ArrayLengthMismatch,
        "Vault: Basket Redeem: {} minimums for {} basket assets",
        min_amounts_out.len(),
        config.basket.len()
    )?;

    let share_token = ShareTokenClient::new(env, &config.share_token);
    let total_supply = share_token.total_supply();
    validate!(
        env,
        total_supply > 0,
        ErrorCode::ZeroTotalSupply,
        "Vault: Basket Redeem: no shares outstanding"
    )?;
    validate_share_balance(env, config, sender, shares)?;

    let mut amounts = Vec::new(env);
    for (i, target) in config.basket.iter().enumerate() {
        let balance = ledger::balance_of(env, &target.asset);
        let amount = mul_div_floor(env, balance, shares, total_supply)?;
        let min_amount = min_amounts_out.get_unchecked(i as u32);
        validate!(
            env,
            amount >= min_amount,
            ErrorCode::SlippageExceeded,
            "Vault: Basket Redeem: {} out below requested minimum {}",
            amount,
            min_amount
        )?;
        amounts.push_back(amount);
    }

    share_token.burn_from_holder(sender, &shares);

    let vault = env.current_contract_address();
    for (i, target) in config.basket.iter().enumerate() {
        let amount = amounts.get_unchecked(i as u32);
        if amount > 0 {
            token::Client::new(env, &target.asset).transfer(&vault, sender, &amount);
        }
        ledger::deregister_if_drained(env, &target.asset);
    }

    let mut metrics = get_metrics(env);
    safe_increment!(env, metrics.total_burned, shares);
    save_metrics(env, &metrics);

    VaultEvents::basket_redeem(env, sender.clone(), shares, amounts.clone());

    Ok(amounts)
}

/// Basket redeem only pays out basket members, so every held asset carrying a balance
/// must stay in the basket.
pub fn validate_basket_update(env: &Env, config: &Config, basket: &Vec<TargetWeight>) -> StrataResult {
    validate!(
        env,
        config.mode == VaultMode::Basket,
        ErrorCode::InvalidMode,
        "Vault: Update Basket: vault is not in basket mode"
    )?;
    validate_basket(env, basket)?;

    let mut members = Vec::new(env);
    for target in basket.iter() {
        members.push_back(target.asset);
    }

    for asset in get_held_assets(env).keys().iter() {
        if !members.contains(&asset) && ledger::balance_of(env, &asset) > 0 {
            log!(env, "Vault: Update Basket: held asset would leave the basket", asset);
            return Err(ErrorCode::AssetStillHeld);
        }
    }

    Ok(())
}

/// In basket mode only basket members may be tracked.
pub fn validate_held_asset(env: &Env, config: &Config, asset: &Address) -> StrataResult {
    if config.mode != VaultMode::Basket {
        return Ok(());
    }

    validate!(
        env,
        config.basket_assets(env).contains(asset),
        ErrorCode::UnsupportedAsset,
        "Vault: Held Assets: asset is not a basket member"
    )
}
