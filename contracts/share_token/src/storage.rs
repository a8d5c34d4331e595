use soroban_sdk::{contracttype, log, panic_with_error, Address, Env, String};
use soroban_token_sdk::{metadata::TokenMetadata, TokenUtils};
use strata::{
    constants::{
        BALANCE_BUMP_AMOUNT, BALANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT,
        INSTANCE_LIFETIME_THRESHOLD,
    },
    error::ErrorCode,
};

#[contracttype]
#[derive(Clone)]
pub struct AllowanceKey {
    pub from: Address,
    pub spender: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Allowance {
    pub amount: i128,
    pub expiration_ledger: u32,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    TotalSupply,
    Balance(Address),
    Allowance(AllowanceKey),
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

// ################################################################
//                             Admin
// ################################################################

/// The vault that owns this share token
pub fn get_admin(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .unwrap_or_else(|| {
            log!(env, "Share Token: Admin not set");
            panic_with_error!(env, ErrorCode::NotInitialized)
        })
}

pub fn save_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

// ################################################################
//                            Metadata
// ################################################################

pub fn save_metadata(env: &Env, decimal: u32, name: String, symbol: String) {
    if decimal > 18 {
        log!(env, "Share Token: at most 18 decimals supported", decimal);
        panic_with_error!(env, ErrorCode::InvalidDecimals);
    }

    TokenUtils::new(env).metadata().set_metadata(&TokenMetadata {
        decimal,
        name,
        symbol,
    });
}

pub fn get_metadata(env: &Env) -> TokenMetadata {
    TokenUtils::new(env).metadata().get_metadata()
}

// ################################################################
//                         Balance / Supply
// ################################################################

pub fn get_balance(env: &Env, holder: &Address) -> i128 {
    let key = DataKey::Balance(holder.clone());
    match env.storage().persistent().get::<DataKey, i128>(&key) {
        Some(balance) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
            balance
        }
        None => 0,
    }
}

fn save_balance(env: &Env, holder: &Address, balance: i128) {
    let key = DataKey::Balance(holder.clone());
    env.storage().persistent().set(&key, &balance);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

pub fn credit(env: &Env, holder: &Address, amount: i128) {
    let balance = get_balance(env, holder)
        .checked_add(amount)
        .unwrap_or_else(|| panic_with_error!(env, ErrorCode::MathError));
    save_balance(env, holder, balance);
}

pub fn debit(env: &Env, holder: &Address, amount: i128) {
    let balance = get_balance(env, holder);
    if balance < amount {
        log!(env, "Share Token: balance below amount", balance, amount);
        panic_with_error!(env, ErrorCode::InsufficientShares);
    }
    save_balance(env, holder, balance - amount);
}

pub fn get_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

/// Applies a signed change to the total supply. Supply can never go negative.
pub fn adjust_total_supply(env: &Env, delta: i128) {
    let supply = get_total_supply(env)
        .checked_add(delta)
        .filter(|supply| *supply >= 0)
        .unwrap_or_else(|| panic_with_error!(env, ErrorCode::MathError));
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
}

// ################################################################
//                            Allowance
// ################################################################

/// Allowance of `spender` over `from`, reading zero once expired
pub fn get_allowance(env: &Env, from: &Address, spender: &Address) -> Allowance {
    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });

    match env.storage().temporary().get::<_, Allowance>(&key) {
        Some(allowance) if allowance.expiration_ledger >= env.ledger().sequence() => allowance,
        Some(allowance) => Allowance {
            amount: 0,
            expiration_ledger: allowance.expiration_ledger,
        },
        None => Allowance {
            amount: 0,
            expiration_ledger: 0,
        },
    }
}

pub fn save_allowance(
    env: &Env,
    from: &Address,
    spender: &Address,
    amount: i128,
    expiration_ledger: u32,
) {
    let sequence = env.ledger().sequence();
    if amount > 0 && expiration_ledger < sequence {
        log!(env, "Share Token: allowance expires in the past", expiration_ledger);
        panic_with_error!(env, ErrorCode::InvalidExpiration);
    }

    let key = DataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    env.storage().temporary().set(
        &key,
        &Allowance {
            amount,
            expiration_ledger,
        },
    );

    if amount > 0 {
        let live_for = expiration_ledger - sequence;
        env.storage().temporary().extend_ttl(&key, live_for, live_for);
    }
}

pub fn spend_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    let allowance = get_allowance(env, from, spender);
    if allowance.amount < amount {
        log!(env, "Share Token: allowance below amount", allowance.amount, amount);
        panic_with_error!(env, ErrorCode::InsufficientAllowance);
    }
    if amount > 0 {
        save_allowance(
            env,
            from,
            spender,
            allowance.amount - amount,
            allowance.expiration_ledger,
        );
    }
}
