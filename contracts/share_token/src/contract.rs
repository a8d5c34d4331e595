use soroban_sdk::{
    contract, contractimpl, contractmeta, log, panic_with_error,
    token::{self, Interface as _},
    Address, Env, String,
};
use soroban_token_sdk::TokenUtils;
use strata::{error::ErrorCode, interfaces::ShareTokenInterface};

use crate::storage::{
    adjust_total_supply, bump_instance, credit, debit, get_admin, get_allowance, get_balance,
    get_metadata, get_total_supply, save_admin, save_allowance, save_metadata, spend_allowance,
};

fn check_nonnegative_amount(env: &Env, amount: i128) {
    if amount < 0 {
        log!(env, "Share Token: negative amount", amount);
        panic_with_error!(env, ErrorCode::ZeroAmount);
    }
}

contractmeta!(
    key = "Description",
    val = "Share token representing proportional ownership of an index vault"
);

#[contract]
pub struct ShareToken;

#[contractimpl]
impl ShareToken {
    /// `admin` is the vault; only it can mint and burn on behalf of holders.
    pub fn __constructor(env: Env, admin: Address, decimal: u32, name: String, symbol: String) {
        save_metadata(&env, decimal, name, symbol);
        save_admin(&env, &admin);
    }

    pub fn set_admin(env: Env, new_admin: Address) {
        let admin = get_admin(&env);
        admin.require_auth();
        bump_instance(&env);

        save_admin(&env, &new_admin);
        TokenUtils::new(&env).events().set_admin(admin, new_admin);
    }

    pub fn admin(env: Env) -> Address {
        get_admin(&env)
    }
}

#[contractimpl]
impl ShareTokenInterface for ShareToken {
    fn mint(env: Env, to: Address, amount: i128) {
        check_nonnegative_amount(&env, amount);
        let admin = get_admin(&env);
        admin.require_auth();
        bump_instance(&env);

        credit(&env, &to, amount);
        adjust_total_supply(&env, amount);
        TokenUtils::new(&env).events().mint(admin, to, amount);
    }

    /// Burns without the holder's signature. Redemption burns through this so the holder
    /// authorizes a single vault call.
    fn burn_from_holder(env: Env, holder: Address, amount: i128) {
        check_nonnegative_amount(&env, amount);
        get_admin(&env).require_auth();
        bump_instance(&env);

        debit(&env, &holder, amount);
        adjust_total_supply(&env, -amount);
        TokenUtils::new(&env).events().burn(holder, amount);
    }

    fn total_supply(env: Env) -> i128 {
        bump_instance(&env);
        get_total_supply(&env)
    }
}

#[contractimpl]
impl token::Interface for ShareToken {
    fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        bump_instance(&env);
        get_allowance(&env, &from, &spender).amount
    }

    fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        from.require_auth();
        check_nonnegative_amount(&env, amount);
        bump_instance(&env);

        save_allowance(&env, &from, &spender, amount, expiration_ledger);
        TokenUtils::new(&env)
            .events()
            .approve(from, spender, amount, expiration_ledger);
    }

    fn balance(env: Env, id: Address) -> i128 {
        bump_instance(&env);
        get_balance(&env, &id)
    }

    fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        check_nonnegative_amount(&env, amount);
        bump_instance(&env);

        debit(&env, &from, amount);
        credit(&env, &to, amount);
        TokenUtils::new(&env).events().transfer(from, to, amount);
    }

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        check_nonnegative_amount(&env, amount);
        bump_instance(&env);

        spend_allowance(&env, &from, &spender, amount);
        debit(&env, &from, amount);
        credit(&env, &to, amount);
        TokenUtils::new(&env).events().transfer(from, to, amount);
    }

    fn burn(env: Env, from: Address, amount: i128) {
        from.require_auth();
        check_nonnegative_amount(&env, amount);
        bump_instance(&env);

        debit(&env, &from, amount);
        adjust_total_supply(&env, -amount);
        TokenUtils::new(&env).events().burn(from, amount);
    }

    fn burn_from(env: Env, spender: Address, from: Address, amount: i128) {
        spender.require_auth();
        check_nonnegative_amount(&env, amount);
        bump_instance(&env);

        spend_allowance(&env, &from, &spender, amount);
        debit(&env, &from, amount);
        adjust_total_supply(&env, -amount);
        TokenUtils::new(&env).events().burn(from, amount);
    }

    fn decimals(env: Env) -> u32 {
        get_metadata(&env).decimal
    }

    fn name(env: Env) -> String {
        get_metadata(&env).name
    }

    fn symbol(env: Env) -> String {
        get_metadata(&env).symbol
    }
}
