use soroban_sdk::{log, Address, Env};

use crate::{
    error::{ErrorCode, StrataResult},
    types::Role,
};

/// Implemented by contract configurations that name the holders of each role
pub trait RoleHolders {
    fn admin(&self) -> Address;

    fn holder(&self, role: Role) -> Option<Address>;
}

/// Authenticates `sender` and checks it holds `role`. The admin holds every role
/// unless `exclusive` is set.
pub fn require_role(
    env: &Env,
    holders: &impl RoleHolders,
    role: Role,
    sender: &Address,
    exclusive: bool,
) -> StrataResult {
    sender.require_auth();

    if !exclusive && holders.admin() == *sender {
        return Ok(());
    }

    match holders.holder(role) {
        Some(holder) if holder == *sender => Ok(()),
        _ => {
            log!(env, "Sender is not authorized for role", role);
            Err(ErrorCode::NotAuthorized)
        }
    }
}

pub fn validate_positive_amount(env: &Env, amount: i128) -> StrataResult {
    if amount <= 0 {
        log!(env, "Amount must be positive", amount);
        return Err(ErrorCode::ZeroAmount);
    }
    Ok(())
}
