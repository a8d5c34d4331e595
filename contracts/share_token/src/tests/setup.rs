use soroban_sdk::{testutils::Address as _, Address, Env, String};

use crate::contract::{ShareToken, ShareTokenClient};

pub fn deploy_share_token_contract<'a>(
    env: &Env,
    admin: impl Into<Option<Address>>,
) -> ShareTokenClient<'a> {
    let admin = admin.into().unwrap_or(Address::generate(env));
    let address = env.register(
        ShareToken,
        (
            admin,
            18u32,
            String::from_str(env, "Strata Index Share"),
            String::from_str(env, "STRX"),
        ),
    );

    ShareTokenClient::new(env, &address)
}
