use soroban_sdk::{contractclient, contracttype, Address, Env, Vec};

/// Where a price for an asset may come from. Sources are consulted in order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PriceSource {
    /// A price fixed by the oracle admin, 18 decimals
    Manual(i128),
    /// A feed contract exposing `lastprice`
    Feed(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceData {
    /// USD price with 18 decimals
    pub price: i128,
    /// Ledger timestamp the price was published at
    pub timestamp: u64,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PriceOutcome {
    Available(i128),
    Unavailable,
}

#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeedInterface {
    fn lastprice(env: Env, asset: Address) -> Option<PriceData>;
}

pub fn query_source(env: &Env, source: &PriceSource, asset: &Address, now: u64, max_age: u64) -> PriceOutcome {
    match source {
        PriceSource::Manual(price) if *price > 0 => PriceOutcome::Available(*price),
        PriceSource::Manual(_) => PriceOutcome::Unavailable,
        PriceSource::Feed(feed) => match PriceFeedClient::new(env, feed).try_lastprice(asset) {
            Ok(Ok(Some(data)))
                if data.price > 0 && now.saturating_sub(data.timestamp) <= max_age =>
            {
                PriceOutcome::Available(data.price)
            }
            _ => PriceOutcome::Unavailable,
        },
    }
}

/// First available price among `sources`
pub fn resolve_price(
    env: &Env,
    sources: &Vec<PriceSource>,
    asset: &Address,
    now: u64,
    max_age: u64,
) -> PriceOutcome {
    for source in sources.iter() {
        if let PriceOutcome::Available(price) = query_source(env, &source, asset, now, max_age) {
            return PriceOutcome::Available(price);
        }
    }
    PriceOutcome::Unavailable
}
