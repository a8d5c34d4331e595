#![no_std]

mod contract;
mod events;
mod storage;


pub use crate::contract::{PriceOracle, PriceOracleClient};
pub use crate::storage::Config;
