#![no_std]

mod contract;
mod controller;
mod events;
mod math;
mod storage;


pub use crate::contract::{Vault, VaultClient};
pub use crate::storage::{
    AssetEntry, Config, ConfigUpdate, Metrics, Operation, RebalanceBudget, VaultMode, VaultParams,
};
