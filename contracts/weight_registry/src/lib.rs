#![no_std]

mod contract;
mod events;
mod storage;


pub use crate::contract::{WeightRegistry, WeightRegistryClient};
pub use crate::storage::{Config, WeightCommitment};
