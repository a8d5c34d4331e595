#![no_std]

mod contract;
mod storage;


pub use crate::contract::{ShareToken, ShareTokenClient};
