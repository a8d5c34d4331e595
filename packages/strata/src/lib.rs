#![no_std]

pub mod constants;
pub mod error;
pub mod interfaces;
pub mod macros;
pub mod math;
pub mod merkle;
pub mod oracle;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testutils"))]
pub mod testutils;
