pub mod basket;
pub mod deposit;
pub mod ledger;
pub mod rebalance;
