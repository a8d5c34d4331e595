pub mod shares;
