pub mod bn;
pub mod helpers;
pub mod safe_math;
