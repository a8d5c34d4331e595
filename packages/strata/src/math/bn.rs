//! Big number types

#![allow(clippy::assign_op_pattern)]
#![allow(clippy::ptr_offset_with_cast)]
#![allow(clippy::manual_range_contains)]

use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer.
    pub struct U256(4);
}

impl U256 {
    /// Convert a U256 to a u128 if it fits.
    pub fn checked_as_u128(&self) -> Option<u128> {
        let words = self.0;
        if words[2] == 0 && words[3] == 0 {
            Some(((words[1] as u128) << 64) | (words[0] as u128))
        } else {
            None
        }
    }
}
