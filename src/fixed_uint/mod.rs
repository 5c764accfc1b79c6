//! Fixed-capacity arbitrary-precision unsigned integers.
//!
//! A [`FixedUInt<N>`] stores a nonnegative magnitude in at most `N` 32-bit
//! limbs, least significant first. Only the first `num_blocks` limbs carry
//! meaning; the rest of the array is never read, compared, copied or written
//! out, so callers may reuse an instance without clearing it.
//!
//! `num_bits` and `num_blocks` are only ever changed together through
//! [`FixedUInt::try_set_num_bits`] (or the internal normalization step), so
//! `num_blocks == ceil(num_bits / 32)` holds between any two calls.

mod base;
mod io;
mod ops;

pub use base::FixedUInt;

/// Bits per limb.
pub const BLOCK_BITS: u32 = 32;

/// Limbs needed to hold `num_bits` bits.
#[inline]
pub const fn blocks_for_bits(num_bits: u32) -> usize {
    num_bits.div_ceil(BLOCK_BITS) as usize
}
