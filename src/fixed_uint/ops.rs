//! Limb arithmetic. Every operation writes into `self` from operands borrowed
//! elsewhere and sizes the destination before touching limbs beyond the
//! operands' own lengths, so exceeding `N` aborts before anything is written
//! out of range.

use super::{BLOCK_BITS, FixedUInt};

impl<const N: usize> FixedUInt<N> {
    /// `self = n0 + n1`.
    pub fn add(&mut self, n0: &Self, n1: &Self) {
        let (long, short) = if n0.num_blocks >= n1.num_blocks {
            (n0, n1)
        } else {
            (n1, n0)
        };
        let long_blocks = long.num_blocks;
        let mut carry = 0u64;
        for i in 0..long_blocks {
            let rhs = if i < short.num_blocks { short.limbs[i] } else { 0 };
            let sum = u64::from(long.limbs[i]) + u64::from(rhs) + carry;
            self.limbs[i] = sum as u32;
            carry = sum >> BLOCK_BITS;
        }
        if carry != 0 {
            self.set_num_bits(BLOCK_BITS * long_blocks as u32 + 1);
            self.limbs[long_blocks] = carry as u32;
        } else {
            self.normalize(long_blocks);
        }
    }

    /// `self = n0 - n1`. Requires `n0 >= n1`.
    pub fn sub(&mut self, n0: &Self, n1: &Self) {
        debug_assert!(n0 >= n1, "FixedUInt::sub requires n0 >= n1");
        let mut borrow = false;
        for i in 0..n0.num_blocks {
            let rhs = if i < n1.num_blocks { n1.limbs[i] } else { 0 };
            let (diff1, b1) = n0.limbs[i].overflowing_sub(rhs);
            let (diff2, b2) = diff1.overflowing_sub(u32::from(borrow));
            self.limbs[i] = diff2;
            borrow = b1 || b2;
        }
        debug_assert!(!borrow, "FixedUInt::sub underflow");
        self.normalize(n0.num_blocks);
    }

    /// `self = n0 * n1`.
    pub fn mul(&mut self, n0: &Self, n1: &Self) {
        if n0.is_zero() || n1.is_zero() {
            self.normalize(0);
            return;
        }
        // The product has num_bits0 + num_bits1 - 1 or num_bits0 + num_bits1 bits.
        self.set_num_bits(n0.num_bits + n1.num_bits);
        let blocks = self.num_blocks;
        let mut acc = 0u128;
        for k in 0..blocks {
            let i_min = k.saturating_sub(n1.num_blocks - 1);
            let i_max = k.min(n0.num_blocks - 1);
            for i in i_min..=i_max {
                acc += u128::from(n0.limbs[i]) * u128::from(n1.limbs[k - i]);
            }
            self.limbs[k] = acc as u32;
            acc >>= BLOCK_BITS;
        }
        debug_assert_eq!(acc, 0, "product exceeded its bit bound");
        self.normalize(blocks);
    }

    /// `self = n << shift`.
    pub fn shift_left(&mut self, n: &Self, shift: u32) {
        if n.is_zero() {
            self.normalize(0);
            return;
        }
        // A saturated length is still far past any capacity.
        self.set_num_bits(n.num_bits.saturating_add(shift));
        let blocks = self.num_blocks;
        let block_shift = (shift / BLOCK_BITS) as usize;
        let bit_shift = shift % BLOCK_BITS;
        self.limbs[..block_shift].fill(0);
        if bit_shift == 0 {
            self.limbs[block_shift..block_shift + n.num_blocks].copy_from_slice(n.blocks());
            return;
        }
        let mut prev = 0u32;
        for (i, &limb) in n.blocks().iter().enumerate() {
            self.limbs[i + block_shift] = (limb << bit_shift) | prev;
            prev = limb >> (BLOCK_BITS - bit_shift);
        }
        let top = block_shift + n.num_blocks;
        if top < blocks {
            self.limbs[top] = prev;
        }
    }

    /// `self = n >> shift`, discarding the shifted-out bits.
    pub fn shift_right(&mut self, n: &Self, shift: u32) {
        if shift >= n.num_bits {
            self.normalize(0);
            return;
        }
        self.set_num_bits(n.num_bits - shift);
        let block_shift = (shift / BLOCK_BITS) as usize;
        let bit_shift = shift % BLOCK_BITS;
        for i in 0..self.num_blocks {
            let src = i + block_shift;
            let low = n.limbs[src] >> bit_shift;
            let high = if bit_shift != 0 && src + 1 < n.num_blocks {
                n.limbs[src + 1] << (BLOCK_BITS - bit_shift)
            } else {
                0
            };
            self.limbs[i] = low | high;
        }
    }

    /// `self = n >> trailing_zeros(n)`, the odd part of a nonzero `n`.
    /// Returns the shift.
    pub fn shift_right_to_odd(&mut self, n: &Self) -> u32 {
        let shift = n.trailing_zeros();
        self.shift_right(n, shift);
        shift
    }

    /// Adds one in place. The value may grow by a bit, and by a block when
    /// every occupied limb was all ones.
    pub fn round_up(&mut self) {
        for i in 0..self.num_blocks {
            let (value, carry) = self.limbs[i].overflowing_add(1);
            self.limbs[i] = value;
            if !carry {
                self.normalize(self.num_blocks);
                return;
            }
        }
        let blocks = self.num_blocks;
        self.set_num_bits(BLOCK_BITS * blocks as u32 + 1);
        self.limbs[blocks] = 1;
    }
}
