use super::{BLOCK_BITS, blocks_for_bits};
use crate::PrecisionError;
use std::cmp::Ordering;
use std::fmt;

/// Nonnegative integer with room for `N` 32-bit limbs.
pub struct FixedUInt<const N: usize> {
    pub(super) num_bits: u32,
    pub(super) num_blocks: usize,
    pub(super) limbs: [u32; N],
}

/// Compile-time guard for widening conversions.
struct Widening<const FROM: usize, const TO: usize>;

impl<const FROM: usize, const TO: usize> Widening<FROM, TO> {
    const CHECK: () = assert!(
        FROM <= TO,
        "FixedUInt conversions may only widen the capacity"
    );
}

impl<const N: usize> FixedUInt<N> {
    /// Creates zero.
    pub const fn zero() -> Self {
        Self {
            num_bits: 0,
            num_blocks: 0,
            limbs: [0; N],
        }
    }

    /// Creates a value from a 32-bit word.
    pub fn from_u32(value: u32) -> Self {
        let mut result = Self::zero();
        if value != 0 {
            result.set_num_bits(BLOCK_BITS - value.leading_zeros());
            result.limbs[0] = value;
        }
        result
    }

    /// Creates a value from a 64-bit word.
    ///
    /// The bit length comes from the position of the leading set bit, so
    /// `0xFFFF_FFFF_FFFF_FFFF` occupies 64 bits in 2 blocks while `1 << 40`
    /// occupies 41 bits in 2 blocks.
    pub fn from_u64(value: u64) -> Self {
        let mut result = Self::zero();
        result.set_u64(value);
        result
    }

    /// Overwrites the value in place with a 64-bit word.
    pub fn set_u64(&mut self, value: u64) {
        self.set_num_bits(64 - value.leading_zeros());
        if self.num_blocks > 0 {
            self.limbs[0] = value as u32;
        }
        if self.num_blocks > 1 {
            self.limbs[1] = (value >> 32) as u32;
        }
    }

    /// Creates a value from little-endian limbs. Leading zero limbs are dropped.
    pub fn from_blocks(blocks: &[u32]) -> Result<Self, PrecisionError> {
        let used = blocks.iter().rposition(|&limb| limb != 0).map_or(0, |i| i + 1);
        if used > N {
            return Err(PrecisionError {
                required_blocks: used,
                capacity: N,
            });
        }
        let mut result = Self::zero();
        result.limbs[..used].copy_from_slice(&blocks[..used]);
        result.normalize(used);
        Ok(result)
    }

    /// Number of significant bits; zero for zero.
    #[inline]
    pub fn num_bits(&self) -> u32 {
        self.num_bits
    }

    /// Number of occupied limbs, `ceil(num_bits / 32)`.
    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The occupied limbs, least significant first.
    #[inline]
    pub fn blocks(&self) -> &[u32] {
        &self.limbs[..self.num_blocks]
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.num_bits == 0
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        self.num_blocks > 0 && self.limbs[0] & 1 == 1
    }

    /// Resizes the logical length, failing if `num_bits` needs more than `N`
    /// limbs. Newly exposed limbs keep whatever they held; callers overwrite
    /// them.
    pub fn try_set_num_bits(&mut self, num_bits: u32) -> Result<(), PrecisionError> {
        let num_blocks = blocks_for_bits(num_bits);
        if num_blocks > N {
            return Err(PrecisionError {
                required_blocks: num_blocks,
                capacity: N,
            });
        }
        self.num_bits = num_bits;
        self.num_blocks = num_blocks;
        Ok(())
    }

    /// Same as [`try_set_num_bits`](Self::try_set_num_bits) but a capacity
    /// violation aborts.
    ///
    /// # Panics
    ///
    /// Panics if `num_bits` needs more than `N` limbs.
    #[inline]
    pub fn set_num_bits(&mut self, num_bits: u32) {
        if let Err(err) = self.try_set_num_bits(num_bits) {
            panic!("FixedUInt<{N}> overflow: {err}");
        }
    }

    /// Most significant occupied limb.
    ///
    /// # Panics
    ///
    /// Panics if the value is zero.
    #[inline]
    pub fn back(&self) -> u32 {
        assert!(self.num_blocks > 0, "zero has no most significant limb");
        self.limbs[self.num_blocks - 1]
    }

    /// Overwrites the most significant occupied limb. `value` must keep the
    /// leading bit where `num_bits` says it is.
    #[inline]
    pub fn set_back(&mut self, value: u32) {
        assert!(self.num_blocks > 0, "zero has no most significant limb");
        debug_assert_eq!(
            BLOCK_BITS - value.leading_zeros(),
            self.num_bits - BLOCK_BITS * (self.num_blocks as u32 - 1),
            "set_back must preserve the bit length"
        );
        self.limbs[self.num_blocks - 1] = value;
    }

    /// Clears the whole backing array, not only the occupied prefix.
    pub fn set_all_bits_to_zero(&mut self) {
        self.limbs = [0; N];
        self.num_bits = 0;
        self.num_blocks = 0;
    }

    /// Bit `index`, counting from the least significant bit.
    #[inline]
    pub fn bit(&self, index: u32) -> bool {
        if index >= self.num_bits {
            return false;
        }
        let limb = self.limbs[(index / BLOCK_BITS) as usize];
        (limb >> (index % BLOCK_BITS)) & 1 == 1
    }

    /// Number of trailing zero bits. Zero for zero.
    pub fn trailing_zeros(&self) -> u32 {
        self.blocks()
            .iter()
            .position(|&limb| limb != 0)
            .map_or(0, |i| i as u32 * BLOCK_BITS + self.limbs[i].trailing_zeros())
    }

    /// Copies into a larger (or equal) capacity.
    ///
    /// ```compile_fail
    /// use exactpred::FixedUInt;
    ///
    /// let _: FixedUInt<2> = FixedUInt::<4>::from_u32(7).widen();
    /// ```
    pub fn widen<const M: usize>(&self) -> FixedUInt<M> {
        let mut result = FixedUInt::<M>::zero();
        result.copy_from(self);
        result
    }

    /// Assigns from an instance of smaller or equal capacity, copying only the
    /// occupied limbs.
    ///
    /// ```
    /// use exactpred::FixedUInt;
    ///
    /// let mut wide = FixedUInt::<8>::zero();
    /// wide.copy_from(&FixedUInt::<2>::from_u64(u64::MAX));
    /// assert_eq!(wide.num_bits(), 64);
    /// ```
    ///
    /// Narrowing fails to compile:
    ///
    /// ```compile_fail
    /// use exactpred::FixedUInt;
    ///
    /// let mut narrow = FixedUInt::<2>::zero();
    /// narrow.copy_from(&FixedUInt::<8>::zero());
    /// ```
    pub fn copy_from<const M: usize>(&mut self, source: &FixedUInt<M>) {
        let () = Widening::<M, N>::CHECK;
        let blocks = source.num_blocks;
        self.limbs[..blocks].copy_from_slice(&source.limbs[..blocks]);
        self.num_bits = source.num_bits;
        self.num_blocks = blocks;
    }

    /// Recomputes the length from the top `blocks` limbs, dropping leading
    /// zero limbs. `blocks` never exceeds `N`, so this cannot fail.
    pub(super) fn normalize(&mut self, blocks: usize) {
        let mut blocks = blocks;
        while blocks > 0 && self.limbs[blocks - 1] == 0 {
            blocks -= 1;
        }
        self.num_blocks = blocks;
        self.num_bits = if blocks == 0 {
            0
        } else {
            BLOCK_BITS * (blocks as u32 - 1) + (BLOCK_BITS - self.limbs[blocks - 1].leading_zeros())
        };
    }
}

impl<const N: usize> Default for FixedUInt<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> Clone for FixedUInt<N> {
    fn clone(&self) -> Self {
        let mut result = Self::zero();
        result.copy_from(self);
        result
    }

    fn clone_from(&mut self, source: &Self) {
        self.copy_from(source);
    }
}

impl<const N: usize> From<u32> for FixedUInt<N> {
    fn from(value: u32) -> Self {
        Self::from_u32(value)
    }
}

impl<const N: usize> From<u64> for FixedUInt<N> {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl<const N: usize> PartialEq for FixedUInt<N> {
    fn eq(&self, other: &Self) -> bool {
        self.num_bits == other.num_bits && self.blocks() == other.blocks()
    }
}

impl<const N: usize> Eq for FixedUInt<N> {}

impl<const N: usize> PartialOrd for FixedUInt<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for FixedUInt<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.num_bits.cmp(&other.num_bits).then_with(|| {
            self.blocks()
                .iter()
                .rev()
                .cmp(other.blocks().iter().rev())
        })
    }
}

impl<const N: usize> fmt::Debug for FixedUInt<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedUInt<{N}>(bits={}, 0x", self.num_bits)?;
        if self.num_blocks == 0 {
            write!(f, "0")?;
        }
        for (i, limb) in self.blocks().iter().rev().enumerate() {
            if i == 0 {
                write!(f, "{limb:x}")?;
            } else {
                write!(f, "_{limb:08x}")?;
            }
        }
        write!(f, ")")
    }
}
