use crate::float::FilterFloat;
use crate::fixed_uint::BLOCK_BITS;

/// Inclusive range of bit positions a nonzero exact value may occupy.
///
/// A value `m * 2^e` with odd `m` occupies positions `e ..= e + bits(m) - 1`.
/// Its odd magnitude therefore never needs more than [`BitRange::bits`] bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitRange {
    pub low: i32,
    pub high: i32,
}

impl BitRange {
    /// Positions occupied by any finite value of `T`.
    pub const fn of_float<T: FilterFloat>() -> Self {
        Self {
            low: T::MIN_BIT,
            high: T::MAX_BIT,
        }
    }

    /// Range of `a + b` or `a - b`: the carry may add one position on top.
    pub const fn sum(self, rhs: Self) -> Self {
        let low = if self.low < rhs.low { self.low } else { rhs.low };
        let high = if self.high > rhs.high {
            self.high
        } else {
            rhs.high
        };
        Self { low, high: high + 1 }
    }

    /// Range of `a * b`.
    pub const fn product(self, rhs: Self) -> Self {
        Self {
            low: self.low + rhs.low,
            high: self.high + rhs.high + 1,
        }
    }

    /// Bits needed by the odd magnitude of any value in range.
    pub const fn bits(self) -> u32 {
        (self.high - self.low + 1) as u32
    }

    /// 32-bit limbs needed by the odd magnitude of any value in range.
    pub const fn blocks(self) -> usize {
        self.bits().div_ceil(BLOCK_BITS) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_ranges_span_subnormal_to_max() {
        assert_eq!(BitRange::of_float::<f64>().bits(), 2098);
        assert_eq!(BitRange::of_float::<f32>().bits(), 277);
    }

    #[test]
    fn two_by_two_determinant() {
        let coord = BitRange::of_float::<f64>();
        let diff = coord.sum(coord);
        let det = diff.product(diff).sum(diff.product(diff));
        assert_eq!(det, BitRange { low: -2148, high: 2050 });
        assert_eq!(det.blocks(), 132);
    }

    #[test]
    fn product_of_single_bits() {
        let one = BitRange { low: 0, high: 0 };
        assert_eq!(one.product(one), BitRange { low: 0, high: 1 });
    }
}
