//! Floating-point support for the interval filter.
//!
//! Interval bounds are rounded outward one operation at a time. Instead of
//! widening every result by an ulp, the error-free transformations below
//! recover the exact rounding error of `a + b` and `a * b`; a bound only moves
//! when that error points outward.

use num_traits::Float;
use std::fmt;

/// Float types accepted by the predicates.
pub trait FilterFloat: Float + fmt::Debug + Send + Sync + 'static {
    /// Bit position of the least significant bit of the smallest subnormal.
    const MIN_BIT: i32;
    /// Bit position of the most significant bit of the largest finite value.
    const MAX_BIT: i32;

    /// Smallest representable value strictly greater than `self`.
    fn next_up(self) -> Self;

    /// Largest representable value strictly less than `self`.
    fn next_down(self) -> Self;

    /// Lossless widening used in diagnostics and error messages.
    fn to_f64_lossless(self) -> f64;
}

macro_rules! impl_filter_float {
    ($ty:ty, $bits:ty, $min_bit:expr, $max_bit:expr) => {
        impl FilterFloat for $ty {
            const MIN_BIT: i32 = $min_bit;
            const MAX_BIT: i32 = $max_bit;

            #[inline]
            fn next_up(self) -> Self {
                if self.is_nan() || self == <$ty>::INFINITY {
                    return self;
                }
                if self == 0.0 {
                    return <$ty>::from_bits(1);
                }
                let bits: $bits = self.to_bits();
                if self > 0.0 {
                    <$ty>::from_bits(bits + 1)
                } else {
                    <$ty>::from_bits(bits - 1)
                }
            }

            #[inline]
            fn next_down(self) -> Self {
                -(-self).next_up()
            }

            #[inline]
            fn to_f64_lossless(self) -> f64 {
                f64::from(self)
            }
        }
    };
}

impl_filter_float!(f32, u32, -149, 127);
impl_filter_float!(f64, u64, -1074, 1023);

/// Knuth's TWO-SUM: `a + b == sum + err` exactly when `sum` is finite.
#[inline(always)]
pub(crate) fn two_sum<T: Float>(a: T, b: T) -> (T, T) {
    let sum = a + b;
    let b_virtual = sum - a;
    let a_virtual = sum - b_virtual;
    let b_roundoff = b - b_virtual;
    let a_roundoff = a - a_virtual;
    (sum, a_roundoff + b_roundoff)
}

/// FMA-based TWO-PRODUCT: `a * b == prod + err` exactly when `prod` is normal
/// and far enough from the subnormal range.
#[inline(always)]
pub(crate) fn two_product<T: Float>(a: T, b: T) -> (T, T) {
    let prod = a * b;
    (prod, a.mul_add(b, -prod))
}

/// Rounds `a + b` toward -inf and toward +inf.
///
/// Returns infinite bounds on overflow; the caller collapses them.
#[inline]
pub(crate) fn add_rounded<T: FilterFloat>(a: T, b: T) -> (T, T) {
    let (sum, err) = two_sum(a, b);
    if !sum.is_finite() {
        return (T::neg_infinity(), T::infinity());
    }
    let down = if err < T::zero() { sum.next_down() } else { sum };
    let up = if err > T::zero() { sum.next_up() } else { sum };
    (down, up)
}

/// Rounds `a * b` toward -inf and toward +inf.
#[inline]
pub(crate) fn mul_rounded<T: FilterFloat>(a: T, b: T) -> (T, T) {
    if a == T::zero() || b == T::zero() {
        return (T::zero(), T::zero());
    }
    let (prod, err) = two_product(a, b);
    if !prod.is_finite() {
        return (T::neg_infinity(), T::infinity());
    }
    // Below this magnitude the FMA residual may itself be rounded.
    let exact_residual = T::min_positive_value() / T::epsilon() * (T::one() + T::one());
    if prod.abs() < exact_residual {
        return (prod.next_down(), prod.next_up());
    }
    let down = if err < T::zero() { prod.next_down() } else { prod };
    let up = if err > T::zero() { prod.next_up() } else { prod };
    (down, up)
}
