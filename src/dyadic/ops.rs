use super::Dyadic;
use super::base::checked_exponent;
use crate::fixed_uint::blocks_for_bits;
use crate::{ExactScalar, FixedUInt, Sign};
use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

impl<const N: usize> Dyadic<N> {
    /// `self = lhs + rhs`.
    pub fn set_sum(&mut self, lhs: &Self, rhs: &Self) {
        self.set_signed_sum(lhs, rhs, rhs.sign);
    }

    /// `self = lhs - rhs`.
    pub fn set_difference(&mut self, lhs: &Self, rhs: &Self) {
        self.set_signed_sum(lhs, rhs, -rhs.sign);
    }

    /// `self = lhs * rhs`. Odd times odd stays odd, so no normalization.
    ///
    /// # Panics
    ///
    /// Panics if the exponent of the product leaves the `i32` range.
    pub fn set_product(&mut self, lhs: &Self, rhs: &Self) {
        if lhs.is_zero() || rhs.is_zero() {
            self.set_zero();
            return;
        }
        self.exponent = checked_exponent(lhs.exponent.checked_add(rhs.exponent));
        self.magnitude.mul(&lhs.magnitude, &rhs.magnitude);
        self.sign = lhs.sign * rhs.sign;
    }

    /// `self = lhs + rhs_sign * |rhs|`.
    fn set_signed_sum(&mut self, lhs: &Self, rhs: &Self, rhs_sign: Sign) {
        if rhs_sign == Sign::Zero {
            self.clone_from(lhs);
            return;
        }
        if lhs.is_zero() {
            self.clone_from(rhs);
            self.sign = rhs_sign;
            return;
        }
        let ((low, low_sign), (high, high_sign)) = if lhs.exponent <= rhs.exponent {
            ((lhs, lhs.sign), (rhs, rhs_sign))
        } else {
            ((rhs, rhs_sign), (lhs, lhs.sign))
        };
        let mut aligned = FixedUInt::<N>::zero();
        aligned.shift_left(&high.magnitude, high.exponent.abs_diff(low.exponent));
        self.exponent = low.exponent;
        if low_sign == high_sign {
            self.magnitude.add(&low.magnitude, &aligned);
            self.sign = low_sign;
        } else {
            match low.magnitude.cmp(&aligned) {
                Ordering::Equal => {
                    self.set_zero();
                    return;
                }
                Ordering::Greater => {
                    self.magnitude.sub(&low.magnitude, &aligned);
                    self.sign = low_sign;
                }
                Ordering::Less => {
                    self.magnitude.sub(&aligned, &low.magnitude);
                    self.sign = high_sign;
                }
            }
        }
        self.make_odd();
    }
}

impl<const N: usize> Dyadic<N> {
    /// Limbs needed to hold both operands of a sum on their common exponent.
    /// Zero when either operand is zero, since no alignment happens then.
    pub(crate) fn aligned_blocks(&self, other: &Self) -> usize {
        if self.is_zero() || other.is_zero() {
            return 0;
        }
        let top = |value: &Self| i64::from(value.exponent) + i64::from(value.magnitude.num_bits());
        let bottom = i64::from(self.exponent.min(other.exponent));
        let bits = top(self).max(top(other)) - bottom;
        blocks_for_bits(u32::try_from(bits).unwrap_or(u32::MAX))
    }
}

impl<const N: usize> Add for &Dyadic<N> {
    type Output = Dyadic<N>;

    fn add(self, rhs: Self) -> Dyadic<N> {
        let mut result = Dyadic::zero();
        result.set_sum(self, rhs);
        result
    }
}

impl<const N: usize> Sub for &Dyadic<N> {
    type Output = Dyadic<N>;

    fn sub(self, rhs: Self) -> Dyadic<N> {
        let mut result = Dyadic::zero();
        result.set_difference(self, rhs);
        result
    }
}

impl<const N: usize> Mul for &Dyadic<N> {
    type Output = Dyadic<N>;

    fn mul(self, rhs: Self) -> Dyadic<N> {
        let mut result = Dyadic::zero();
        result.set_product(self, rhs);
        result
    }
}

impl<const N: usize> Neg for &Dyadic<N> {
    type Output = Dyadic<N>;

    fn neg(self) -> Dyadic<N> {
        -self.clone()
    }
}

impl<const N: usize> Neg for Dyadic<N> {
    type Output = Dyadic<N>;

    fn neg(mut self) -> Dyadic<N> {
        self.sign = -self.sign;
        self
    }
}

impl<const N: usize> ExactScalar for Dyadic<N> {
    fn zero() -> Self {
        Dyadic::zero()
    }

    fn sign(&self) -> Sign {
        self.sign
    }

    fn exact_add(&self, rhs: &Self) -> Self {
        self + rhs
    }

    fn exact_sub(&self, rhs: &Self) -> Self {
        self - rhs
    }

    fn exact_mul(&self, rhs: &Self) -> Self {
        self * rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type D = Dyadic<8>;

    fn d(value: f64) -> D {
        D::from_float(value)
    }

    #[test]
    fn sum_of_exact_floats() {
        assert_eq!(&d(1.5) + &d(2.25), d(3.75));
        assert_eq!(&d(-1.5) + &d(2.25), d(0.75));
        assert_eq!(&d(1.5) + &d(-2.25), d(-0.75));
        assert_eq!(&d(0.0) + &d(-2.25), d(-2.25));
        assert_eq!(&d(-2.25) + &d(0.0), d(-2.25));
    }

    #[test]
    fn cancellation_gives_canonical_zero() {
        let value = &d(0.1) - &d(0.1);
        assert_eq!(value, D::zero());
        assert_eq!(value.exponent(), 0);
    }

    #[test]
    fn sum_beyond_float_precision_is_exact() {
        // 1 + 2^-80 has no f64 representation.
        let tiny = d(2f64.powi(-80));
        let sum = &d(1.0) + &tiny;
        assert_eq!(sum.magnitude().num_bits(), 81);
        assert_eq!(sum.exponent(), -80);
        assert_eq!(&sum - &d(1.0), tiny);
    }

    #[test]
    fn equal_exponents_renormalize() {
        // 3 + 5 = 8 = 1 * 2^3
        let sum = &d(3.0) + &d(5.0);
        assert_eq!(sum.exponent(), 3);
        assert_eq!(sum.magnitude(), &FixedUInt::from_u32(1));
    }

    #[test]
    fn product_signs_and_exponents() {
        let prod = &d(-0.75) * &d(6.0);
        assert_eq!(prod, d(-4.5));
        assert!((&d(0.0) * &d(-3.0)).is_zero());
        assert_eq!(&d(-0.5) * &d(-0.5), d(0.25));
    }

    #[test]
    fn product_of_inexact_floats_is_exact() {
        let a = d(1.0 / 3.0);
        let b = d(0.1);
        assert_eq!(&(&a * &b) - &(&b * &a), D::zero());
        assert_ne!(&a * &b, d((1.0 / 3.0) * 0.1));
    }

    #[test]
    fn negation() {
        assert_eq!(-&d(2.5), d(-2.5));
        assert_eq!(-D::zero(), D::zero());
    }

    #[test]
    fn repeated_squaring_keeps_exponents_exact() {
        // 2^(-1074 * 2^20) is still representable.
        let mut value = Dyadic::<1>::from_float(f64::from_bits(1));
        for _ in 0..20 {
            value = value.square();
        }
        assert_eq!(value.exponent(), -1074 << 20);
        assert!(value < Dyadic::from(1u64));
        assert!(value > Dyadic::zero());
    }

    #[test]
    #[should_panic(expected = "exponent overflow")]
    fn exponent_overflow_is_fatal() {
        let mut value = Dyadic::<1>::from_float(f64::from_bits(1));
        for _ in 0..21 {
            value = value.square();
        }
    }

    #[test]
    #[should_panic(expected = "precision configuration error")]
    fn sum_across_a_huge_exponent_gap_is_a_capacity_error() {
        let mut tiny = Dyadic::<1>::from_float(f64::from_bits(1));
        for _ in 0..20 {
            tiny = tiny.square();
        }
        let _ = &tiny + &Dyadic::from(1u64);
    }

    #[test]
    fn aligned_blocks_spans_both_operands() {
        // 2^64 aligned against 2^64 - 1 needs 65 bits.
        let high = d(2f64.powi(64));
        let low = D::from(u64::MAX);
        assert_eq!(high.aligned_blocks(&low), 3);
        assert_eq!(low.aligned_blocks(&high), 3);
        assert_eq!(high.aligned_blocks(&D::zero()), 0);
        assert_eq!(d(1.5).aligned_blocks(&d(-0.75)), 1);
    }

    #[test]
    fn scalar_contract() {
        let a = d(1.25);
        let b = d(-0.5);
        assert_eq!(a.exact_add(&b), d(0.75));
        assert_eq!(a.exact_sub(&b), d(1.75));
        assert_eq!(a.exact_mul(&b), d(-0.625));
        assert_eq!(b.square(), d(0.25));
        assert_eq!(ExactScalar::sign(&b), Sign::Negative);
    }
}
