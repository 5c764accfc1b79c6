//! Outward-rounded interval arithmetic.
//!
//! An [`Interval`] always contains the real value of the expression it was
//! computed from. The predicates evaluate their determinant once over
//! intervals and only fall back to exact arithmetic when [`Interval::sign`]
//! cannot decide.

use crate::Sign;
use crate::float::{FilterFloat, add_rounded, mul_rounded};
use std::ops::{Add, Mul, Neg, Sub};

/// Closed enclosure `[lo, hi]` of a real value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval<T> {
    lo: T,
    hi: T,
}

impl<T: FilterFloat> Interval<T> {
    /// Degenerate interval holding an exactly representable value.
    ///
    /// Non-finite values produce the unbounded interval.
    #[inline]
    pub fn point(value: T) -> Self {
        Self::from_bounds(value, value)
    }

    /// Builds `[lo, hi]`, collapsing to the unbounded interval when a bound is
    /// NaN or infinite.
    #[inline]
    pub fn from_bounds(lo: T, hi: T) -> Self {
        if !lo.is_finite() || !hi.is_finite() {
            return Self::entire();
        }
        debug_assert!(lo <= hi, "interval bounds out of order");
        Self { lo, hi }
    }

    /// The interval `(-inf, +inf)`. Its sign is always ambiguous.
    #[inline]
    pub fn entire() -> Self {
        Self {
            lo: T::neg_infinity(),
            hi: T::infinity(),
        }
    }

    #[inline]
    pub fn lo(&self) -> T {
        self.lo
    }

    #[inline]
    pub fn hi(&self) -> T {
        self.hi
    }

    #[inline]
    pub fn contains(&self, value: T) -> bool {
        self.lo <= value && value <= self.hi
    }

    /// Sign of every value in the enclosure, or `None` when it straddles zero.
    ///
    /// The degenerate enclosure `[0, 0]` proves an exact zero.
    #[inline]
    pub fn sign(&self) -> Option<Sign> {
        if self.lo > T::zero() {
            Some(Sign::Positive)
        } else if self.hi < T::zero() {
            Some(Sign::Negative)
        } else if self.lo == T::zero() && self.hi == T::zero() {
            Some(Sign::Zero)
        } else {
            None
        }
    }

    /// Enclosure of `a - b` for exact float inputs.
    #[inline]
    pub fn difference(a: T, b: T) -> Self {
        Self::point(a) - Self::point(b)
    }
}

impl<T: FilterFloat> Add for Interval<T> {
    type Output = Interval<T>;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let (lo, _) = add_rounded(self.lo, rhs.lo);
        let (_, hi) = add_rounded(self.hi, rhs.hi);
        Interval::from_bounds(lo, hi)
    }
}

impl<T: FilterFloat> Sub for Interval<T> {
    type Output = Interval<T>;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl<T: FilterFloat> Neg for Interval<T> {
    type Output = Interval<T>;

    #[inline]
    fn neg(self) -> Self {
        Interval {
            lo: -self.hi,
            hi: -self.lo,
        }
    }
}

impl<T: FilterFloat> Mul for Interval<T> {
    type Output = Interval<T>;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let corners = [
            mul_rounded(self.lo, rhs.lo),
            mul_rounded(self.lo, rhs.hi),
            mul_rounded(self.hi, rhs.lo),
            mul_rounded(self.hi, rhs.hi),
        ];
        let mut lo = corners[0].0;
        let mut hi = corners[0].1;
        for &(down, up) in &corners[1..] {
            lo = lo.min(down);
            hi = hi.max(up);
        }
        Interval::from_bounds(lo, hi)
    }
}
