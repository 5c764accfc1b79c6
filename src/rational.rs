//! Exact quotients of dyadics.
//!
//! Fractions are never reduced. Keeping them unreduced costs limbs but no
//! gcd, and the geometric code only ever asks for signs and comparisons.

use crate::{ArgumentError, Dyadic, ExactScalar, Sign};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// `numerator / denominator` with a strictly positive denominator.
#[derive(Clone)]
pub struct Rational<const N: usize> {
    numerator: Dyadic<N>,
    denominator: Dyadic<N>,
}

impl<const N: usize> Rational<N> {
    /// Builds `numerator / denominator`, moving a negative sign to the
    /// numerator.
    pub fn new(numerator: Dyadic<N>, denominator: Dyadic<N>) -> Result<Self, ArgumentError> {
        match denominator.sign() {
            Sign::Zero => Err(ArgumentError::DivisionByZero),
            Sign::Positive => Ok(Self {
                numerator,
                denominator,
            }),
            Sign::Negative => Ok(Self {
                numerator: -numerator,
                denominator: -denominator,
            }),
        }
    }

    pub fn zero() -> Self {
        Self::from(Dyadic::zero())
    }

    #[inline]
    pub fn numerator(&self) -> &Dyadic<N> {
        &self.numerator
    }

    #[inline]
    pub fn denominator(&self) -> &Dyadic<N> {
        &self.denominator
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.numerator.sign()
    }

    /// `self / rhs`, or `DivisionByZero` when `rhs` is zero.
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, ArgumentError> {
        Self::new(
            &self.numerator * &rhs.denominator,
            &self.denominator * &rhs.numerator,
        )
    }

    /// Approximate value for display and diagnostics.
    pub fn to_f64(&self) -> f64 {
        self.numerator.to_f64() / self.denominator.to_f64()
    }

    /// `self + rhs`, or `self - rhs` when `subtract` is set.
    fn signed_sum(&self, rhs: &Self, subtract: bool) -> Self {
        let combine = |a: &Dyadic<N>, b: &Dyadic<N>| if subtract { a - b } else { a + b };
        if self.denominator == rhs.denominator {
            return Self {
                numerator: combine(&self.numerator, &rhs.numerator),
                denominator: self.denominator.clone(),
            };
        }
        Self {
            numerator: combine(
                &(&self.numerator * &rhs.denominator),
                &(&rhs.numerator * &self.denominator),
            ),
            denominator: &self.denominator * &rhs.denominator,
        }
    }
}

impl<const N: usize> From<Dyadic<N>> for Rational<N> {
    fn from(numerator: Dyadic<N>) -> Self {
        Self {
            numerator,
            denominator: Dyadic::from(1u64),
        }
    }
}

impl<const N: usize> Add for &Rational<N> {
    type Output = Rational<N>;

    fn add(self, rhs: Self) -> Rational<N> {
        self.signed_sum(rhs, false)
    }
}

impl<const N: usize> Sub for &Rational<N> {
    type Output = Rational<N>;

    fn sub(self, rhs: Self) -> Rational<N> {
        self.signed_sum(rhs, true)
    }
}

impl<const N: usize> Mul for &Rational<N> {
    type Output = Rational<N>;

    fn mul(self, rhs: Self) -> Rational<N> {
        Rational {
            numerator: &self.numerator * &rhs.numerator,
            denominator: &self.denominator * &rhs.denominator,
        }
    }
}

impl<const N: usize> Div for &Rational<N> {
    type Output = Rational<N>;

    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    fn div(self, rhs: Self) -> Rational<N> {
        match self.checked_div(rhs) {
            Ok(quotient) => quotient,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<const N: usize> Neg for &Rational<N> {
    type Output = Rational<N>;

    fn neg(self) -> Rational<N> {
        Rational {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }
}

impl<const N: usize> PartialEq for Rational<N> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<const N: usize> Eq for Rational<N> {}

impl<const N: usize> PartialOrd for Rational<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for Rational<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplying keeps the order.
        if self.denominator == other.denominator {
            return self.numerator.cmp(&other.numerator);
        }
        let lhs = &self.numerator * &other.denominator;
        let rhs = &other.numerator * &self.denominator;
        lhs.cmp(&rhs)
    }
}

impl<const N: usize> fmt::Debug for Rational<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} / {:?}", self.numerator, self.denominator)
    }
}

impl<const N: usize> ExactScalar for Rational<N> {
    fn zero() -> Self {
        Rational::zero()
    }

    fn sign(&self) -> Sign {
        self.numerator.sign()
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
