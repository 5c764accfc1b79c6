use crate::float::FilterFloat;
use crate::{ArgumentError, FixedUInt, Sign};
use std::cmp::Ordering;
use std::fmt;

/// Exact value `sign * magnitude * 2^exponent` with odd `magnitude`.
///
/// The exponent is an `i32`. An operation whose exact result would need an
/// exponent outside that range panics, the same way a magnitude that outgrows
/// `N` limbs does.
pub struct Dyadic<const N: usize> {
    pub(super) sign: Sign,
    pub(super) exponent: i32,
    pub(super) magnitude: FixedUInt<N>,
}

impl<const N: usize> Dyadic<N> {
    pub const fn zero() -> Self {
        Self {
            sign: Sign::Zero,
            exponent: 0,
            magnitude: FixedUInt::zero(),
        }
    }

    /// Converts a finite float exactly.
    pub fn try_from_float<T: FilterFloat>(value: T) -> Result<Self, ArgumentError> {
        let mut result = Self::zero();
        result.set_float(value)?;
        Ok(result)
    }

    /// Converts a finite float exactly.
    ///
    /// # Panics
    ///
    /// Panics if `value` is NaN or infinite.
    pub fn from_float<T: FilterFloat>(value: T) -> Self {
        match Self::try_from_float(value) {
            Ok(result) => result,
            Err(err) => panic!("{err}"),
        }
    }

    /// Overwrites `self` with the exact value of `value`, reusing the limbs.
    pub fn set_float<T: FilterFloat>(&mut self, value: T) -> Result<(), ArgumentError> {
        if !value.is_finite() {
            return Err(ArgumentError::NonFinite {
                value: value.to_f64_lossless(),
            });
        }
        let (mantissa, exponent, sign) = value.integer_decode();
        let sign = if sign < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        };
        self.set_parts(sign, mantissa, i32::from(exponent));
        Ok(())
    }

    /// `sign * mantissa * 2^exponent`, normalized to an odd magnitude.
    pub(super) fn set_parts(&mut self, sign: Sign, mantissa: u64, exponent: i32) {
        if mantissa == 0 {
            self.set_zero();
            return;
        }
        let shift = mantissa.trailing_zeros();
        self.magnitude.set_u64(mantissa >> shift);
        self.exponent = checked_exponent(exponent.checked_add(shift as i32));
        self.sign = sign;
    }

    pub(super) fn set_zero(&mut self) {
        self.sign = Sign::Zero;
        self.exponent = 0;
        self.magnitude.set_num_bits(0);
    }

    /// Restores the odd-magnitude form after an addition or subtraction.
    pub(super) fn make_odd(&mut self) {
        if self.magnitude.is_zero() {
            self.set_zero();
        } else if !self.magnitude.is_odd() {
            let even = self.magnitude.clone();
            let shift = self.magnitude.shift_right_to_odd(&even) as i32;
            self.exponent = checked_exponent(self.exponent.checked_add(shift));
        }
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }

    /// Binary exponent of the least significant set bit.
    #[inline]
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// The odd magnitude; empty for zero.
    #[inline]
    pub fn magnitude(&self) -> &FixedUInt<N> {
        &self.magnitude
    }

    /// Rounds to at most `precision` significant bits, to nearest with ties
    /// away from zero.
    pub fn round_to_bits(&self, precision: u32) -> Self {
        assert!(precision > 0, "cannot round to zero bits");
        let bits = self.magnitude.num_bits();
        if bits <= precision {
            return self.clone();
        }
        let drop = bits - precision;
        let mut result = Self {
            sign: self.sign,
            exponent: checked_exponent(self.exponent.checked_add(drop as i32)),
            magnitude: FixedUInt::zero(),
        };
        result.magnitude.shift_right(&self.magnitude, drop);
        if self.magnitude.bit(drop - 1) {
            result.magnitude.round_up();
        }
        result.make_odd();
        result
    }

    /// Nearest `f64`, for display and diagnostics. Saturates to infinity and
    /// flushes to zero outside the `f64` range.
    pub fn to_f64(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        let rounded = self.round_to_bits(f64::MANTISSA_DIGITS);
        let mantissa = rounded
            .magnitude
            .blocks()
            .iter()
            .rev()
            .fold(0u64, |acc, &limb| (acc << 32) | u64::from(limb));
        let value = scale_by_power_of_two(mantissa as f64, rounded.exponent);
        if self.sign == Sign::Negative {
            -value
        } else {
            value
        }
    }
}

/// Unwraps the result of exponent arithmetic.
///
/// # Panics
///
/// Panics if the exponent left the `i32` range.
#[inline]
pub(super) fn checked_exponent(exponent: Option<i32>) -> i32 {
    match exponent {
        Some(exponent) => exponent,
        None => panic!("Dyadic exponent overflow: exact result is outside 2^i32::MIN..=2^i32::MAX"),
    }
}

fn scale_by_power_of_two(mut value: f64, mut exponent: i32) -> f64 {
    const STEP: i32 = 1000;
    while exponent > STEP && value.is_finite() {
        value *= 2f64.powi(STEP);
        exponent -= STEP;
    }
    while exponent < -STEP && value != 0.0 {
        value *= 2f64.powi(-STEP);
        exponent += STEP;
    }
    value * 2f64.powi(exponent)
}

impl<const N: usize> Default for Dyadic<N> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const N: usize> Clone for Dyadic<N> {
    fn clone(&self) -> Self {
        Self {
            sign: self.sign,
            exponent: self.exponent,
            magnitude: self.magnitude.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.sign = source.sign;
        self.exponent = source.exponent;
        self.magnitude.clone_from(&source.magnitude);
    }
}

impl<const N: usize> From<u64> for Dyadic<N> {
    fn from(value: u64) -> Self {
        let mut result = Self::zero();
        result.set_parts(Sign::Positive, value, 0);
        result
    }
}

impl<const N: usize> From<i64> for Dyadic<N> {
    fn from(value: i64) -> Self {
        let sign = if value < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        };
        let mut result = Self::zero();
        result.set_parts(sign, value.unsigned_abs(), 0);
        result
    }
}

impl<const N: usize> PartialEq for Dyadic<N> {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign
            && self.exponent == other.exponent
            && self.magnitude == other.magnitude
    }
}

impl<const N: usize> Eq for Dyadic<N> {}

impl<const N: usize> PartialOrd for Dyadic<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> Ord for Dyadic<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.sign.cmp(&other.sign) {
            Ordering::Equal => {}
            ordering => return ordering,
        }
        match self.sign {
            Sign::Zero => Ordering::Equal,
            Sign::Positive => self.cmp_magnitude(other),
            Sign::Negative => self.cmp_magnitude(other).reverse(),
        }
    }
}

impl<const N: usize> Dyadic<N> {
    /// Compares `|self|` with `|other|` for nonzero operands.
    fn cmp_magnitude(&self, other: &Self) -> Ordering {
        let top = |value: &Self| i64::from(value.exponent) + i64::from(value.magnitude.num_bits());
        match top(self).cmp(&top(other)) {
            Ordering::Equal => {}
            ordering => return ordering,
        }
        // Same leading bit position, so the exponents differ by less than the
        // bit length and the shift fits the capacity.
        let mut aligned = FixedUInt::<N>::zero();
        match self.exponent.cmp(&other.exponent) {
            Ordering::Equal => self.magnitude.cmp(&other.magnitude),
            Ordering::Greater => {
                aligned.shift_left(&self.magnitude, self.exponent.abs_diff(other.exponent));
                aligned.cmp(&other.magnitude)
            }
            Ordering::Less => {
                aligned.shift_left(&other.magnitude, other.exponent.abs_diff(self.exponent));
                self.magnitude.cmp(&aligned)
            }
        }
    }
}

impl<const N: usize> fmt::Debug for Dyadic<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::Negative => "-",
            Sign::Zero => return write!(f, "Dyadic(0)"),
            Sign::Positive => "+",
        };
        write!(
            f,
            "Dyadic({sign}{:?} * 2^{})",
            self.magnitude, self.exponent
        )
    }
}
