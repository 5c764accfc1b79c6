use std::cmp::Ordering;
use std::ops::{Mul, Neg};

/// Sign of an exact value or of a predicate determinant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Returns -1, 0 or 1.
    #[inline]
    pub const fn signum(self) -> i32 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }

    #[inline]
    pub fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Sign::Positive,
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Sign::Zero
    }
}

impl Neg for Sign {
    type Output = Sign;

    #[inline]
    fn neg(self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}

impl Mul for Sign {
    type Output = Sign;

    #[inline]
    fn mul(self, rhs: Sign) -> Sign {
        match (self, rhs) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (lhs, rhs) if lhs == rhs => Sign::Positive,
            _ => Sign::Negative,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_follows_sign_rules() {
        assert_eq!(Sign::Negative * Sign::Negative, Sign::Positive);
        assert_eq!(Sign::Negative * Sign::Positive, Sign::Negative);
        assert_eq!(Sign::Zero * Sign::Negative, Sign::Zero);
        assert_eq!(-Sign::Positive, Sign::Negative);
    }

    #[test]
    fn ordering_matches_signum() {
        assert!(Sign::Negative < Sign::Zero && Sign::Zero < Sign::Positive);
        assert_eq!(Sign::from_ordering(Ordering::Less).signum(), -1);
    }
}
