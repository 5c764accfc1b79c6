use crate::Sign;
use std::fmt::Debug;

/// Exact arithmetic the geometric code relies on.
///
/// Implementations never round: `exact_add`, `exact_sub` and `exact_mul`
/// return the true result or abort when a fixed capacity is exceeded.
pub trait ExactScalar: Clone + Ord + Debug {
    fn zero() -> Self;

    fn sign(&self) -> Sign;

    fn exact_add(&self, rhs: &Self) -> Self;

    fn exact_sub(&self, rhs: &Self) -> Self;

    fn exact_mul(&self, rhs: &Self) -> Self;

    #[inline]
    fn square(&self) -> Self {
        self.exact_mul(self)
    }
}
