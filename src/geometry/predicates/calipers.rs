//! Angle comparison for rotating-calipers sweeps.
//!
//! A sweep advances whichever caliper has the smaller turn to the next edge.
//! The turns are compared without computing any angle: the sign of a dot
//! product tells whether an angle is acute, and within the same half the
//! squared sines order the angles. Inputs are exact already, so there is no
//! interval phase.

use crate::geometry::Coord;
use crate::{ExactScalar, Sign};
use std::cmp::Ordering;

/// The counterclockwise turn from one direction to another, reduced to the
/// quantities the comparison needs.
struct Turn<S> {
    obtuse: bool,
    /// `cross(from, to)^2`
    cross_squared: S,
    /// `|from|^2 * |to|^2`
    norms: S,
}

impl<S: ExactScalar> Turn<S> {
    fn new(from: &Coord<S>, to: &Coord<S>) -> Self {
        let cross = from.cross(to);
        assert_eq!(
            cross.sign(),
            Sign::Positive,
            "turning angle must lie strictly between 0 and pi"
        );
        Self {
            obtuse: from.dot(to).sign() == Sign::Negative,
            cross_squared: cross.square(),
            norms: from.dot(from).exact_mul(&to.dot(to)),
        }
    }
}

/// Compares the counterclockwise turning angle from `first.0` to `first.1`
/// with the one from `second.0` to `second.1`.
///
/// Both angles must lie in `(0, pi)`, so every pair turns strictly
/// counterclockwise. Angles up to `pi / 2` (non-negative dot product) are
/// smaller than obtuse ones. Within the same half, `sin^2` is compared as
/// `cross^2 / (|u|^2 |v|^2)` by cross-multiplying; it grows with the angle
/// below `pi / 2` and shrinks with it above.
///
/// Swapping the arguments reverses the result.
///
/// # Panics
///
/// Panics if either turn is not strictly counterclockwise, which includes a
/// zero-length direction and a turn of exactly `0` or `pi`.
pub fn compare_turning_angles<S: ExactScalar>(
    first: (&Coord<S>, &Coord<S>),
    second: (&Coord<S>, &Coord<S>),
) -> Ordering {
    let lhs = Turn::new(first.0, first.1);
    let rhs = Turn::new(second.0, second.1);
    match (lhs.obtuse, rhs.obtuse) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (obtuse, _) => {
            let lhs_sine = lhs.cross_squared.exact_mul(&rhs.norms);
            let rhs_sine = rhs.cross_squared.exact_mul(&lhs.norms);
            let by_sine = lhs_sine.cmp(&rhs_sine);
            if obtuse { by_sine.reverse() } else { by_sine }
        }
    }
}
