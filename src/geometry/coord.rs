use crate::float::FilterFloat;
use crate::{ArgumentError, Dyadic, ExactScalar};
use std::ops::{Index, Sub};

/// 2D coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coord<T> {
    pub x: T,
    pub y: T,
}

/// Coordinate with exact components, as handed to the lazy providers of the
/// predicates.
pub type ExactCoord<const N: usize> = Coord<Dyadic<N>>;

impl<T> Coord<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T> From<(T, T)> for Coord<T> {
    fn from(value: (T, T)) -> Self {
        Coord::new(value.0, value.1)
    }
}

impl<T> Index<usize> for Coord<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match index {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("coordinate index {index} out of range for 2D"),
        }
    }
}

impl<T: FilterFloat> Coord<T> {
    /// Exact copy of a float coordinate.
    pub fn try_to_exact<const N: usize>(&self) -> Result<ExactCoord<N>, ArgumentError> {
        Ok(Coord::new(
            Dyadic::try_from_float(self.x)?,
            Dyadic::try_from_float(self.y)?,
        ))
    }

    /// Exact copy of a float coordinate.
    ///
    /// # Panics
    ///
    /// Panics if a component is NaN or infinite.
    pub fn to_exact<const N: usize>(&self) -> ExactCoord<N> {
        match self.try_to_exact() {
            Ok(exact) => exact,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<S: ExactScalar> Coord<S> {
    pub fn dot(&self, rhs: &Self) -> S {
        self.x.exact_mul(&rhs.x).exact_add(&self.y.exact_mul(&rhs.y))
    }

    /// z-component of the 3D cross product; positive when `rhs` turns
    /// counterclockwise from `self`.
    pub fn cross(&self, rhs: &Self) -> S {
        self.x.exact_mul(&rhs.y).exact_sub(&self.y.exact_mul(&rhs.x))
    }
}

impl<S: ExactScalar> Sub for &Coord<S> {
    type Output = Coord<S>;

    fn sub(self, rhs: Self) -> Coord<S> {
        Coord::new(self.x.exact_sub(&rhs.x), self.y.exact_sub(&rhs.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rational, Sign};

    #[test]
    fn indexed_components() {
        let p = Coord::new(1.5_f64, -2.0);
        assert_eq!(p[0], 1.5);
        assert_eq!(p[1], -2.0);
        assert_eq!(Coord::from((3, 4)), Coord::new(3, 4));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn third_component_panics() {
        let _component = Coord::new(0.0_f32, 0.0)[2];
    }

    #[test]
    fn exact_vector_algebra() {
        let a: ExactCoord<8> = Coord::new(1.0_f64, 2.0).to_exact();
        let b: ExactCoord<8> = Coord::new(3.0_f64, -1.0).to_exact();
        assert_eq!(a.dot(&b), Dyadic::from(1i64));
        assert_eq!(a.cross(&b), Dyadic::from(-7i64));
        assert_eq!(&b - &a, Coord::new(2.0_f64, -3.0).to_exact());
    }

    #[test]
    fn rational_components() {
        let a = Coord::new(Rational::<8>::from(Dyadic::from(1i64)), Rational::zero());
        let b = Coord::new(Rational::zero(), Rational::from(Dyadic::from(1i64)));
        assert_eq!(a.cross(&b).sign(), Sign::Positive);
        assert_eq!(a.dot(&b).sign(), Sign::Zero);
    }

    #[test]
    fn non_finite_component_is_rejected() {
        let err = Coord::new(1.0_f64, f64::INFINITY).try_to_exact::<4>().unwrap_err();
        assert!(matches!(err, ArgumentError::NonFinite { .. }));
    }
}
