//! Two-phase geometric predicates.
//!
//! Every evaluator first runs its expression over outward-rounded
//! [`Interval`]s and answers immediately when the enclosure has a definite
//! sign. Only an ambiguous enclosure sends the call to the exact phase,
//! which loads the inputs into the evaluator's scratch nodes and repeats the
//! same expression over [`Dyadic`](crate::Dyadic) values.
//!
//! The exact inputs come either from converting the float coordinates or from
//! a provider closure passed to `classify_with`. The provider is called at
//! most once per call, and only when the exact phase runs, so callers holding
//! pre-converted points pay nothing on the fast path.
//!
//! Each evaluator is generic over the input float type `T` and the limb
//! capacity `N` of its scratch nodes. Construction checks `N` against the
//! capacity derived from the expression for `T`; the `…32` / `…64` aliases
//! carry the derived value.

pub mod calipers;
pub mod circumcircle;
pub mod line;
pub mod triangle;

use super::{Coord, ExactCoord};
use crate::float::FilterFloat;
use crate::observer::PredicateObserver;
use crate::scratch::ScratchNodes;
use crate::{Interval, PrecisionError};
use tracing::trace;

/// Whether the interval phase runs before the exact phase.
pub(crate) const INTERVAL_FILTER: bool = cfg!(feature = "interval-filter");

/// Scratch nodes and diagnostics owned by one evaluator.
pub(crate) struct ExactPhase<const N: usize, O> {
    nodes: ScratchNodes<N>,
    observer: O,
}

impl<const N: usize, O: PredicateObserver> ExactPhase<N, O> {
    /// # Panics
    ///
    /// Panics if `N` is smaller than `required_blocks`.
    pub fn new(predicate: &'static str, required_blocks: usize, nodes: usize, observer: O) -> Self {
        if N < required_blocks {
            let err = PrecisionError {
                required_blocks,
                capacity: N,
            };
            panic!("{predicate} predicate: {err}");
        }
        Self {
            nodes: ScratchNodes::new(nodes),
            observer,
        }
    }

    /// Resets the scratch nodes for a new exact evaluation.
    pub fn enter(&mut self, predicate: &'static str) -> &mut ScratchNodes<N> {
        trace!(predicate, "entering exact phase");
        self.observer.exact_phase_entered(predicate);
        self.nodes.begin();
        &mut self.nodes
    }

    pub fn leave(&self) {
        self.observer.blocks_used(self.nodes.max_blocks());
    }

    pub fn high_water(&self) -> usize {
        self.nodes.high_water()
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }
}

/// Writes `coords` as `x, y` pairs into slots `0..2 * coords.len()`.
pub(crate) fn load_floats<T: FilterFloat, const N: usize>(
    nodes: &mut ScratchNodes<N>,
    coords: &[&Coord<T>],
) {
    for (i, coord) in coords.iter().enumerate() {
        nodes.set_float(2 * i, coord.x);
        nodes.set_float(2 * i + 1, coord.y);
    }
}

/// Same layout as [`load_floats`] for caller-supplied exact coordinates.
pub(crate) fn load_exact<const N: usize>(nodes: &mut ScratchNodes<N>, coords: &[&ExactCoord<N>]) {
    for (i, coord) in coords.iter().enumerate() {
        nodes.set(2 * i, &coord.x);
        nodes.set(2 * i + 1, &coord.y);
    }
}

/// Enclosure of `cross(u - origin, v - origin)`.
#[inline]
pub(crate) fn orientation_interval<T: FilterFloat>(
    origin: &Coord<T>,
    u: &Coord<T>,
    v: &Coord<T>,
) -> Interval<T> {
    let ux = Interval::difference(u.x, origin.x);
    let uy = Interval::difference(u.y, origin.y);
    let vx = Interval::difference(v.x, origin.x);
    let vy = Interval::difference(v.y, origin.y);
    ux * vy - uy * vx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sign;
    use crate::observer::CountingObserver;

    #[test]
    #[should_panic(expected = "precision configuration error")]
    fn undersized_capacity_is_fatal() {
        let _ = ExactPhase::<4, _>::new("test", 5, 1, crate::NoopObserver);
    }

    #[test]
    fn entering_reports_to_observer() {
        let observer = CountingObserver::new();
        let mut phase = ExactPhase::<4, _>::new("test", 4, 2, &observer);
        let nodes = phase.enter("test");
        load_floats(nodes, &[&Coord::new(3.0_f64, 0.5)]);
        phase.leave();
        assert_eq!(observer.exact_entries(), 1);
        assert_eq!(observer.max_blocks(), 1);
        assert_eq!(phase.high_water(), 2);
    }

    #[test]
    fn orientation_of_exact_inputs_is_exact() {
        let origin = Coord::new(0.0_f64, 0.0);
        let u = Coord::new(1.0, 0.0);
        let v = Coord::new(0.0, 1.0);
        assert_eq!(orientation_interval(&origin, &u, &v).sign(), Some(Sign::Positive));
        assert_eq!(orientation_interval(&origin, &v, &u).sign(), Some(Sign::Negative));
        assert_eq!(orientation_interval(&origin, &u, &u).sign(), Some(Sign::Zero));
    }
}
