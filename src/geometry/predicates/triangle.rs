//! Point against a counterclockwise triangle.

use super::{ExactPhase, INTERVAL_FILTER, load_exact, load_floats, orientation_interval};
use crate::analysis::BitRange;
use crate::float::FilterFloat;
use crate::geometry::{Coord, ExactCoord};
use crate::observer::{NoopObserver, PredicateObserver};
use crate::scratch::ScratchNodes;
use crate::Sign;
use std::marker::PhantomData;

const PREDICATE: &str = "triangle";

/// Scratch nodes written by a full exact evaluation.
pub const NODES: usize = 11;

// Inputs, in provider order: query point, then the three vertices.
const PX: usize = 0;
const PY: usize = 1;
const fn vx(vertex: usize) -> usize {
    2 + 2 * vertex
}
const fn vy(vertex: usize) -> usize {
    3 + 2 * vertex
}
// Per-edge temporaries.
const EDGE: usize = 8;
const TMP: usize = 9;
const FACTOR: usize = 10;

/// Directed edges, in evaluation order.
const EDGES: [(usize, usize); 3] = [(0, 1), (1, 2), (2, 0)];

/// Limb capacity for `T` inputs: each edge test is a 2x2 determinant of
/// coordinate differences.
pub const fn required_blocks<T: FilterFloat>() -> usize {
    let coord = BitRange::of_float::<T>();
    let diff = coord.sum(coord);
    diff.product(diff).sum(diff.product(diff)).blocks()
}

/// Evaluator for point-in-triangle tests. The result is `Negative` strictly
/// inside, `Zero` on the boundary and `Positive` outside.
pub struct TriangleQuery<T, const N: usize, O = NoopObserver> {
    exact: ExactPhase<N, O>,
    _float: PhantomData<T>,
}

pub type TriangleQuery32<O = NoopObserver> =
    TriangleQuery<f32, { required_blocks::<f32>() }, O>;
pub type TriangleQuery64<O = NoopObserver> =
    TriangleQuery<f64, { required_blocks::<f64>() }, O>;

impl<T: FilterFloat, const N: usize> TriangleQuery<T, N> {
    /// # Panics
    ///
    /// Panics if `N` is smaller than [`required_blocks::<T>()`](required_blocks).
    pub fn new() -> Self {
        Self::with_observer(NoopObserver)
    }
}

impl<T: FilterFloat, const N: usize> Default for TriangleQuery<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FilterFloat, const N: usize, O: PredicateObserver> TriangleQuery<T, N, O> {
    /// # Panics
    ///
    /// Panics if `N` is smaller than [`required_blocks::<T>()`](required_blocks).
    pub fn with_observer(observer: O) -> Self {
        Self {
            exact: ExactPhase::new(PREDICATE, required_blocks::<T>(), NODES, observer),
            _float: PhantomData,
        }
    }

    /// Classifies `p` against the counterclockwise triangle `v0, v1, v2`.
    ///
    /// Edge `vi -> vj` contributes the sign of `cross(p - vi, vj - vi)`,
    /// positive on the outer side. The first edge known to be positive
    /// decides the call.
    ///
    /// # Panics
    ///
    /// Panics if a coordinate needed by the exact phase is NaN or infinite.
    pub fn classify(
        &mut self,
        p: &Coord<T>,
        v0: &Coord<T>,
        v1: &Coord<T>,
        v2: &Coord<T>,
    ) -> Sign {
        self.classify_impl(p, [v0, v1, v2], |nodes| load_floats(nodes, &[p, v0, v1, v2]))
    }

    /// Like [`classify`](Self::classify), but the exact phase takes its
    /// inputs from `exact`, which returns `[p, v0, v1, v2]` and is only
    /// called when the interval phase cannot decide.
    pub fn classify_with<'e, F>(
        &mut self,
        p: &Coord<T>,
        v0: &Coord<T>,
        v1: &Coord<T>,
        v2: &Coord<T>,
        exact: F,
    ) -> Sign
    where
        F: FnOnce() -> [&'e ExactCoord<N>; 4],
    {
        self.classify_impl(p, [v0, v1, v2], |nodes| load_exact(nodes, &exact()))
    }

    /// Largest number of scratch nodes any call has written.
    pub fn scratch_high_water(&self) -> usize {
        self.exact.high_water()
    }

    pub fn observer(&self) -> &O {
        self.exact.observer()
    }

    fn classify_impl<L>(&mut self, p: &Coord<T>, vertices: [&Coord<T>; 3], load: L) -> Sign
    where
        L: FnOnce(&mut ScratchNodes<N>),
    {
        if INTERVAL_FILTER {
            let mut resolved = true;
            let mut on_boundary = false;
            for (i, j) in EDGES {
                match orientation_interval(vertices[i], p, vertices[j]).sign() {
                    Some(Sign::Positive) => return Sign::Positive,
                    Some(Sign::Zero) => on_boundary = true,
                    Some(Sign::Negative) => {}
                    None => resolved = false,
                }
            }
            if resolved {
                return if on_boundary { Sign::Zero } else { Sign::Negative };
            }
        }

        let nodes = self.exact.enter(PREDICATE);
        load(nodes);
        let mut on_boundary = false;
        for (i, j) in EDGES {
            match exact_edge(nodes, i, j) {
                Sign::Positive => {
                    self.exact.leave();
                    return Sign::Positive;
                }
                Sign::Zero => on_boundary = true,
                Sign::Negative => {}
            }
        }
        self.exact.leave();
        if on_boundary { Sign::Zero } else { Sign::Negative }
    }
}

/// `cross(p - vi, vj - vi)` for edge `vi -> vj`.
fn exact_edge<const N: usize>(nodes: &mut ScratchNodes<N>, i: usize, j: usize) -> Sign {
    nodes.sub(EDGE, PX, vx(i));
    nodes.sub(TMP, vy(j), vy(i));
    nodes.mul(EDGE, EDGE, TMP);
    nodes.sub(TMP, PY, vy(i));
    nodes.sub(FACTOR, vx(j), vx(i));
    nodes.mul(TMP, TMP, FACTOR);
    nodes.sub(EDGE, EDGE, TMP);
    nodes.sign(EDGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::CountingObserver;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord::new(x, y)
    }

    #[test]
    fn capacities() {
        assert_eq!(required_blocks::<f64>(), 132);
        assert_eq!(required_blocks::<f32>(), 18);
    }

    #[test]
    fn inside_outside_and_boundary() {
        let mut query = TriangleQuery64::new();
        let (a, b, d) = (c(0.0, 0.0), c(4.0, 0.0), c(0.0, 4.0));
        assert_eq!(query.classify(&c(1.0, 1.0), &a, &b, &d), Sign::Negative);
        assert_eq!(query.classify(&c(5.0, 5.0), &a, &b, &d), Sign::Positive);
        assert_eq!(query.classify(&c(2.0, 0.0), &a, &b, &d), Sign::Zero);
        assert_eq!(query.classify(&c(0.0, 4.0), &a, &b, &d), Sign::Zero);
    }

    /// Counterclockwise triangle whose first edge has an inexact direction,
    /// with the midpoint of that edge. The first edge test cancels exactly,
    /// which the interval phase cannot prove.
    fn inexact_edge_case() -> (Coord<f64>, [Coord<f64>; 3]) {
        let v1 = c(1.0 / 3.0, 0.1);
        let p = c(v1.x / 2.0, v1.y / 2.0);
        (p, [c(0.0, 0.0), v1, c(-1.0, 1.0)])
    }

    #[test]
    fn ambiguous_edge_falls_back_to_exact() {
        let observer = CountingObserver::new();
        let mut query = TriangleQuery64::with_observer(&observer);
        let (p, [v0, v1, v2]) = inexact_edge_case();
        assert_eq!(query.classify(&p, &v0, &v1, &v2), Sign::Zero);
        assert_eq!(observer.exact_entries(), 1);
        assert_eq!(query.scratch_high_water(), NODES);
    }

    #[test]
    fn provider_feeds_exact_phase() {
        let mut query = TriangleQuery64::new();
        let (p, [v0, v1, v2]) = inexact_edge_case();
        let exact: [ExactCoord<132>; 4] =
            [p.to_exact(), v0.to_exact(), v1.to_exact(), v2.to_exact()];
        let result = query.classify_with(&p, &v0, &v1, &v2, || {
            [&exact[0], &exact[1], &exact[2], &exact[3]]
        });
        assert_eq!(result, Sign::Zero);
    }

    #[test]
    fn f32_inputs() {
        let mut query = TriangleQuery32::new();
        let a = Coord::new(0.0_f32, 0.0);
        let b = Coord::new(1.0_f32, 0.0);
        let d = Coord::new(0.0_f32, 1.0);
        assert_eq!(query.classify(&Coord::new(0.25, 0.25), &a, &b, &d), Sign::Negative);
        assert_eq!(query.classify(&Coord::new(0.5, 0.5), &a, &b, &d), Sign::Zero);
    }
}
