//! Point against a directed segment, with the position along the segment for
//! collinear points.

use super::{ExactPhase, INTERVAL_FILTER, load_exact, load_floats, orientation_interval};
use crate::analysis::BitRange;
use crate::float::FilterFloat;
use crate::geometry::{Coord, ExactCoord};
use crate::observer::{NoopObserver, PredicateObserver};
use crate::scratch::ScratchNodes;
use crate::Sign;
use std::marker::PhantomData;

const PREDICATE: &str = "line";

/// Scratch nodes written by a full exact evaluation.
pub const NODES: usize = 6;

// Inputs, in provider order: query point, segment start, segment end.
const PX: usize = 0;
const PY: usize = 1;
const AX: usize = 2;
const AY: usize = 3;
const BX: usize = 4;
const BY: usize = 5;
// Segment direction and query offset, written over inputs that are dead.
const DX: usize = BX;
const DY: usize = BY;
const EX: usize = PX;
const EY: usize = PY;
// Results, written over the segment start.
const ACC: usize = AX;
const TMP: usize = AY;

/// Limb capacity for `T` inputs: the side determinant, the dot product and
/// the squared length all have the shape `d * e + d * e` over coordinate
/// differences.
pub const fn required_blocks<T: FilterFloat>() -> usize {
    let coord = BitRange::of_float::<T>();
    let diff = coord.sum(coord);
    diff.product(diff).sum(diff.product(diff)).blocks()
}

/// Where a point lies relative to the directed segment `v0 -> v1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineClassification {
    /// `v0 == v1`; no direction is defined.
    DegenerateSegment,
    EqualsStart,
    EqualsEnd,
    Left,
    Right,
    /// Collinear, on the far side of `v0`.
    CollinearBefore,
    /// Collinear, strictly between `v0` and `v1`.
    CollinearBetween,
    /// Collinear, on the far side of `v1`.
    CollinearAfter,
}

/// Evaluator for [`LineClassification`]. Reuse one instance per thread.
pub struct LineQuery<T, const N: usize, O = NoopObserver> {
    exact: ExactPhase<N, O>,
    _float: PhantomData<T>,
}

pub type LineQuery32<O = NoopObserver> = LineQuery<f32, { required_blocks::<f32>() }, O>;
pub type LineQuery64<O = NoopObserver> = LineQuery<f64, { required_blocks::<f64>() }, O>;

impl<T: FilterFloat, const N: usize> LineQuery<T, N> {
    /// # Panics
    ///
    /// Panics if `N` is smaller than [`required_blocks::<T>()`](required_blocks).
    pub fn new() -> Self {
        Self::with_observer(NoopObserver)
    }
}

impl<T: FilterFloat, const N: usize> Default for LineQuery<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FilterFloat, const N: usize, O: PredicateObserver> LineQuery<T, N, O> {
    /// # Panics
    ///
    /// Panics if `N` is smaller than [`required_blocks::<T>()`](required_blocks).
    pub fn with_observer(observer: O) -> Self {
        Self {
            exact: ExactPhase::new(PREDICATE, required_blocks::<T>(), NODES, observer),
            _float: PhantomData,
        }
    }

    /// Classifies `p` against the directed segment `v0 -> v1`.
    ///
    /// Exact equalities are checked first, on the floats themselves. Collinear
    /// points are ordered along the segment with one exact dot product.
    ///
    /// # Panics
    ///
    /// Panics if a coordinate needed by the exact phase is NaN or infinite.
    pub fn classify(&mut self, p: &Coord<T>, v0: &Coord<T>, v1: &Coord<T>) -> LineClassification {
        self.classify_impl(p, v0, v1, |nodes| load_floats(nodes, &[p, v0, v1]))
    }

    /// Like [`classify`](Self::classify), but the exact phase takes its
    /// inputs from `exact`, which returns `[p, v0, v1]` and is only called
    /// when the interval phase cannot decide.
    pub fn classify_with<'e, F>(
        &mut self,
        p: &Coord<T>,
        v0: &Coord<T>,
        v1: &Coord<T>,
        exact: F,
    ) -> LineClassification
    where
        F: FnOnce() -> [&'e ExactCoord<N>; 3],
    {
        self.classify_impl(p, v0, v1, |nodes| load_exact(nodes, &exact()))
    }

    /// Largest number of scratch nodes any call has written.
    pub fn scratch_high_water(&self) -> usize {
        self.exact.high_water()
    }

    pub fn observer(&self) -> &O {
        self.exact.observer()
    }

    fn classify_impl<L>(
        &mut self,
        p: &Coord<T>,
        v0: &Coord<T>,
        v1: &Coord<T>,
        load: L,
    ) -> LineClassification
    where
        L: FnOnce(&mut ScratchNodes<N>),
    {
        if v0 == v1 {
            return LineClassification::DegenerateSegment;
        }
        if p == v0 {
            return LineClassification::EqualsStart;
        }
        if p == v1 {
            return LineClassification::EqualsEnd;
        }

        let mut collinear = false;
        if INTERVAL_FILTER {
            match orientation_interval(v0, v1, p).sign() {
                Some(Sign::Positive) => return LineClassification::Left,
                Some(Sign::Negative) => return LineClassification::Right,
                Some(Sign::Zero) => collinear = true,
                None => {}
            }
        }

        let nodes = self.exact.enter(PREDICATE);
        load(nodes);
        nodes.sub(DX, BX, AX);
        nodes.sub(DY, BY, AY);
        nodes.sub(EX, PX, AX);
        nodes.sub(EY, PY, AY);
        if !collinear {
            nodes.mul(ACC, DX, EY);
            nodes.mul(TMP, DY, EX);
            nodes.sub(ACC, ACC, TMP);
            match nodes.sign(ACC) {
                Sign::Positive => {
                    self.exact.leave();
                    return LineClassification::Left;
                }
                Sign::Negative => {
                    self.exact.leave();
                    return LineClassification::Right;
                }
                Sign::Zero => {}
            }
        }
        let order = order_along_segment(nodes);
        self.exact.leave();
        order
    }
}

/// Orders a collinear point along the segment by comparing `dot(d, e)` with
/// `dot(d, d)`. Expects the differences in `DX`, `DY`, `EX`, `EY`.
fn order_along_segment<const N: usize>(nodes: &mut ScratchNodes<N>) -> LineClassification {
    nodes.mul(ACC, DX, EX);
    nodes.mul(TMP, DY, EY);
    nodes.add(ACC, ACC, TMP);
    if nodes.sign(ACC) == Sign::Negative {
        return LineClassification::CollinearBefore;
    }
    // EX is dead once the dot product is formed.
    nodes.mul(TMP, DX, DX);
    nodes.mul(EX, DY, DY);
    nodes.add(TMP, TMP, EX);
    if nodes.get(ACC) > nodes.get(TMP) {
        LineClassification::CollinearAfter
    } else {
        LineClassification::CollinearBetween
    }
}
