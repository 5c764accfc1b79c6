//! Point against the circumcircle of a counterclockwise triangle.

use super::{ExactPhase, INTERVAL_FILTER, load_exact, load_floats};
use crate::analysis::BitRange;
use crate::float::FilterFloat;
use crate::geometry::{Coord, ExactCoord};
use crate::observer::{NoopObserver, PredicateObserver};
use crate::scratch::ScratchNodes;
use crate::{Interval, Sign};
use std::marker::PhantomData;

const PREDICATE: &str = "circumcircle";

/// Scratch nodes written by a full exact evaluation.
pub const NODES: usize = 11;

// Inputs, in provider order: query point, then the three vertices.
const PX: usize = 0;
const PY: usize = 1;
const AX: usize = 2;
const AY: usize = 3;
const BX: usize = 4;
const BY: usize = 5;
const CX: usize = 6;
const CY: usize = 7;
// Vertices relative to the query point, over the absolute vertices.
const ADX: usize = AX;
const ADY: usize = AY;
const BDX: usize = BX;
const BDY: usize = BY;
const CDX: usize = CX;
const CDY: usize = CY;
// Squared distances to the query point. The query point is dead by then.
const AD2: usize = PX;
const BD2: usize = PY;
const CD2: usize = 8;
const T0: usize = 9;
const T1: usize = 10;

/// Limb capacity for `T` inputs, from the cofactor expansion of the lifted
/// 3x3 determinant along its first column.
pub const fn required_blocks<T: FilterFloat>() -> usize {
    let coord = BitRange::of_float::<T>();
    let diff = coord.sum(coord);
    let lifted = diff.product(diff).sum(diff.product(diff));
    let minor = diff.product(lifted).sum(diff.product(lifted));
    let planar = diff.product(diff).sum(diff.product(diff));
    let term = diff.product(minor);
    let lifted_term = lifted.product(planar);
    term.sum(term).sum(lifted_term).blocks()
}

/// Evaluator for point-in-circumcircle tests. The result is `Negative`
/// strictly inside, `Zero` on the circle and `Positive` outside.
pub struct CircumcircleQuery<T, const N: usize, O = NoopObserver> {
    exact: ExactPhase<N, O>,
    _float: PhantomData<T>,
}

pub type CircumcircleQuery32<O = NoopObserver> =
    CircumcircleQuery<f32, { required_blocks::<f32>() }, O>;
pub type CircumcircleQuery64<O = NoopObserver> =
    CircumcircleQuery<f64, { required_blocks::<f64>() }, O>;

impl<T: FilterFloat, const N: usize> CircumcircleQuery<T, N> {
    /// # Panics
    ///
    /// Panics if `N` is smaller than [`required_blocks::<T>()`](required_blocks).
    pub fn new() -> Self {
        Self::with_observer(NoopObserver)
    }
}

impl<T: FilterFloat, const N: usize> Default for CircumcircleQuery<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FilterFloat, const N: usize, O: PredicateObserver> CircumcircleQuery<T, N, O> {
    /// # Panics
    ///
    /// Panics if `N` is smaller than [`required_blocks::<T>()`](required_blocks).
    pub fn with_observer(observer: O) -> Self {
        Self {
            exact: ExactPhase::new(PREDICATE, required_blocks::<T>(), NODES, observer),
            _float: PhantomData,
        }
    }

    /// Classifies `p` against the circle through the counterclockwise
    /// triangle `a, b, c`.
    ///
    /// # Panics
    ///
    /// Panics if a coordinate needed by the exact phase is NaN or infinite.
    pub fn classify(
        &mut self,
        p: &Coord<T>,
        a: &Coord<T>,
        b: &Coord<T>,
        c: &Coord<T>,
    ) -> Sign {
        self.classify_impl(p, a, b, c, |nodes| load_floats(nodes, &[p, a, b, c]))
    }

    /// Like [`classify`](Self::classify), but the exact phase takes its
    /// inputs from `exact`, which returns `[p, a, b, c]` and is only called
    /// when the interval phase cannot decide.
    pub fn classify_with<'e, F>(
        &mut self,
        p: &Coord<T>,
        a: &Coord<T>,
        b: &Coord<T>,
        c: &Coord<T>,
        exact: F,
    ) -> Sign
    where
        F: FnOnce() -> [&'e ExactCoord<N>; 4],
    {
        self.classify_impl(p, a, b, c, |nodes| load_exact(nodes, &exact()))
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
        a: &Coord<T>,
        b: &Coord<T>,
        c: &Coord<T>,
        load: L,
    ) -> Sign
    where
        L: FnOnce(&mut ScratchNodes<N>),
    {
        if INTERVAL_FILTER {
            if let Some(sign) = lifted_determinant(p, a, b, c).sign() {
                return -sign;
            }
        }

        let nodes = self.exact.enter(PREDICATE);
        load(nodes);
        let sign = exact_lifted_determinant(nodes);
        self.exact.leave();
        -sign
    }
}

/// Enclosure of the lifted determinant, positive when `p` is inside.
fn lifted_determinant<T: FilterFloat>(
    p: &Coord<T>,
    a: &Coord<T>,
    b: &Coord<T>,
    c: &Coord<T>,
) -> Interval<T> {
    let adx = Interval::difference(a.x, p.x);
    let ady = Interval::difference(a.y, p.y);
    let bdx = Interval::difference(b.x, p.x);
    let bdy = Interval::difference(b.y, p.y);
    let cdx = Interval::difference(c.x, p.x);
    let cdy = Interval::difference(c.y, p.y);

    let ad2 = adx * adx + ady * ady;
    let bd2 = bdx * bdx + bdy * bdy;
    let cd2 = cdx * cdx + cdy * cdy;

    let term1 = adx * (bdy * cd2 - cdy * bd2);
    let term2 = ady * (cdx * bd2 - bdx * cd2);
    let term3 = ad2 * (bdx * cdy - cdx * bdy);
    term1 + term2 + term3
}

/// Same expression as [`lifted_determinant`] over the scratch nodes.
fn exact_lifted_determinant<const N: usize>(nodes: &mut ScratchNodes<N>) -> Sign {
    nodes.sub(ADX, AX, PX);
    nodes.sub(ADY, AY, PY);
    nodes.sub(BDX, BX, PX);
    nodes.sub(BDY, BY, PY);
    nodes.sub(CDX, CX, PX);
    nodes.sub(CDY, CY, PY);

    // Each squared distance borrows the next free slot for its second square.
    nodes.mul(AD2, ADX, ADX);
    nodes.mul(BD2, ADY, ADY);
    nodes.add(AD2, AD2, BD2);
    nodes.mul(BD2, BDX, BDX);
    nodes.mul(CD2, BDY, BDY);
    nodes.add(BD2, BD2, CD2);
    nodes.mul(CD2, CDX, CDX);
    nodes.mul(T0, CDY, CDY);
    nodes.add(CD2, CD2, T0);

    // term1 = adx * (bdy * cd2 - cdy * bd2), kept in ADX.
    nodes.mul(T0, BDY, CD2);
    nodes.mul(T1, CDY, BD2);
    nodes.sub(T0, T0, T1);
    nodes.mul(ADX, ADX, T0);

    // term2 = ady * (cdx * bd2 - bdx * cd2), kept in ADY.
    nodes.mul(T0, CDX, BD2);
    nodes.mul(T1, BDX, CD2);
    nodes.sub(T0, T0, T1);
    nodes.mul(ADY, ADY, T0);

    // term3 = ad2 * (bdx * cdy - cdx * bdy), kept in AD2. BD2 and CD2 are dead.
    nodes.mul(BD2, BDX, CDY);
    nodes.mul(CD2, CDX, BDY);
    nodes.sub(BD2, BD2, CD2);
    nodes.mul(AD2, AD2, BD2);

    nodes.add(ADX, ADX, ADY);
    nodes.add(ADX, ADX, AD2);
    nodes.sign(ADX)
}
