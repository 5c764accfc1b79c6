//! Adaptive-precision exact geometric predicates.
//!
//! Every predicate first evaluates its expression with outward-rounded
//! interval arithmetic. Most inputs are decided there. Near a degeneracy the
//! enclosure straddles zero and the evaluator repeats the same expression
//! exactly, over fixed-capacity dyadic numbers held in scratch nodes that
//! are allocated once per evaluator and reused across calls. The answer is
//! always exact, so the same configuration always classifies the same way.
//!
//! # Quick Start
//!
//! ```rust
//! use exactpred::{CircumcircleQuery64, Coord, LineClassification, LineQuery64, Sign};
//!
//! let a = Coord::new(0.0, 0.0);
//! let b = Coord::new(1.0, 0.0);
//! let c = Coord::new(0.0, 1.0);
//!
//! let mut incircle = CircumcircleQuery64::new();
//! assert_eq!(incircle.classify(&Coord::new(0.5, 0.5), &a, &b, &c), Sign::Negative);
//! assert_eq!(incircle.classify(&Coord::new(1.0, 1.0), &a, &b, &c), Sign::Zero);
//!
//! let mut line = LineQuery64::new();
//! assert_eq!(
//!     line.classify(&Coord::new(2.0, 0.0), &a, &b),
//!     LineClassification::CollinearAfter
//! );
//! ```
//!
//! # Available Predicates
//!
//! - [`LineQuery`]: side of a directed segment, with the position along it
//!   for collinear points
//! - [`TriangleQuery`]: inside, on or outside a counterclockwise triangle
//! - [`CircumcircleQuery`]: inside, on or outside the circle through a
//!   counterclockwise triangle
//! - [`compare_turning_angles`]: exact angle comparison for rotating-calipers
//!   sweeps
//!
//! # Capacity
//!
//! Each evaluator is generic over its limb capacity `N`. The `…32` and `…64`
//! aliases carry the capacity derived from the expression for `f32` and `f64`
//! inputs; choosing a smaller `N` by hand panics at construction.
//!
//! # Features
//!
//! - `interval-filter` (default): run the interval phase. Without it every
//!   call goes straight to the exact phase.

#[doc(hidden)]
pub mod analysis;
mod dyadic;
mod error;
mod exact;
pub mod fixed_uint;
mod float;
pub mod geometry;
mod interval;
pub mod observer;
mod rational;
mod scratch;
mod sign;

pub use dyadic::Dyadic;
pub use error::{ArgumentError, Error, PrecisionError};
pub use exact::ExactScalar;
pub use fixed_uint::FixedUInt;
pub use float::FilterFloat;
pub use geometry::{
    CircumcircleQuery, CircumcircleQuery32, CircumcircleQuery64, Coord, ExactCoord,
    LineClassification, LineQuery, LineQuery32, LineQuery64, TriangleQuery, TriangleQuery32,
    TriangleQuery64, compare_turning_angles,
};
pub use interval::Interval;
pub use observer::{CountingObserver, NoopObserver, PredicateObserver};
pub use rational::Rational;
pub use sign::Sign;
