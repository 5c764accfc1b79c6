//! Points and the predicates that classify them.

mod coord;
pub mod predicates;

pub use coord::{Coord, ExactCoord};
pub use predicates::calipers::compare_turning_angles;
pub use predicates::circumcircle::{CircumcircleQuery, CircumcircleQuery32, CircumcircleQuery64};
pub use predicates::line::{LineClassification, LineQuery, LineQuery32, LineQuery64};
pub use predicates::triangle::{TriangleQuery, TriangleQuery32, TriangleQuery64};
