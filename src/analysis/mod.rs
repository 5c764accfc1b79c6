//! Static analysis of predicate expressions.
//!
//! Every exact value the predicates produce is a sum of products of input
//! floats, so the set of bit positions it can occupy is known before any
//! input is seen. Tracking that range through an expression yields the limb
//! capacity the scratch nodes need for a given float type.

pub mod bit_range;

pub use bit_range::BitRange;
