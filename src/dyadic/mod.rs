//! Exact binary rationals.
//!
//! A [`Dyadic<N>`] is `sign * magnitude * 2^exponent` with an odd
//! [`FixedUInt<N>`](crate::FixedUInt) magnitude. Every finite float is one,
//! and sums, differences and products of dyadics are dyadics again, so the
//! predicate expressions evaluate over them without any rounding.
//!
//! Zero has a single representation (sign zero, exponent zero, empty
//! magnitude), which makes structural equality coincide with value equality.

mod base;
mod ops;

pub use base::Dyadic;
