//! Error types.
//!
//! Two kinds of failure exist and they are handled differently:
//!
//! - [`ArgumentError`]: the caller handed over something structurally invalid
//!   (a NaN coordinate, a zero denominator). Fallible constructors return it;
//!   predicate entry points treat it as a contract violation and panic.
//! - [`PrecisionError`]: a fixed capacity `N` is too small for the values it is
//!   asked to hold. This is a configuration defect of the capacity chosen for a
//!   predicate, never a property of particular input data, so every arithmetic
//!   path panics on it instead of returning a truncated magnitude.

use std::io;
use thiserror::Error;

/// Structurally invalid input unrelated to precision.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ArgumentError {
    /// NaN or infinite floating-point input has no exact value.
    #[error("non-finite floating-point input {value}")]
    NonFinite { value: f64 },
    /// Division by an exact zero.
    #[error("division by exact zero")]
    DivisionByZero,
}

/// The declared limb capacity cannot hold a required magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error(
    "precision configuration error: {required_blocks} blocks required but capacity is {capacity}"
)]
pub struct PrecisionError {
    pub required_blocks: usize,
    pub capacity: usize,
}

/// Crate-level error for fallible I/O paths.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Argument(#[from] ArgumentError),
    #[error(transparent)]
    Precision(#[from] PrecisionError),
    #[error("corrupt integer record: {0}")]
    CorruptRecord(&'static str),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_error_message_names_both_sizes() {
        let err = PrecisionError {
            required_blocks: 9,
            capacity: 4,
        };
        let message = err.to_string();
        assert!(message.contains('9'));
        assert!(message.contains('4'));
    }

    #[test]
    fn io_error_converts() {
        let err: Error = io::Error::new(io::ErrorKind::UnexpectedEof, "short").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
