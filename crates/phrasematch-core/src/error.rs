//! Distance engine error types

use thiserror::Error;

/// Errors raised by the distance engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceError {
    /// A required text was absent
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A weight was negative, NaN or infinite
    #[error("invalid weight '{name}': {value} (weights must be finite and non-negative)")]
    InvalidWeight { name: &'static str, value: f64 },
}

/// Result type for distance operations
pub type Result<T> = std::result::Result<T, DistanceError>;
