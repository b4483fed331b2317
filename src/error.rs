//! Error types for the Tessella SOM engine.

use thiserror::Error;

/// The main error type for Tessella operations.
#[derive(Error, Debug)]
pub enum TessellaError {
    /// The map has not been trained yet.
    #[error("SOM has not been trained yet")]
    NotTrained,

    /// A vector or matrix does not have the expected shape.
    #[error("Shape mismatch: expected length {expected}, got {actual}")]
    ShapeMismatch {
        /// The expected length.
        expected: usize,
        /// The length that was actually supplied.
        actual: usize,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Empty input.
    #[error("Empty input: {0}")]
    EmptyInput(String),
}

/// Result type alias for Tessella operations.
pub type Result<T> = std::result::Result<T, TessellaError>;
