//! Error types for ipl-morph

use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ipl_core::Error),

    /// Kernel is not an odd-sided square
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Source and destination planes differ in size
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A host property is present but unusable
    #[error("invalid property '{key}': {reason}")]
    InvalidProperty { key: String, reason: String },

    /// Unknown operation name or index
    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
