//! Error types for ipl-core
//!
//! Provides a unified error type for plane construction and pixel access.
//! Each variant captures enough context for diagnostics without exposing
//! the storage layout.

use thiserror::Error;

/// ipl-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid plane dimensions
    #[error("invalid plane dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Plane dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Pixel coordinates outside the plane
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} plane")]
    IndexOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Sample value that is neither background (0) nor foreground (1)
    #[error("invalid binary sample: {0} (expected 0 or 1)")]
    InvalidSample(u8),

    /// Sample buffer length does not match width * height
    #[error("sample buffer length mismatch: expected {expected}, got {actual}")]
    DataLength { expected: usize, actual: usize },
}

/// Result type alias for ipl-core operations
pub type Result<T> = std::result::Result<T, Error>;
