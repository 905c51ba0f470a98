//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// A pattern row has a different length than the first row
    #[error("pattern row {row} has width {actual}, expected {expected}")]
    RaggedPattern {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A pattern contains a character other than '#' or '.'
    #[error("unexpected pattern character {ch:?} at row {row}")]
    BadPatternChar { row: usize, ch: char },

    /// Plane construction failed
    #[error("plane error: {0}")]
    Plane(#[from] ipl_core::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
