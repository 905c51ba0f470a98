//! ipl - Binary morphology for image processing pipelines
//!
//! # Overview
//!
//! The pipeline hands a binary plane to the morphology stage, which runs
//! one of four operations with a user-supplied structuring element:
//!
//! - Dilation and erosion
//! - Opening (erosion then dilation) and closing (dilation then erosion)
//!
//! Rows are processed in parallel and progress is reported as a percentage.
//!
//! # Example
//!
//! ```
//! use ipl::morph::{MorphOp, NoProgress, run_morphology};
//! use ipl::Plane;
//!
//! let plane = Plane::from_fn(5, 5, |x, y| x == 2 && y == 2).unwrap();
//! let opened = run_morphology(&plane, MorphOp::Open, &[true; 9], 1, &NoProgress).unwrap();
//! assert_eq!(opened.count_foreground(), 0);
//! ```

// Re-export core types
pub use ipl_core::*;

// Re-export the morphology crate as a module
pub use ipl_morph as morph;
