//! ipl-morph - Binary morphology for the image processing pipeline
//!
//! This crate provides:
//!
//! - Structuring elements (SEL): odd-sided square masks centred on the origin
//! - A row-parallel operator core shared by erosion and dilation
//! - Opening and closing built from the core
//! - Progress reporting across worker threads
//! - The pipeline stage adapter and its host configuration
//!
//! # Example
//!
//! ```
//! use ipl_core::Plane;
//! use ipl_morph::{Sel, dilate};
//!
//! let plane = Plane::from_fn(5, 5, |x, y| x == 2 && y == 2).unwrap();
//! let sel = Sel::create_square(3).unwrap();
//! let grown = dilate(&plane, &sel, 1).unwrap();
//! assert_eq!(grown.count_foreground(), 9);
//! ```

pub mod binary;
pub mod config;
mod error;
mod maybe_rayon;
pub mod operation;
pub mod progress;
pub mod sel;
pub mod stage;

pub use error::{MorphError, MorphResult};
pub use sel::Sel;

pub use binary::{
    BorderPolicy, MorphParams, Rule, apply, close, close_into, dilate, dilate_into, erode,
    erode_into, morph, morph_into, open, open_into,
};
pub use config::{ITERATIONS_HINT, MorphologyConfig, PropertyMap, PropertySource, PropertyValue};
pub use operation::MorphOp;
pub use progress::{NoProgress, ProgressCounter, ProgressSink, total_rows};
pub use stage::{MorphologyStage, run_morphology, run_morphology_with};
