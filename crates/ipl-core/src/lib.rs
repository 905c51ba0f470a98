//! ipl-core - Binary image planes
//!
//! This crate provides the data structure the morphology engine works on:
//!
//! - [`Plane`] / [`PlaneMut`] - A two-valued pixel grid (immutable / mutable)
//! - [`BACKGROUND`] / [`FOREGROUND`] - The two sample values
//!
//! Planes are owned by the host pipeline. Morphology borrows read access to
//! a source plane and write access to a destination plane of the same size.

pub mod error;
pub mod plane;

pub use error::{Error, Result};
pub use plane::{BACKGROUND, FOREGROUND, Plane, PlaneMut};
