//! Plane - The binary image container
//!
//! A `Plane` is a `width x height` grid of two-valued samples. Every sample
//! is either [`BACKGROUND`] (0) or [`FOREGROUND`] (1).
//!
//! # Pixel layout
//!
//! - One `u8` per pixel
//! - Rows are stored contiguously, top to bottom, with no padding
//! - The sample at `(x, y)` lives at index `y * width + x`
//!
//! # Ownership model
//!
//! `Plane` uses `Arc` for cheap cloning (shared ownership).
//! To modify samples, convert to `PlaneMut` via [`Plane::try_into_mut`]
//! or [`Plane::to_mut`], then convert back with `Into<Plane>`.

mod access;
mod compare;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Background sample value
pub const BACKGROUND: u8 = 0;

/// Foreground sample value
pub const FOREGROUND: u8 = 1;

/// Internal plane data
#[derive(Debug, Clone)]
struct PlaneData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Row-major samples, each 0 or 1
    data: Vec<u8>,
}

impl PlaneData {
    fn zeroed(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(PlaneData {
            width,
            height,
            data: vec![BACKGROUND; width as usize * height as usize],
        })
    }
}

/// Binary plane
///
/// `Plane` is the image type handed to and returned from morphology. It
/// uses reference counting via `Arc` for cheap cloning.
///
/// # Examples
///
/// ```
/// use ipl_core::Plane;
///
/// let plane = Plane::new(64, 48).unwrap();
/// assert_eq!(plane.width(), 64);
/// assert_eq!(plane.height(), 48);
/// assert_eq!(plane.count_foreground(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Plane {
    inner: Arc<PlaneData>,
}

impl Plane {
    /// Create a new plane with every sample set to background.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Plane {
            inner: Arc::new(PlaneData::zeroed(width, height)?),
        })
    }

    /// Create a plane from row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension,
    /// [`Error::DataLength`] if `samples.len() != width * height`, and
    /// [`Error::InvalidSample`] for any sample other than 0 or 1.
    pub fn from_samples(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if samples.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: samples.len(),
            });
        }
        if let Some(&bad) = samples.iter().find(|&&s| s > FOREGROUND) {
            return Err(Error::InvalidSample(bad));
        }
        Ok(Plane {
            inner: Arc::new(PlaneData {
                width,
                height,
                data: samples,
            }),
        })
    }

    /// Create a plane by evaluating `f(x, y)` for every pixel.
    ///
    /// `true` becomes foreground.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut inner = PlaneData::zeroed(width, height)?;
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    inner.data[y as usize * width as usize + x as usize] = FOREGROUND;
                }
            }
        }
        Ok(Plane {
            inner: Arc::new(inner),
        })
    }

    /// Normalise a host float plane into a binary plane.
    ///
    /// Samples strictly greater than `threshold` become foreground.
    ///
    /// # Errors
    ///
    /// Same as [`Plane::from_samples`] for dimension and length problems.
    pub fn from_threshold(width: u32, height: u32, values: &[f32], threshold: f32) -> Result<Self> {
        let samples = values
            .iter()
            .map(|&v| if v > threshold { FOREGROUND } else { BACKGROUND })
            .collect();
        Self::from_samples(width, height, samples)
    }

    /// Get the plane width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the plane height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the raw row-major samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Number of handles sharing this plane's data.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Create a background plane with the same dimensions.
    pub fn create_template(&self) -> Self {
        Plane {
            inner: Arc::new(PlaneData {
                width: self.inner.width,
                height: self.inner.height,
                data: vec![BACKGROUND; self.inner.data.len()],
            }),
        }
    }

    /// Check whether two planes have the same dimensions.
    pub fn sizes_equal(&self, other: &Plane) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Create a deep copy of this plane.
    ///
    /// Unlike `clone()` which shares data via Arc, this creates
    /// a completely independent copy.
    pub fn deep_clone(&self) -> Self {
        Plane {
            inner: Arc::new((*self.inner).clone()),
        }
    }

    /// Try to get mutable access to the samples.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PlaneMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PlaneMut { inner: data }),
            Err(arc) => Err(Plane { inner: arc }),
        }
    }

    /// Create a mutable copy of this plane.
    ///
    /// Always copies; the original is never touched.
    pub fn to_mut(&self) -> PlaneMut {
        PlaneMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable plane
///
/// Exclusive, writable form of [`Plane`]. Convert back with `Into<Plane>`.
#[derive(Debug, Clone)]
pub struct PlaneMut {
    inner: PlaneData,
}

impl PlaneMut {
    /// Create a new mutable plane with every sample set to background.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(PlaneMut {
            inner: PlaneData::zeroed(width, height)?,
        })
    }

    /// Get the plane width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the plane height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the raw row-major samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get mutable access to the raw row-major samples.
    ///
    /// Callers must only store 0 or 1.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Get mutable access to the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &mut self.inner.data[start..start + w]
    }

    /// Set every sample to `val`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSample`] if `val` is not 0 or 1.
    pub fn fill(&mut self, val: u8) -> Result<()> {
        if val > FOREGROUND {
            return Err(Error::InvalidSample(val));
        }
        self.inner.data.fill(val);
        Ok(())
    }

    /// Overwrite this plane with the samples of `src`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ.
    pub fn copy_from(&mut self, src: &Plane) -> Result<()> {
        if self.dimensions() != src.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: src.dimensions(),
            });
        }
        self.inner.data.copy_from_slice(src.data());
        Ok(())
    }
}

impl From<PlaneMut> for Plane {
    fn from(plane: PlaneMut) -> Self {
        Plane {
            inner: Arc::new(plane.inner),
        }
    }
}
