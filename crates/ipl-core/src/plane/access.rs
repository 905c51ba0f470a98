//! Pixel access functions
//!
//! Bounds-checked and unchecked getters and setters for individual samples.

use super::{FOREGROUND, Plane, PlaneMut};
use crate::error::{Error, Result};

#[inline]
fn index(width: u32, x: u32, y: u32) -> usize {
    y as usize * width as usize + x as usize
}

impl Plane {
    /// Get the sample at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.data()[index(self.width(), x, y)])
    }

    /// Get the sample at (x, y) without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the sample buffer.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[index(self.width(), x, y)]
    }

    /// Check whether (x, y) is foreground. Out of bounds is `false`.
    #[inline]
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        self.get(x, y) == Some(FOREGROUND)
    }
}

impl PlaneMut {
    /// Get the sample at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        Some(self.data()[index(self.width(), x, y)])
    }

    /// Get the sample at (x, y) without bounds checking.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32) -> u8 {
        self.data()[index(self.width(), x, y)]
    }

    /// Set the sample at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds
    /// and [`Error::InvalidSample`] if `val` is not 0 or 1.
    pub fn set(&mut self, x: u32, y: u32, val: u8) -> Result<()> {
        let (width, height) = self.dimensions();
        if x >= width || y >= height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        if val > FOREGROUND {
            return Err(Error::InvalidSample(val));
        }
        self.data_mut()[index(width, x, y)] = val;
        Ok(())
    }

    /// Set the sample at (x, y) without bounds or value checking.
    ///
    /// # Panics
    ///
    /// Panics if the index falls outside the sample buffer.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, val: u8) {
        let width = self.width();
        self.data_mut()[index(width, x, y)] = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BACKGROUND;

    #[test]
    fn test_get_out_of_bounds() {
        let plane = Plane::new(4, 2).unwrap();
        assert_eq!(plane.get(3, 1), Some(BACKGROUND));
        assert_eq!(plane.get(4, 0), None);
        assert_eq!(plane.get(0, 2), None);
        assert!(!plane.is_foreground(10, 10));
    }

    #[test]
    fn test_set_and_get() {
        let mut pm = PlaneMut::new(4, 2).unwrap();
        pm.set(2, 1, FOREGROUND).unwrap();
        assert_eq!(pm.get(2, 1), Some(FOREGROUND));
        assert_eq!(pm.get_unchecked(2, 1), FOREGROUND);
        assert_eq!(pm.data()[6], FOREGROUND);

        let plane: Plane = pm.into();
        assert!(plane.is_foreground(2, 1));
        assert_eq!(plane.get_unchecked(1, 1), BACKGROUND);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut pm = PlaneMut::new(4, 2).unwrap();
        assert_eq!(
            pm.set(4, 0, FOREGROUND).unwrap_err(),
            Error::IndexOutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 2
            }
        );
        assert_eq!(pm.set(0, 0, 3).unwrap_err(), Error::InvalidSample(3));
    }

    #[test]
    fn test_set_unchecked() {
        let mut pm = PlaneMut::new(3, 3).unwrap();
        pm.set_unchecked(0, 2, FOREGROUND);
        assert_eq!(pm.row(2), &[1, 0, 0]);
    }
}
