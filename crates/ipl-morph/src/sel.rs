//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Here it is always an odd-sided square of active/inactive
//! cells whose origin is the centre cell `(side / 2, side / 2)`.

use std::fmt;

use crate::{MorphError, MorphResult};

/// Structuring Element (SEL)
///
/// Immutable after construction. Cells are stored row-major; cell
/// `(col, row)` corresponds to the relative offset
/// `(col - radius, row - radius)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    side: u32,
    cells: Vec<bool>,
}

/// Side length of a square kernel with `len` cells.
fn side_for_len(len: usize) -> MorphResult<u32> {
    if len == 0 {
        return Err(MorphError::InvalidKernel("kernel is empty".to_string()));
    }
    let side = len.isqrt();
    if side * side != len {
        return Err(MorphError::InvalidKernel(format!(
            "{len} cells do not form a square"
        )));
    }
    check_side(side)
}

fn check_side(side: usize) -> MorphResult<u32> {
    if side == 0 || side % 2 == 0 {
        return Err(MorphError::InvalidKernel(format!(
            "side {side} must be odd and at least 1"
        )));
    }
    u32::try_from(side)
        .map_err(|_| MorphError::InvalidKernel(format!("side {side} is too large")))
}

impl Sel {
    /// Create a structuring element from a flat row-major mask.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidKernel`] unless `mask.len()` is
    /// `side * side` for an odd `side >= 1`.
    pub fn from_mask(mask: &[bool]) -> MorphResult<Self> {
        let side = side_for_len(mask.len())?;
        Ok(Sel {
            side,
            cells: mask.to_vec(),
        })
    }

    /// Create a structuring element from integer weights.
    ///
    /// Weights greater than zero are active. This is the form the host
    /// property store keeps kernels in.
    pub fn from_weights(weights: &[i32]) -> MorphResult<Self> {
        let mask: Vec<bool> = weights.iter().map(|&w| w > 0).collect();
        Self::from_mask(&mask)
    }

    /// Create a square structuring element with every cell active
    pub fn create_square(side: u32) -> MorphResult<Self> {
        let side = check_side(side as usize)?;
        Ok(Sel {
            side,
            cells: vec![true; (side * side) as usize],
        })
    }

    /// Create a cross (+) structuring element
    ///
    /// The centre row and centre column are active.
    pub fn create_cross(side: u32) -> MorphResult<Self> {
        let side = check_side(side as usize)?;
        let c = side / 2;
        let cells = (0..side * side)
            .map(|i| i % side == c || i / side == c)
            .collect();
        Ok(Sel { side, cells })
    }

    /// Create a structuring element with only the centre cell active
    ///
    /// Dilation and erosion with this element are the identity.
    pub fn create_point(side: u32) -> MorphResult<Self> {
        let side = check_side(side as usize)?;
        let centre = (side * side / 2) as usize;
        let mut cells = vec![false; (side * side) as usize];
        cells[centre] = true;
        Ok(Sel { side, cells })
    }

    /// Create a structuring element from a string pattern
    ///
    /// # Arguments
    /// * `pattern` - One line per row; 'x' for active, '.' or 'o' for
    ///   inactive. Surrounding whitespace and blank lines are ignored.
    pub fn from_string(pattern: &str) -> MorphResult<Self> {
        let rows: Vec<&str> = pattern
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();

        let mut cells = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != rows.len() {
                return Err(MorphError::InvalidKernel(format!(
                    "row {y} has {} cells, expected {}",
                    row.chars().count(),
                    rows.len()
                )));
            }
            for ch in row.chars() {
                cells.push(match ch {
                    'x' | 'X' => true,
                    '.' | 'o' => false,
                    _ => {
                        return Err(MorphError::InvalidKernel(format!(
                            "unexpected character {ch:?} in row {y}"
                        )));
                    }
                });
            }
        }

        Self::from_mask(&cells)
    }

    /// Get the side length
    #[inline]
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Get the radius (`side / 2`)
    #[inline]
    pub fn radius(&self) -> u32 {
        self.side / 2
    }

    /// Raw row-major cells
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Check whether the cell at relative offset `(dx, dy)` is active.
    ///
    /// Offsets outside `[-radius, radius]` are inactive.
    pub fn is_active(&self, dx: i32, dy: i32) -> bool {
        let r = self.radius() as i32;
        if dx < -r || dx > r || dy < -r || dy > r {
            return false;
        }
        let idx = (dy + r) as usize * self.side as usize + (dx + r) as usize;
        self.cells[idx]
    }

    /// Count the number of active cells
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Iterate over active cells as `(dx, dy)` offsets, in row-major order
    pub fn active_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let r = self.radius() as i32;
        let side = self.side;

        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(idx, &active)| {
                if active {
                    let x = (idx as u32 % side) as i32;
                    let y = (idx as u32 / side) as i32;
                    Some((x - r, y - r))
                } else {
                    None
                }
            })
    }

    /// Convert back to host integer weights (1 active, 0 inactive)
    pub fn to_weights(&self) -> Vec<i32> {
        self.cells.iter().map(|&c| i32::from(c)).collect()
    }
}

impl Default for Sel {
    /// 3x3 with only the centre active.
    fn default() -> Self {
        Sel {
            side: 3,
            cells: vec![false, false, false, false, true, false, false, false, false],
        }
    }
}

impl fmt::Display for Sel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.side as usize) {
            for &c in row {
                f.write_str(if c { "x" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
