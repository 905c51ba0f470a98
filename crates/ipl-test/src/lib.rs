//! ipl-test - Regression test framework for ipl
//!
//! This crate provides a small regression harness in the
//! accumulate-and-report style: a named test collects numbered comparisons and
//! reports every failure at the end instead of stopping at the first one.
//!
//! # Usage
//!
//! ```ignore
//! use ipl_test::{RegParams, plane_from_pattern};
//!
//! let mut rp = RegParams::new("binmorph");
//! rp.compare_values(4.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Planes in tests are written as text patterns: `#` is foreground, `.` is
//! background, one line per row. Leading and trailing whitespace on each line
//! is ignored, as are blank lines.

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

use ipl_core::{BACKGROUND, FOREGROUND, Plane};

/// Build a plane from a text pattern.
pub fn plane_from_pattern(pattern: &str) -> TestResult<Plane> {
    let rows: Vec<&str> = pattern
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let width = rows.first().map_or(0, |r| r.chars().count());

    let mut samples = Vec::with_capacity(width * rows.len());
    for (row, line) in rows.iter().enumerate() {
        let actual = line.chars().count();
        if actual != width {
            return Err(TestError::RaggedPattern {
                row,
                expected: width,
                actual,
            });
        }
        for ch in line.chars() {
            samples.push(match ch {
                '#' => FOREGROUND,
                '.' => BACKGROUND,
                _ => return Err(TestError::BadPatternChar { row, ch }),
            });
        }
    }

    Ok(Plane::from_samples(width as u32, rows.len() as u32, samples)?)
}

/// Render a plane as a text pattern (inverse of [`plane_from_pattern`]).
pub fn plane_to_pattern(plane: &Plane) -> String {
    let mut out = String::with_capacity((plane.width() as usize + 1) * plane.height() as usize);
    for y in 0..plane.height() {
        for &s in plane.row(y) {
            out.push(if s == FOREGROUND { '#' } else { '.' });
        }
        out.push('\n');
    }
    out
}

/// A checkerboard plane with `cell`-sized squares, foreground at the origin.
pub fn checker_plane(width: u32, height: u32, cell: u32) -> Plane {
    let cell = cell.max(1);
    Plane::from_fn(width, height, |x, y| (x / cell + y / cell) % 2 == 0)
        .unwrap_or_else(|e| panic!("checker_plane({width}, {height}): {e}"))
}

/// A deterministic scattering of foreground blobs and holes.
///
/// Mixes rectangles, isolated dots and single-pixel gaps so every
/// morphology operation has something to change.
pub fn speckle_plane(width: u32, height: u32) -> Plane {
    Plane::from_fn(width, height, |x, y| {
        let in_block = (x % 16) >= 3 && (x % 16) < 11 && (y % 12) >= 2 && (y % 12) < 9;
        let hole = (x % 16) == 6 && (y % 12) == 5;
        let dot = (x.wrapping_mul(7) + y.wrapping_mul(13)) % 29 == 0;
        (in_block && !hole) || dot
    })
    .unwrap_or_else(|e| panic!("speckle_plane({width}, {height}): {e}"))
}
