//! Binary morphological operations
//!
//! Implements erosion, dilation, opening, and closing for binary planes.
//!
//! Both low-level operators reduce to one short-circuit predicate. For every
//! pixel, walk the active cells of the structuring element; as soon as an
//! in-plane neighbor equals the rule's *target* value the pixel becomes the
//! target. If no active neighbor matches, the pixel becomes the *fallback*.
//!
//! - Dilation: target = 1, fallback = 0 (any foreground neighbor wins)
//! - Erosion: target = 0, fallback = 1 (any background neighbor wins)

use std::fmt;
use std::str::FromStr;

use ipl_core::{BACKGROUND, FOREGROUND, Plane, PlaneMut};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::maybe_rayon::*;
use crate::operation::MorphOp;
use crate::{MorphError, MorphResult, Sel};

/// Target/fallback pair driving the neighborhood predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    target: u8,
    fallback: u8,
}

impl Rule {
    /// Dilation: any active foreground neighbor sets the pixel.
    pub const DILATE: Rule = Rule {
        target: FOREGROUND,
        fallback: BACKGROUND,
    };

    /// Erosion: any active background neighbor clears the pixel.
    pub const ERODE: Rule = Rule {
        target: BACKGROUND,
        fallback: FOREGROUND,
    };

    /// Create a rule from explicit sample values.
    ///
    /// # Errors
    ///
    /// Returns [`MorphError::InvalidParameters`] if either value is not 0 or
    /// 1, or if both are equal.
    pub fn new(target: u8, fallback: u8) -> MorphResult<Self> {
        if target > FOREGROUND || fallback > FOREGROUND {
            return Err(MorphError::InvalidParameters(format!(
                "rule values must be 0 or 1, got target={target} fallback={fallback}"
            )));
        }
        if target == fallback {
            return Err(MorphError::InvalidParameters(format!(
                "rule target and fallback must differ, both are {target}"
            )));
        }
        Ok(Rule { target, fallback })
    }

    /// Value that short-circuits the predicate.
    #[inline]
    pub fn target(self) -> u8 {
        self.target
    }

    /// Value written when no active neighbor matches.
    #[inline]
    pub fn fallback(self) -> u8 {
        self.fallback
    }
}

/// How structuring-element cells map onto neighbors near the plane border.
///
/// Out-of-plane neighbor positions are never treated as foreground or
/// background padding; they are skipped. The policies differ in what happens
/// to the remaining cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderPolicy {
    /// Cell `(dx, dy)` is always tested against neighbor `(x + dx, y + dy)`.
    #[default]
    Aligned,
    /// Skipped positions do not consume a cell: in-plane neighbors are
    /// paired with cells 0, 1, 2, ... in row-major order. Border pixels
    /// therefore see a shifted mask. Matches the legacy stage output.
    Packed,
}

impl fmt::Display for BorderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BorderPolicy::Aligned => "aligned",
            BorderPolicy::Packed => "packed",
        })
    }
}

impl FromStr for BorderPolicy {
    type Err = MorphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "aligned" => Ok(BorderPolicy::Aligned),
            "packed" => Ok(BorderPolicy::Packed),
            _ => Err(MorphError::InvalidParameters(format!(
                "unknown border policy '{s}'"
            ))),
        }
    }
}

/// Iteration count and border handling for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphParams {
    /// Number of full-plane passes (at least 1)
    pub iterations: u32,
    /// Border handling
    pub border: BorderPolicy,
}

impl MorphParams {
    /// Parameters with the given iteration count and aligned borders.
    pub fn new(iterations: u32) -> Self {
        MorphParams {
            iterations,
            border: BorderPolicy::Aligned,
        }
    }

    /// Replace the border policy.
    pub fn with_border(mut self, border: BorderPolicy) -> Self {
        self.border = border;
        self
    }
}

impl Default for MorphParams {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Precomputed neighborhood walk for one structuring element.
enum Probe<'a> {
    Aligned(Vec<(i32, i32)>),
    Packed { radius: i32, cells: &'a [bool] },
}

impl<'a> Probe<'a> {
    fn new(sel: &'a Sel, border: BorderPolicy) -> Self {
        match border {
            BorderPolicy::Aligned => Probe::Aligned(sel.active_offsets().collect()),
            BorderPolicy::Packed => Probe::Packed {
                radius: sel.radius() as i32,
                cells: sel.cells(),
            },
        }
    }

    /// Does any active in-plane neighbor of (x, y) equal `target`?
    #[inline]
    fn hits(&self, src: &[u8], w: i32, h: i32, x: i32, y: i32, target: u8) -> bool {
        let at = |nx: i32, ny: i32| src[ny as usize * w as usize + nx as usize];
        match self {
            Probe::Aligned(offsets) => offsets.iter().any(|&(dx, dy)| {
                let nx = x + dx;
                let ny = y + dy;
                nx >= 0 && nx < w && ny >= 0 && ny < h && at(nx, ny) == target
            }),
            Probe::Packed { radius, cells } => {
                let r = *radius;
                let mut i = 0;
                for ky in -r..=r {
                    for kx in -r..=r {
                        let nx = x + kx;
                        let ny = y + ky;
                        if nx < 0 || nx >= w || ny < 0 || ny >= h {
                            continue;
                        }
                        let active = cells[i];
                        i += 1;
                        if active && at(nx, ny) == target {
                            return true;
                        }
                    }
                }
                false
            }
        }
    }
}

/// One full-plane pass: read `read`, write every pixel of `write`.
///
/// Rows of `write` are processed in parallel; `read` is frozen for the
/// whole pass.
fn run_pass<F>(rule: Rule, read: &PlaneMut, write: &mut PlaneMut, probe: &Probe<'_>, on_row_done: &F)
where
    F: Fn() + Sync,
{
    let w = read.width() as i32;
    let h = read.height() as i32;
    let src = read.data();

    write
        .data_mut()
        .par_chunks_mut(w as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let y = y as i32;
            for (x, out) in row.iter_mut().enumerate() {
                *out = if probe.hits(src, w, h, x as i32, y, rule.target) {
                    rule.target
                } else {
                    rule.fallback
                };
            }
            on_row_done();
        });
}

fn check_sizes(expected: (u32, u32), actual: (u32, u32)) -> MorphResult<()> {
    if expected != actual {
        return Err(MorphError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

/// Run the neighborhood predicate for `params.iterations` passes.
///
/// Buffers ping-pong: pass `k` reads buffer `k % 2` and writes buffer
/// `(k + 1) % 2`, where buffer 0 is `source` and buffer 1 is `dest`. After
/// `n` passes the result sits in buffer `n % 2`; for even `n` the two planes
/// are swapped so `dest` always ends up holding the result.
///
/// `source` is used as scratch and holds an intermediate pass on return.
/// `on_row_done` is called once per written row, after the row is complete.
///
/// # Errors
///
/// - [`MorphError::DimensionMismatch`] if the planes differ in size
/// - [`MorphError::InvalidParameters`] if `params.iterations` is 0
///
/// Both are reported before anything is written.
pub fn apply<F>(
    rule: Rule,
    source: &mut PlaneMut,
    dest: &mut PlaneMut,
    sel: &Sel,
    params: &MorphParams,
    on_row_done: &F,
) -> MorphResult<()>
where
    F: Fn() + Sync,
{
    check_sizes(source.dimensions(), dest.dimensions())?;
    if params.iterations == 0 {
        return Err(MorphError::InvalidParameters(
            "iterations must be at least 1".to_string(),
        ));
    }

    let probe = Probe::new(sel, params.border);
    for pass in 0..params.iterations {
        trace!(pass, reads_source = pass % 2 == 0, ?rule, "morphology pass");
        if pass % 2 == 0 {
            run_pass(rule, source, dest, &probe, on_row_done);
        } else {
            run_pass(rule, dest, source, &probe, on_row_done);
        }
    }
    if params.iterations % 2 == 0 {
        std::mem::swap(source, dest);
    }
    Ok(())
}

/// Dilate `src` into `dst`
///
/// `src` is copied into a scratch plane first and is never modified.
pub fn dilate_into<F>(
    src: &Plane,
    dst: &mut PlaneMut,
    sel: &Sel,
    params: &MorphParams,
    on_row_done: &F,
) -> MorphResult<()>
where
    F: Fn() + Sync,
{
    check_sizes(src.dimensions(), dst.dimensions())?;
    let mut scratch = src.to_mut();
    apply(Rule::DILATE, &mut scratch, dst, sel, params, on_row_done)
}

/// Erode `src` into `dst`
///
/// `src` is copied into a scratch plane first and is never modified.
pub fn erode_into<F>(
    src: &Plane,
    dst: &mut PlaneMut,
    sel: &Sel,
    params: &MorphParams,
    on_row_done: &F,
) -> MorphResult<()>
where
    F: Fn() + Sync,
{
    check_sizes(src.dimensions(), dst.dimensions())?;
    let mut scratch = src.to_mut();
    apply(Rule::ERODE, &mut scratch, dst, sel, params, on_row_done)
}

/// Open `src` into `dst`
///
/// Opening = Erosion followed by Dilation, each for `params.iterations`
/// passes. Removes foreground features smaller than the structuring element.
pub fn open_into<F>(
    src: &Plane,
    dst: &mut PlaneMut,
    sel: &Sel,
    params: &MorphParams,
    on_row_done: &F,
) -> MorphResult<()>
where
    F: Fn() + Sync,
{
    check_sizes(src.dimensions(), dst.dimensions())?;
    let mut eroded = PlaneMut::new(src.width(), src.height())?;
    erode_into(src, &mut eroded, sel, params, on_row_done)?;
    apply(Rule::DILATE, &mut eroded, dst, sel, params, on_row_done)
}

/// Close `src` into `dst`
///
/// Closing = Dilation followed by Erosion, each for `params.iterations`
/// passes. Fills background gaps smaller than the structuring element.
pub fn close_into<F>(
    src: &Plane,
    dst: &mut PlaneMut,
    sel: &Sel,
    params: &MorphParams,
    on_row_done: &F,
) -> MorphResult<()>
where
    F: Fn() + Sync,
{
    check_sizes(src.dimensions(), dst.dimensions())?;
    let mut dilated = PlaneMut::new(src.width(), src.height())?;
    dilate_into(src, &mut dilated, sel, params, on_row_done)?;
    apply(Rule::ERODE, &mut dilated, dst, sel, params, on_row_done)
}

/// Run `op` from `src` into `dst`.
pub fn morph_into<F>(
    op: MorphOp,
    src: &Plane,
    dst: &mut PlaneMut,
    sel: &Sel,
    params: &MorphParams,
    on_row_done: &F,
) -> MorphResult<()>
where
    F: Fn() + Sync,
{
    match op {
        MorphOp::Dilate => dilate_into(src, dst, sel, params, on_row_done),
        MorphOp::Erode => erode_into(src, dst, sel, params, on_row_done),
        MorphOp::Open => open_into(src, dst, sel, params, on_row_done),
        MorphOp::Close => close_into(src, dst, sel, params, on_row_done),
    }
}

/// Run `op` and return a newly allocated result plane.
pub fn morph(op: MorphOp, src: &Plane, sel: &Sel, params: &MorphParams) -> MorphResult<Plane> {
    let mut dst = PlaneMut::new(src.width(), src.height())?;
    morph_into(op, src, &mut dst, sel, params, &|| {})?;
    Ok(dst.into())
}

/// Dilate a binary plane
///
/// Dilation expands foreground regions.
pub fn dilate(src: &Plane, sel: &Sel, iterations: u32) -> MorphResult<Plane> {
    morph(MorphOp::Dilate, src, sel, &MorphParams::new(iterations))
}

/// Erode a binary plane
///
/// Erosion shrinks foreground regions.
pub fn erode(src: &Plane, sel: &Sel, iterations: u32) -> MorphResult<Plane> {
    morph(MorphOp::Erode, src, sel, &MorphParams::new(iterations))
}

/// Open a binary plane
///
/// Removes small foreground objects and smooths contours.
pub fn open(src: &Plane, sel: &Sel, iterations: u32) -> MorphResult<Plane> {
    morph(MorphOp::Open, src, sel, &MorphParams::new(iterations))
}

/// Close a binary plane
///
/// Fills small holes and connects nearby objects.
pub fn close(src: &Plane, sel: &Sel, iterations: u32) -> MorphResult<Plane> {
    morph(MorphOp::Close, src, sel, &MorphParams::new(iterations))
}
