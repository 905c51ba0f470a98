//! Pipeline stage adapter
//!
//! A [`MorphologyStage`] owns its configuration and the most recent result.
//! The host feeds it one plane at a time and collects the output afterwards.

use ipl_core::{Plane, PlaneMut};
use tracing::debug;

use crate::binary::{MorphParams, morph_into};
use crate::config::{MorphologyConfig, PropertySource};
use crate::operation::MorphOp;
use crate::progress::{ProgressCounter, ProgressSink, total_rows};
use crate::{MorphError, MorphResult, Sel};

/// Run one morphological operation on `plane_in`.
///
/// `kernel` is a row-major boolean mask with an odd side. Progress is
/// reported to `progress` as rows complete and ends at 100.
///
/// # Errors
///
/// - [`MorphError::InvalidKernel`] if `kernel` is not an odd-sided square
/// - [`MorphError::InvalidParameters`] if `iterations` is 0
///
/// Both are reported before any output plane is allocated.
pub fn run_morphology(
    plane_in: &Plane,
    op: MorphOp,
    kernel: &[bool],
    iterations: u32,
    progress: &dyn ProgressSink,
) -> MorphResult<Plane> {
    run_morphology_with(plane_in, op, kernel, &MorphParams::new(iterations), progress)
}

/// [`run_morphology`] with an explicit border policy.
pub fn run_morphology_with(
    plane_in: &Plane,
    op: MorphOp,
    kernel: &[bool],
    params: &MorphParams,
    progress: &dyn ProgressSink,
) -> MorphResult<Plane> {
    let sel = Sel::from_mask(kernel)?;
    if params.iterations == 0 {
        return Err(MorphError::InvalidParameters(
            "iterations must be at least 1".to_string(),
        ));
    }

    let (width, height) = plane_in.dimensions();
    debug!(
        %op,
        side = sel.side(),
        active = sel.active_count(),
        iterations = params.iterations,
        border = %params.border,
        width,
        height,
        "running morphology"
    );

    let mut out = PlaneMut::new(width, height)?;
    let counter = ProgressCounter::new(progress, total_rows(op, height, params.iterations));
    morph_into(op, plane_in, &mut out, &sel, params, &|| counter.row_done())?;
    counter.finish();

    Ok(out.into())
}

/// Morphology stage with its configuration and last output.
#[derive(Debug, Clone, Default)]
pub struct MorphologyStage {
    config: MorphologyConfig,
    result: Option<Plane>,
}

impl MorphologyStage {
    /// Create a stage with the given configuration.
    pub fn new(config: MorphologyConfig) -> Self {
        MorphologyStage {
            config,
            result: None,
        }
    }

    /// Create a stage from a host property store.
    pub fn from_properties<P: PropertySource + ?Sized>(props: &P) -> MorphResult<Self> {
        Ok(Self::new(MorphologyConfig::from_properties(props)?))
    }

    /// Current configuration
    pub fn config(&self) -> &MorphologyConfig {
        &self.config
    }

    /// Replace the configuration. The last result is kept.
    pub fn set_config(&mut self, config: MorphologyConfig) {
        self.config = config;
    }

    /// Process one input plane.
    ///
    /// Any previous result is dropped first, so on error the stage holds no
    /// result.
    pub fn process_input(&mut self, input: &Plane, progress: &dyn ProgressSink) -> MorphResult<()> {
        self.result = None;
        let mask = self.config.mask();
        let plane = run_morphology_with(
            input,
            self.config.operation,
            &mask,
            &self.config.params(),
            progress,
        )?;
        self.result = Some(plane);
        Ok(())
    }

    /// Result of the last successful call to [`MorphologyStage::process_input`].
    pub fn result(&self) -> Option<&Plane> {
        self.result.as_ref()
    }

    /// Take the last result out of the stage.
    pub fn take_result(&mut self) -> Option<Plane> {
        self.result.take()
    }
}
