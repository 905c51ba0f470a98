//! Progress reporting for row-parallel morphology
//!
//! One [`ProgressCounter`] exists per invocation. Every row worker calls
//! [`ProgressCounter::row_done`] once per finished row; the counter maps the
//! running total onto a 0-100 scale and forwards it to a [`ProgressSink`].
//!
//! Reports from different workers can arrive out of order, so the sequence
//! seen by a sink is not necessarily monotonic. The last report of a
//! successful run is always 100.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::operation::MorphOp;

/// Receiver for percentage updates (0..=100).
///
/// Called concurrently from worker threads.
pub trait ProgressSink: Send + Sync {
    /// Report the current completion percentage.
    fn report(&self, percent: u8);
}

impl<F> ProgressSink for F
where
    F: Fn(u8) + Send + Sync,
{
    fn report(&self, percent: u8) {
        self(percent)
    }
}

/// Sink that discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _percent: u8) {}
}

/// Total row completions expected for one invocation.
///
/// Open and Close run two internal passes per iteration, so they count
/// double.
pub fn total_rows(op: MorphOp, height: u32, iterations: u32) -> usize {
    height as usize * iterations as usize * op.passes()
}

/// `round(100 * done / total)`, clamped to 100.
fn percent_of(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let done = done as u64;
    let total = total as u64;
    let pct = (200 * done + total) / (2 * total);
    pct.min(100) as u8
}

/// Shared row counter for one invocation.
pub struct ProgressCounter<'a> {
    done: AtomicUsize,
    total: usize,
    sink: &'a dyn ProgressSink,
}

impl<'a> ProgressCounter<'a> {
    /// Create a counter expecting `total` row completions.
    pub fn new(sink: &'a dyn ProgressSink, total: usize) -> Self {
        ProgressCounter {
            done: AtomicUsize::new(0),
            total,
            sink,
        }
    }

    /// Record one finished row and report the new percentage.
    pub fn row_done(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        self.sink.report(percent_of(done, self.total));
    }

    /// Report the final percentage once every pass has joined.
    ///
    /// Row reports can race, so the last `row_done` report seen by the sink
    /// may be lower than the true total.
    pub fn finish(&self) {
        self.sink.report(self.percent());
    }

    /// Rows completed so far.
    pub fn completed(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }

    /// Rows expected in total.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Current percentage.
    pub fn percent(&self) -> u8 {
        percent_of(self.completed(), self.total)
    }
}

impl std::fmt::Debug for ProgressCounter<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressCounter")
            .field("done", &self.completed())
            .field("total", &self.total)
            .finish()
    }
}
