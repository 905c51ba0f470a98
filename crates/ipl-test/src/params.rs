//! Regression test parameters and operations

use crate::plane_to_pattern;
use ipl_core::Plane;

/// Regression test parameters
///
/// A named test accumulates numbered checks. Failures are printed as they
/// happen and summarized by [`RegParams::cleanup`], so one run reports every
/// broken check instead of stopping at the first.
pub struct RegParams {
    /// Name of the test (e.g., "binmorph1")
    pub test_name: String,
    /// Number of checks made so far
    index: usize,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Start a named regression test and print its banner.
    pub fn new(test_name: &str) -> Self {
        let banner = format!("---------------- {test_name}_reg ----------------");
        eprintln!();
        eprintln!("{}", "-".repeat(banner.len()));
        eprintln!("{banner}");
        eprintln!("{}", "-".repeat(banner.len()));

        Self {
            test_name: test_name.to_string(),
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Number of checks made so far
    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance the check counter and return the new index.
    fn next(&mut self) -> usize {
        self.index += 1;
        self.index
    }

    fn fail(&mut self, what: &str, detail: String) -> bool {
        let msg = format!("{}_reg check {} ({what}): {detail}", self.test_name, self.index);
        eprintln!("FAILED {msg}");
        self.failures.push(msg);
        false
    }

    /// Check that `actual` is within `delta` of `expected`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.next();
        let diff = (expected - actual).abs();
        if diff <= delta {
            return true;
        }
        self.fail(
            "value",
            format!("expected {expected}, got {actual} (diff {diff} > {delta})"),
        )
    }

    /// Record a boolean check (`true` passes).
    pub fn check(&mut self, ok: bool) -> bool {
        self.next();
        if ok {
            return true;
        }
        self.fail("condition", "condition was false".to_string())
    }

    /// Check that two planes are identical.
    ///
    /// On mismatch the first differing pixel is reported, and for small
    /// planes both images are dumped as patterns.
    pub fn compare_planes(&mut self, expected: &Plane, actual: &Plane) -> bool {
        self.next();

        if !expected.sizes_equal(actual) {
            let (ew, eh) = expected.dimensions();
            let (aw, ah) = actual.dimensions();
            return self.fail("plane", format!("size {ew}x{eh} vs {aw}x{ah}"));
        }

        let width = expected.width() as usize;
        let Some(pos) = expected
            .data()
            .iter()
            .zip(actual.data())
            .position(|(a, b)| a != b)
        else {
            return true;
        };

        let mut detail = format!("first difference at ({}, {})", pos % width, pos / width);
        if expected.width() <= 64 && expected.height() <= 64 {
            detail.push_str(&format!(
                "\nexpected:\n{}actual:\n{}",
                plane_to_pattern(expected),
                plane_to_pattern(actual)
            ));
        }
        self.fail("plane", detail)
    }

    /// Check that two byte strings are identical.
    pub fn compare_strings(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.next();
        if expected == actual {
            return true;
        }
        self.fail(
            "bytes",
            format!("lengths {} and {} or contents differ", expected.len(), actual.len()),
        )
    }

    /// Print the summary and return whether every check passed.
    pub fn cleanup(self) -> bool {
        let ok = self.failures.is_empty();
        if ok {
            eprintln!("PASSED {}_reg ({} checks)", self.test_name, self.index);
        } else {
            eprintln!(
                "FAILED {}_reg: {} of {} checks",
                self.test_name,
                self.failures.len(),
                self.index
            );
            for failure in &self.failures {
                eprintln!("  {failure}");
            }
        }
        eprintln!();
        ok
    }

    /// Whether every check so far has passed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failure messages recorded so far
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
