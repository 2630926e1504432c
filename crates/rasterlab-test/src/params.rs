//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use rasterlab_core::{GrayImage, Raster};
use std::fmt::Debug;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results and record failures (default)
    #[default]
    Compare,
    /// Compare and also print every checked value
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// This structure tracks the state of a regression test, including
/// the test name, current index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "morph")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if self.display() {
            eprintln!(
                "  [{:02}] expected = {}, actual = {}",
                self.index, expected, actual
            );
        }

        if diff > delta || diff.is_nan() {
            let err = TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            };
            self.record(err.to_string());
            false
        } else {
            true
        }
    }

    /// Record a boolean condition as a value comparison against 1
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        if !condition {
            eprintln!("  check failed: {}", what);
        }
        self.compare_values(1.0, if condition { 1.0 } else { 0.0 }, 0.0)
    }

    /// Compare two rasters for exact equality
    pub fn compare_rasters<T: Copy + PartialEq + Debug>(
        &mut self,
        a: &Raster<T>,
        b: &Raster<T>,
    ) -> bool {
        self.index += 1;

        if !a.same_size(b) {
            let msg = format!(
                "Failure in {}_reg: raster comparison for index {} - dimension mismatch {:?} vs {:?}",
                self.test_name,
                self.index,
                a.size(),
                b.size()
            );
            self.record(msg);
            return false;
        }

        if let Some((x, y, v)) = a.pixels().find(|&(x, y, v)| b.get_unchecked(x, y) != v) {
            let msg = format!(
                "Failure in {}_reg: raster comparison for index {} - mismatch at ({}, {}): {:?} vs {:?}",
                self.test_name,
                self.index,
                x,
                y,
                v,
                b.get_unchecked(x, y)
            );
            self.record(msg);
            return false;
        }

        true
    }

    /// Compare two grayscale rasters within a per-pixel tolerance
    pub fn compare_gray(&mut self, a: &GrayImage, b: &GrayImage, delta: f32) -> bool {
        self.index += 1;

        if !a.same_size(b) {
            self.record(TestError::RasterMismatch { index: self.index }.to_string());
            return false;
        }

        let worst = a
            .iter()
            .zip(b.iter())
            .map(|(&p, &q)| (p - q).abs())
            .fold(0.0f32, f32::max);
        if worst > delta || worst.is_nan() {
            let msg = format!(
                "Failure in {}_reg: gray comparison for index {} - max difference {} > {}",
                self.test_name, self.index, worst, delta
            );
            self.record(msg);
            false
        } else {
            true
        }
    }

    /// Return an error describing the first failure, if any
    pub fn first_failure(&self) -> TestResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(TestError::RasterMismatch { index: self.index })
        }
    }

    fn record(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_values_within_delta() {
        let mut rp = RegParams::new("test");
        assert!(rp.compare_values(100.0, 100.5, 1.0));
        assert!(rp.is_success());
    }

    #[test]
    fn test_compare_values_failure() {
        let mut rp = RegParams::new("test");
        assert!(!rp.compare_values(100.0, 200.0, 0.0));
        assert!(!rp.is_success());
        assert_eq!(rp.failures().len(), 1);
        assert!(rp.first_failure().is_err());
    }

    #[test]
    fn test_compare_rasters() {
        let mut rp = RegParams::new("test");
        let a = Raster::from_fn(3, 3, |x, y| x == y).unwrap();
        let mut b = a.clone();
        assert!(rp.compare_rasters(&a, &b));
        b.set(0, 2, true).unwrap();
        assert!(!rp.compare_rasters(&a, &b));
        assert_eq!(rp.index(), 2);
    }

    #[test]
    fn test_compare_gray() {
        let mut rp = RegParams::new("test");
        let a = Raster::new_with_value(2, 2, 0.5f32).unwrap();
        let b = Raster::new_with_value(2, 2, 0.5001f32).unwrap();
        assert!(rp.compare_gray(&a, &b, 1e-3));
        assert!(!rp.compare_gray(&a, &b, 1e-6));
    }
}
