//! rasterlab-test - Regression test framework for rasterlab
//!
//! Provides the [`RegParams`] bookkeeping used by every `*_reg.rs`
//! integration test, and deterministic synthetic [`fixtures`].
//!
//! # Usage
//!
//! ```ignore
//! use rasterlab_test::{RegParams, fixtures};
//!
//! let mut rp = RegParams::new("histogram");
//! let img = fixtures::ramp(16, 4).unwrap();
//! rp.compare_values(64.0, img.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to print every checked value

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
