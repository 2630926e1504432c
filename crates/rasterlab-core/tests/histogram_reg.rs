//! Histogram regression test
//!
//! Counts, derived statistics and quantization of normalized values.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rasterlab_core::{BinaryImage, GrayImage, Histogram, Raster};
use rasterlab_test::{RegParams, fixtures};

#[test]
fn histogram_reg() {
    let mut rp = RegParams::new("histogram");
    let mut rng = StdRng::seed_from_u64(7);

    // --- Test 1: counts sum to the pixel count ---
    eprintln!("=== Totals ===");
    for _ in 0..10 {
        let w = rng.random_range(1..=50);
        let h = rng.random_range(1..=50);
        let gray: GrayImage = Raster::from_fn(w, h, |_, _| rng.random::<f32>()).unwrap();
        let bytes: Raster<u8> = Raster::from_fn(w, h, |_, _| rng.random::<u8>()).unwrap();
        let binary: BinaryImage = Raster::from_fn(w, h, |_, _| rng.random_bool(0.3)).unwrap();
        let expected = (w * h) as f64;

        for hist in [
            Histogram::from_raster(&gray),
            Histogram::from_raster(&bytes),
            Histogram::from_raster(&binary),
        ] {
            rp.compare_values(expected, hist.total() as f64, 0.0);
            let summed: u64 = hist.iter().map(|(_, c)| c).sum();
            rp.compare_values(expected, summed as f64, 0.0);
            rp.check(hist.min_level() <= hist.median(), "median above minimum");
            rp.check(hist.median() <= hist.max_level(), "median below maximum");
            rp.check(hist.min_count() <= hist.max_count(), "count range");
        }

        let hist = Histogram::from_raster(&binary);
        rp.compare_values(binary.count_foreground() as f64, hist.count(1) as f64, 0.0);
    }

    // --- Test 2: statistics of a ramp ---
    eprintln!("=== Ramp ===");
    let ramp = fixtures::ramp(256, 2).unwrap();
    let hist = Histogram::from_raster(&ramp);
    rp.compare_values(256.0, hist.distinct_levels() as f64, 0.0);
    rp.compare_values(127.5, hist.mean(), 1e-9);
    rp.compare_values(127.0, hist.median() as f64, 0.0);
    rp.compare_values(2.0, hist.max_count() as f64, 0.0);
    rp.compare_values(0.5, hist.normalized(hist.mean()), 1e-9);
    let levels: Vec<u32> = hist.levels().collect();
    rp.check(levels.windows(2).all(|w| w[0] < w[1]), "levels ascend");

    // --- Test 3: quantization and explicit counts ---
    let half: GrayImage = Raster::new_with_value(3, 3, 0.5).unwrap();
    rp.compare_values(9.0, Histogram::from_raster(&half).count(128) as f64, 0.0);
    let clipped: GrayImage = Raster::from_vec(2, 1, vec![-0.5, 1.5]).unwrap();
    let hist = Histogram::from_raster(&clipped);
    rp.compare_values(1.0, hist.count(0) as f64, 0.0);
    rp.compare_values(1.0, hist.count(255) as f64, 0.0);

    let explicit = Histogram::from_counts(255, [(10, 3), (20, 1), (10, 2), (30, 0)]).unwrap();
    rp.compare_values(6.0, explicit.total() as f64, 0.0);
    rp.compare_values(5.0, explicit.count(10) as f64, 0.0);
    rp.compare_values(2.0, explicit.distinct_levels() as f64, 0.0);
    rp.check(Histogram::from_counts(255, [(256, 1)]).is_err(), "level out of range");
    rp.check(Histogram::from_counts(255, [(3, 0)]).is_err(), "empty histogram");

    assert!(rp.cleanup(), "histogram regression test failed");
}
