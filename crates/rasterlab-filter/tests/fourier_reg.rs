//! Fourier transform regression test
//!
//! Forward/inverse round trips for power-of-two and odd sizes, and
//! frequency-domain filtering.

use rasterlab_core::Raster;
use rasterlab_filter::{FourierTransform, FrequencyDomainFilter, Precision, Weighting};
use rasterlab_test::{RegParams, fixtures};
use std::sync::Arc;

#[test]
fn fourier_reg() {
    let mut rp = RegParams::new("fourier");

    // --- Test 1: Round trips ---
    eprintln!("=== Round trip ===");
    for (w, h) in [(1, 1), (8, 8), (17, 31)] {
        let img = fixtures::bimodal(w, h, 0.25, 0.75, 0.2).expect("bimodal");
        for (precision, tol) in [(Precision::Double, 1e-6), (Precision::Single, 1e-4)] {
            let ft = FourierTransform::forward(&img, precision).expect("forward");
            rp.compare_values(w as f64, ft.width() as f64, 0.0);
            rp.compare_values(h as f64, ft.height() as f64, 0.0);
            let back = ft.inverse().expect("inverse");
            rp.compare_gray(&img, &back, tol);
            eprintln!("  {}x{} {:?} ok", w, h, precision);
        }
    }

    // --- Test 2: Identity weighting leaves the image unchanged ---
    let img = fixtures::ramp(16, 12).expect("ramp");
    let identity = FrequencyDomainFilter::default();
    let out = identity.filter(&img, Precision::Double).expect("identity");
    rp.compare_gray(&img, &out, 1e-6);

    // --- Test 3: Removing DC gives a zero-mean image ---
    eprintln!("=== Custom weighting ===");
    let no_dc = FrequencyDomainFilter::new(Weighting::Custom(Arc::new(|fu: f64, fv: f64| {
        if fu == 0.0 && fv == 0.0 { 0.0 } else { 1.0 }
    })));
    let out = no_dc.filter(&img, Precision::Double).expect("no dc");
    rp.compare_values(0.0, out.mean(), 1e-6);

    // --- Test 4: Low pass smooths, high pass removes constants ---
    eprintln!("=== Low/high pass ===");
    let noisy = fixtures::bimodal(32, 32, 0.4, 0.6, 0.3).expect("bimodal");
    let low = FrequencyDomainFilter::new(Weighting::IdealLowPass { cutoff: 0.1 });
    let smoothed = low.filter(&noisy, Precision::Double).expect("low pass");
    let spread = |g: &Raster<f32>| {
        let (lo, hi) = g.min_max();
        (hi - lo) as f64
    };
    rp.check(spread(&smoothed) < spread(&noisy), "low pass narrows range");
    rp.compare_values(noisy.mean(), smoothed.mean(), 1e-6);

    let flat = Raster::new_with_value(8, 8, 0.5f32).unwrap();
    let high = FrequencyDomainFilter::new(Weighting::GaussianHighPass { sigma: 0.1 });
    let out = high.filter(&flat, Precision::Double).expect("high pass");
    rp.check(out.iter().all(|v| v.abs() < 1e-6), "high pass of constant is zero");

    // --- Test 5: Coefficient edits ---
    let mut ft = FourierTransform::forward(&flat, Precision::Double).expect("forward");
    rp.compare_values(32.0, ft.dc().re, 1e-9);
    ft.set_magnitude(0, 0, 0.0).expect("set magnitude");
    let out = ft.inverse().expect("inverse");
    rp.check(out.iter().all(|v| v.abs() < 1e-6), "zeroed DC removes constant");
    rp.check(ft.coefficient(8, 0).is_err(), "out of range coefficient");

    assert!(rp.cleanup());
}
