//! Binary morphology regression test
//!
//! Ordering of opening and closing on random rasters, duality of erosion
//! and dilation, hit-or-miss as a pair of erosions, and shape fixtures.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rasterlab_core::{BinaryImage, Raster, Rect};
use rasterlab_morph::{
    BoundaryType, MorphologicalTransform, StructuringElement, close, dilate, erode,
    extract_boundary, gradient, hit_or_miss_pair, open, top_hat,
};
use rasterlab_test::{RegParams, fixtures};

fn random_raster(rng: &mut StdRng, w: u32, h: u32, density: f64) -> BinaryImage {
    Raster::from_fn(w, h, |_, _| rng.random_bool(density)).unwrap()
}

fn elements() -> Vec<StructuringElement> {
    let mut shifted = StructuringElement::brick(3, 2).unwrap();
    shifted.set_origin(0, 1).unwrap();
    vec![
        StructuringElement::square(3).unwrap(),
        StructuringElement::cross(5).unwrap(),
        StructuringElement::diamond(5).unwrap(),
        StructuringElement::circle(7).unwrap(),
        StructuringElement::from_pattern("x..\n.xx").unwrap(),
        shifted,
    ]
}

#[test]
fn binmorph_reg() {
    let mut rp = RegParams::new("binmorph");
    let mut rng = StdRng::seed_from_u64(0x5eed);

    // --- Test 1: open(X) ⊆ X ⊆ close(X) ---
    eprintln!("=== Ordering ===");
    for trial in 0..20 {
        let w = rng.random_range(1..=24);
        let h = rng.random_range(1..=24);
        let density = rng.random_range(0.1..0.9);
        let img = random_raster(&mut rng, w, h, density);
        for se in elements() {
            let opened = open(&img, &se).expect("open");
            let closed = close(&img, &se).expect("close");
            rp.check(opened.is_subset_of(&img).unwrap(), "open is a subset");
            rp.check(img.is_subset_of(&closed).unwrap(), "close is a superset");
            // erosion and dilation bracket the image when the origin is a hit
            if se.get(se.origin_x(), se.origin_y()) == Some(rasterlab_morph::SeCell::Foreground) {
                let eroded = erode(&img, &se).expect("erode");
                let dilated = dilate(&img, &se).expect("dilate");
                rp.check(eroded.is_subset_of(&img).unwrap(), "erode is a subset");
                rp.check(img.is_subset_of(&dilated).unwrap(), "dilate is a superset");
            }
        }
        if trial == 0 {
            eprintln!("  first trial {}x{} density {:.2}", w, h, density);
        }
    }

    // --- Test 2: Idempotence of opening and closing ---
    let img = random_raster(&mut rng, 20, 16, 0.5);
    let se = StructuringElement::square(3).unwrap();
    let opened = open(&img, &se).unwrap();
    rp.compare_rasters(&opened, &open(&opened, &se).unwrap());
    let closed = close(&img, &se).unwrap();
    rp.compare_rasters(&closed, &close(&closed, &se).unwrap());

    // --- Test 3: Rectangle fixtures ---
    eprintln!("=== Rectangle ===");
    let rect = fixtures::filled_rect(12, 10, Rect::new(2, 2, 6, 5)).expect("rect");
    let t = MorphologicalTransform::new(StructuringElement::square(3).unwrap());
    rp.compare_values(4.0 * 3.0, t.erode(&rect).unwrap().count_foreground() as f64, 0.0);
    rp.compare_values(8.0 * 7.0, t.dilate(&rect).unwrap().count_foreground() as f64, 0.0);
    rp.compare_rasters(&rect, &t.open(&rect).unwrap());
    rp.compare_rasters(&rect, &t.close(&rect).unwrap());
    let inner = extract_boundary(&rect, BoundaryType::Inner).unwrap();
    rp.compare_values((2 * (6 + 5) - 4) as f64, inner.count_foreground() as f64, 0.0);
    let grad = gradient(&rect, &se).unwrap();
    rp.compare_values((8 * 7 - 4 * 3) as f64, grad.count_foreground() as f64, 0.0);

    // --- Test 4: Top-hat keeps what opening removes ---
    let mut speckled = rect.clone();
    speckled.set(10, 8, true).unwrap();
    let th = top_hat(&speckled, &se).unwrap();
    rp.compare_values(1.0, th.count_foreground() as f64, 0.0);
    rp.check(th.get(10, 8).unwrap(), "speck found by top-hat");

    // --- Test 5: Hit-or-miss finds the top-left corner ---
    eprintln!("=== Hit-or-miss ===");
    let corner = MorphologicalTransform::new(
        StructuringElement::from_pattern("ooo\noxx\noxx").unwrap(),
    );
    let found = corner.hit_or_miss(&rect).unwrap();
    rp.compare_values(1.0, found.count_foreground() as f64, 0.0);
    rp.check(found.get(2, 2).unwrap(), "corner at (2, 2)");

    // --- Test 6: hit-or-miss equals erode(X, fg) AND erode(!X, bg) ---
    eprintln!("=== Hit-or-miss as erosions ===");
    let ses = elements();
    for trial in 0..10 {
        let w = rng.random_range(1..=16);
        let h = rng.random_range(1..=16);
        let img = random_raster(&mut rng, w, h, 0.5);
        let complement = img.invert();
        for (i, fg) in ses.iter().enumerate() {
            let bg = &ses[(i + trial) % ses.len()];
            let expected = erode(&img, fg)
                .unwrap()
                .and(&erode(&complement, bg).unwrap())
                .unwrap();
            rp.compare_rasters(&expected, &hit_or_miss_pair(&img, fg, bg).unwrap());
        }
    }
    // an all-foreground raster only matches where the background hit is outside
    let full = Raster::new_with_value(3, 3, true).unwrap();
    let bg = StructuringElement::from_pattern("x..\n...\n...").unwrap();
    let matched = hit_or_miss_pair(&full, &se, &bg).unwrap();
    rp.compare_values(5.0, matched.count_foreground() as f64, 0.0);

    assert!(rp.cleanup());
}
