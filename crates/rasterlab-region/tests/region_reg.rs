//! Region regression test
//!
//! Labeling, boundary tracing and shape descriptors on synthetic shapes.

use rasterlab_core::{Point, Raster, Rect};
use rasterlab_region::{Connectivity, ImageRegion, ImageSegment, find_segments};
use rasterlab_test::{RegParams, fixtures};
use std::f64::consts::{FRAC_PI_4, PI};

#[test]
fn region_reg() {
    let mut rp = RegParams::new("region");

    // --- Test 1: filled rectangles, perimeter 2(w + h) - 4 and area w * h ---
    eprintln!("=== Rectangles ===");
    for (w, h) in [(1, 1), (1, 5), (5, 1), (2, 2), (7, 3), (10, 10)] {
        let mask = fixtures::filled_rect(14, 14, Rect::new(2, 3, w, h)).expect("fixture");
        let segments = find_segments(&mask, &mask, Connectivity::Four).expect("segments");
        rp.compare_values(1.0, segments.len() as f64, 0.0);
        let region = ImageRegion::new(&segments[0]).expect("region");
        rp.compare_values((2 * (w + h) - 4) as f64, region.perimeter() as f64, 0.0);
        rp.compare_values((w * h) as f64, region.area() as f64, 0.0);
        rp.compare_values((w * h) as f64, region.area_from_polygon(), 1e-9);
        rp.compare_values(((w - 1) * (h - 1)) as f64, region.polygon_area(), 1e-9);
        rp.compare_values((w * h) as f64, region.min_area_rect().area(), 1e-9);
        rp.check(region.boundary()[0] == Point::new(2, 3), "boundary starts top-left");
        eprintln!("  {}x{} perimeter {}", w, h, region.perimeter());
    }

    // --- Test 2: a ring has one hole and a porous inner edge ---
    eprintln!("=== Ring ===");
    let ring = fixtures::ring(21, 9.0, 5.0).expect("ring");
    let segments = find_segments(&ring, &ring, Connectivity::Four).expect("segments");
    rp.compare_values(1.0, segments.len() as f64, 0.0);
    let region = ImageRegion::new(&segments[0]).expect("region");
    rp.compare_values(1.0, region.hole_count() as f64, 0.0);
    rp.check(region.porosity() > 0.0, "ring is porous");
    rp.check(
        region.area_from_polygon() > region.area() as f64,
        "outer polygon covers the hole",
    );
    rp.compare_values(1.0, region.eccentricity(), 1e-9);
    eprintln!("  porosity {:.3}", region.porosity());

    // --- Test 3: a disk is round, a bar is not ---
    eprintln!("=== Circularity ===");
    let disk = fixtures::disk(21, 8.0).expect("disk");
    let disk_segments = find_segments(&disk, &disk, Connectivity::Four).expect("segments");
    let disk_region = ImageRegion::new(&disk_segments[0]).expect("region");
    let bar = fixtures::filled_rect(20, 4, Rect::new(2, 1, 16, 2)).expect("bar");
    let bar_segments = find_segments(&bar, &bar, Connectivity::Four).expect("segments");
    let bar_region = ImageRegion::new(&bar_segments[0]).expect("region");
    rp.check(disk_region.circularity() < 0.15, "disk circularity is small");
    rp.check(bar_region.circularity() > 0.3, "bar circularity is large");
    rp.compare_values(0.0, disk_region.hole_count() as f64, 0.0);
    rp.compare_values(0.0, disk_region.porosity(), 0.0);
    eprintln!(
        "  disk {:.4}, bar {:.4}",
        disk_region.circularity(),
        bar_region.circularity()
    );

    // signatures agree with each other
    let radial = disk_region.radial_distance_signature();
    let complex = disk_region.complex_coordinate_signature();
    rp.compare_values(disk_region.perimeter() as f64, radial.len() as f64, 0.0);
    let max_radial = radial.iter().cloned().fold(0.0, f64::max);
    for (r, z) in radial.iter().zip(complex.iter()) {
        rp.compare_values(*r, z.norm(), 1e-9);
    }
    let farthest = disk_region.farthest_point_signature(16).expect("signature");
    let max_farthest = farthest.iter().cloned().fold(0.0, f64::max);
    rp.compare_values(max_radial, max_farthest, 1e-12);
    rp.check(farthest.iter().all(|&r| r > 0.0), "every sector reaches the boundary");

    // --- Test 4: a diagonal band fits a rotated rectangle ---
    eprintln!("=== Diagonal band ===");
    let band = Raster::from_fn(12, 12, |x, y| x.abs_diff(y) <= 1).expect("band");
    let band_segments = find_segments(&band, &band, Connectivity::Four).expect("segments");
    let band_region = ImageRegion::new(&band_segments[0]).expect("region");
    let oriented = band_region.min_area_rect();
    let bbox = band_region.bounding_box();
    rp.check(
        oriented.area() < bbox.area() as f64 / 2.0,
        "oriented rectangle beats the bounding box",
    );
    rp.compare_values(FRAC_PI_4, band_region.covariance().orientation(), 1e-12);
    rp.check(band_region.eccentricity() > 3.0, "band is elongated");
    eprintln!("  oriented area {:.2} vs bbox {}", oriented.area(), bbox.area());

    // --- Test 5: Hu moments survive a quarter turn ---
    eprintln!("=== Hu moments ===");
    let l_shape: Vec<Point> = (0..9)
        .flat_map(|y| (0..3).map(move |x| Point::new(x, y)))
        .chain((6..9).flat_map(|y| (3..8).map(move |x| Point::new(x, y))))
        .collect();
    let turned: Vec<Point> = l_shape.iter().map(|p| Point::new(8 - p.y, p.x)).collect();
    let canvas: Raster<u8> = Raster::new(12, 12).expect("canvas");
    let a = ImageSegment::new(&canvas, l_shape).expect("segment");
    let b = ImageSegment::new(&canvas, turned).expect("segment");
    let hu_a = ImageRegion::new(&a).expect("region").hu_moments();
    let hu_b = ImageRegion::new(&b).expect("region").hu_moments();
    for (x, y) in hu_a.iter().zip(hu_b.iter()) {
        rp.compare_values(*x, *y, 1e-12);
    }

    // --- Test 6: slope chain code of a simple loop turns once around ---
    let rect = fixtures::filled_rect(10, 10, Rect::new(1, 1, 6, 4)).expect("fixture");
    let rect_segments = find_segments(&rect, &rect, Connectivity::Four).expect("segments");
    let rect_region = ImageRegion::new(&rect_segments[0]).expect("region");
    let total: f64 = rect_region.slope_chain_code().iter().sum();
    rp.compare_values(2.0 * PI, total, 1e-12);

    // --- Test 7: segments over a gray raster expose its values ---
    let gray = Raster::from_fn(8, 4, |x, _| x as f32 / 7.0).expect("gray");
    let mask = Raster::from_fn(8, 4, |x, _| x < 2 || x > 5).expect("mask");
    let segments = find_segments(&gray, &mask, Connectivity::Eight).expect("segments");
    rp.compare_values(2.0, segments.len() as f64, 0.0);
    let right_sum: f32 = segments[1].values().sum();
    rp.compare_values((4.0 * (6.0 + 7.0) / 7.0) as f64, right_sum as f64, 1e-5);
    let crop = segments[0].crop(-1.0).expect("crop");
    rp.compare_values(8.0, crop.len() as f64, 0.0);

    assert!(rp.cleanup(), "region regression test failed");
}
