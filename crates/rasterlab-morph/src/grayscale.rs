//! Grayscale morphology
//!
//! Flat and non-flat erosion and dilation over foreground cells of a
//! structuring element:
//!
//! - erosion: `out(p) = min over hits h of (X(p + h) - offset(h))`
//! - dilation: `out(p) = max over hits h of (X(p - h) + offset(h))`
//!
//! Cells outside the raster are skipped; a pixel with no in-bounds hit keeps
//! its value. Results are not clamped, so non-flat elements may leave the
//! `[0, 1]` range.

use crate::sel::StructuringElement;
use crate::MorphResult;
use rasterlab_core::{GrayImage, Raster};

fn hits(se: &StructuringElement) -> MorphResult<Vec<(i64, i64, f32)>> {
    se.require_foreground()?;
    Ok(se.foreground_offsets().collect())
}

/// Grayscale erosion (local minimum)
pub fn erode_gray(image: &GrayImage, se: &StructuringElement) -> MorphResult<GrayImage> {
    let hits = hits(se)?;
    Ok(Raster::from_fn(image.width(), image.height(), |x, y| {
        hits.iter()
            .filter_map(|&(dx, dy, o)| {
                image
                    .get_signed(x as i64 + dx, y as i64 + dy)
                    .map(|v| v - o)
            })
            .reduce(f32::min)
            .unwrap_or_else(|| image.get_unchecked(x, y))
    })?)
}

/// Grayscale dilation (local maximum)
pub fn dilate_gray(image: &GrayImage, se: &StructuringElement) -> MorphResult<GrayImage> {
    let hits = hits(se)?;
    Ok(Raster::from_fn(image.width(), image.height(), |x, y| {
        hits.iter()
            .filter_map(|&(dx, dy, o)| {
                image
                    .get_signed(x as i64 - dx, y as i64 - dy)
                    .map(|v| v + o)
            })
            .reduce(f32::max)
            .unwrap_or_else(|| image.get_unchecked(x, y))
    })?)
}

/// Grayscale opening (erosion then dilation)
pub fn open_gray(image: &GrayImage, se: &StructuringElement) -> MorphResult<GrayImage> {
    let eroded = erode_gray(image, se)?;
    dilate_gray(&eroded, se)
}

/// Grayscale closing (dilation then erosion)
pub fn close_gray(image: &GrayImage, se: &StructuringElement) -> MorphResult<GrayImage> {
    let dilated = dilate_gray(image, se)?;
    erode_gray(&dilated, se)
}

/// Grayscale gradient (dilation - erosion)
pub fn gradient_gray(image: &GrayImage, se: &StructuringElement) -> MorphResult<GrayImage> {
    let dilated = dilate_gray(image, se)?;
    let eroded = erode_gray(image, se)?;
    Ok(dilated.zip_map(&eroded, |a, b| a - b)?)
}

/// Grayscale top-hat (original - opening)
///
/// Extracts bright features smaller than the element.
pub fn top_hat_gray(image: &GrayImage, se: &StructuringElement) -> MorphResult<GrayImage> {
    let opened = open_gray(image, se)?;
    Ok(image.zip_map(&opened, |a, b| a - b)?)
}

/// Grayscale bottom-hat (closing - original)
///
/// Extracts dark features smaller than the element.
pub fn bottom_hat_gray(image: &GrayImage, se: &StructuringElement) -> MorphResult<GrayImage> {
    let closed = close_gray(image, se)?;
    Ok(closed.zip_map(image, |a, b| a - b)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> GrayImage {
        Raster::from_fn(6, 3, |x, _| x as f32 / 5.0).unwrap()
    }

    #[test]
    fn test_flat_erode_dilate_ramp() {
        let se = StructuringElement::square(3).unwrap();
        let e = erode_gray(&ramp(), &se).unwrap();
        let d = dilate_gray(&ramp(), &se).unwrap();
        assert!((e.get(3, 1).unwrap() - 0.4).abs() < 1e-6);
        assert!((d.get(3, 1).unwrap() - 0.8).abs() < 1e-6);
        // border cells outside the raster are skipped
        assert_eq!(e.get(0, 0).unwrap(), 0.0);
        assert_eq!(d.get(5, 0).unwrap(), 1.0);
    }

    #[test]
    fn test_non_flat_offsets() {
        let img = Raster::new_with_value(5, 5, 0.5f32).unwrap();
        let se = StructuringElement::pyramid(3, 0.2).unwrap();
        let d = dilate_gray(&img, &se).unwrap();
        let e = erode_gray(&img, &se).unwrap();
        assert!((d.get(2, 2).unwrap() - 0.7).abs() < 1e-6);
        assert!((e.get(2, 2).unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_top_hat_picks_bright_spot() {
        let img = Raster::from_fn(7, 7, |x, y| if x == 3 && y == 3 { 0.9f32 } else { 0.1 }).unwrap();
        let se = StructuringElement::square(3).unwrap();
        let th = top_hat_gray(&img, &se).unwrap();
        assert!((th.get(3, 3).unwrap() - 0.8).abs() < 1e-6);
        assert!(th.get(0, 0).unwrap().abs() < 1e-6);
        let grad = gradient_gray(&img, &se).unwrap();
        assert!((grad.get(2, 2).unwrap() - 0.8).abs() < 1e-6);
    }
}
