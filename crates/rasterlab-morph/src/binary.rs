//! Binary morphological operations
//!
//! Erosion and dilation visit each foreground cell of the structuring
//! element. Cells that fall outside the raster are ignored by both, so
//! `open(X) ⊆ X ⊆ close(X)` holds everywhere, including at the border.
//!
//! - erosion: `out(p) = AND over hits h of X(p + h)`
//! - dilation: `out(p) = OR over hits h of X(p - h)`
//! - hit-or-miss: `erode(X, fg) AND erode(!X, bg)`, with the same rule for
//!   cells outside the raster

use crate::sel::StructuringElement;
use crate::MorphResult;
use rasterlab_core::{BinaryImage, Raster};

/// Erode a binary image
///
/// Shrinks foreground regions: a pixel stays set only when every in-bounds
/// foreground cell of the element lands on foreground.
///
/// # Errors
///
/// Returns `MorphError::InvalidSel` if the element has no foreground cells.
pub fn erode(image: &BinaryImage, se: &StructuringElement) -> MorphResult<BinaryImage> {
    se.require_foreground()?;
    let hits: Vec<(i64, i64)> = se.foreground_offsets().map(|(dx, dy, _)| (dx, dy)).collect();

    Ok(Raster::from_fn(image.width(), image.height(), |x, y| {
        hits.iter().all(|&(dx, dy)| {
            image
                .get_signed(x as i64 + dx, y as i64 + dy)
                .unwrap_or(true)
        })
    })?)
}

/// Dilate a binary image
///
/// Expands foreground regions: a pixel is set when the reflected element
/// placed on it covers any foreground pixel.
pub fn dilate(image: &BinaryImage, se: &StructuringElement) -> MorphResult<BinaryImage> {
    se.require_foreground()?;
    let hits: Vec<(i64, i64)> = se.foreground_offsets().map(|(dx, dy, _)| (dx, dy)).collect();

    Ok(Raster::from_fn(image.width(), image.height(), |x, y| {
        hits.iter().any(|&(dx, dy)| {
            image
                .get_signed(x as i64 - dx, y as i64 - dy)
                .unwrap_or(false)
        })
    })?)
}

/// Open a binary image
///
/// Opening = Erosion followed by Dilation.
/// Removes small foreground objects and smooths contours.
pub fn open(image: &BinaryImage, se: &StructuringElement) -> MorphResult<BinaryImage> {
    let eroded = erode(image, se)?;
    dilate(&eroded, se)
}

/// Close a binary image
///
/// Closing = Dilation followed by Erosion.
/// Fills small holes and connects nearby objects.
pub fn close(image: &BinaryImage, se: &StructuringElement) -> MorphResult<BinaryImage> {
    let dilated = dilate(image, se)?;
    erode(&dilated, se)
}

/// Hit-or-miss transform with one tri-state element
///
/// A pixel matches when every in-bounds foreground cell lands on
/// foreground and every in-bounds background cell lands on background.
pub fn hit_or_miss(image: &BinaryImage, se: &StructuringElement) -> MorphResult<BinaryImage> {
    let hits: Vec<(i64, i64)> = se.foreground_offsets().map(|(dx, dy, _)| (dx, dy)).collect();
    let misses: Vec<(i64, i64)> = se.background_offsets().map(|(dx, dy, _)| (dx, dy)).collect();
    Ok(match_pattern(image, &hits, &misses)?)
}

/// Hit-or-miss transform with separate foreground and background elements
///
/// Erosion of the image by `fg` intersected with erosion of its complement
/// by `bg`.
///
/// # Errors
///
/// Returns `MorphError::InvalidSel` if either element has no foreground
/// cells.
pub fn hit_or_miss_pair(
    image: &BinaryImage,
    fg: &StructuringElement,
    bg: &StructuringElement,
) -> MorphResult<BinaryImage> {
    let fits = erode(image, fg)?;
    let misses = erode(&image.invert(), bg)?;
    Ok(fits.and(&misses)?)
}

fn match_pattern(
    image: &BinaryImage,
    hits: &[(i64, i64)],
    misses: &[(i64, i64)],
) -> rasterlab_core::Result<BinaryImage> {
    Raster::from_fn(image.width(), image.height(), |x, y| {
        let at = |dx: i64, dy: i64| image.get_signed(x as i64 + dx, y as i64 + dy);
        hits.iter().all(|&(dx, dy)| at(dx, dy).unwrap_or(true))
            && misses.iter().all(|&(dx, dy)| !at(dx, dy).unwrap_or(false))
    })
}

/// Morphological gradient (dilation - erosion)
///
/// Highlights edges/boundaries of objects.
pub fn gradient(image: &BinaryImage, se: &StructuringElement) -> MorphResult<BinaryImage> {
    let dilated = dilate(image, se)?;
    let eroded = erode(image, se)?;
    Ok(dilated.subtract(&eroded)?)
}

/// Top-hat transform (original - opening)
///
/// Extracts foreground features smaller than the element.
pub fn top_hat(image: &BinaryImage, se: &StructuringElement) -> MorphResult<BinaryImage> {
    let opened = open(image, se)?;
    Ok(image.subtract(&opened)?)
}

/// Bottom-hat transform (closing - original)
///
/// Extracts background gaps smaller than the element.
pub fn bottom_hat(image: &BinaryImage, se: &StructuringElement) -> MorphResult<BinaryImage> {
    let closed = close(image, se)?;
    Ok(closed.subtract(image)?)
}

/// Boundary type for [`extract_boundary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryType {
    /// Background pixels just outside the foreground (3x3 dilation - original)
    Outer,
    /// Foreground pixels on the inner edge (original - 3x3 erosion)
    #[default]
    Inner,
}

/// Extract boundary pixels of foreground regions
pub fn extract_boundary(image: &BinaryImage, boundary_type: BoundaryType) -> MorphResult<BinaryImage> {
    let se = StructuringElement::square(3)?;
    match boundary_type {
        BoundaryType::Outer => Ok(dilate(image, &se)?.subtract(image)?),
        BoundaryType::Inner => Ok(image.subtract(&erode(image, &se)?)?),
    }
}
