//! Structuring element bound to the morphology operations

use crate::binary::{self, BoundaryType};
use crate::grayscale;
use crate::sel::StructuringElement;
use crate::MorphResult;
use rasterlab_core::{BinaryImage, GrayImage};
use tracing::trace;

/// A structuring element together with the operations that use it
///
/// ```
/// use rasterlab_core::Raster;
/// use rasterlab_morph::{MorphologicalTransform, StructuringElement};
///
/// let t = MorphologicalTransform::new(StructuringElement::square(3).unwrap());
/// let img = Raster::from_fn(5, 5, |x, y| x == 2 && y == 2).unwrap();
/// assert_eq!(t.dilate(&img).unwrap().count_foreground(), 9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MorphologicalTransform {
    se: StructuringElement,
}

impl MorphologicalTransform {
    pub fn new(se: StructuringElement) -> Self {
        Self { se }
    }

    pub fn element(&self) -> &StructuringElement {
        &self.se
    }

    pub fn set_element(&mut self, se: StructuringElement) {
        self.se = se;
    }

    pub fn erode(&self, image: &BinaryImage) -> MorphResult<BinaryImage> {
        self.trace("erode", image.width(), image.height());
        binary::erode(image, &self.se)
    }

    pub fn dilate(&self, image: &BinaryImage) -> MorphResult<BinaryImage> {
        self.trace("dilate", image.width(), image.height());
        binary::dilate(image, &self.se)
    }

    pub fn open(&self, image: &BinaryImage) -> MorphResult<BinaryImage> {
        binary::open(image, &self.se)
    }

    pub fn close(&self, image: &BinaryImage) -> MorphResult<BinaryImage> {
        binary::close(image, &self.se)
    }

    pub fn hit_or_miss(&self, image: &BinaryImage) -> MorphResult<BinaryImage> {
        binary::hit_or_miss(image, &self.se)
    }

    pub fn gradient(&self, image: &BinaryImage) -> MorphResult<BinaryImage> {
        binary::gradient(image, &self.se)
    }

    pub fn top_hat(&self, image: &BinaryImage) -> MorphResult<BinaryImage> {
        binary::top_hat(image, &self.se)
    }

    pub fn bottom_hat(&self, image: &BinaryImage) -> MorphResult<BinaryImage> {
        binary::bottom_hat(image, &self.se)
    }

    /// Boundary with a fixed 3x3 element; the bound element is not used
    pub fn extract_boundary(&self, image: &BinaryImage, kind: BoundaryType) -> MorphResult<BinaryImage> {
        binary::extract_boundary(image, kind)
    }

    pub fn erode_gray(&self, image: &GrayImage) -> MorphResult<GrayImage> {
        self.trace("erode_gray", image.width(), image.height());
        grayscale::erode_gray(image, &self.se)
    }

    pub fn dilate_gray(&self, image: &GrayImage) -> MorphResult<GrayImage> {
        self.trace("dilate_gray", image.width(), image.height());
        grayscale::dilate_gray(image, &self.se)
    }

    pub fn open_gray(&self, image: &GrayImage) -> MorphResult<GrayImage> {
        grayscale::open_gray(image, &self.se)
    }

    pub fn close_gray(&self, image: &GrayImage) -> MorphResult<GrayImage> {
        grayscale::close_gray(image, &self.se)
    }

    pub fn gradient_gray(&self, image: &GrayImage) -> MorphResult<GrayImage> {
        grayscale::gradient_gray(image, &self.se)
    }

    pub fn top_hat_gray(&self, image: &GrayImage) -> MorphResult<GrayImage> {
        grayscale::top_hat_gray(image, &self.se)
    }

    pub fn bottom_hat_gray(&self, image: &GrayImage) -> MorphResult<GrayImage> {
        grayscale::bottom_hat_gray(image, &self.se)
    }

    fn trace(&self, op: &'static str, width: u32, height: u32) {
        trace!(
            op,
            width,
            height,
            se_width = self.se.width(),
            se_height = self.se.height(),
            flat = self.se.is_flat(),
            "morphology"
        );
    }
}
