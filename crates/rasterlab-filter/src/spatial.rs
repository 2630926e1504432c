//! Spatial filtering
//!
//! A [`SpatialFilter`] pairs a [`Kernel`] with an [`Evaluation`] and slides
//! the kernel over every pixel. Pixels outside the image take the value of
//! the nearest edge pixel (replicate border).
//!
//! Filtering in place reads from a snapshot of the source and writes into
//! a separate buffer, so every output pixel sees only original input.

use crate::evaluation::Evaluation;
use crate::kernel::Kernel;
use crate::FilterResult;
use rasterlab_core::{Channel, ColorImage, GrayImage};
use tracing::trace;

/// Kernel plus window reduction
#[derive(Debug, Clone)]
pub struct SpatialFilter {
    kernel: Kernel,
    evaluation: Evaluation,
}

impl Default for SpatialFilter {
    /// 1x1 identity kernel with normalized convolution
    fn default() -> Self {
        Self {
            kernel: Kernel::from_slice(1, &[1.0])
                .unwrap_or_else(|_| unreachable!("1x1 is a valid kernel size")),
            evaluation: Evaluation::Convolution,
        }
    }
}

impl SpatialFilter {
    /// Create a filter
    ///
    /// # Errors
    ///
    /// Returns `FilterError::InvalidParameters` if the evaluation parameters
    /// are unusable (e.g. a zero quantile count).
    pub fn new(kernel: Kernel, evaluation: Evaluation) -> FilterResult<Self> {
        evaluation.validate()?;
        Ok(Self { kernel, evaluation })
    }

    /// Normalized convolution with `kernel`
    pub fn convolution(kernel: Kernel) -> Self {
        Self {
            kernel,
            evaluation: Evaluation::Convolution,
        }
    }

    pub fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    pub fn set_kernel(&mut self, kernel: Kernel) {
        self.kernel = kernel;
    }

    pub fn set_evaluation(&mut self, evaluation: Evaluation) -> FilterResult<()> {
        evaluation.validate()?;
        self.evaluation = evaluation;
        Ok(())
    }

    /// Filter `image` in place
    pub fn apply_to(&self, image: &mut GrayImage) -> FilterResult<()> {
        let mut out = self.apply(image)?;
        std::mem::swap(image, &mut out);
        Ok(())
    }

    /// Filter `image` into a new raster
    pub fn apply(&self, image: &GrayImage) -> FilterResult<GrayImage> {
        let size = self.kernel.size();
        let r = self.kernel.radius() as i64;
        trace!(
            width = image.width(),
            height = image.height(),
            kernel = size,
            evaluation = ?self.evaluation,
            "spatial filter"
        );

        let mut window = vec![0.0f32; self.kernel.len()];
        let mut scratch = Vec::with_capacity(window.len());
        let mut out = image.clone();

        for y in 0..image.height() {
            for x in 0..image.width() {
                for ky in 0..size as i64 {
                    let sy = y as i64 + ky - r;
                    for kx in 0..size as i64 {
                        let sx = x as i64 + kx - r;
                        window[(ky * size as i64 + kx) as usize] = image.get_clamped(sx, sy);
                    }
                }
                let v = self.evaluation.evaluate(&window, &self.kernel, &mut scratch);
                out.set_unchecked(x, y, v);
            }
        }

        Ok(out)
    }

    /// Filter the red, green and blue channels of a color image in place
    ///
    /// Alpha is left untouched.
    pub fn apply_to_color(&self, image: &mut ColorImage) -> FilterResult<()> {
        for channel in [Channel::Red, Channel::Green, Channel::Blue] {
            let filtered = self.apply(&image.channel(channel))?;
            image.set_channel(channel, &filtered)?;
        }
        Ok(())
    }
}
