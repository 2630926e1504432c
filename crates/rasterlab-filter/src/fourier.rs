//! Discrete Fourier transform and frequency-domain filtering
//!
//! [`FourierTransform`] holds the full complex spectrum of a grayscale
//! image, indexed `(u, v)` with the DC term at `(0, 0)`. The 2D transform is
//! separable: rows first, then columns. Lengths that are powers of two use
//! an in-place radix-2 Cooley-Tukey FFT; other lengths fall back to a
//! direct DFT. The inverse divides by `width * height`, so a forward and
//! inverse pass reproduces the input.
//!
//! [`FrequencyDomainFilter`] multiplies a spectrum by a real weighting
//! function of the normalized frequency.

use crate::{FilterError, FilterResult};
use num_traits::{Float, FloatConst, NumCast};
use rasterlab_core::{Complex, GrayImage, Raster};
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::trace;

/// Arithmetic precision of the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    /// Compute in `f32`
    Single,
    /// Compute in `f64`
    #[default]
    Double,
}

/// Complex spectrum of a grayscale image
#[derive(Debug, Clone, PartialEq)]
pub struct FourierTransform {
    coefficients: Raster<Complex<f64>>,
    precision: Precision,
}

impl FourierTransform {
    /// Forward transform of `image`
    pub fn forward(image: &GrayImage, precision: Precision) -> FilterResult<Self> {
        let (width, height) = image.size();
        trace!(width, height, ?precision, "forward fourier transform");

        let data = match precision {
            Precision::Single => {
                let mut buf: Vec<Complex<f32>> =
                    image.iter().map(|&v| Complex::new(v, 0.0)).collect();
                transform_2d(&mut buf, width as usize, height as usize, false);
                buf.into_iter().map(|c| c.cast::<f64>()).collect()
            }
            Precision::Double => {
                let mut buf: Vec<Complex<f64>> =
                    image.iter().map(|&v| Complex::new(v as f64, 0.0)).collect();
                transform_2d(&mut buf, width as usize, height as usize, false);
                buf
            }
        };

        Ok(Self {
            coefficients: Raster::from_vec(width, height, data)?,
            precision,
        })
    }

    /// Inverse transform; the real part of the result
    pub fn inverse(&self) -> FilterResult<GrayImage> {
        let (width, height) = self.coefficients.size();
        trace!(width, height, precision = ?self.precision, "inverse fourier transform");

        let values: Vec<f32> = match self.precision {
            Precision::Single => {
                let mut buf: Vec<Complex<f32>> =
                    self.coefficients.iter().map(|c| c.cast::<f32>()).collect();
                transform_2d(&mut buf, width as usize, height as usize, true);
                buf.iter().map(|c| c.re).collect()
            }
            Precision::Double => {
                let mut buf = self.coefficients.data().to_vec();
                transform_2d(&mut buf, width as usize, height as usize, true);
                buf.iter().map(|c| c.re as f32).collect()
            }
        };

        Ok(Raster::from_vec(width, height, values)?)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.coefficients.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.coefficients.height()
    }

    #[inline]
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// All coefficients
    pub fn coefficients(&self) -> &Raster<Complex<f64>> {
        &self.coefficients
    }

    pub fn coefficients_mut(&mut self) -> &mut Raster<Complex<f64>> {
        &mut self.coefficients
    }

    pub fn coefficient(&self, u: u32, v: u32) -> FilterResult<Complex<f64>> {
        Ok(self.coefficients.get(u, v)?)
    }

    pub fn set_coefficient(&mut self, u: u32, v: u32, value: Complex<f64>) -> FilterResult<()> {
        Ok(self.coefficients.set(u, v, value)?)
    }

    pub fn magnitude(&self, u: u32, v: u32) -> FilterResult<f64> {
        Ok(self.coefficient(u, v)?.norm())
    }

    /// Replace the magnitude at `(u, v)`, keeping its phase
    pub fn set_magnitude(&mut self, u: u32, v: u32, magnitude: f64) -> FilterResult<()> {
        let phase = self.phase(u, v)?;
        self.set_coefficient(u, v, Complex::from_polar(magnitude, phase))
    }

    pub fn phase(&self, u: u32, v: u32) -> FilterResult<f64> {
        Ok(self.coefficient(u, v)?.arg())
    }

    /// Replace the phase at `(u, v)`, keeping its magnitude
    pub fn set_phase(&mut self, u: u32, v: u32, phase: f64) -> FilterResult<()> {
        let magnitude = self.magnitude(u, v)?;
        self.set_coefficient(u, v, Complex::from_polar(magnitude, phase))
    }

    /// The zero-frequency coefficient (sum of all input values)
    #[inline]
    pub fn dc(&self) -> Complex<f64> {
        self.coefficients.get_unchecked(0, 0)
    }

    /// Signed frequency indices of `(u, v)`
    ///
    /// Indices above half the length wrap to negative frequencies.
    pub fn frequency(&self, u: u32, v: u32) -> (i64, i64) {
        (
            signed_frequency(u, self.width()),
            signed_frequency(v, self.height()),
        )
    }

    /// `log(1 + |c|)` scaled into `[0, 1]`, shifted so DC sits at the center
    pub fn log_magnitude(&self) -> FilterResult<GrayImage> {
        let (w, h) = self.coefficients.size();
        let logs = self.coefficients.map(|c| c.norm().ln_1p());
        let max = logs.iter().copied().fold(0.0f64, f64::max);
        let scale = if max > 0.0 { 1.0 / max } else { 0.0 };
        let (sx, sy) = ((w + 1) / 2, (h + 1) / 2);
        Ok(Raster::from_fn(w, h, |x, y| {
            (logs.get_unchecked((x + sx) % w, (y + sy) % h) * scale) as f32
        })?)
    }
}

fn signed_frequency(index: u32, len: u32) -> i64 {
    if index > len / 2 {
        index as i64 - len as i64
    } else {
        index as i64
    }
}

/// Frequency response of a [`FrequencyDomainFilter`]
///
/// Radial variants are functions of the normalized radial frequency
/// `d = sqrt(fu^2 + fv^2)` where `fu = u' / width` and `fv = v' / height`
/// for signed indices `u'`, `v'`; `d` is at most `sqrt(0.5)`.
#[derive(Clone, Default)]
pub enum Weighting {
    /// Weight 1 everywhere
    #[default]
    Identity,
    /// 1 for `d <= cutoff`, else 0
    IdealLowPass { cutoff: f64 },
    /// 0 for `d <= cutoff`, else 1
    IdealHighPass { cutoff: f64 },
    /// `exp(-d^2 / (2 sigma^2))`
    GaussianLowPass { sigma: f64 },
    /// `1 - exp(-d^2 / (2 sigma^2))`
    GaussianHighPass { sigma: f64 },
    /// Arbitrary weight of `(fu, fv)`
    Custom(Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>),
}

impl fmt::Debug for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "Identity"),
            Self::IdealLowPass { cutoff } => write!(f, "IdealLowPass {{ cutoff: {cutoff} }}"),
            Self::IdealHighPass { cutoff } => write!(f, "IdealHighPass {{ cutoff: {cutoff} }}"),
            Self::GaussianLowPass { sigma } => write!(f, "GaussianLowPass {{ sigma: {sigma} }}"),
            Self::GaussianHighPass { sigma } => write!(f, "GaussianHighPass {{ sigma: {sigma} }}"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl Weighting {
    /// Weight at normalized frequency `(fu, fv)`
    pub fn weight(&self, fu: f64, fv: f64) -> f64 {
        let d2 = fu * fu + fv * fv;
        match self {
            Self::Identity => 1.0,
            Self::IdealLowPass { cutoff } => {
                if d2 <= cutoff * cutoff {
                    1.0
                } else {
                    0.0
                }
            }
            Self::IdealHighPass { cutoff } => {
                if d2 <= cutoff * cutoff {
                    0.0
                } else {
                    1.0
                }
            }
            Self::GaussianLowPass { sigma } => (-d2 / (2.0 * sigma * sigma)).exp(),
            Self::GaussianHighPass { sigma } => 1.0 - (-d2 / (2.0 * sigma * sigma)).exp(),
            Self::Custom(f) => f(fu, fv),
        }
    }

    fn validate(&self) -> FilterResult<()> {
        match *self {
            Self::IdealLowPass { cutoff } | Self::IdealHighPass { cutoff } if !(cutoff >= 0.0) => {
                Err(FilterError::InvalidParameters(format!(
                    "cutoff must be non-negative, got {cutoff}"
                )))
            }
            Self::GaussianLowPass { sigma } | Self::GaussianHighPass { sigma }
                if !(sigma > 0.0) =>
            {
                Err(FilterError::InvalidParameters(format!(
                    "sigma must be positive, got {sigma}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Evaluate the weighting on a `width` x `height` spectrum grid
    pub fn materialize(&self, width: u32, height: u32) -> FilterResult<Raster<f64>> {
        self.validate()?;
        Ok(Raster::from_fn(width, height, |u, v| {
            let fu = signed_frequency(u, width) as f64 / width as f64;
            let fv = signed_frequency(v, height) as f64 / height as f64;
            self.weight(fu, fv)
        })?)
    }
}

/// Filter applied by weighting spectrum coefficients
///
/// The weight grid is computed on first use and cached. A request for a
/// different grid size is computed on the fly without replacing the cache.
#[derive(Debug, Clone, Default)]
pub struct FrequencyDomainFilter {
    weighting: Weighting,
    weights: OnceLock<Raster<f64>>,
}

impl FrequencyDomainFilter {
    pub fn new(weighting: Weighting) -> Self {
        Self {
            weighting,
            weights: OnceLock::new(),
        }
    }

    pub fn weighting(&self) -> &Weighting {
        &self.weighting
    }

    /// Replace the weighting and drop cached weights
    pub fn set_weighting(&mut self, weighting: Weighting) {
        self.weighting = weighting;
        self.weights = OnceLock::new();
    }

    /// Whether a weight grid is currently cached
    pub fn is_materialized(&self) -> bool {
        self.weights.get().is_some()
    }

    /// Weight grid for a `width` x `height` spectrum
    pub fn weights(&self, width: u32, height: u32) -> FilterResult<Cow<'_, Raster<f64>>> {
        match self.weights.get() {
            Some(cached) if cached.size() == (width, height) => Ok(Cow::Borrowed(cached)),
            Some(_) => Ok(Cow::Owned(self.weighting.materialize(width, height)?)),
            None => {
                let computed = self.weighting.materialize(width, height)?;
                Ok(Cow::Borrowed(self.weights.get_or_init(|| computed)))
            }
        }
    }

    /// Multiply every coefficient by its weight
    pub fn apply(&self, transform: &mut FourierTransform) -> FilterResult<()> {
        let weights = self.weights(transform.width(), transform.height())?;
        for (c, &w) in transform
            .coefficients_mut()
            .iter_mut()
            .zip(weights.iter())
        {
            *c = c.scale(w);
        }
        Ok(())
    }

    /// Transform, weight and transform back
    pub fn filter(&self, image: &GrayImage, precision: Precision) -> FilterResult<GrayImage> {
        let mut transform = FourierTransform::forward(image, precision)?;
        self.apply(&mut transform)?;
        transform.inverse()
    }
}

fn cast<F: Float>(v: f64) -> F {
    <F as NumCast>::from(v).unwrap_or_else(F::nan)
}

/// Separable 2D transform of a row-major buffer, in place
fn transform_2d<F: Float + FloatConst>(
    data: &mut [Complex<F>],
    width: usize,
    height: usize,
    inverse: bool,
) {
    let mut scratch = Vec::new();
    for row in data.chunks_exact_mut(width) {
        transform_1d(row, inverse, &mut scratch);
    }

    let mut column = vec![Complex::zero(); height];
    for x in 0..width {
        for (y, c) in column.iter_mut().enumerate() {
            *c = data[y * width + x];
        }
        transform_1d(&mut column, inverse, &mut scratch);
        for (y, c) in column.iter().enumerate() {
            data[y * width + x] = *c;
        }
    }

    if inverse {
        let inv_n = cast::<F>(1.0 / (width * height) as f64);
        data.iter_mut().for_each(|c| *c = c.scale(inv_n));
    }
}

/// Unnormalized 1D transform
fn transform_1d<F: Float + FloatConst>(
    data: &mut [Complex<F>],
    inverse: bool,
    scratch: &mut Vec<Complex<F>>,
) {
    if data.len() <= 1 {
        return;
    }
    if data.len().is_power_of_two() {
        fft_radix2(data, inverse);
    } else {
        dft(data, inverse, scratch);
    }
}

/// In-place iterative Cooley-Tukey FFT; `data.len()` must be a power of two
fn fft_radix2<F: Float + FloatConst>(data: &mut [Complex<F>], inverse: bool) {
    let n = data.len();

    // Bit reversal permutation
    let mut j = 0usize;
    for i in 0..n {
        if i < j {
            data.swap(i, j);
        }
        let mut m = n >> 1;
        while m > 0 && j & m != 0 {
            j ^= m;
            m >>= 1;
        }
        j |= m;
    }

    let sign = if inverse { F::one() } else { -F::one() };
    let two = F::one() + F::one();
    let mut len = 2;
    while len <= n {
        let half = len / 2;
        let angle = sign * two * F::PI() / cast::<F>(len as f64);
        for start in (0..n).step_by(len) {
            for m in 0..half {
                let w = Complex::from_polar(F::one(), angle * cast::<F>(m as f64));
                let u = data[start + m];
                let t = w * data[start + m + half];
                data[start + m] = u + t;
                data[start + m + half] = u - t;
            }
        }
        len <<= 1;
    }
}

/// Direct O(n^2) DFT for arbitrary lengths
fn dft<F: Float + FloatConst>(data: &mut [Complex<F>], inverse: bool, scratch: &mut Vec<Complex<F>>) {
    let n = data.len();
    let sign = if inverse { F::one() } else { -F::one() };
    let base = sign * (F::one() + F::one()) * F::PI() / cast::<F>(n as f64);

    scratch.clear();
    scratch.extend_from_slice(data);
    for (k, out) in data.iter_mut().enumerate() {
        let mut acc = Complex::zero();
        for (t, &x) in scratch.iter().enumerate() {
            // reduce k*t modulo n to keep the angle small
            let phase = base * cast::<F>(((k * t) % n) as f64);
            acc = acc + x * Complex::from_polar(F::one(), phase);
        }
        *out = acc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dc_is_sum() {
        let img = Raster::from_fn(4, 3, |x, y| (x + y) as f32 / 10.0).unwrap();
        let ft = FourierTransform::forward(&img, Precision::Double).unwrap();
        let sum: f64 = img.iter().map(|&v| v as f64).sum();
        assert!((ft.dc().re - sum).abs() < 1e-9);
        assert!(ft.dc().im.abs() < 1e-9);
    }

    #[test]
    fn test_impulse_has_flat_spectrum() {
        for (w, h) in [(8, 8), (5, 6)] {
            let img = Raster::from_fn(w, h, |x, y| if x == 0 && y == 0 { 1.0f32 } else { 0.0 })
                .unwrap();
            let ft = FourierTransform::forward(&img, Precision::Double).unwrap();
            assert!(ft.coefficients().iter().all(|c| (c.norm() - 1.0).abs() < 1e-9));
        }
    }

    #[test]
    fn test_fft_matches_dft() {
        let mut a: Vec<Complex<f64>> = (0..8)
            .map(|i| Complex::new((i as f64 * 0.7).sin(), (i as f64 * 0.3).cos()))
            .collect();
        let mut b = a.clone();
        fft_radix2(&mut a, false);
        dft(&mut b, false, &mut Vec::new());
        for (x, y) in a.iter().zip(&b) {
            assert!((*x - *y).norm() < 1e-9);
        }
    }

    #[test]
    fn test_signed_frequency() {
        let img = Raster::new_with_value(8, 5, 0.0f32).unwrap();
        let ft = FourierTransform::forward(&img, Precision::Single).unwrap();
        assert_eq!(ft.frequency(0, 0), (0, 0));
        assert_eq!(ft.frequency(4, 2), (4, 2));
        assert_eq!(ft.frequency(5, 3), (-3, -2));
    }

    #[test]
    fn test_set_magnitude_keeps_phase() {
        let img = Raster::from_fn(4, 4, |x, _| x as f32 / 3.0).unwrap();
        let mut ft = FourierTransform::forward(&img, Precision::Double).unwrap();
        let phase = ft.phase(1, 0).unwrap();
        ft.set_magnitude(1, 0, 2.5).unwrap();
        assert!((ft.magnitude(1, 0).unwrap() - 2.5).abs() < 1e-9);
        assert!((ft.phase(1, 0).unwrap() - phase).abs() < 1e-9);
        assert!(ft.coefficient(4, 0).is_err());
    }

    #[test]
    fn test_weights_cache() {
        let mut f = FrequencyDomainFilter::new(Weighting::IdealLowPass { cutoff: 0.1 });
        assert!(!f.is_materialized());
        let w = f.weights(8, 8).unwrap();
        assert_eq!(w.get_unchecked(0, 0), 1.0);
        assert_eq!(w.get_unchecked(4, 4), 0.0);
        assert!(f.is_materialized());
        f.set_weighting(Weighting::Identity);
        assert!(!f.is_materialized());
        assert!(
            FrequencyDomainFilter::new(Weighting::GaussianLowPass { sigma: 0.0 })
                .weights(4, 4)
                .is_err()
        );
    }

    #[test]
    fn test_low_pass_keeps_constant() {
        let img = Raster::new_with_value(16, 8, 0.4f32).unwrap();
        let f = FrequencyDomainFilter::new(Weighting::GaussianLowPass { sigma: 0.05 });
        let out = f.filter(&img, Precision::Double).unwrap();
        assert!(out.iter().all(|&v| (v - 0.4).abs() < 1e-5));
    }

    #[test]
    fn test_log_magnitude_centers_dc() {
        let img = Raster::new_with_value(6, 4, 1.0f32).unwrap();
        let ft = FourierTransform::forward(&img, Precision::Double).unwrap();
        let view = ft.log_magnitude().unwrap();
        assert!((view.get(3, 2).unwrap() - 1.0).abs() < 1e-6);
        assert!(view.get(0, 0).unwrap() < 1e-6);
    }
}
