//! Minimal complex number type used by spectral transforms and boundary
//! signatures

use num_traits::{Float, NumCast};
use std::ops::{Add, Mul, Neg, Sub};

/// Complex number over a floating-point component type
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Complex<F> {
    pub re: F,
    pub im: F,
}

impl<F: Float> Complex<F> {
    #[inline]
    pub fn new(re: F, im: F) -> Self {
        Self { re, im }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(F::zero(), F::zero())
    }

    /// `r * (cos(theta) + i sin(theta))`
    #[inline]
    pub fn from_polar(r: F, theta: F) -> Self {
        Self::new(r * theta.cos(), r * theta.sin())
    }

    /// Modulus
    #[inline]
    pub fn norm(self) -> F {
        self.re.hypot(self.im)
    }

    /// Squared modulus
    #[inline]
    pub fn norm_sqr(self) -> F {
        self.re * self.re + self.im * self.im
    }

    /// Argument in `(-pi, pi]`
    #[inline]
    pub fn arg(self) -> F {
        self.im.atan2(self.re)
    }

    #[inline]
    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    #[inline]
    pub fn scale(self, k: F) -> Self {
        Self::new(self.re * k, self.im * k)
    }

    /// Convert the component type
    #[inline]
    pub fn cast<G: Float>(self) -> Complex<G> {
        Complex::new(
            <G as NumCast>::from(self.re).unwrap_or_else(G::nan),
            <G as NumCast>::from(self.im).unwrap_or_else(G::nan),
        )
    }
}

impl<F: Float> Add for Complex<F> {
    type Output = Self;
    #[inline]
    fn add(self, o: Self) -> Self {
        Self::new(self.re + o.re, self.im + o.im)
    }
}

impl<F: Float> Sub for Complex<F> {
    type Output = Self;
    #[inline]
    fn sub(self, o: Self) -> Self {
        Self::new(self.re - o.re, self.im - o.im)
    }
}

impl<F: Float> Mul for Complex<F> {
    type Output = Self;
    #[inline]
    fn mul(self, o: Self) -> Self {
        Self::new(
            self.re * o.re - self.im * o.im,
            self.re * o.im + self.im * o.re,
        )
    }
}

impl<F: Float> Neg for Complex<F> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}
