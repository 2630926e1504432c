//! Four-channel color values and color rasters
//!
//! Channels are normalized floats in `[0, 1]`. Display-oriented color
//! space conversion lives outside this crate; only the luminance reduction
//! needed to feed grayscale algorithms is provided here.

use super::{ColorImage, GrayImage, Raster};
use crate::error::Result;

/// Color channel selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    /// All channels in storage order
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];
}

/// RGBA color with normalized float channels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Create a color from its four channels
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque gray of the given level
    #[inline]
    pub const fn gray(v: f32) -> Self {
        Self::new(v, v, v, 1.0)
    }

    /// Read one channel
    #[inline]
    pub fn channel(self, channel: Channel) -> f32 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
            Channel::Alpha => self.a,
        }
    }

    /// Write one channel
    #[inline]
    pub fn set_channel(&mut self, channel: Channel, value: f32) {
        match channel {
            Channel::Red => self.r = value,
            Channel::Green => self.g = value,
            Channel::Blue => self.b = value,
            Channel::Alpha => self.a = value,
        }
    }

    /// Linear interpolation between two colors.
    ///
    /// Each output channel depends only on the same channel of `self` and
    /// `other`: `c = self.c + t * (other.c - self.c)`. `t` is clamped to
    /// `[0, 1]`.
    pub fn mix(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: f32, b: f32| a + t * (b - a);
        Rgba {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
            a: lerp(self.a, other.a),
        }
    }

    /// Rec. 601 luma of the RGB channels
    #[inline]
    pub fn luminance(self) -> f32 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
}

impl Raster<Rgba> {
    /// Extract one channel as a grayscale raster
    pub fn channel(&self, channel: Channel) -> GrayImage {
        self.map(|c| c.channel(channel))
    }

    /// Assemble a color raster from four equally-sized channel rasters
    ///
    /// # Errors
    ///
    /// Returns `Error::ShapeMismatch` if the channel sizes differ.
    pub fn from_channels(
        r: &GrayImage,
        g: &GrayImage,
        b: &GrayImage,
        a: &GrayImage,
    ) -> Result<ColorImage> {
        r.ensure_same_size(g)?;
        r.ensure_same_size(b)?;
        r.ensure_same_size(a)?;
        Raster::from_fn(r.width(), r.height(), |x, y| {
            Rgba::new(
                r.get_unchecked(x, y),
                g.get_unchecked(x, y),
                b.get_unchecked(x, y),
                a.get_unchecked(x, y),
            )
        })
    }

    /// Replace one channel with the values of a grayscale raster
    pub fn set_channel(&mut self, channel: Channel, values: &GrayImage) -> Result<()> {
        self.ensure_same_size(values)?;
        for (c, &v) in self.data.iter_mut().zip(values.data.iter()) {
            c.set_channel(channel, v);
        }
        Ok(())
    }

    /// Reduce to luminance
    pub fn to_gray(&self) -> GrayImage {
        self.map(Rgba::luminance)
    }

    /// Invert the color channels, keeping alpha
    pub fn invert(&self) -> ColorImage {
        self.map(|c| Rgba::new(1.0 - c.r, 1.0 - c.g, 1.0 - c.b, c.a))
    }
}
