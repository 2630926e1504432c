//! Intensity histogram
//!
//! A [`Histogram`] is a single-pass summary of a raster: a sorted mapping
//! from discrete intensity level to occurrence count, plus derived scalars
//! (mean, median, count extremes and level extremes). Everything is
//! computed once at construction; the structure is immutable afterwards
//! and must be rebuilt if the source raster changes.
//!
//! # Examples
//!
//! ```
//! use rasterlab_core::{Histogram, Raster};
//!
//! let img = Raster::from_vec(2, 2, vec![0.0f32, 0.0, 1.0, 1.0]).unwrap();
//! let hist = Histogram::from_raster(&img);
//! assert_eq!(hist.total(), 4);
//! assert_eq!(hist.count(0), 2);
//! assert_eq!(hist.count(255), 2);
//! assert_eq!(hist.median(), 0);
//! ```

use crate::error::{Error, Result};
use crate::raster::Raster;
use std::collections::BTreeMap;

/// Mapping from a pixel value to a discrete intensity level
pub trait Intensity: Copy {
    /// Largest level this value type can produce
    const MAX_LEVEL: u32;

    /// Discrete level in `0..=MAX_LEVEL`
    fn level(self) -> u32;
}

impl Intensity for bool {
    const MAX_LEVEL: u32 = 1;

    #[inline]
    fn level(self) -> u32 {
        self as u32
    }
}

impl Intensity for u8 {
    const MAX_LEVEL: u32 = 255;

    #[inline]
    fn level(self) -> u32 {
        self as u32
    }
}

impl Intensity for u16 {
    const MAX_LEVEL: u32 = 65535;

    #[inline]
    fn level(self) -> u32 {
        self as u32
    }
}

/// Normalized floats are quantized to 256 levels.
impl Intensity for f32 {
    const MAX_LEVEL: u32 = 255;

    #[inline]
    fn level(self) -> u32 {
        (self.clamp(0.0, 1.0) * 255.0).round() as u32
    }
}

/// Intensity histogram with eagerly derived statistics
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    counts: BTreeMap<u32, u64>,
    max_possible_level: u32,
    total: u64,
    mean: f64,
    median: u32,
    min_count: u64,
    max_count: u64,
    min_level: u32,
    max_level: u32,
}

impl Histogram {
    /// Count every pixel of a raster
    pub fn from_raster<T: Intensity>(raster: &Raster<T>) -> Self {
        let mut counts = BTreeMap::new();
        for &v in raster.iter() {
            *counts.entry(v.level()).or_insert(0u64) += 1;
        }
        // A raster always has at least one pixel
        Self::build(counts, T::MAX_LEVEL)
    }

    /// Build a histogram from explicit `(level, count)` pairs.
    ///
    /// Repeated levels are summed; zero counts are dropped.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidParameter` if the total count is zero or a
    /// level exceeds `max_possible_level`.
    pub fn from_counts<I>(max_possible_level: u32, counts: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, u64)>,
    {
        let mut map = BTreeMap::new();
        for (level, count) in counts {
            if level > max_possible_level {
                return Err(Error::InvalidParameter(format!(
                    "level {level} exceeds maximum level {max_possible_level}"
                )));
            }
            if count > 0 {
                *map.entry(level).or_insert(0u64) += count;
            }
        }
        if map.is_empty() {
            return Err(Error::InvalidParameter(
                "histogram requires at least one counted level".into(),
            ));
        }
        Ok(Self::build(map, max_possible_level))
    }

    fn build(counts: BTreeMap<u32, u64>, max_possible_level: u32) -> Self {
        let total: u64 = counts.values().sum();
        let weighted: f64 = counts.iter().map(|(&l, &c)| l as f64 * c as f64).sum();
        let mean = if total > 0 {
            weighted / total as f64
        } else {
            0.0
        };

        let mut median = 0;
        let mut cumulative = 0u64;
        for (&level, &count) in &counts {
            cumulative += count;
            if cumulative * 2 >= total {
                median = level;
                break;
            }
        }

        let min_count = counts.values().copied().min().unwrap_or(0);
        let max_count = counts.values().copied().max().unwrap_or(0);
        let min_level = counts.keys().next().copied().unwrap_or(0);
        let max_level = counts.keys().next_back().copied().unwrap_or(0);

        Histogram {
            counts,
            max_possible_level,
            total,
            mean,
            median,
            min_count,
            max_count,
            min_level,
            max_level,
        }
    }

    /// Occurrences of `level` (zero if never observed)
    #[inline]
    pub fn count(&self, level: u32) -> u64 {
        self.counts.get(&level).copied().unwrap_or(0)
    }

    /// Sum of all counts
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count-weighted average level
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Level at which the cumulative count first reaches half the total
    #[inline]
    pub fn median(&self) -> u32 {
        self.median
    }

    /// Smallest count among observed levels
    #[inline]
    pub fn min_count(&self) -> u64 {
        self.min_count
    }

    /// Largest count among observed levels
    #[inline]
    pub fn max_count(&self) -> u64 {
        self.max_count
    }

    /// Lowest observed level
    #[inline]
    pub fn min_level(&self) -> u32 {
        self.min_level
    }

    /// Highest observed level
    #[inline]
    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Upper end of the level scale (255 for normalized floats)
    #[inline]
    pub fn max_possible_level(&self) -> u32 {
        self.max_possible_level
    }

    /// Number of distinct observed levels
    #[inline]
    pub fn distinct_levels(&self) -> usize {
        self.counts.len()
    }

    /// Observed `(level, count)` pairs in ascending level order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (u32, u64)> + '_ {
        self.counts.iter().map(|(&l, &c)| (l, c))
    }

    /// Observed levels in ascending order
    pub fn levels(&self) -> impl DoubleEndedIterator<Item = u32> + '_ {
        self.counts.keys().copied()
    }

    /// Convert a level to the normalized `[0, 1]` scale
    #[inline]
    pub fn normalized(&self, level: f64) -> f64 {
        if self.max_possible_level == 0 {
            0.0
        } else {
            level / self.max_possible_level as f64
        }
    }
}
