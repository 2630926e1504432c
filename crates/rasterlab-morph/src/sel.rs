//! Structuring elements
//!
//! A [`StructuringElement`] is a small grid of tri-state cells with an
//! origin. Foreground cells take part in erosion and dilation; hit-or-miss
//! additionally requires background cells to match background. Don't-care
//! cells are ignored everywhere.
//!
//! An element may carry a per-cell height offset, which makes it non-flat
//! for grayscale morphology. Flat elements have all offsets zero.

use crate::{MorphError, MorphResult};

/// Cell state in a structuring element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeCell {
    /// Ignored
    #[default]
    DontCare,
    /// Must match foreground
    Foreground,
    /// Must match background (hit-or-miss only)
    Background,
}

/// Structuring element with optional non-flat offsets
#[derive(Debug, Clone, PartialEq)]
pub struct StructuringElement {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    cells: Vec<SeCell>,
    offsets: Option<Vec<f32>>,
}

impl StructuringElement {
    /// Element of don't-care cells with the origin at the center
    ///
    /// # Errors
    ///
    /// Returns `MorphError::InvalidSel` if either extent is zero.
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        Self::filled(width, height, SeCell::DontCare)
    }

    /// Element with every cell set to `cell`
    pub fn filled(width: u32, height: u32, cell: SeCell) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "structuring element must not be empty, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            cells: vec![cell; (width * height) as usize],
            offsets: None,
        })
    }

    fn from_predicate(size: u32, mut f: impl FnMut(i64, i64) -> bool) -> MorphResult<Self> {
        let mut se = Self::new(size, size)?;
        let c = (size / 2) as i64;
        for y in 0..size {
            for x in 0..size {
                if f(x as i64 - c, y as i64 - c) {
                    se.cells[(y * size + x) as usize] = SeCell::Foreground;
                }
            }
        }
        Ok(se)
    }

    /// `size` x `size` block of foreground cells
    pub fn square(size: u32) -> MorphResult<Self> {
        Self::filled(size, size, SeCell::Foreground)
    }

    /// Rectangle of foreground cells
    pub fn brick(width: u32, height: u32) -> MorphResult<Self> {
        Self::filled(width, height, SeCell::Foreground)
    }

    /// Plus sign through the center
    pub fn cross(size: u32) -> MorphResult<Self> {
        Self::from_predicate(size, |dx, dy| dx == 0 || dy == 0)
    }

    /// Cells within city-block distance `size / 2` of the center
    pub fn diamond(size: u32) -> MorphResult<Self> {
        let r = (size / 2) as i64;
        Self::from_predicate(size, |dx, dy| dx.abs() + dy.abs() <= r)
    }

    /// Cells within Euclidean distance `size / 2 + 0.5` of the center
    pub fn circle(size: u32) -> MorphResult<Self> {
        let r = (size / 2) as f32 + 0.5;
        Self::from_predicate(size, |dx, dy| ((dx * dx + dy * dy) as f32) <= r * r)
    }

    /// Square support whose offset falls linearly from `peak` at the center
    /// toward zero at the edge
    pub fn pyramid(size: u32, peak: f32) -> MorphResult<Self> {
        let mut se = Self::square(size)?;
        let c = (size / 2) as i64;
        let steps = (c + 1) as f32;
        se.offsets = Some(
            (0..size * size)
                .map(|i| {
                    let dx = (i % size) as i64 - c;
                    let dy = (i / size) as i64 - c;
                    peak * (1.0 - dx.abs().max(dy.abs()) as f32 / steps)
                })
                .collect(),
        );
        Ok(se)
    }

    /// Circular support with a spherical cap profile of height `peak`
    pub fn hemisphere(size: u32, peak: f32) -> MorphResult<Self> {
        let mut se = Self::circle(size)?;
        let c = (size / 2) as i64;
        let r = (size / 2) as f32 + 0.5;
        se.offsets = Some(
            (0..size * size)
                .map(|i| {
                    let dx = ((i % size) as i64 - c) as f32;
                    let dy = ((i / size) as i64 - c) as f32;
                    let q = (dx * dx + dy * dy) / (r * r);
                    peak * (1.0 - q).max(0.0).sqrt()
                })
                .collect(),
        );
        Ok(se)
    }

    /// Parse a textual pattern, one row per line
    ///
    /// `x` is foreground, `o` background and `.` don't-care. Blank lines
    /// and surrounding whitespace are ignored. The origin is the center.
    ///
    /// ```
    /// use rasterlab_morph::{SeCell, StructuringElement};
    ///
    /// let se = StructuringElement::from_pattern("
    ///     .x.
    ///     xxx
    ///     .o.
    /// ").unwrap();
    /// assert_eq!(se.get(1, 2), Some(SeCell::Background));
    /// ```
    pub fn from_pattern(pattern: &str) -> MorphResult<Self> {
        let rows: Vec<&str> = pattern
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |r| r.chars().count()) as u32;
        let mut se = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(MorphError::InvalidSel(format!(
                    "pattern row {y} has {} cells, expected {width}",
                    row.chars().count()
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    'x' | 'X' => SeCell::Foreground,
                    'o' | 'O' => SeCell::Background,
                    '.' => SeCell::DontCare,
                    other => {
                        return Err(MorphError::InvalidSel(format!(
                            "unexpected character {other:?} in pattern"
                        )));
                    }
                };
                se.cells[y * width as usize + x] = cell;
            }
        }
        Ok(se)
    }

    /// Attach per-cell offsets (row-major), making the element non-flat
    pub fn with_offsets(mut self, offsets: Vec<f32>) -> MorphResult<Self> {
        if offsets.len() != self.cells.len() {
            return Err(MorphError::InvalidSel(format!(
                "expected {} offsets, got {}",
                self.cells.len(),
                offsets.len()
            )));
        }
        self.offsets = Some(offsets);
        Ok(self)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Move the origin
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({cx}, {cy}) outside {}x{} element",
                self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<SeCell> {
        (x < self.width && y < self.height).then(|| self.cells[(y * self.width + x) as usize])
    }

    pub fn set(&mut self, x: u32, y: u32, cell: SeCell) -> MorphResult<()> {
        if x >= self.width || y >= self.height {
            return Err(MorphError::InvalidParameters(format!(
                "cell ({x}, {y}) outside {}x{} element",
                self.width, self.height
            )));
        }
        self.cells[(y * self.width + x) as usize] = cell;
        Ok(())
    }

    /// Height offset of a cell; zero for flat elements
    #[inline]
    pub fn offset(&self, x: u32, y: u32) -> f32 {
        self.offsets
            .as_ref()
            .and_then(|o| o.get((y * self.width + x) as usize).copied())
            .unwrap_or(0.0)
    }

    /// Whether every offset is zero
    pub fn is_flat(&self) -> bool {
        self.offsets
            .as_ref()
            .is_none_or(|o| o.iter().all(|&v| v == 0.0))
    }

    pub fn cells(&self) -> &[SeCell] {
        &self.cells
    }

    pub fn foreground_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == SeCell::Foreground).count()
    }

    pub fn background_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == SeCell::Background).count()
    }

    /// `(dx, dy, offset)` of foreground cells relative to the origin
    pub fn foreground_offsets(&self) -> impl Iterator<Item = (i64, i64, f32)> + '_ {
        self.offsets_of(SeCell::Foreground)
    }

    /// `(dx, dy, offset)` of background cells relative to the origin
    pub fn background_offsets(&self) -> impl Iterator<Item = (i64, i64, f32)> + '_ {
        self.offsets_of(SeCell::Background)
    }

    fn offsets_of(&self, wanted: SeCell) -> impl Iterator<Item = (i64, i64, f32)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| {
                (self.cells[(y * self.width + x) as usize] == wanted).then(|| {
                    (
                        x as i64 - self.cx as i64,
                        y as i64 - self.cy as i64,
                        self.offset(x, y),
                    )
                })
            })
        })
    }

    /// Point reflection through the origin (180 degree rotation)
    pub fn reflect(&self) -> Self {
        let (w, h) = (self.width, self.height);
        self.remap(w, h, w - 1 - self.cx, h - 1 - self.cy, |x, y| {
            (w - 1 - x, h - 1 - y)
        })
    }

    /// Rotate by `quarter_turns` x 90 degrees clockwise
    pub fn rotate_orth(&self, quarter_turns: u32) -> Self {
        let mut se = self.clone();
        for _ in 0..quarter_turns % 4 {
            let (w, h) = (se.width, se.height);
            // new (x, y) reads old (y, h - 1 - x); new size is h x w
            se = se.remap(h, w, h - 1 - se.cy, se.cx, |x, y| (y, h - 1 - x));
        }
        se
    }

    /// Build an element of size `w` x `h` whose cell `(x, y)` copies
    /// `self` at `source(x, y)`
    fn remap(&self, w: u32, h: u32, cx: u32, cy: u32, source: impl Fn(u32, u32) -> (u32, u32)) -> Self {
        let mut cells = Vec::with_capacity((w * h) as usize);
        let mut offsets = self.offsets.as_ref().map(|_| Vec::with_capacity((w * h) as usize));
        for y in 0..h {
            for x in 0..w {
                let (sx, sy) = source(x, y);
                cells.push(self.cells[(sy * self.width + sx) as usize]);
                if let Some(o) = offsets.as_mut() {
                    o.push(self.offset(sx, sy));
                }
            }
        }
        Self {
            width: w,
            height: h,
            cx,
            cy,
            cells,
            offsets,
        }
    }

    pub(crate) fn require_foreground(&self) -> MorphResult<()> {
        if self.foreground_count() == 0 {
            return Err(MorphError::InvalidSel(
                "structuring element has no foreground cells".into(),
            ));
        }
        Ok(())
    }
}
