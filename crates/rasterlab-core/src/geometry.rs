//! Integer pixel coordinates and axis-aligned rectangles

/// A pixel coordinate inside a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Move by a signed offset, returning `None` if a coordinate would
    /// become negative
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Option<Point> {
        let x = self.x as i64 + dx as i64;
        let y = self.y as i64 + dy as i64;
        if x < 0 || y < 0 || x > u32::MAX as i64 || y > u32::MAX as i64 {
            None
        } else {
            Some(Point::new(x as u32, y as u32))
        }
    }

    /// Raster-order key (row first, then column)
    #[inline]
    pub fn raster_key(self) -> (u32, u32) {
        (self.y, self.x)
    }
}

impl From<(u32, u32)> for Point {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned rectangle; `right()` and `bottom()` are exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle containing every point, or `None` for no points
    pub fn bounding<I: IntoIterator<Item = Point>>(points: I) -> Option<Rect> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in iter {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(Rect::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1))
    }

    #[inline]
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    #[inline]
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.y >= self.y && p.x - self.x < self.width && p.y - self.y < self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding() {
        let pts = [Point::new(3, 4), Point::new(1, 7), Point::new(5, 5)];
        let r = Rect::bounding(pts).unwrap();
        assert_eq!(r, Rect::new(1, 4, 5, 4));
        assert!(r.contains(Point::new(5, 7)));
        assert!(!r.contains(Point::new(6, 7)));
        assert!(Rect::bounding(std::iter::empty()).is_none());
    }

    #[test]
    fn test_contains_near_u32_max() {
        let r = Rect::new(u32::MAX - 1, 0, 5, 1);
        assert!(r.contains(Point::new(u32::MAX, 0)));
        assert!(!r.contains(Point::new(3, 0)));
    }

    #[test]
    fn test_offset() {
        let p = Point::new(0, 2);
        assert_eq!(p.offset(-1, 0), None);
        assert_eq!(p.offset(1, -2), Some(Point::new(1, 0)));
    }
}
