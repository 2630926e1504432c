//! Boundary tracing and polygon simplification
//!
//! The tracer walks the outer boundary of the 4-connected component that
//! contains the top-most, then left-most, foreground pixel. It follows the
//! background with its right hand, moving between 4-adjacent foreground
//! pixels, so the loop runs counter-clockwise on screen (down the left
//! side first). Tracing stops when the walk is about to repeat its first
//! move from the start pixel.
//!
//! The loop lists one pixel per move; a pixel on a one-pixel-wide part is
//! listed once for each pass. A filled `w x h` rectangle gives
//! `2(w + h) - 4` entries.

use rasterlab_core::{BinaryImage, Point};

/// Axis-aligned step on screen (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction4 {
    /// (+1, 0)
    East = 0,
    /// (0, -1)
    North = 1,
    /// (-1, 0)
    West = 2,
    /// (0, +1)
    South = 3,
}

const ALL: [Direction4; 4] = [
    Direction4::East,
    Direction4::North,
    Direction4::West,
    Direction4::South,
];

impl Direction4 {
    #[inline]
    pub fn dx(self) -> i64 {
        match self {
            Direction4::East => 1,
            Direction4::West => -1,
            Direction4::North | Direction4::South => 0,
        }
    }

    #[inline]
    pub fn dy(self) -> i64 {
        match self {
            Direction4::North => -1,
            Direction4::South => 1,
            Direction4::East | Direction4::West => 0,
        }
    }

    /// Quarter turn counter-clockwise on screen
    #[inline]
    pub fn left(self) -> Self {
        ALL[(self as usize + 1) % 4]
    }

    /// Quarter turn clockwise on screen
    #[inline]
    pub fn right(self) -> Self {
        ALL[(self as usize + 3) % 4]
    }

    #[inline]
    pub fn reverse(self) -> Self {
        ALL[(self as usize + 2) % 4]
    }

    /// Direction of a unit step between 4-adjacent pixels
    pub fn between(from: Point, to: Point) -> Option<Self> {
        let dx = to.x as i64 - from.x as i64;
        let dy = to.y as i64 - from.y as i64;
        ALL.into_iter().find(|d| d.dx() == dx && d.dy() == dy)
    }
}

/// Change of heading at a polygon vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Turn {
    Left,
    Right,
    Reverse,
}

impl Turn {
    /// Turn taken when heading changes from `incoming` to `outgoing`;
    /// `None` when going straight
    pub fn between(incoming: Direction4, outgoing: Direction4) -> Option<Self> {
        if outgoing == incoming {
            None
        } else if outgoing == incoming.left() {
            Some(Turn::Left)
        } else if outgoing == incoming.right() {
            Some(Turn::Right)
        } else {
            Some(Turn::Reverse)
        }
    }

    /// Signed turning angle in radians, counter-clockwise on screen positive
    pub fn angle(self) -> f64 {
        match self {
            Turn::Left => std::f64::consts::FRAC_PI_2,
            Turn::Right => -std::f64::consts::FRAC_PI_2,
            Turn::Reverse => std::f64::consts::PI,
        }
    }
}

/// Corner of a simplified boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolygonVertex {
    pub point: Point,
    /// Heading when leaving this vertex
    pub direction: Direction4,
    pub turn: Turn,
}

/// Trace the outer boundary of the first foreground component
///
/// Returns an empty loop for an all-background image and a single pixel
/// for an isolated pixel.
pub fn trace_boundary(mask: &BinaryImage) -> Vec<Point> {
    let Some((sx, sy, _)) = mask.pixels().find(|&(_, _, set)| set) else {
        return Vec::new();
    };
    let start = Point::new(sx, sy);
    let member = |p: Point, d: Direction4| -> Option<Point> {
        let (nx, ny) = (p.x as i64 + d.dx(), p.y as i64 + d.dy());
        match mask.get_signed(nx, ny) {
            Some(true) => Some(Point::new(nx as u32, ny as u32)),
            _ => None,
        }
    };
    let next_move = |p: Point, heading: Direction4| {
        [heading.right(), heading, heading.left(), heading.reverse()]
            .into_iter()
            .find_map(|d| member(p, d).map(|q| (d, q)))
    };

    // nothing lies above or left of the start, so arriving "southward"
    // puts the background on the right
    let Some((first, _)) = next_move(start, Direction4::South) else {
        return vec![start];
    };

    let mut boundary = Vec::new();
    let (mut p, mut heading) = (start, Direction4::South);
    // each pixel can be left at most once per direction
    let limit = 4 * mask.count_foreground();
    while boundary.len() < limit {
        let Some((d, q)) = next_move(p, heading) else {
            break;
        };
        if p == start && d == first && !boundary.is_empty() {
            break;
        }
        boundary.push(p);
        p = q;
        heading = d;
    }
    boundary
}

/// Collapse straight runs of a closed loop into vertices
///
/// A vertex is emitted wherever the heading changes; vertices follow the
/// loop order starting from the first corner after the loop's first pixel.
pub fn simplify(boundary: &[Point]) -> Vec<PolygonVertex> {
    let n = boundary.len();
    if n < 2 {
        return Vec::new();
    }
    let step = |i: usize| Direction4::between(boundary[i % n], boundary[(i + 1) % n]);

    let mut vertices = Vec::new();
    for i in 1..=n {
        let (Some(incoming), Some(outgoing)) = (step(i - 1), step(i)) else {
            continue;
        };
        if let Some(turn) = Turn::between(incoming, outgoing) {
            vertices.push(PolygonVertex {
                point: boundary[i % n],
                direction: outgoing,
                turn,
            });
        }
    }
    vertices
}
