//! Shared geometric and color primitives used by the mapper, region model and compositor.
//!
//! Coordinates are `f64` since pointer positions arrive with sub-pixel precision.
//! The raster surface rounds to whole pixels only when it paints.

/// Tolerance for point equality. Only rounding noise is absorbed.
pub const POINT_EPSILON: f64 = f64::EPSILON;

#[derive(Debug, Clone, Copy, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn approx_eq(self, other: Point) -> bool {
        (self.x - other.x).abs() < POINT_EPSILON && (self.y - other.y).abs() < POINT_EPSILON
    }

    pub fn translate(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(*other)
    }
}

/// Axis-aligned rectangle in canvas-local coordinates.
///
/// `top_left` always holds the per-axis minimum and both extents are non-negative.
#[derive(Debug, Clone, Copy)]
pub struct Rect {
    top_left: Point,
    width: f64,
    height: f64,
}

impl Rect {
    /// Canonical rectangle spanning two arbitrary corners.
    pub fn from_points(a: Point, b: Point) -> Self {
        let top_left = Point::new(a.x.min(b.x), a.y.min(b.y));
        let bottom_right = Point::new(a.x.max(b.x), a.y.max(b.y));
        Self {
            top_left,
            width: bottom_right.x - top_left.x,
            height: bottom_right.y - top_left.y,
        }
    }

    /// Zero-size rectangle anchored at `point`.
    pub fn at(point: Point) -> Self {
        Self::from_points(point, point)
    }

    pub fn top_left(&self) -> Point {
        self.top_left
    }

    pub fn bottom_right(&self) -> Point {
        self.top_left.translate(self.width, self.height)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width < POINT_EPSILON || self.height < POINT_EPSILON
    }
}

impl PartialEq for Rect {
    fn eq(&self, other: &Self) -> bool {
        self.top_left == other.top_left
            && (self.width - other.width).abs() < POINT_EPSILON
            && (self.height - other.height).abs() < POINT_EPSILON
    }
}

/// On-screen placement of a canvas, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}
