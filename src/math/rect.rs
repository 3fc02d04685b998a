use super::PixelPoint;

/// An integer, axis-aligned rectangle in pixel space.
///
/// Containment is half-open: `x <= px < x + width`, same for ordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the smallest rectangle covering every pixel in `points`.
    ///
    /// An empty slice yields an empty rectangle at the origin.
    #[must_use]
    pub fn bounding(points: &[PixelPoint]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (mut x_min, mut y_min, mut x_max, mut y_max) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            x_min = x_min.min(p.x);
            y_min = y_min.min(p.y);
            x_max = x_max.max(p.x);
            y_max = y_max.max(p.y);
        }
        Self::new(x_min, y_min, x_max - x_min + 1, y_max - y_min + 1)
    }

    /// Exclusive right edge.
    #[must_use]
    pub fn max_x(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[must_use]
    pub fn max_y(&self) -> i32 {
        self.y + self.height
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Expands the rectangle by `h` on the left and right and `v` on top and bottom.
    pub fn grow(&mut self, h: i32, v: i32) {
        self.x -= h;
        self.y -= v;
        self.width += 2 * h;
        self.height += 2 * v;
    }

    #[must_use]
    pub fn contains(&self, p: PixelPoint) -> bool {
        !self.is_empty() && p.x >= self.x && p.x < self.max_x() && p.y >= self.y && p.y < self.max_y()
    }

    /// Returns the union of both rectangles.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Rect::new(x, y, max_x - x, max_y - y)
    }
}
