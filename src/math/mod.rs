pub mod distance_2d;
pub mod rect;

pub use rect::Rect;

/// 2D point type with sub-pixel coordinates.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Integer pixel coordinates, `x` to the right and `y` downwards.
pub type PixelPoint = nalgebra::Point2<i32>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Converts a pixel location to a sub-pixel point at the pixel origin.
#[must_use]
pub fn to_point2(p: PixelPoint) -> Point2 {
    Point2::new(f64::from(p.x), f64::from(p.y))
}
