use super::PixelPoint;

/// Returns the squared sine of the angle at vertex `p0`, between `(p0, p1)`
/// and `(p0, p2)`.
///
/// Computed as `cross² / (|v1|² · |v2|²)`, so no square root is taken.
/// Coincident points yield `+inf`, which never passes a colinearity test.
#[must_use]
pub fn sin_sq(p0: PixelPoint, p1: PixelPoint, p2: PixelPoint) -> f64 {
    let x1 = f64::from(p1.x - p0.x);
    let y1 = f64::from(p1.y - p0.y);
    let x2 = f64::from(p2.x - p0.x);
    let y2 = f64::from(p2.y - p0.y);

    let vect = x1 * y2 - x2 * y1;
    let l1_sq = x1 * x1 + y1 * y1;
    let l2_sq = x2 * x2 + y2 * y2;
    let denom = l1_sq * l2_sq;

    if denom == 0.0 {
        return f64::INFINITY;
    }

    (vect * vect) / denom
}

/// Returns `dx / dy` from `p1` to `p2`, infinite for a horizontal pair.
#[must_use]
pub fn inverted_slope(p1: PixelPoint, p2: PixelPoint) -> f64 {
    let dx = f64::from(p2.x - p1.x);
    let dy = f64::from(p2.y - p1.y);

    if dy == 0.0 {
        return if dx < 0.0 {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    dx / dy
}

/// Returns the distance from `(px, py)` to the infinite line through `(ax, ay)`
/// with unit direction `(ux, uy)`.
#[must_use]
pub fn point_to_line_dist(px: f64, py: f64, ax: f64, ay: f64, ux: f64, uy: f64) -> f64 {
    ((px - ax) * uy - (py - ay) * ux).abs()
}
