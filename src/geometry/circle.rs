use nalgebra::{Matrix3, Vector3};

use crate::error::{GeometryError, Result};
use crate::math::{PixelPoint, Point2, TOLERANCE};

/// A circle fitted through a sequence of pixels.
///
/// Defined by a center and radius. The fit is algebraic (Kåsa): it solves
/// `x² + y² + D·x + E·y + F = 0` in the least-squares sense, on coordinates
/// taken relative to the point centroid.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Point2,
    radius: f64,
    mean_distance: f64,
}

impl Circle {
    /// Creates a circle from its center and radius.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is non-positive or not finite.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("circle radius must be positive".into()).into(),
            );
        }
        Ok(Self {
            center,
            radius,
            mean_distance: 0.0,
        })
    }

    /// Fits a circle through `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 3 points are given or the points are
    /// colinear (the normal equations are singular).
    pub fn fit(points: &[PixelPoint]) -> Result<Self> {
        if points.len() < 3 {
            return Err(GeometryError::NotEnoughPoints {
                needed: 3,
                actual: points.len(),
            }
            .into());
        }

        #[allow(clippy::cast_precision_loss)]
        let n = points.len() as f64;
        let (sum_x, sum_y) = points.iter().fold((0.0, 0.0), |(sx, sy), p| {
            (sx + f64::from(p.x), sy + f64::from(p.y))
        });
        let (mx, my) = (sum_x / n, sum_y / n);

        let mut normal = Matrix3::<f64>::zeros();
        let mut rhs = Vector3::<f64>::zeros();
        for p in points {
            let x = f64::from(p.x) - mx;
            let y = f64::from(p.y) - my;
            let row = Vector3::new(x, y, 1.0);
            normal += row * row.transpose();
            rhs -= row * (x * x + y * y);
        }

        let solution = normal
            .lu()
            .solve(&rhs)
            .ok_or_else(|| GeometryError::Degenerate("colinear circle points".into()))?;

        let cx = -solution.x / 2.0;
        let cy = -solution.y / 2.0;
        let r_sq = cx * cx + cy * cy - solution.z;
        if !r_sq.is_finite() || r_sq <= TOLERANCE {
            return Err(GeometryError::Degenerate("colinear circle points".into()).into());
        }

        let center = Point2::new(cx + mx, cy + my);
        let radius = r_sq.sqrt();
        let total: f64 = points
            .iter()
            .map(|p| (nalgebra::distance(&crate::math::to_point2(*p), &center) - radius).abs())
            .sum();

        let mut circle = Self::new(center, radius)?;
        circle.mean_distance = total / n;
        Ok(circle)
    }

    /// Returns the center of the circle.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius of the circle.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Mean radial distance from the fitted points to the circle.
    #[must_use]
    pub fn mean_distance(&self) -> f64 {
        self.mean_distance
    }

    /// Radial distance from `p` to the circle.
    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        (nalgebra::distance(p, &self.center) - self.radius).abs()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Pixels rounded from the upper half of a circle.
    #[allow(clippy::cast_possible_truncation)]
    fn half_circle(cx: f64, cy: f64, r: f64, steps: u32) -> Vec<PixelPoint> {
        (0..=steps)
            .map(|i| {
                let t = std::f64::consts::PI * f64::from(i) / f64::from(steps);
                PixelPoint::new(
                    (cx + r * t.cos()).round() as i32,
                    (cy - r * t.sin()).round() as i32,
                )
            })
            .collect()
    }

    #[test]
    fn fits_exact_points() {
        let pts = [
            PixelPoint::new(10, 0),
            PixelPoint::new(0, 10),
            PixelPoint::new(-10, 0),
            PixelPoint::new(0, -10),
        ];
        let c = Circle::fit(&pts).unwrap();
        assert_abs_diff_eq!(c.center().x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.center().y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.radius(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.mean_distance(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn fits_rounded_arc() {
        let pts = half_circle(50.0, 80.0, 30.0, 40);
        let c = Circle::fit(&pts).unwrap();
        assert!((c.radius() - 30.0).abs() < 1.0, "r={}", c.radius());
        assert!((c.center().x - 50.0).abs() < 1.0);
        assert!((c.center().y - 80.0).abs() < 1.0);
        assert!(c.mean_distance() < 0.5);
    }

    #[test]
    fn colinear_points_are_degenerate() {
        let pts = [
            PixelPoint::new(0, 0),
            PixelPoint::new(1, 1),
            PixelPoint::new(2, 2),
            PixelPoint::new(3, 3),
        ];
        assert!(Circle::fit(&pts).is_err());
    }

    #[test]
    fn too_few_points() {
        assert!(Circle::fit(&[PixelPoint::new(0, 0), PixelPoint::new(1, 0)]).is_err());
    }

    #[test]
    fn invalid_radius() {
        assert!(Circle::new(Point2::origin(), 0.0).is_err());
    }
}
