use nalgebra::Matrix2;

use crate::error::{GeometryError, Result};
use crate::math::distance_2d::point_to_line_dist;
use crate::math::{PixelPoint, Point2, Vector2, TOLERANCE};

/// A straight line fitted through a sequence of pixels.
///
/// The fit minimizes the sum of squared perpendicular distances (total least
/// squares): the line goes through the centroid along the principal axis of
/// the point covariance.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicLine {
    centroid: Point2,
    direction: Vector2,
    mean_distance: f64,
    count: usize,
}

impl BasicLine {
    /// Fits a line through `points`.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 points are given or all points coincide.
    pub fn fit(points: &[PixelPoint]) -> Result<Self> {
        if points.len() < 2 {
            return Err(GeometryError::NotEnoughPoints {
                needed: 2,
                actual: points.len(),
            }
            .into());
        }

        #[allow(clippy::cast_precision_loss)]
        let n = points.len() as f64;
        let (sum_x, sum_y) = points.iter().fold((0.0, 0.0), |(sx, sy), p| {
            (sx + f64::from(p.x), sy + f64::from(p.y))
        });
        let centroid = Point2::new(sum_x / n, sum_y / n);

        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for p in points {
            let dx = f64::from(p.x) - centroid.x;
            let dy = f64::from(p.y) - centroid.y;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }

        if sxx + syy < TOLERANCE {
            return Err(GeometryError::Degenerate("all line points coincide".into()).into());
        }

        let eigen = Matrix2::new(sxx, sxy, sxy, syy).symmetric_eigen();
        let major = eigen.eigenvalues.imax();
        let direction = eigen.eigenvectors.column(major).normalize();

        let total: f64 = points
            .iter()
            .map(|p| {
                point_to_line_dist(
                    f64::from(p.x),
                    f64::from(p.y),
                    centroid.x,
                    centroid.y,
                    direction.x,
                    direction.y,
                )
            })
            .sum();

        Ok(Self {
            centroid,
            direction,
            mean_distance: total / n,
            count: points.len(),
        })
    }

    /// Returns the centroid the line goes through.
    #[must_use]
    pub fn centroid(&self) -> &Point2 {
        &self.centroid
    }

    /// Returns the unit direction vector of the line.
    #[must_use]
    pub fn direction(&self) -> &Vector2 {
        &self.direction
    }

    /// Mean perpendicular distance from the fitted points to the line.
    #[must_use]
    pub fn mean_distance(&self) -> f64 {
        self.mean_distance
    }

    /// Number of points used for the fit.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns `dy / dx`, infinite for a vertical line.
    #[must_use]
    pub fn slope(&self) -> f64 {
        if self.direction.x.abs() < TOLERANCE {
            return f64::INFINITY;
        }
        self.direction.y / self.direction.x
    }

    /// Returns `dx / dy`, infinite for a horizontal line.
    #[must_use]
    pub fn inverted_slope(&self) -> f64 {
        if self.direction.y.abs() < TOLERANCE {
            return f64::INFINITY;
        }
        self.direction.x / self.direction.y
    }

    /// Perpendicular distance from `p` to the line.
    #[must_use]
    pub fn distance_to(&self, p: &Point2) -> f64 {
        point_to_line_dist(
            p.x,
            p.y,
            self.centroid.x,
            self.centroid.y,
            self.direction.x,
            self.direction.y,
        )
    }

    /// Ordinate of the line at abscissa `x`, `None` for a vertical line.
    #[must_use]
    pub fn y_at(&self, x: f64) -> Option<f64> {
        let slope = self.slope();
        slope
            .is_finite()
            .then(|| self.centroid.y + (x - self.centroid.x) * slope)
    }
}
