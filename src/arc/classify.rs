use tracing::trace;

use crate::config::ArcParameters;
use crate::geometry::{BasicLine, Model, ModelFitter};
use crate::math::distance_2d::sin_sq;
use crate::math::PixelPoint;
use crate::sheet::{Skew, StaffIndex};

use super::ArcShape;

/// Determines the global shape of a traced point sequence.
///
/// Classification is a pure function of the points, given the page services:
/// the same sequence always gets the same shape.
pub struct ShapeClassifier<'a> {
    params: &'a ArcParameters,
    skew: Skew,
    staves: &'a dyn StaffIndex,
    fitter: &'a dyn ModelFitter,
}

impl<'a> ShapeClassifier<'a> {
    /// Creates a new classifier over the page staves, skew and model fitter.
    #[must_use]
    pub fn new(
        params: &'a ArcParameters,
        skew: Skew,
        staves: &'a dyn StaffIndex,
        fitter: &'a dyn ModelFitter,
    ) -> Self {
        Self {
            params,
            skew,
            staves,
            fitter,
        }
    }

    /// Returns the scaled parameters in use.
    #[must_use]
    pub fn params(&self) -> &ArcParameters {
        self.params
    }

    /// Returns the shape of `points`, with the fitted model for lines and slurs.
    ///
    /// Checks run in order, first match wins: quorum, staff line portion,
    /// straight line, circle.
    #[must_use]
    pub fn determine_shape(&self, points: &[PixelPoint]) -> (ArcShape, Option<Model>) {
        if points.len() < self.params.arc_min_quorum {
            return (ArcShape::Short, None);
        }

        if self.is_staff_arc(points) {
            let shape = if points.len() > self.params.max_staff_arc_length {
                ArcShape::Irrelevant
            } else {
                ArcShape::StaffArc
            };
            return (shape, None);
        }

        let first = points[0];
        let middle = points[points.len() / 2];
        let last = points[points.len() - 1];

        if sin_sq(middle, first, last) <= self.params.max_sin_sq {
            // Cannot be a slur, perhaps a straight line.
            if let Ok(line) = BasicLine::fit(points) {
                if line.mean_distance() <= self.params.max_line_distance {
                    return self.straight_shape(line);
                }
            }
        }

        match self.fitter.compute_model(points) {
            Some(model @ Model::Circle(_)) => (ArcShape::Slur, Some(model)),
            _ => (ArcShape::Irrelevant, None),
        }
    }

    fn straight_shape(&self, line: BasicLine) -> (ArcShape, Option<Model>) {
        let slope = self.skew.slope();

        // Stems and bar lines.
        if (line.inverted_slope() + slope).abs() <= self.params.min_slope {
            trace!(count = line.count(), "vertical line");
            return (ArcShape::Irrelevant, None);
        }

        if (line.slope() - slope).abs() <= self.params.min_slope {
            trace!(count = line.count(), "horizontal line");
        }

        (ArcShape::Line, Some(Model::Line(line)))
    }

    /// Whether `points` merely follow a staff line.
    ///
    /// Only the first, middle and last points are checked against the line
    /// closest to the first point.
    fn is_staff_arc(&self, points: &[PixelPoint]) -> bool {
        if points.len() < self.params.min_staff_arc_length {
            return false;
        }

        let Some(line) = self.staves.closest_line(points[0]) else {
            return false;
        };

        let mut max_dist = 0.0_f64;
        let mut max_dy = f64::NEG_INFINITY;
        let mut min_dy = f64::INFINITY;

        for i in [0, points.len() / 2, points.len() - 1] {
            let p = points[i];
            let dist = f64::from(p.y) - line.y_at(f64::from(p.x));
            max_dist = max_dist.max(dist.abs());
            max_dy = max_dy.max(dist);
            min_dy = min_dy.min(dist);
        }

        max_dist < self.params.min_staff_line_distance
            && (max_dy - min_dy) < self.params.min_staff_line_distance
    }
}
