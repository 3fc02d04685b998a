use serde::{Deserialize, Serialize};

use crate::math::PixelPoint;

use super::{BasicLine, Circle};

/// A geometric model fitted to an arc.
#[derive(Debug, Clone, PartialEq)]
pub enum Model {
    /// A straight line.
    Line(BasicLine),
    /// A circle, for curved arcs.
    Circle(Circle),
}

impl Model {
    /// Mean distance from the fitted points to the model.
    #[must_use]
    pub fn mean_distance(&self) -> f64 {
        match self {
            Model::Line(line) => line.mean_distance(),
            Model::Circle(circle) => circle.mean_distance(),
        }
    }

    #[must_use]
    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Model::Circle(circle) => Some(circle),
            Model::Line(_) => None,
        }
    }

    #[must_use]
    pub fn as_line(&self) -> Option<&BasicLine> {
        match self {
            Model::Line(line) => Some(line),
            Model::Circle(_) => None,
        }
    }
}

/// Service fitting a geometric model to a point sequence.
///
/// Returns `None` when neither a line nor a circle describes the points.
pub trait ModelFitter {
    fn compute_model(&self, points: &[PixelPoint]) -> Option<Model>;
}

/// Circle-first model fitter with line fallback.
///
/// All distances are in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultModelFitter {
    /// Maximum mean radial distance for a circle to be accepted.
    pub max_circle_distance: f64,
    /// Smallest acceptable circle radius.
    pub min_radius: f64,
    /// Largest acceptable circle radius; flatter arcs are lines.
    pub max_radius: f64,
    /// Maximum mean perpendicular distance for a line to be accepted.
    pub max_line_distance: f64,
}

impl Default for DefaultModelFitter {
    fn default() -> Self {
        Self {
            max_circle_distance: 1.0,
            min_radius: 5.0,
            max_radius: 2000.0,
            max_line_distance: 1.0,
        }
    }
}

impl ModelFitter for DefaultModelFitter {
    fn compute_model(&self, points: &[PixelPoint]) -> Option<Model> {
        if let Ok(circle) = Circle::fit(points) {
            if circle.mean_distance() <= self.max_circle_distance
                && (self.min_radius..=self.max_radius).contains(&circle.radius())
            {
                return Some(Model::Circle(circle));
            }
        }

        match BasicLine::fit(points) {
            Ok(line) if line.mean_distance() <= self.max_line_distance => Some(Model::Line(line)),
            _ => None,
        }
    }
}
