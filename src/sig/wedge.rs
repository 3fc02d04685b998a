use std::fmt;

use crate::math::{Point2, Rect};

use super::impacts::GradeImpacts;

const WEDGE_NAMES: &[&str] = &["s1", "s2", "closedDy", "openDy", "openBias"];
const WEDGE_WEIGHTS: &[f64] = &[1.0, 1.0, 1.0, 1.0, 1.0];

/// Kind of hairpin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WedgeShape {
    /// Closed on the left, opening to the right.
    Crescendo,
    /// Open on the left, closing to the right.
    Diminuendo,
}

impl fmt::Display for WedgeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WedgeShape::Crescendo => write!(f, "CRESCENDO"),
            WedgeShape::Diminuendo => write!(f, "DIMINUENDO"),
        }
    }
}

/// A segment between two points, `p1` on the left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub p1: Point2,
    pub p2: Point2,
}

impl LineSegment {
    /// Creates a segment from `p1` to `p2`.
    #[must_use]
    pub fn new(p1: Point2, p2: Point2) -> Self {
        Self { p1, p2 }
    }
}

/// A hairpin made of two diverging lines.
///
/// `line1` is the upper edge: its left end for a crescendo, its right end for
/// a diminuendo, is never below the same end of `line2`.
#[derive(Debug, Clone, PartialEq)]
pub struct WedgeInter {
    shape: WedgeShape,
    line1: LineSegment,
    line2: LineSegment,
    bounds: Rect,
    impacts: GradeImpacts,
}

impl WedgeInter {
    /// Creates a new wedge inter.
    #[must_use]
    pub fn new(
        shape: WedgeShape,
        line1: LineSegment,
        line2: LineSegment,
        bounds: Rect,
        impacts: GradeImpacts,
    ) -> Self {
        Self {
            shape,
            line1,
            line2,
            bounds,
            impacts,
        }
    }

    /// Impacts of a wedge, from both segment qualities and the three gap scores.
    #[must_use]
    pub fn wedge_impacts(s1: f64, s2: f64, closed_dy: f64, open_dy: f64, open_bias: f64) -> GradeImpacts {
        GradeImpacts::new(
            WEDGE_NAMES,
            WEDGE_WEIGHTS,
            &[s1, s2, closed_dy, open_dy, open_bias],
        )
    }

    /// Returns the wedge shape.
    #[must_use]
    pub fn shape(&self) -> WedgeShape {
        self.shape
    }

    /// Returns the upper edge.
    #[must_use]
    pub fn line1(&self) -> &LineSegment {
        &self.line1
    }

    /// Returns the lower edge.
    #[must_use]
    pub fn line2(&self) -> &LineSegment {
        &self.line2
    }

    /// Returns the bounding box of both edges.
    #[must_use]
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    #[must_use]
    pub fn impacts(&self) -> &GradeImpacts {
        &self.impacts
    }

    #[must_use]
    pub fn grade(&self) -> f64 {
        self.impacts.grade()
    }

    /// Vertical gap between the ends meeting at the closed side.
    #[must_use]
    pub fn closed_dy(&self) -> f64 {
        match self.shape {
            WedgeShape::Crescendo => (self.line1.p1.y - self.line2.p1.y).abs(),
            WedgeShape::Diminuendo => (self.line1.p2.y - self.line2.p2.y).abs(),
        }
    }

    /// Vertical gap between the ends at the open side.
    #[must_use]
    pub fn open_dy(&self) -> f64 {
        match self.shape {
            WedgeShape::Crescendo => (self.line1.p2.y - self.line2.p2.y).abs(),
            WedgeShape::Diminuendo => (self.line1.p1.y - self.line2.p1.y).abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn crescendo() -> WedgeInter {
        WedgeInter::new(
            WedgeShape::Crescendo,
            LineSegment::new(Point2::new(10.0, 50.0), Point2::new(90.0, 30.0)),
            LineSegment::new(Point2::new(10.0, 52.0), Point2::new(90.0, 74.0)),
            Rect::new(10, 30, 81, 45),
            WedgeInter::wedge_impacts(1.0, 1.0, 0.8, 1.0, 1.0),
        )
    }

    #[test]
    fn gaps_follow_shape() {
        let wedge = crescendo();
        assert_relative_eq!(wedge.closed_dy(), 2.0);
        assert_relative_eq!(wedge.open_dy(), 44.0);
    }

    #[test]
    fn impacts_named() {
        let wedge = crescendo();
        assert_eq!(wedge.impacts().len(), 5);
        assert_eq!(wedge.impacts().impact("closedDy"), Some(0.8));
        assert!(wedge.grade() < 0.8 && wedge.grade() > 0.7);
    }

    #[test]
    fn shape_display() {
        assert_eq!(WedgeShape::Crescendo.to_string(), "CRESCENDO");
        assert_eq!(WedgeShape::Diminuendo.to_string(), "DIMINUENDO");
    }
}
