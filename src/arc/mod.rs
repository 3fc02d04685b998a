mod classify;

pub use classify::ShapeClassifier;

use crate::geometry::Model;
use crate::math::PixelPoint;

slotmap::new_key_type! {
    /// Unique identifier for an arc in the skeleton arena.
    pub struct ArcId;
}

/// Classification of a traced arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArcShape {
    /// Too few points to say anything.
    Short,
    /// Portion of a staff line.
    StaffArc,
    /// Straight line, neither stem nor bar line.
    Line,
    /// Circular arc, candidate slur portion.
    Slur,
    /// Nothing of interest.
    Irrelevant,
}

impl ArcShape {
    pub const ALL: [ArcShape; 5] = [
        ArcShape::Short,
        ArcShape::StaffArc,
        ArcShape::Line,
        ArcShape::Slur,
        ArcShape::Irrelevant,
    ];

    #[must_use]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub fn from_ordinal(ordinal: u8) -> Option<ArcShape> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }

    /// True when arcs of this shape are kept for later stages.
    #[must_use]
    pub fn is_slur_relevant(self) -> bool {
        matches!(self, ArcShape::StaffArc | ArcShape::Line | ArcShape::Slur)
    }
}

/// An arc: a chain of skeleton pixels between two ends.
///
/// Points run from one physical end to the other. Each end may be bound by a
/// junction: the start junction precedes the first point, the stop junction
/// follows the last one. A link between two touching junctions has no point.
#[derive(Debug, Clone, Default)]
pub struct Arc {
    points: Vec<PixelPoint>,
    start_junction: Option<PixelPoint>,
    stop_junction: Option<PixelPoint>,
    shape: Option<ArcShape>,
    model: Option<Model>,
}

impl Arc {
    /// Creates an empty arc, optionally leaving from a junction.
    #[must_use]
    pub fn new(start_junction: Option<PixelPoint>) -> Self {
        Self {
            start_junction,
            ..Self::default()
        }
    }

    /// Creates a point-less arc between two touching junctions.
    #[must_use]
    pub fn junction_link(start: PixelPoint, stop: PixelPoint) -> Self {
        Self {
            start_junction: Some(start),
            stop_junction: Some(stop),
            ..Self::default()
        }
    }

    /// Returns the arc points, from one end to the other.
    #[must_use]
    pub fn points(&self) -> &[PixelPoint] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn length(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point when `reverse`, last point otherwise.
    #[must_use]
    pub fn end(&self, reverse: bool) -> Option<PixelPoint> {
        if reverse {
            self.points.first().copied()
        } else {
            self.points.last().copied()
        }
    }

    /// Start junction when `reverse`, stop junction otherwise.
    #[must_use]
    pub fn junction(&self, reverse: bool) -> Option<PixelPoint> {
        if reverse {
            self.start_junction
        } else {
            self.stop_junction
        }
    }

    pub(crate) fn set_junction(&mut self, junction: PixelPoint, reverse: bool) {
        if reverse {
            self.start_junction = Some(junction);
        } else {
            self.stop_junction = Some(junction);
        }
    }

    pub(crate) fn push_point(&mut self, p: PixelPoint) {
        self.points.push(p);
    }

    /// Prepends points collected while walking backwards from the first point.
    pub(crate) fn prepend_walked(&mut self, mut walked: Vec<PixelPoint>) {
        if walked.is_empty() {
            return;
        }
        walked.reverse();
        walked.append(&mut self.points);
        self.points = walked;
    }

    /// Shape, once classified.
    #[must_use]
    pub fn shape(&self) -> Option<ArcShape> {
        self.shape
    }

    /// Returns the fitted model, for lines and slurs.
    #[must_use]
    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    pub(crate) fn set_classification(&mut self, shape: ArcShape, model: Option<Model>) {
        self.shape = Some(shape);
        self.model = model;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_round_trip() {
        for shape in ArcShape::ALL {
            assert_eq!(ArcShape::from_ordinal(shape.ordinal()), Some(shape));
        }
        assert_eq!(ArcShape::from_ordinal(5), None);
    }

    #[test]
    fn relevance() {
        assert!(!ArcShape::Short.is_slur_relevant());
        assert!(!ArcShape::Irrelevant.is_slur_relevant());
        assert!(ArcShape::Line.is_slur_relevant());
        assert!(ArcShape::Slur.is_slur_relevant());
        assert!(ArcShape::StaffArc.is_slur_relevant());
    }

    #[test]
    fn prepend_keeps_true_order() {
        let mut arc = Arc::new(None);
        arc.push_point(PixelPoint::new(5, 0));
        arc.push_point(PixelPoint::new(6, 0));
        // Walking backwards from (5, 0) meets (4, 0) then (3, 0).
        arc.prepend_walked(vec![PixelPoint::new(4, 0), PixelPoint::new(3, 0)]);
        let xs: Vec<i32> = arc.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![3, 4, 5, 6]);
        assert_eq!(arc.end(true), Some(PixelPoint::new(3, 0)));
        assert_eq!(arc.end(false), Some(PixelPoint::new(6, 0)));
    }

    #[test]
    fn junction_sides() {
        let mut arc = Arc::new(Some(PixelPoint::new(1, 1)));
        arc.set_junction(PixelPoint::new(9, 9), false);
        assert_eq!(arc.junction(true), Some(PixelPoint::new(1, 1)));
        assert_eq!(arc.junction(false), Some(PixelPoint::new(9, 9)));

        let link = Arc::junction_link(PixelPoint::new(2, 2), PixelPoint::new(3, 2));
        assert!(link.is_empty());
        assert_eq!(link.end(true), None);
    }
}
