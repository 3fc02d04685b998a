use std::collections::BTreeMap;

use crate::arc::{Arc, ArcShape};
use crate::math::{PixelPoint, Rect};

use super::impacts::GradeImpacts;

const SEGMENT_NAMES: &[&str] = &["dist"];
const SEGMENT_WEIGHTS: &[f64] = &[1.0];

/// Geometry of a straight segment: its ends from left to right and its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentInfo {
    left: PixelPoint,
    right: PixelPoint,
    bounds: Rect,
    attachments: BTreeMap<String, Rect>,
}

impl SegmentInfo {
    /// Builds the info of the segment running through `points`.
    ///
    /// Returns `None` for an empty sequence.
    #[must_use]
    pub fn from_points(points: &[PixelPoint]) -> Option<Self> {
        let (&first, &last) = (points.first()?, points.last()?);
        let (left, right) = if last.x < first.x {
            (last, first)
        } else {
            (first, last)
        };
        Some(Self {
            left,
            right,
            bounds: Rect::bounding(points),
            attachments: BTreeMap::new(),
        })
    }

    /// Left end when `reverse`, right end otherwise.
    #[must_use]
    pub fn end(&self, reverse: bool) -> PixelPoint {
        if reverse {
            self.left
        } else {
            self.right
        }
    }

    #[must_use]
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Records a named region, replacing any previous one under that name.
    pub fn add_attachment(&mut self, name: impl Into<String>, rect: Rect) {
        self.attachments.insert(name.into(), rect);
    }

    #[must_use]
    pub fn attachment(&self, name: &str) -> Option<&Rect> {
        self.attachments.get(name)
    }

    #[must_use]
    pub fn attachments(&self) -> &BTreeMap<String, Rect> {
        &self.attachments
    }
}

/// A straight arc promoted to a symbol candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentInter {
    info: SegmentInfo,
    impacts: GradeImpacts,
}

impl SegmentInter {
    /// Creates a segment inter from its geometry and impacts.
    #[must_use]
    pub fn new(info: SegmentInfo, impacts: GradeImpacts) -> Self {
        Self { info, impacts }
    }

    /// Impacts of a segment whose points lie `dist` (normalized) away from its line.
    #[must_use]
    pub fn line_impacts(dist: f64) -> GradeImpacts {
        GradeImpacts::new(SEGMENT_NAMES, SEGMENT_WEIGHTS, &[dist])
    }

    /// Promotes an arc classified as a line.
    ///
    /// The intrinsic impact is `1 - mean_distance / max_line_distance`.
    /// Returns `None` for any other arc.
    #[must_use]
    pub fn from_arc(arc: &Arc, max_line_distance: f64) -> Option<Self> {
        if arc.shape() != Some(ArcShape::Line) || max_line_distance <= 0.0 {
            return None;
        }
        let line = arc.model()?.as_line()?;
        let info = SegmentInfo::from_points(arc.points())?;
        let dist = 1.0 - line.mean_distance() / max_line_distance;
        Some(Self::new(info, Self::line_impacts(dist)))
    }

    /// Returns the segment geometry.
    #[must_use]
    pub fn info(&self) -> &SegmentInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut SegmentInfo {
        &mut self.info
    }

    #[must_use]
    pub fn bounds(&self) -> &Rect {
        self.info.bounds()
    }

    #[must_use]
    pub fn impacts(&self) -> &GradeImpacts {
        &self.impacts
    }

    #[must_use]
    pub fn grade(&self) -> f64 {
        self.impacts.grade()
    }
}
