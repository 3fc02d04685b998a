use tracing::{info, trace};

use crate::arc::{Arc, ArcShape, ShapeClassifier};
use crate::config::ArcParameters;
use crate::error::Result;
use crate::geometry::ModelFitter;
use crate::math::PixelPoint;
use crate::sheet::{Skew, StaffIndex};
use crate::skeleton::{Direction, PixelStatus, Skeleton};

/// Outcome of one step along an arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    /// Moved to the next arc pixel.
    Continue,
    /// Arrived at a junction.
    Switch,
    /// Dead end, or closed back onto a visited pixel.
    End,
}

/// Walking position: current pixel and the direction it was reached along.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    point: PixelPoint,
    heading: Option<Direction>,
}

/// Counts gathered during a sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetrievalSummary {
    shapes: [usize; ArcShape::ALL.len()],
    /// Arcs kept in the skeleton arena.
    pub kept: usize,
    /// Arcs discarded, their interior pixels hidden.
    pub hidden: usize,
    /// Point-less arcs between touching junctions.
    pub junction_links: usize,
}

impl RetrievalSummary {
    /// Number of traced arcs classified as `shape`.
    #[must_use]
    pub fn count(&self, shape: ArcShape) -> usize {
        self.shapes[usize::from(shape.ordinal())]
    }

    /// Number of traced arcs, junction links excluded.
    #[must_use]
    pub fn traced(&self) -> usize {
        self.shapes.iter().sum()
    }

    fn record(&mut self, shape: ArcShape) {
        self.shapes[usize::from(shape.ordinal())] += 1;
        if shape.is_slur_relevant() {
            self.kept += 1;
        } else {
            self.hidden += 1;
        }
    }
}

/// Retrieves every arc of a skeleton and classifies it.
///
/// A single row-major sweep visits the interior pixels. Unvisited arc pixels
/// seed a two-way walk, unvisited junctions fan out to their branches. Pixel
/// statuses record what has been visited, so every pixel is walked at most
/// once and sweeping a retrieved skeleton again is a no-op.
///
/// Kept arcs (staff arcs, lines, slurs) are stored in the skeleton arena and
/// indexed by both end pixels. Other arcs are dropped and their interior
/// pixels hidden. Both ends of every traced arc carry its shape.
pub struct ArcRetriever<'a> {
    classifier: ShapeClassifier<'a>,
}

impl<'a> ArcRetriever<'a> {
    /// Creates a new retriever classifying arcs with the page services.
    #[must_use]
    pub fn new(
        params: &'a ArcParameters,
        skew: Skew,
        staves: &'a dyn StaffIndex,
        fitter: &'a dyn ModelFitter,
    ) -> Self {
        Self {
            classifier: ShapeClassifier::new(params, skew, staves, fitter),
        }
    }

    /// Sweeps `skeleton`, filling its arc arena and endpoint index.
    ///
    /// # Errors
    ///
    /// Returns an error if the skeleton has foreground pixels on its border
    /// or an isolated junction. Nothing is modified in that case.
    pub fn execute(&self, skeleton: &mut Skeleton) -> Result<RetrievalSummary> {
        skeleton.validate()?;

        let mut summary = RetrievalSummary::default();

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let (width, height) = (skeleton.width() as i32, skeleton.height() as i32);

        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let p = PixelPoint::new(x, y);
                match skeleton.get(p) {
                    PixelStatus::Arc => self.scan_arc(skeleton, p, None, None, &mut summary),
                    PixelStatus::Junction => self.scan_junction(skeleton, p, &mut summary),
                    _ => {}
                }
            }
        }

        skeleton.sort_ends();

        info!(
            traced = summary.traced(),
            kept = summary.kept,
            hidden = summary.hidden,
            junction_links = summary.junction_links,
            "arcs retrieved"
        );
        Ok(summary)
    }

    /// Scans all branches leaving the junction at `junction`.
    fn scan_junction(&self, skeleton: &mut Skeleton, junction: PixelPoint, summary: &mut RetrievalSummary) {
        skeleton.set(junction, PixelStatus::JunctionProcessed);

        for dir in Direction::ALL {
            let next = dir.step(junction);
            match skeleton.get(next) {
                PixelStatus::Arc => self.scan_arc(skeleton, next, Some(junction), Some(dir), summary),
                PixelStatus::Junction => {
                    let id = skeleton.add_arc(Arc::junction_link(junction, next));
                    skeleton.index_end(junction, id);
                    skeleton.index_end(next, id);
                    summary.junction_links += 1;
                }
                _ => {}
            }
        }
    }

    /// Traces the arc through `seed`, classifies it, then keeps or hides it.
    ///
    /// Without a start junction the seed may lie anywhere on the arc, so the
    /// walk goes both ways from it.
    fn scan_arc(
        &self,
        skeleton: &mut Skeleton,
        seed: PixelPoint,
        start_junction: Option<PixelPoint>,
        heading: Option<Direction>,
        summary: &mut RetrievalSummary,
    ) {
        let mut arc = Arc::new(start_junction);
        arc.push_point(seed);
        skeleton.set(seed, PixelStatus::Processed(None));

        walk_along(skeleton, &mut arc, seed, heading, false);

        if start_junction.is_none() {
            let points = arc.points();
            let back = if points.len() > 1 {
                Direction::between(points[1], points[0])
            } else {
                arc.junction(false)
                    .and_then(|junction| Direction::between(junction, points[0]))
            };
            walk_along(skeleton, &mut arc, seed, back, true);
        }

        let (shape, model) = self.classifier.determine_shape(arc.points());
        trace!(?shape, length = arc.length(), "arc classified");
        arc.set_classification(shape, model);
        store_shape(skeleton, &arc, shape);
        summary.record(shape);

        if !shape.is_slur_relevant() {
            hide(skeleton, &arc);
            return;
        }

        let (Some(first), Some(last)) = (arc.end(true), arc.end(false)) else {
            return;
        };
        let id = skeleton.add_arc(arc);
        skeleton.index_end(first, id);
        skeleton.push_end(first);
        skeleton.index_end(last, id);
        if last != first {
            skeleton.push_end(last);
        }
    }
}

/// Walks from `start` while arc pixels follow, marking them processed.
///
/// Points are appended, or prepended when walking in `reverse`.
fn walk_along(
    skeleton: &mut Skeleton,
    arc: &mut Arc,
    start: PixelPoint,
    heading: Option<Direction>,
    reverse: bool,
) {
    let mut cursor = Cursor {
        point: start,
        heading,
    };
    let mut walked = Vec::new();

    while step(skeleton, arc, &mut cursor, reverse) == Status::Continue {
        skeleton.set(cursor.point, PixelStatus::Processed(None));
        if reverse {
            walked.push(cursor.point);
        } else {
            arc.push_point(cursor.point);
        }
    }

    arc.prepend_walked(walked);
}

/// Moves the cursor one pixel along the arc.
///
/// Junctions are looked for first, among the directions that do not double
/// back. A junction found becomes the arc boundary on the walking side.
fn step(skeleton: &Skeleton, arc: &mut Arc, cursor: &mut Cursor, reverse: bool) -> Status {
    let scan = Direction::scan_order(cursor.heading);
    let from = cursor.point;

    if let Some(&dir) = scan.iter().find(|d| skeleton.get(d.step(from)).is_junction()) {
        arc.set_junction(dir.step(from), reverse);
        cursor.heading = Some(dir);
        return Status::Switch;
    }

    if let Some(&dir) = scan
        .iter()
        .find(|d| skeleton.get(d.step(from)) == PixelStatus::Arc)
    {
        cursor.point = dir.step(from);
        cursor.heading = Some(dir);
        return Status::Continue;
    }

    Status::End
}

/// Caches the shape in both end pixels.
fn store_shape(skeleton: &mut Skeleton, arc: &Arc, shape: ArcShape) {
    let status = PixelStatus::Processed(Some(shape));
    for end in [arc.end(true), arc.end(false)].into_iter().flatten() {
        skeleton.set(end, status);
    }
}

/// Hides the interior pixels of a discarded arc.
fn hide(skeleton: &mut Skeleton, arc: &Arc) {
    let points = arc.points();
    if points.len() > 2 {
        for &p in &points[1..points.len() - 1] {
            skeleton.set(p, PixelStatus::Hidden);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::config::ArcConstants;
    use crate::error::{ScorearcError, SkeletonError};
    use crate::geometry::DefaultModelFitter;
    use crate::sheet::{Scale, StaffManager};
    use crate::test_support::{init_tracing, Canvas};

    fn pt(x: i32, y: i32) -> PixelPoint {
        PixelPoint::new(x, y)
    }

    /// Interline 10: quorum 15 points.
    fn retrieve(skeleton: &mut Skeleton) -> RetrievalSummary {
        init_tracing();
        let params = ArcParameters::new(&Scale::new(10).unwrap(), &ArcConstants::default());
        let staves = StaffManager::default();
        let fitter = DefaultModelFitter::default();
        ArcRetriever::new(&params, Skew::default(), &staves, &fitter)
            .execute(skeleton)
            .unwrap()
    }

    fn kept(skeleton: &Skeleton) -> Vec<&Arc> {
        skeleton.arcs().map(|(_, arc)| arc).filter(|arc| !arc.is_empty()).collect()
    }

    fn t_shape() -> Skeleton {
        let mut canvas = Canvas::new(60, 50);
        canvas.line(pt(5, 20), pt(45, 20));
        canvas.line(pt(25, 21), pt(25, 40));
        canvas.skeleton()
    }

    #[test]
    fn straight_chain_is_one_line() {
        let mut canvas = Canvas::new(40, 20);
        canvas.line(pt(5, 10), pt(30, 10));
        let mut sk = canvas.skeleton();

        let summary = retrieve(&mut sk);
        assert_eq!(summary.count(ArcShape::Line), 1);
        assert_eq!(summary.traced(), 1);

        let arcs = kept(&sk);
        assert_eq!(arcs.len(), 1);
        let arc = arcs[0];
        assert_eq!(arc.length(), 26);
        assert_eq!(arc.end(true), Some(pt(5, 10)));
        assert_eq!(arc.end(false), Some(pt(30, 10)));
        assert!(arc.model().unwrap().as_line().is_some());

        assert_eq!(sk.get(pt(5, 10)), PixelStatus::Processed(Some(ArcShape::Line)));
        assert_eq!(sk.get(pt(30, 10)), PixelStatus::Processed(Some(ArcShape::Line)));
        assert_eq!(sk.get(pt(17, 10)), PixelStatus::Processed(None));
        assert_eq!(sk.arcs_ends(), &[pt(5, 10), pt(30, 10)]);
    }

    #[test]
    fn seed_inside_slanted_line_walks_both_ways() {
        // The top row holds several pixels: the sweep meets one left of the end.
        let mut canvas = Canvas::new(50, 30);
        canvas.line(pt(5, 20), pt(40, 5));
        let mut sk = canvas.skeleton();
        assert_eq!(sk.get(pt(39, 5)), PixelStatus::Arc);

        let summary = retrieve(&mut sk);
        assert_eq!(summary.traced(), 1);
        assert_eq!(summary.count(ArcShape::Line), 1);

        let arc = kept(&sk)[0];
        assert_eq!(arc.length(), 36);
        let ends = [arc.end(true).unwrap(), arc.end(false).unwrap()];
        assert!(ends.contains(&pt(5, 20)));
        assert!(ends.contains(&pt(40, 5)));
        for pair in arc.points().windows(2) {
            assert!(Direction::between(pair[0], pair[1]).is_some(), "gap in {pair:?}");
        }
    }

    #[test]
    fn short_filament_hidden() {
        let mut canvas = Canvas::new(20, 20);
        canvas.line(pt(10, 10), pt(12, 10));
        let mut sk = canvas.skeleton();

        let summary = retrieve(&mut sk);
        assert_eq!(summary.count(ArcShape::Short), 1);
        assert_eq!(summary.hidden, 1);
        assert_eq!(sk.arc_count(), 0);
        assert!(sk.arcs_ends().is_empty());
        assert!(sk.arcs_at(pt(10, 10)).is_empty());
        assert_eq!(sk.get(pt(10, 10)), PixelStatus::Processed(Some(ArcShape::Short)));
        assert_eq!(sk.get(pt(11, 10)), PixelStatus::Hidden);
        assert_eq!(sk.get(pt(12, 10)), PixelStatus::Processed(Some(ArcShape::Short)));
    }

    #[test]
    fn t_junction_splits_branches() {
        let mut sk = t_shape();
        let junction = pt(25, 20);
        assert_eq!(sk.get(junction), PixelStatus::Junction);

        let summary = retrieve(&mut sk);
        assert_eq!(summary.traced(), 3);
        assert_eq!(summary.count(ArcShape::Line), 2);
        // The stem-like branch is vertical.
        assert_eq!(summary.count(ArcShape::Irrelevant), 1);
        assert_eq!(sk.get(junction), PixelStatus::JunctionProcessed);

        let arcs = kept(&sk);
        assert_eq!(arcs.len(), 2);
        let left = arcs.iter().find(|a| a.end(true) == Some(pt(5, 20))).unwrap();
        assert_eq!(left.end(false), Some(pt(24, 20)));
        assert_eq!(left.junction(false), Some(junction));
        let right = arcs.iter().find(|a| a.end(true) == Some(pt(26, 20))).unwrap();
        assert_eq!(right.junction(true), Some(junction));
        assert_eq!(right.end(false), Some(pt(45, 20)));

        assert_eq!(sk.get(pt(25, 21)), PixelStatus::Processed(Some(ArcShape::Irrelevant)));
        assert_eq!(sk.get(pt(25, 30)), PixelStatus::Hidden);
    }

    #[test]
    fn touching_junctions_linked() {
        let mut sk = Skeleton::new(12, 10).unwrap();
        sk.set(pt(4, 5), PixelStatus::Arc);
        sk.set(pt(5, 5), PixelStatus::Junction);
        sk.set(pt(6, 5), PixelStatus::Junction);
        sk.set(pt(7, 5), PixelStatus::Arc);

        let summary = retrieve(&mut sk);
        assert_eq!(summary.junction_links, 1);
        assert_eq!(summary.count(ArcShape::Short), 2);
        assert_eq!(sk.arc_count(), 1);

        let ids = sk.arcs_at(pt(5, 5));
        assert_eq!(ids.len(), 1);
        assert_eq!(sk.arcs_at(pt(6, 5)), ids);
        let link = sk.arc(ids[0]).unwrap();
        assert!(link.is_empty());
        assert_eq!(link.junction(true), Some(pt(5, 5)));
        assert_eq!(link.junction(false), Some(pt(6, 5)));
        assert_eq!(sk.get(pt(6, 5)), PixelStatus::JunctionProcessed);
    }

    #[test]
    fn half_circle_is_slur() {
        let mut canvas = Canvas::new(200, 150);
        canvas.upper_half_circle(100.0, 100.0, 30.0);
        let mut sk = canvas.skeleton();

        let summary = retrieve(&mut sk);
        assert_eq!(summary.count(ArcShape::Slur), 1);
        let arc = kept(&sk)[0];
        let ends = [arc.end(true).unwrap(), arc.end(false).unwrap()];
        assert!(ends.contains(&pt(70, 100)));
        assert!(ends.contains(&pt(130, 100)));
        let circle = arc.model().unwrap().as_circle().unwrap();
        assert!((circle.radius() - 30.0).abs() < 1.0);
    }

    #[test]
    fn border_pixel_rejected_before_sweep() {
        let mut sk = Skeleton::new(10, 10).unwrap();
        sk.set(pt(0, 4), PixelStatus::Arc);
        sk.set(pt(1, 4), PixelStatus::Arc);
        let before = sk.to_codes();

        let params = ArcParameters::new(&Scale::new(10).unwrap(), &ArcConstants::default());
        let staves = StaffManager::default();
        let fitter = DefaultModelFitter::default();
        let err = ArcRetriever::new(&params, Skew::default(), &staves, &fitter)
            .execute(&mut sk)
            .unwrap_err();
        assert!(matches!(
            err,
            ScorearcError::Skeleton(SkeletonError::BorderNotBackground { x: 0, y: 4 })
        ));
        assert_eq!(sk.to_codes(), before);
    }

    fn busy_drawing() -> Skeleton {
        let mut canvas = Canvas::new(120, 100);
        canvas.line(pt(5, 20), pt(45, 20));
        canvas.line(pt(25, 21), pt(25, 40));
        canvas.line(pt(60, 10), pt(110, 35));
        canvas.line(pt(70, 60), pt(72, 60));
        canvas.polyline(&[pt(10, 60), pt(30, 60), pt(30, 90), pt(10, 90), pt(10, 61)]);
        canvas.upper_half_circle(80.0, 90.0, 20.0);
        canvas.skeleton()
    }

    #[test]
    fn sweep_covers_every_pixel_once() {
        let mut sk = busy_drawing();
        retrieve(&mut sk);

        for code in sk.to_codes() {
            let status = PixelStatus::from_code(code).unwrap();
            assert!(status.is_terminal(), "{status:?} left after sweep");
        }

        let mut seen = HashSet::new();
        for arc in kept(&sk) {
            for p in arc.points() {
                assert!(seen.insert(*p), "pixel {p:?} claimed twice");
            }
        }
    }

    #[test]
    fn kept_arcs_indexed_by_both_ends() {
        let mut sk = busy_drawing();
        retrieve(&mut sk);

        for (id, arc) in sk.arcs() {
            let ends: Vec<PixelPoint> = if arc.is_empty() {
                vec![arc.junction(true).unwrap(), arc.junction(false).unwrap()]
            } else {
                vec![arc.end(true).unwrap(), arc.end(false).unwrap()]
            };
            for &end in &ends {
                assert!(sk.arcs_at(end).contains(&id));
            }

            let distinct = if ends[0] == ends[1] { 1 } else { 2 };
            let entries = sk
                .indexed_ends()
                .map(|(_, ids)| ids.iter().filter(|&&other| other == id).count())
                .sum::<usize>();
            assert_eq!(entries, distinct, "index entries of {ends:?}");

            if !arc.is_empty() {
                let listed = sk.arcs_ends().iter().filter(|&p| ends.contains(p)).count();
                assert_eq!(listed, distinct, "listed ends of {ends:?}");
            }
        }

        let ends = sk.arcs_ends();
        assert!(ends.windows(2).all(|w| w[0].x <= w[1].x));
        let strokes = kept(&sk).len();
        assert!(strokes >= 4, "only {strokes} arcs kept");
    }

    #[test]
    fn second_sweep_changes_nothing() {
        let mut sk = busy_drawing();
        let first = retrieve(&mut sk);
        assert!(first.traced() > 0);
        let codes = sk.to_codes();
        let count = sk.arc_count();

        let again = retrieve(&mut sk);
        assert_eq!(again, RetrievalSummary::default());
        assert_eq!(sk.to_codes(), codes);
        assert_eq!(sk.arc_count(), count);
    }
}
