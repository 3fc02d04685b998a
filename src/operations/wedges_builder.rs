use tracing::{debug, info, warn};

use crate::config::WedgeParameters;
use crate::math::distance_2d::inverted_slope;
use crate::math::{to_point2, Rect};
use crate::sheet::StaffIndex;
use crate::sig::{
    GradeImpacts, InterSink, LineSegment, SegmentInfo, SegmentInter, WedgeInter, WedgeShape,
};

/// Assembles hairpins out of pairs of straight segments.
///
/// Two passes run over the segment pool: crescendos first (segments meeting
/// on their left ends), then diminuendos (meeting on their right ends). In
/// each pass candidates are sorted on the meeting side, so the scan for a
/// partner stops as soon as ends lie beyond the lookup area.
pub struct WedgesBuilder<'a> {
    params: &'a WedgeParameters,
    staves: &'a dyn StaffIndex,
}

impl<'a> WedgesBuilder<'a> {
    /// Creates a new wedge builder attaching wedges through `staves`.
    #[must_use]
    pub fn new(params: &'a WedgeParameters, staves: &'a dyn StaffIndex) -> Self {
        Self { params, staves }
    }

    /// Pairs segments of `segments` into wedges inserted into `sig`.
    ///
    /// Matched segments are removed from the pool, so no segment ends up in
    /// two wedges. Returns the wedges created, in creation order.
    pub fn execute(&self, segments: &mut Vec<SegmentInter>, sig: &mut dyn InterSink) -> Vec<WedgeInter> {
        let mut wedges = Vec::new();

        for reverse in [true, false] {
            if reverse {
                segments.sort_by_key(|s| s.bounds().x);
            } else {
                segments.sort_by_key(|s| s.bounds().max_x());
            }

            let mut active = vec![true; segments.len()];

            for i in 0..segments.len() {
                if !active[i] {
                    continue;
                }

                let area = self.lookup_area(segments[i].info_mut(), reverse);

                for j in (i + 1)..segments.len() {
                    if !active[j] {
                        continue;
                    }

                    let end = segments[j].info().end(reverse);

                    if area.contains(end) {
                        let Some(impacts) = self.compute_impacts(&segments[i], &segments[j], reverse)
                        else {
                            continue;
                        };
                        if impacts.grade() >= self.params.min_grade {
                            let wedge = self.create_wedge(&segments[i], &segments[j], reverse, impacts, sig);
                            wedges.push(wedge);
                            active[i] = false;
                            active[j] = false;
                            break;
                        }
                    } else if end.x > area.max_x() {
                        // Pool is sorted on this side.
                        break;
                    }
                }
            }

            let mut flags = active.into_iter();
            segments.retain(|_| flags.next().unwrap_or(true));
        }

        info!(wedges = wedges.len(), remaining = segments.len(), "wedges built");
        wedges
    }

    /// Scores the pair, or rejects it when any gap is out of bounds.
    fn compute_impacts(&self, s1: &SegmentInter, s2: &SegmentInter, reverse: bool) -> Option<GradeImpacts> {
        let p = self.params;

        let imp1 = s1.impacts();
        let d1 = imp1.grade() / imp1.intrinsic_ratio();
        let imp2 = s2.impacts();
        let d2 = imp2.grade() / imp2.intrinsic_ratio();

        let c1 = s1.info().end(reverse);
        let c2 = s2.info().end(reverse);
        let closed_dy = (c1.y - c2.y).abs();
        if closed_dy > p.closed_max_dy {
            return None;
        }
        let c_dy = 1.0 - f64::from(closed_dy) / f64::from(p.closed_max_dy);

        let open1 = s1.info().end(!reverse);
        let open2 = s2.info().end(!reverse);
        let open_dy = (open1.y - open2.y).abs();
        if open_dy < p.open_min_dy_low {
            return None;
        }
        let o_dy = f64::from(open_dy - p.open_min_dy_low)
            / f64::from(p.open_min_dy_high - p.open_min_dy_low);

        let inv_slope = inverted_slope(open1, open2).abs();
        if inv_slope > p.open_max_bias {
            return None;
        }
        let o_bias = 1.0 - inv_slope / p.open_max_bias;

        Some(WedgeInter::wedge_impacts(d1, d2, c_dy, o_dy, o_bias))
    }

    fn create_wedge(
        &self,
        s1: &SegmentInter,
        s2: &SegmentInter,
        reverse: bool,
        impacts: GradeImpacts,
        sig: &mut dyn InterSink,
    ) -> WedgeInter {
        let shape = if reverse {
            WedgeShape::Crescendo
        } else {
            WedgeShape::Diminuendo
        };

        let bounds = s1.bounds().union(s2.bounds());

        let mut l1 = segment_line(s1.info());
        let mut l2 = segment_line(s2.info());
        let swap = match shape {
            WedgeShape::Crescendo => l2.p2.y < l1.p2.y,
            WedgeShape::Diminuendo => l2.p1.y < l1.p1.y,
        };
        if swap {
            std::mem::swap(&mut l1, &mut l2);
        }

        let wedge = WedgeInter::new(shape, l1, l2, bounds, impacts);
        debug!(%shape, grade = wedge.grade(), ?bounds, "wedge created");

        // A wedge belongs to the system of its closest staff only.
        let ref_point = match shape {
            WedgeShape::Crescendo => l1.p1,
            WedgeShape::Diminuendo => l1.p2,
        };
        match self.staves.closest_system(&ref_point) {
            Some(system) => {
                sig.add_vertex(system, wedge.clone());
            }
            None => warn!(%shape, x = ref_point.x, y = ref_point.y, "no staff for wedge"),
        }

        wedge
    }

    /// Region where a partner end must lie, recorded on the segment.
    fn lookup_area(&self, info: &mut SegmentInfo, reverse: bool) -> Rect {
        let end = info.end(reverse);
        let dx = self.params.closed_max_dx;
        let x = if reverse { end.x } else { end.x - dx + 1 };
        let mut rect = Rect::new(x, end.y, dx, 0);
        rect.grow(0, (1 + self.params.closed_max_dy) / 2);
        info.add_attachment(if reverse { "<" } else { ">" }, rect);
        rect
    }
}

fn segment_line(info: &SegmentInfo) -> LineSegment {
    LineSegment::new(to_point2(info.end(true)), to_point2(info.end(false)))
}
