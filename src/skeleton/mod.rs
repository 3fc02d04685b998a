mod direction;
mod junction;
mod status;

pub use direction::Direction;
pub use status::PixelStatus;

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::arc::{Arc, ArcId};
use crate::error::SkeletonError;
use crate::math::PixelPoint;

/// A thinned page image as a buffer of pixel statuses, plus the arcs
/// retrieved from it.
///
/// Arcs live in an arena and are referenced by [`ArcId`]. The endpoint index
/// maps every end coordinate (arc pixel or junction) to the arcs attached
/// there.
#[derive(Debug)]
pub struct Skeleton {
    width: usize,
    height: usize,
    buf: Vec<PixelStatus>,
    arcs: SlotMap<ArcId, Arc>,
    arcs_map: HashMap<PixelPoint, Vec<ArcId>>,
    arcs_ends: Vec<PixelPoint>,
}

impl Skeleton {
    /// Creates an all-background skeleton.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is below 3 pixels.
    pub fn new(width: usize, height: usize) -> Result<Self, SkeletonError> {
        Self::from_statuses(width, height, vec![PixelStatus::Background; width * height])
    }

    /// Wraps a row-major buffer of statuses.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is below 3 pixels or the buffer
    /// length does not match.
    pub fn from_statuses(
        width: usize,
        height: usize,
        buf: Vec<PixelStatus>,
    ) -> Result<Self, SkeletonError> {
        if width < 3 || height < 3 {
            return Err(SkeletonError::TooSmall { width, height });
        }
        let expected = width * height;
        if buf.len() != expected {
            return Err(SkeletonError::BufferSizeMismatch {
                expected,
                actual: buf.len(),
            });
        }
        Ok(Self {
            width,
            height,
            buf,
            arcs: SlotMap::with_key(),
            arcs_map: HashMap::new(),
            arcs_ends: Vec::new(),
        })
    }

    /// Decodes a row-major buffer of 8-bit status codes.
    ///
    /// # Errors
    ///
    /// Returns an error on a size mismatch or an unknown code.
    pub fn from_codes(width: usize, height: usize, codes: &[u8]) -> Result<Self, SkeletonError> {
        let buf = codes
            .iter()
            .map(|&c| PixelStatus::from_code(c))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_statuses(width, height, buf)
    }

    /// Builds the statuses of a thinned binary mask, flagging junctions.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is below 3 pixels or the mask
    /// length does not match.
    pub fn from_foreground(width: usize, height: usize, mask: &[bool]) -> Result<Self, SkeletonError> {
        if mask.len() != width * height {
            return Err(SkeletonError::BufferSizeMismatch {
                expected: width * height,
                actual: mask.len(),
            });
        }
        Self::from_statuses(width, height, junction::mark_junctions(width, height, mask))
    }

    /// Encodes the buffer as 8-bit status codes.
    #[must_use]
    pub fn to_codes(&self) -> Vec<u8> {
        self.buf.iter().map(|s| s.code()).collect()
    }

    /// Returns the buffer width in pixels.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the buffer height in pixels.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, p: PixelPoint) -> Option<usize> {
        let x = usize::try_from(p.x).ok()?;
        let y = usize::try_from(p.y).ok()?;
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }

    /// Status at `p`, background outside the buffer.
    #[must_use]
    pub fn get(&self, p: PixelPoint) -> PixelStatus {
        self.index(p).map_or(PixelStatus::Background, |i| self.buf[i])
    }

    /// Sets the status at `p`.
    ///
    /// Writes outside the buffer assert in debug builds and are dropped otherwise.
    pub fn set(&mut self, p: PixelPoint, status: PixelStatus) {
        debug_assert!(self.index(p).is_some(), "write outside skeleton at {p:?}");
        if let Some(i) = self.index(p) {
            self.buf[i] = status;
        }
    }

    /// Checks the preconditions of a retrieval sweep.
    ///
    /// # Errors
    ///
    /// Returns an error if a foreground pixel lies on the 1-pixel border or a
    /// junction has no foreground neighbor.
    pub fn validate(&self) -> Result<(), SkeletonError> {
        for (i, status) in self.buf.iter().enumerate() {
            if !status.is_foreground() {
                continue;
            }
            let (x, y) = (i % self.width, i / self.width);
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let p = PixelPoint::new(x as i32, y as i32);

            if x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1 {
                return Err(SkeletonError::BorderNotBackground { x: p.x, y: p.y });
            }
            if status.is_junction()
                && !Direction::ALL
                    .iter()
                    .any(|d| self.get(d.step(p)).is_foreground())
            {
                return Err(SkeletonError::IsolatedJunction { x: p.x, y: p.y });
            }
        }
        Ok(())
    }

    // --- Arc arena ---

    pub(crate) fn add_arc(&mut self, arc: Arc) -> ArcId {
        self.arcs.insert(arc)
    }

    /// Indexes `id` under the coordinate `p`.
    pub(crate) fn index_end(&mut self, p: PixelPoint, id: ArcId) {
        let ids = self.arcs_map.entry(p).or_default();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }

    /// Records an arc pixel end for abscissa range queries.
    pub(crate) fn push_end(&mut self, p: PixelPoint) {
        self.arcs_ends.push(p);
    }

    /// Sorts arc ends by abscissa, keeping discovery order for ties.
    pub(crate) fn sort_ends(&mut self) {
        self.arcs_ends.sort_by_key(|p| p.x);
    }

    #[must_use]
    pub fn arc(&self, id: ArcId) -> Option<&Arc> {
        self.arcs.get(id)
    }

    pub fn arcs(&self) -> impl Iterator<Item = (ArcId, &Arc)> {
        self.arcs.iter()
    }

    #[must_use]
    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// Arcs indexed at the coordinate `p`.
    #[must_use]
    pub fn arcs_at(&self, p: PixelPoint) -> &[ArcId] {
        self.arcs_map.get(&p).map(Vec::as_slice).unwrap_or_default()
    }

    /// Every indexed coordinate with the arcs ending there.
    pub fn indexed_ends(&self) -> impl Iterator<Item = (PixelPoint, &[ArcId])> {
        self.arcs_map.iter().map(|(p, ids)| (*p, ids.as_slice()))
    }

    /// Arc pixel ends, sorted by abscissa once a sweep has completed.
    #[must_use]
    pub fn arcs_ends(&self) -> &[PixelPoint] {
        &self.arcs_ends
    }

    /// Arc ends whose abscissa lies in `[x_min, x_max]`.
    #[must_use]
    pub fn ends_in_range(&self, x_min: i32, x_max: i32) -> &[PixelPoint] {
        let start = self.arcs_ends.partition_point(|p| p.x < x_min);
        let stop = self.arcs_ends.partition_point(|p| p.x <= x_max);
        if start >= stop {
            return &[];
        }
        &self.arcs_ends[start..stop]
    }
}
