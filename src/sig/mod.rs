//! Symbol interpretations and the graph receiving them.

mod graph;
mod impacts;
mod segment;
mod wedge;

pub use graph::{InterId, InterSink, Sig};
pub use impacts::{GradeImpacts, INTRINSIC_RATIO};
pub use segment::{SegmentInfo, SegmentInter};
pub use wedge::{LineSegment, WedgeInter, WedgeShape};
