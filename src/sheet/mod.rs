//! Page-level services consumed by arc retrieval and symbol assembly.
//!
//! Scale and skew are measured upstream; staff lines come from the grid
//! detection stage. Only the queries needed here are exposed.

mod scale;
mod staff;

pub use scale::{Scale, Skew};
pub use staff::{LinearStaffLine, Staff, StaffIndex, StaffLine, StaffManager, SystemId};
