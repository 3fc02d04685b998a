use crate::math::{to_point2, PixelPoint, Point2, TOLERANCE};

/// Identifier of a system, the grouping of staves that owns an
/// interpretation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SystemId(pub usize);

/// A staff line, seen as a function of the abscissa.
pub trait StaffLine {
    /// Ordinate of the line at abscissa `x`.
    fn y_at(&self, x: f64) -> f64;
}

/// Staff queries consumed by arc classification and wedge assembly.
pub trait StaffIndex {
    /// Closest line of the staff at `point`, if the page has staves.
    fn closest_line(&self, point: PixelPoint) -> Option<&dyn StaffLine>;

    /// System of the staff closest to `point`.
    fn closest_system(&self, point: &Point2) -> Option<SystemId>;
}

/// A staff line approximated by the straight segment between its ends,
/// extended linearly beyond them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearStaffLine {
    left: Point2,
    right: Point2,
}

impl LinearStaffLine {
    /// Creates a staff line from its two ends.
    #[must_use]
    pub fn new(left: Point2, right: Point2) -> Self {
        if left.x <= right.x {
            Self { left, right }
        } else {
            Self {
                left: right,
                right: left,
            }
        }
    }

    /// Horizontal line at ordinate `y` from `x_start` to `x_stop`.
    #[must_use]
    pub fn horizontal(x_start: f64, x_stop: f64, y: f64) -> Self {
        Self::new(Point2::new(x_start, y), Point2::new(x_stop, y))
    }
}

impl StaffLine for LinearStaffLine {
    fn y_at(&self, x: f64) -> f64 {
        let dx = self.right.x - self.left.x;
        if dx.abs() < TOLERANCE {
            return self.left.y;
        }
        self.left.y + (x - self.left.x) * (self.right.y - self.left.y) / dx
    }
}

/// A staff: its lines from top to bottom and the system that contains it.
#[derive(Debug, Clone)]
pub struct Staff {
    system: SystemId,
    lines: Vec<LinearStaffLine>,
}

impl Staff {
    /// Creates a staff, ordering lines from top to bottom at their mid abscissa.
    #[must_use]
    pub fn new(system: SystemId, mut lines: Vec<LinearStaffLine>) -> Self {
        lines.sort_by(|a, b| {
            let xa = (a.left.x + a.right.x) / 2.0;
            let xb = (b.left.x + b.right.x) / 2.0;
            a.y_at(xa).total_cmp(&b.y_at(xb))
        });
        Self { system, lines }
    }

    /// Regular five-line staff with horizontal lines.
    #[must_use]
    pub fn regular(system: SystemId, x_start: f64, x_stop: f64, top: f64, interline: f64) -> Self {
        let lines = (0..5)
            .map(|i| LinearStaffLine::horizontal(x_start, x_stop, top + f64::from(i) * interline))
            .collect();
        Self::new(system, lines)
    }

    /// Returns the system containing this staff.
    #[must_use]
    pub fn system(&self) -> SystemId {
        self.system
    }

    /// Returns the staff lines, top to bottom.
    #[must_use]
    pub fn lines(&self) -> &[LinearStaffLine] {
        &self.lines
    }

    /// Line closest vertically to `point`.
    #[must_use]
    pub fn closest_line(&self, point: &Point2) -> Option<&LinearStaffLine> {
        self.lines.iter().min_by(|a, b| {
            let da = (point.y - a.y_at(point.x)).abs();
            let db = (point.y - b.y_at(point.x)).abs();
            da.total_cmp(&db)
        })
    }

    /// Vertical distance from `point` to the staff, zero between its outer lines.
    #[must_use]
    pub fn distance_to(&self, point: &Point2) -> f64 {
        let (Some(top), Some(bottom)) = (self.lines.first(), self.lines.last()) else {
            return f64::INFINITY;
        };
        let y_top = top.y_at(point.x);
        let y_bottom = bottom.y_at(point.x);
        if point.y < y_top {
            y_top - point.y
        } else if point.y > y_bottom {
            point.y - y_bottom
        } else {
            0.0
        }
    }
}

/// The staves of a page.
#[derive(Debug, Clone, Default)]
pub struct StaffManager {
    staves: Vec<Staff>,
}

impl StaffManager {
    /// Creates a manager over the page staves.
    #[must_use]
    pub fn new(staves: Vec<Staff>) -> Self {
        Self { staves }
    }

    /// Returns the managed staves.
    #[must_use]
    pub fn staves(&self) -> &[Staff] {
        &self.staves
    }

    /// Staff closest to `point`, ties going to the first staff.
    #[must_use]
    pub fn closest_staff(&self, point: &Point2) -> Option<&Staff> {
        self.staves
            .iter()
            .min_by(|a, b| a.distance_to(point).total_cmp(&b.distance_to(point)))
    }
}

impl StaffIndex for StaffManager {
    fn closest_line(&self, point: PixelPoint) -> Option<&dyn StaffLine> {
        let p = to_point2(point);
        let staff = self.closest_staff(&p)?;
        staff.closest_line(&p).map(|line| line as &dyn StaffLine)
    }

    fn closest_system(&self, point: &Point2) -> Option<SystemId> {
        self.closest_staff(point).map(Staff::system)
    }
}
