use crate::math::PixelPoint;

/// One of the eight compass directions, ordinate growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

use Direction::{East, North, NorthEast, NorthWest, South, SouthEast, SouthWest, West};

const DX: [i32; 8] = [1, 1, 0, -1, -1, -1, 0, 1];
const DY: [i32; 8] = [0, -1, -1, -1, 0, 1, 1, 1];

/// Directions to try when no heading is known: orthogonal ones first.
const SCAN_ANY: [Direction; 8] = [
    East, North, West, South, NorthEast, NorthWest, SouthWest, SouthEast,
];

/// Directions to try after arriving along each direction, indexed by
/// [`Direction::index`]. Each row omits the way back, lists orthogonal moves
/// before diagonal ones and then sorts by deviation from the heading.
const SCANS: [[Direction; 7]; 8] = [
    [East, North, South, NorthEast, SouthEast, NorthWest, SouthWest],
    [North, East, West, South, NorthEast, NorthWest, SouthEast],
    [North, West, East, NorthWest, NorthEast, SouthWest, SouthEast],
    [West, North, South, East, NorthWest, SouthWest, NorthEast],
    [West, South, North, SouthWest, NorthWest, SouthEast, NorthEast],
    [South, West, East, North, SouthWest, SouthEast, NorthWest],
    [South, East, West, SouthEast, SouthWest, NorthEast, NorthWest],
    [East, South, North, West, SouthEast, NorthEast, SouthWest],
];

impl Direction {
    pub const ALL: [Direction; 8] = [
        East, NorthEast, North, NorthWest, West, SouthWest, South, SouthEast,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn dx(self) -> i32 {
        DX[self.index()]
    }

    #[must_use]
    pub fn dy(self) -> i32 {
        DY[self.index()]
    }

    #[must_use]
    pub fn opposite(self) -> Direction {
        Self::ALL[(self.index() + 4) % 8]
    }

    #[must_use]
    pub fn is_diagonal(self) -> bool {
        self.index() % 2 == 1
    }

    /// Neighbor of `p` in this direction.
    #[must_use]
    pub fn step(self, p: PixelPoint) -> PixelPoint {
        PixelPoint::new(p.x + self.dx(), p.y + self.dy())
    }

    /// Direction leading from `from` to its 8-neighbor `to`.
    #[must_use]
    pub fn between(from: PixelPoint, to: PixelPoint) -> Option<Direction> {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        Self::ALL
            .into_iter()
            .find(|dir| dir.dx() == dx && dir.dy() == dy)
    }

    /// Ordered directions to try after arriving along `last`.
    #[must_use]
    pub fn scan_order(last: Option<Direction>) -> &'static [Direction] {
        match last {
            None => &SCAN_ANY,
            Some(dir) => &SCANS[dir.index()],
        }
    }
}
