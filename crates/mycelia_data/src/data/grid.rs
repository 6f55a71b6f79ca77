use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer tile coordinate, used as the composite key of every spatial index.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

const CARDINAL: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
const MOORE: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl GridPos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four edge-sharing neighbours (expansion targets).
    #[must_use]
    pub fn cardinal_neighbors(self) -> [GridPos; 4] {
        CARDINAL.map(|(dx, dy)| self.offset(dx, dy))
    }

    /// The eight surrounding tiles (contact for parasitism, sharing and connectivity).
    #[must_use]
    pub fn moore_neighbors(self) -> [GridPos; 8] {
        MOORE.map(|(dx, dy)| self.offset(dx, dy))
    }

    #[must_use]
    pub fn is_moore_adjacent(self, other: GridPos) -> bool {
        self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Identity of a fungus, unique for the lifetime of the process.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct OrganismId(pub u64);

impl fmt::Display for OrganismId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
