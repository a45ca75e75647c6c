//! Grid coordinates for the two cost layers and 8-way neighbor enumeration.

use std::fmt;

use arrayvec::ArrayVec;
use glam::{IVec2, UVec2};

/// One of the two independently costed planes of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Layer {
    #[default]
    Base,
    Second,
}

impl Layer {
    pub const ALL: [Layer; 2] = [Layer::Base, Layer::Second];

    /// The layer on the other side of a crossover bridge.
    #[inline]
    pub fn other(self) -> Layer {
        match self {
            Layer::Base => Layer::Second,
            Layer::Second => Layer::Base,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Layer::Base => 0,
            Layer::Second => 1,
        }
    }
}

/// A `(row, col, layer)` address into the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct GridCoord {
    pub row: u32,
    pub col: u32,
    pub layer: Layer,
}

impl GridCoord {
    pub const fn new(row: u32, col: u32, layer: Layer) -> Self {
        Self { row, col, layer }
    }

    /// A coordinate on the base layer.
    pub const fn base(row: u32, col: u32) -> Self {
        Self::new(row, col, Layer::Base)
    }

    /// A coordinate on the second layer.
    pub const fn second(row: u32, col: u32) -> Self {
        Self::new(row, col, Layer::Second)
    }

    /// The same cell on the opposite layer.
    #[inline]
    pub fn paired(self) -> Self {
        Self {
            layer: self.layer.other(),
            ..self
        }
    }

    /// Position as an `x = col, y = row` vector.
    #[inline]
    pub fn pos(self) -> IVec2 {
        IVec2::new(self.col as i32, self.row as i32)
    }

    /// Step in `dir`, returning `None` if the result leaves a grid of `size`
    /// (`x = ncols, y = nrows`). The layer never changes.
    #[inline]
    pub fn step(self, dir: Direction, size: UVec2) -> Option<Self> {
        let next = self.pos() + dir.offset();
        if next.x < 0 || next.y < 0 || next.x >= size.x as i32 || next.y >= size.y as i32 {
            return None;
        }
        Some(Self::new(next.y as u32, next.x as u32, self.layer))
    }

    /// All in-bounds same-layer neighbors along with the direction taken.
    pub fn neighbors(self, size: UVec2) -> ArrayVec<(Direction, GridCoord), 8> {
        let mut out = ArrayVec::new();
        for dir in Direction::ALL {
            if let Some(next) = self.step(dir, size) {
                out.push((dir, next));
            }
        }
        out
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.row, self.col, self.layer.index())
    }
}

/// The eight compass directions a step can take. North is towards row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    East,
    North,
    South,
    NorthWest,
    NorthEast,
    SouthEast,
    SouthWest,
}

/// `x = col, y = row` offsets, indexed like [Direction::ALL].
pub const ADJACENT_8_WAY: [[i32; 2]; 8] = [
    [-1, 0],
    [1, 0],
    [0, -1],
    [0, 1],
    [-1, -1],
    [1, -1],
    [1, 1],
    [-1, 1],
];

impl Direction {
    /// Expansion order: west, east, north, south, then the diagonals.
    pub const ALL: [Direction; 8] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    #[inline]
    pub fn offset(self) -> IVec2 {
        IVec2::from(ADJACENT_8_WAY[self as usize])
    }

    /// Whether the step runs along a row (east/west).
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::West | Direction::East)
    }

    /// Whether the step runs along a column (north/south).
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::North | Direction::South)
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        !self.is_horizontal() && !self.is_vertical()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let size = UVec2::new(3, 3);
        let n = GridCoord::base(0, 0).neighbors(size);
        assert_eq!(3, n.len());
        assert!(n.iter().all(|(_, c)| c.layer == Layer::Base));
    }

    #[test]
    fn center_has_eight_neighbors() {
        let size = UVec2::new(3, 3);
        let n = GridCoord::second(1, 1).neighbors(size);
        assert_eq!(8, n.len());
        assert!(n.iter().all(|(_, c)| c.layer == Layer::Second));
    }

    #[test]
    fn step_directions() {
        let size = UVec2::new(5, 4);
        let c = GridCoord::base(2, 2);
        assert_eq!(Some(GridCoord::base(1, 2)), c.step(Direction::North, size));
        assert_eq!(Some(GridCoord::base(2, 3)), c.step(Direction::East, size));
        assert_eq!(Some(GridCoord::base(3, 1)), c.step(Direction::SouthWest, size));
        assert_eq!(None, GridCoord::base(3, 4).step(Direction::SouthEast, size));
    }

    #[test]
    fn paired_flips_layer() {
        let c = GridCoord::base(4, 7);
        assert_eq!(GridCoord::second(4, 7), c.paired());
        assert_eq!(c, c.paired().paired());
    }

    #[test]
    fn classification() {
        assert!(Direction::East.is_horizontal());
        assert!(Direction::South.is_vertical());
        assert!(Direction::NorthEast.is_diagonal());
        assert!(!Direction::West.is_diagonal());
    }
}
