//! Board coordinates and directions.
//!
//! `(0, 0)` is the top-left cell; `x` grows to the right and `y` grows
//! downward. Cells are indexed row-major, so index `y * 4 + x`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{EngineError, EngineResult};

/// Width and height of the board.
pub const BOARD_SIZE: u8 = 4;

/// Number of cells on the board.
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// One of the four orthogonal directions.
///
/// The declaration order (up, right, down, left) is the fixed adjacency
/// iteration order used everywhere a scan must be deterministic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in adjacency iteration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// The direction pointing back.
    ///
    /// A card's edge facing `d` fights the neighbor's edge facing `d.opposite()`.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// A cell coordinate on the 4x4 board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BoardPosition {
    pub x: u8,
    pub y: u8,
}

impl BoardPosition {
    /// Create a position. Coordinates must be in bounds.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        debug_assert!(x < BOARD_SIZE && y < BOARD_SIZE);
        Self { x, y }
    }

    /// Validate untrusted coordinates.
    pub fn checked(x: i32, y: i32) -> EngineResult<Self> {
        Self::try_from_signed(x, y).ok_or(EngineError::OutOfBounds { x, y })
    }

    fn try_from_signed(x: i32, y: i32) -> Option<Self> {
        let size = i32::from(BOARD_SIZE);
        if (0..size).contains(&x) && (0..size).contains(&y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Row-major cell index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.y as usize * BOARD_SIZE as usize + self.x as usize
    }

    /// Inverse of [`index`](Self::index).
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index < CELL_COUNT {
            let size = BOARD_SIZE as usize;
            Some(Self::new((index % size) as u8, (index / size) as u8))
        } else {
            None
        }
    }

    /// Every position, row-major.
    pub fn all() -> impl Iterator<Item = BoardPosition> {
        (0..CELL_COUNT).filter_map(Self::from_index)
    }

    /// The neighbor in `direction`, if it is on the board.
    #[must_use]
    pub fn neighbor(self, direction: Direction) -> Option<Self> {
        let (dx, dy) = direction.offset();
        Self::try_from_signed(i32::from(self.x) + dx, i32::from(self.y) + dy)
    }

    /// In-bounds orthogonal neighbors, in up/right/down/left order.
    #[must_use]
    pub fn adjacent(self) -> SmallVec<[(Direction, BoardPosition); 4]> {
        Direction::ALL
            .into_iter()
            .filter_map(|direction| self.neighbor(direction).map(|pos| (direction, pos)))
            .collect()
    }

    /// In-bounds diagonal neighbors (up-left, up-right, down-right, down-left).
    #[must_use]
    pub fn diagonals(self) -> SmallVec<[BoardPosition; 4]> {
        [(-1, -1), (1, -1), (1, 1), (-1, 1)]
            .into_iter()
            .filter_map(|(dx, dy)| {
                Self::try_from_signed(i32::from(self.x) + dx, i32::from(self.y) + dy)
            })
            .collect()
    }

    /// Check if this is one of the four corners.
    #[must_use]
    pub fn is_corner(self) -> bool {
        let last = BOARD_SIZE - 1;
        (self.x == 0 || self.x == last) && (self.y == 0 || self.y == last)
    }

    /// Check if this lies on the outer ring (corners included).
    #[must_use]
    pub fn is_edge(self) -> bool {
        let last = BOARD_SIZE - 1;
        self.x == 0 || self.x == last || self.y == 0 || self.y == last
    }

    #[must_use]
    pub fn is_top_row(self) -> bool {
        self.y == 0
    }

    #[must_use]
    pub fn is_bottom_row(self) -> bool {
        self.y == BOARD_SIZE - 1
    }
}

impl std::fmt::Display for BoardPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
