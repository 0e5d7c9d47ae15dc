//! Positions on a square grid and the indexing law that maps them onto the
//! flat cell vector.
//!
//! Positions are 1-based: `x` is the column, `y` the row, and both lie in
//! `1..=size` whenever they index a grid. The cell vector is row-major, so
//! `index = (y - 1) * size + (x - 1)`.

use core::fmt;

use super::common::GameError;

/// A 1-based (column, row) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

/// Axis a ship runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One of the four axis directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn orientation(self) -> Orientation {
        match self {
            Direction::Up | Direction::Down => Orientation::Vertical,
            Direction::Left | Direction::Right => Orientation::Horizontal,
        }
    }

    /// Column and row deltas.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Deltas of the four diagonal neighbours.
pub const DIAGONALS: [(isize, isize); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// `true` if both components lie in `1..=size`.
    pub fn in_bounds(&self, size: usize) -> bool {
        (1..=size).contains(&self.x) && (1..=size).contains(&self.y)
    }

    /// Flat index into a `size × size` grid.
    pub fn to_index(&self, size: usize) -> Result<usize, GameError> {
        if !self.in_bounds(size) {
            return Err(GameError::OutOfRange {
                x: self.x,
                y: self.y,
                size,
            });
        }
        Ok((self.y - 1) * size + self.x - 1)
    }

    /// Inverse of [`Position::to_index`] for `index < size²`.
    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            x: index % size + 1,
            y: index / size + 1,
        }
    }

    /// Neighbour candidate shifted by `(dx, dy)`. The result may lie outside
    /// the grid and must be checked before use; `None` only when a component
    /// would drop below zero.
    pub fn offset(&self, dx: isize, dy: isize) -> Option<Position> {
        Some(Position {
            x: self.x.checked_add_signed(dx)?,
            y: self.y.checked_add_signed(dy)?,
        })
    }

    /// Neighbour candidate one step in `dir`.
    pub fn step(&self, dir: Direction) -> Option<Position> {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}
