//! Own field: ship placement and resolution of incoming shots.
//!
//! Ships are not stored as objects. A ship is a maximal straight run of
//! `Ship`/`Hit` cells, and every question about one (is it dead?) is answered
//! by scanning the grid.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use super::common::{GameError, ShotResult};
use super::coord::Position;

/// State of a cell on the own field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Ship,
    /// Placement-time halo marker; never present once a field is generated.
    Blocked,
    Hit,
    Miss,
}

impl Cell {
    fn glyph(self) -> char {
        match self {
            Cell::Empty | Cell::Blocked => '.',
            Cell::Ship => '1',
            Cell::Hit => 'X',
            Cell::Miss => 'x',
        }
    }

    /// Part of a ship, struck or not.
    pub fn is_ship(self) -> bool {
        matches!(self, Cell::Ship | Cell::Hit)
    }
}

/// Decodes the numeric fixture encoding: 0 empty, 1 ship, 2 blocked, 3 hit, 4 miss.
impl TryFrom<u8> for Cell {
    type Error = GameError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Ship),
            2 => Ok(Cell::Blocked),
            3 => Ok(Cell::Hit),
            4 => Ok(Cell::Miss),
            _ => Err(GameError::InvalidConfig("unknown cell code")),
        }
    }
}

/// A `size × size` own field.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// An empty field.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
        }
    }

    /// Use `cells` verbatim; it must hold exactly `size²` entries.
    pub fn from_cells(size: usize, cells: Vec<Cell>) -> Result<Self, GameError> {
        if cells.len() != size * size {
            return Err(GameError::InvalidConfig("own field must have size² cells"));
        }
        Ok(Board { size, cells })
    }

    /// Build a field from the numeric fixture encoding.
    pub fn from_codes(size: usize, codes: &[u8]) -> Result<Self, GameError> {
        let cells = codes
            .iter()
            .map(|&c| Cell::try_from(c))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(size, cells)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at `pos`, or `None` outside the grid.
    pub fn get(&self, pos: Position) -> Option<Cell> {
        pos.to_index(self.size).ok().map(|i| self.cells[i])
    }

    pub(crate) fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    /// Number of cells belonging to ships, struck or not.
    pub fn ship_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_ship()).count()
    }

    /// `true` once no live ship segment remains.
    pub fn all_sunk(&self) -> bool {
        !self.cells.contains(&Cell::Ship)
    }

    /// Turn every `Blocked` marker back into `Empty`.
    pub(crate) fn clear_blocked(&mut self) {
        for cell in self.cells.iter_mut() {
            if *cell == Cell::Blocked {
                *cell = Cell::Empty;
            }
        }
    }

    /// Resolve a shot fired at this field.
    ///
    /// Striking a cell that is already `Hit` re-evaluates the ship, so a
    /// repeated shot reports `Hit` or `Kill` according to the current grid.
    pub fn apply_incoming_shot(&mut self, pos: Position) -> Result<ShotResult, GameError> {
        let index = pos.to_index(self.size)?;
        match self.cells[index] {
            Cell::Ship => {
                self.cells[index] = Cell::Hit;
                Ok(self.hit_or_kill(index))
            }
            Cell::Hit => Ok(self.hit_or_kill(index)),
            Cell::Empty | Cell::Blocked => {
                self.cells[index] = Cell::Miss;
                Ok(ShotResult::Miss)
            }
            Cell::Miss => Ok(ShotResult::Miss),
        }
    }

    fn hit_or_kill(&self, index: usize) -> ShotResult {
        if self.is_dead_ship(index) {
            ShotResult::Kill
        } else {
            ShotResult::Hit
        }
    }

    /// A ship is dead when neither its row run nor its column run through
    /// `index` contains a live `Ship` cell.
    pub(crate) fn is_dead_ship(&self, index: usize) -> bool {
        let (x, y) = (index % self.size, index / self.size);
        let row = &self.cells[y * self.size..(y + 1) * self.size];
        let column: Vec<Cell> = self.cells[x..].iter().step_by(self.size).copied().collect();
        line_is_dead(row, x) && line_is_dead(&column, y)
    }
}

/// Scan both ways from `at`; a `Ship` before the run ends means still alive.
fn line_is_dead(line: &[Cell], at: usize) -> bool {
    tail_is_dead(line[at..].iter()) && tail_is_dead(line[..=at].iter().rev())
}

fn tail_is_dead<'a>(tail: impl Iterator<Item = &'a Cell>) -> bool {
    for cell in tail {
        match cell {
            Cell::Hit => continue,
            Cell::Ship => return false,
            _ => return true,
        }
    }
    true
}

/// Write a bordered block, one character per cell.
pub(crate) fn write_grid(
    f: &mut fmt::Formatter<'_>,
    size: usize,
    glyphs: impl Iterator<Item = char>,
) -> fmt::Result {
    let frame = "-".repeat(size + 2);
    writeln!(f, "{}", frame)?;
    let glyphs: Vec<char> = glyphs.collect();
    for row in glyphs.chunks(size.max(1)) {
        f.write_str("|")?;
        for g in row {
            write!(f, "{}", g)?;
        }
        writeln!(f, "|")?;
    }
    write!(f, "{}", frame)
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self.size, self.cells.iter().map(|c| c.glyph()))
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {} }}", self.size)?;
        write!(f, "{}", self)
    }
}
