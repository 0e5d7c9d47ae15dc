//! Inferred view of the opponent's field, built only from shot replies.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use super::board::write_grid;
use super::common::{GameError, ShotResult};
use super::coord::Position;

/// What is known about one opponent cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Intel {
    #[default]
    Unknown,
    /// Answered `hit` or `kill`; stays this way after the ship sinks.
    Ship,
    /// Answered `miss`, or ruled out by a sunk ship's halo.
    Miss,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct OpponentModel {
    size: usize,
    cells: Vec<Intel>,
}

impl OpponentModel {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Intel::Unknown; size * size],
        }
    }

    /// Use `cells` verbatim; it must hold exactly `size²` entries.
    pub fn from_cells(size: usize, cells: Vec<Intel>) -> Result<Self, GameError> {
        if cells.len() != size * size {
            return Err(GameError::InvalidConfig("opponent field must have size² cells"));
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cells(&self) -> &[Intel] {
        &self.cells
    }

    /// Status at `pos`, or `None` outside the grid.
    pub fn status(&self, pos: Position) -> Option<Intel> {
        pos.to_index(self.size).ok().map(|i| self.cells[i])
    }

    pub fn is_unknown(&self, pos: Position) -> bool {
        self.status(pos) == Some(Intel::Unknown)
    }

    /// Overwrite `pos`; positions off the grid are ignored.
    pub fn mark(&mut self, pos: Position, intel: Intel) {
        if let Ok(i) = pos.to_index(self.size) {
            self.cells[i] = intel;
        }
    }

    /// Rule out `pos` unless something is already known there.
    pub fn rule_out(&mut self, pos: Option<Position>) {
        if let Some(pos) = pos {
            if self.is_unknown(pos) {
                self.mark(pos, Intel::Miss);
            }
        }
    }

    /// Apply a reply to the cell that was shot.
    pub fn record(&mut self, pos: Position, result: ShotResult) {
        let intel = if result.is_hit() { Intel::Ship } else { Intel::Miss };
        self.mark(pos, intel);
    }

    /// Every position still unknown, in row-major order.
    pub fn unknown_positions(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Intel::Unknown)
            .map(|(i, _)| Position::from_index(i, self.size))
            .collect()
    }
}

impl fmt::Display for OpponentModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyphs = self.cells.iter().map(|c| match c {
            Intel::Unknown => '.',
            Intel::Ship => '1',
            Intel::Miss => 'x',
        });
        write_grid(f, self.size, glyphs)
    }
}
