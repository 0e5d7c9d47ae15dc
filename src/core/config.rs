use alloc::vec::Vec;

use super::board::Cell;
use super::common::GameError;

/// Largest supported side length.
pub const MAX_BOARD_SIZE: usize = 10;
pub const DEFAULT_BOARD_SIZE: usize = 10;

/// Classic fleet: one four-decker, two three-deckers, three two-deckers and
/// four single-cell boats.
pub const DEFAULT_FLEET: [usize; 10] = [4, 3, 3, 2, 2, 2, 1, 1, 1, 1];

/// Spacing of the diagonal probe lattices, consumed in this order.
pub const PROBE_STEPS: [usize; 2] = [4, 2];

/// Samples drawn for a single ship before the layout is started over.
pub const PLACEMENT_ATTEMPTS_PER_SHIP: usize = 1_000;
/// Whole-layout restarts before placement is declared infeasible.
pub const PLACEMENT_RESTARTS: usize = 100;

/// Parameters of a new match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub size: usize,
    /// Own field used verbatim instead of a generated one.
    pub field: Option<Vec<Cell>>,
    pub fleet: Vec<usize>,
    /// Render columns as numbers instead of letters.
    pub numeric_columns: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            field: None,
            fleet: DEFAULT_FLEET.to_vec(),
            numeric_columns: false,
        }
    }
}

impl GameConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_field(mut self, field: Vec<Cell>) -> Self {
        self.field = Some(field);
        self
    }

    pub fn with_fleet(mut self, fleet: Vec<usize>) -> Self {
        self.fleet = fleet;
        self
    }

    pub fn with_numeric_columns(mut self, numeric: bool) -> Self {
        self.numeric_columns = numeric;
        self
    }

    /// Reject parameters that cannot describe a valid match.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.size == 0 || self.size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidConfig("board size must be between 1 and 10"));
        }
        if self.fleet.is_empty() {
            return Err(GameError::InvalidConfig("fleet is empty"));
        }
        if self.fleet.contains(&0) {
            return Err(GameError::InvalidConfig("fleet contains a zero-length ship"));
        }
        if let Some(field) = &self.field {
            if field.len() != self.size * self.size {
                return Err(GameError::InvalidConfig("own field must have size² cells"));
            }
        }
        Ok(())
    }
}
