//! Random fleet placement by rejection sampling.
//!
//! Each ship is dropped at a random start cell along a random axis. A sample
//! is rejected when the run leaves the board or touches anything already
//! marked. Accepted ships surround themselves with a `Blocked` halo so that
//! no two ships touch, not even diagonally. The halo is cleared before the
//! field is handed out.

use alloc::vec::Vec;
use rand::Rng;

use super::board::{Board, Cell};
use super::common::{GameError, Invariant};
use super::config::{PLACEMENT_ATTEMPTS_PER_SHIP, PLACEMENT_RESTARTS};
use super::coord::{Orientation, Position};

/// Place every ship of `fleet` on a fresh `size × size` field.
///
/// Sampling is retried without backtracking across ships. When a ship cannot
/// be placed after [`PLACEMENT_ATTEMPTS_PER_SHIP`] samples the whole layout
/// starts over, and after [`PLACEMENT_RESTARTS`] layouts the fleet is
/// reported as infeasible.
pub fn generate_field<R: Rng + ?Sized>(
    size: usize,
    fleet: &[usize],
    rng: &mut R,
) -> Result<Board, GameError> {
    if let Some(&length) = fleet.iter().find(|&&len| len > size || len == 0) {
        return Err(GameError::InvariantViolation(Invariant::PlacementExhausted { length }));
    }
    if fleet.iter().sum::<usize>() > size * size {
        let length = fleet.iter().copied().max().unwrap_or(0);
        return Err(GameError::InvariantViolation(Invariant::PlacementExhausted { length }));
    }

    let mut stuck_on = 0;
    for restart in 0..PLACEMENT_RESTARTS {
        let mut board = Board::new(size);
        match fleet.iter().try_for_each(|&len| place_ship(&mut board, len, rng)) {
            Ok(()) => {
                board.clear_blocked();
                log::debug!("fleet of {} ships placed after {} restarts", fleet.len(), restart);
                return Ok(board);
            }
            Err(length) => {
                log::trace!("layout stuck on a ship of length {}, restarting", length);
                stuck_on = length;
            }
        }
    }
    Err(GameError::InvariantViolation(Invariant::PlacementExhausted { length: stuck_on }))
}

/// Try to place one ship of `length`; on failure return that length.
fn place_ship<R: Rng + ?Sized>(board: &mut Board, length: usize, rng: &mut R) -> Result<(), usize> {
    let size = board.size();
    for _ in 0..PLACEMENT_ATTEMPTS_PER_SHIP {
        let start = Position::new(rng.random_range(1..=size), rng.random_range(1..=size));
        let orientation = if rng.random_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        match free_run(board, start, orientation, length) {
            Some(run) => {
                for &index in &run {
                    mark_halo(board, index);
                    board.set(index, Cell::Ship);
                }
                return Ok(());
            }
            None => log::trace!(
                "rejected {:?} ship of length {} at {}",
                orientation,
                length,
                start
            ),
        }
    }
    Err(length)
}

/// Indices of `length` cells from `start` along `orientation`, if they all
/// fit on the board and are still `Empty`.
fn free_run(board: &Board, start: Position, orientation: Orientation, length: usize) -> Option<Vec<usize>> {
    (0..length)
        .map(|i| {
            let pos = match orientation {
                Orientation::Horizontal => Position::new(start.x + i, start.y),
                Orientation::Vertical => Position::new(start.x, start.y + i),
            };
            let index = pos.to_index(board.size()).ok()?;
            (board.cells()[index] == Cell::Empty).then_some(index)
        })
        .collect()
}

/// Block the 8-neighbourhood of `index`, leaving ship cells alone.
fn mark_halo(board: &mut Board, index: usize) {
    let size = board.size();
    let center = Position::from_index(index, size);
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let Some(neighbour) = center.offset(dx, dy) else {
                continue;
            };
            if let Ok(i) = neighbour.to_index(size) {
                if board.cells()[i] != Cell::Ship {
                    board.set(i, Cell::Blocked);
                }
            }
        }
    }
}
