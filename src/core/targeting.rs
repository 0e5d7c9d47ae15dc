//! Hunt/target shot selection against the opponent model.
//!
//! While no wounded ship is known the engine searches: it draws from the
//! diagonal probe lattices (spacing 4, then 2) and falls back to a uniform
//! draw over unknown cells once both are spent. The first hit on a ship that
//! does not sink it becomes the anchor and the engine pursues, shooting only
//! at unknown cells at the open ends of the known run through the anchor.
//! A kill rules out the whole halo of the sunk ship and returns to search.

use alloc::vec::Vec;
use rand::seq::IndexedRandom;
use rand::Rng;

use super::common::{GameError, Invariant};
use super::config::PROBE_STEPS;
use super::coord::{Direction, Orientation, Position, DIAGONALS};
use super::opponent::{Intel, OpponentModel};

/// Targeting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// No wounded ship is known.
    #[default]
    Searching,
    /// `anchor` is the first hit on a ship that still floats.
    Pursuing { anchor: Position },
}

/// The most recent shot and the enemy fleet count when it was fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct LastShot {
    pub position: Position,
    pub enemy_ships_before: usize,
}

/// Cells of a periodic anti-diagonal inside one `step × step` tile:
/// `(step, 1), (step - 1, 2), ..., (1, step)`.
pub fn diagonal_positions(step: usize) -> impl Iterator<Item = Position> {
    (0..step).map(move |i| Position::new(step - i, i + 1))
}

/// The diagonal lattice of spacing `step`, scanned tile by tile and clipped
/// to a `size × size` grid. Any straight ship of length `>= step` crosses it.
pub fn diagonal_shots(size: usize, step: usize) -> Vec<Position> {
    let tiles = (size + step - 1) / step;
    let mut shots = Vec::new();
    for fy in 0..tiles {
        for fx in 0..tiles {
            for p in diagonal_positions(step) {
                let x = p.x + fx * step;
                let y = p.y + fy * step;
                if x <= size && y <= size {
                    shots.push(Position::new(x, y));
                }
            }
        }
    }
    shots
}

/// One-shot pools of probe positions, one pool per lattice spacing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ProbeSchedule {
    pools: Vec<Vec<Position>>,
}

impl ProbeSchedule {
    pub fn new(size: usize) -> Self {
        Self {
            pools: PROBE_STEPS.iter().map(|&step| diagonal_shots(size, step)).collect(),
        }
    }

    /// Remove a uniformly chosen entry from the first non-empty pool.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Position> {
        let pool = self.pools.iter_mut().find(|p| !p.is_empty())?;
        let i = rng.random_range(0..pool.len());
        Some(pool.swap_remove(i))
    }

    /// Entries left across all pools.
    pub fn remaining(&self) -> usize {
        self.pools.iter().map(Vec::len).sum()
    }
}

/// Hunt/target state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Targeter {
    mode: Mode,
    probes: ProbeSchedule,
    last_shot: Option<LastShot>,
}

impl Targeter {
    pub fn new(size: usize) -> Self {
        Self {
            mode: Mode::Searching,
            probes: ProbeSchedule::new(size),
            last_shot: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn probes(&self) -> &ProbeSchedule {
        &self.probes
    }

    pub fn last_shot(&self) -> Option<LastShot> {
        self.last_shot
    }

    /// Forget the outstanding shot; the pursuit anchor is kept.
    pub fn forget_last_shot(&mut self) {
        self.last_shot = None;
    }

    /// Choose the next target.
    ///
    /// The previous shot's effect is read back from `model`: a `Ship` cell
    /// with an unchanged `enemy_ships` count is a wound, a changed count is a
    /// kill, anything else a miss (or an unanswered shot).
    pub fn next_shot<R: Rng + ?Sized>(
        &mut self,
        model: &mut OpponentModel,
        enemy_ships: usize,
        rng: &mut R,
    ) -> Result<Position, GameError> {
        let struck = self
            .last_shot
            .filter(|last| model.status(last.position) == Some(Intel::Ship));

        let next = match struck {
            Some(last) if last.enemy_ships_before == enemy_ships => {
                let anchor = match self.mode {
                    Mode::Pursuing { anchor } => anchor,
                    Mode::Searching => {
                        log::debug!("ship found at {}, pursuing", last.position);
                        self.mode = Mode::Pursuing {
                            anchor: last.position,
                        };
                        last.position
                    }
                };
                pursue(model, anchor, rng)?
            }
            Some(last) => {
                log::debug!("ship sunk at {}, back to search", last.position);
                mark_surrounding_as_miss(model, last.position);
                self.mode = Mode::Searching;
                self.regular_shot(model, rng)?
            }
            None => match self.mode {
                Mode::Pursuing { anchor } => pursue(model, anchor, rng)?,
                Mode::Searching => self.regular_shot(model, rng)?,
            },
        };

        self.last_shot = Some(LastShot {
            position: next,
            enemy_ships_before: enemy_ships,
        });
        Ok(next)
    }

    /// Search shot: probe lattices first, then any unknown cell.
    pub fn regular_shot<R: Rng + ?Sized>(
        &mut self,
        model: &OpponentModel,
        rng: &mut R,
    ) -> Result<Position, GameError> {
        while let Some(probe) = self.probes.draw(rng) {
            if model.is_unknown(probe) {
                return Ok(probe);
            }
            log::trace!("probe {} already resolved, redrawing", probe);
        }
        model
            .unknown_positions()
            .choose(rng)
            .copied()
            .ok_or(GameError::InvariantViolation(Invariant::NoUnknownCells))
    }
}

fn pursue<R: Rng + ?Sized>(
    model: &OpponentModel,
    anchor: Position,
    rng: &mut R,
) -> Result<Position, GameError> {
    next_possible_shots(model, anchor)
        .choose(rng)
        .copied()
        .ok_or(GameError::InvariantViolation(Invariant::NoCandidates))
}

/// Unknown cells at the open ends of the known run through `anchor`.
///
/// Each direction is walked across `Ship` cells to the first cell that is not
/// a ship; that cell is a candidate when unknown. Once a neighbour of the
/// anchor is a ship the orientation is settled and only that axis counts.
pub fn next_possible_shots(model: &OpponentModel, anchor: Position) -> Vec<Position> {
    let mut vertical = Vec::new();
    let mut horizontal = Vec::new();
    let mut orientation = None;

    for dir in [Direction::Up, Direction::Down, Direction::Right, Direction::Left] {
        let (extends, candidate) = walk_run(model, anchor, dir);
        if extends {
            orientation = Some(dir.orientation());
        }
        if let Some(pos) = candidate {
            match dir.orientation() {
                Orientation::Vertical => vertical.push(pos),
                Orientation::Horizontal => horizontal.push(pos),
            }
        }
    }

    match orientation {
        Some(Orientation::Vertical) => vertical,
        Some(Orientation::Horizontal) => horizontal,
        None => {
            vertical.append(&mut horizontal);
            vertical
        }
    }
}

/// Walk from `from` along `dir` while cells are `Ship`. Returns whether the
/// run extends past `from` and the unknown cell that ends it, if any.
fn walk_run(model: &OpponentModel, from: Position, dir: Direction) -> (bool, Option<Position>) {
    let mut extends = false;
    let mut current = from;
    loop {
        let Some(next) = current.step(dir) else {
            return (extends, None);
        };
        match model.status(next) {
            Some(Intel::Ship) => {
                extends = true;
                current = next;
            }
            Some(Intel::Unknown) => return (extends, Some(next)),
            _ => return (extends, None),
        }
    }
}

/// Rule out the halo of the ship sunk at `kill`.
///
/// The diagonals of every ship cell and the first non-ship cell past each end
/// of the run become `Miss`. Cells already known are left alone.
pub fn mark_surrounding_as_miss(model: &mut OpponentModel, kill: Position) {
    rule_out_diagonals(model, kill);
    for dir in Direction::ALL {
        let mut current = kill;
        while let Some(next) = current.step(dir) {
            if model.status(next) == Some(Intel::Ship) {
                rule_out_diagonals(model, next);
                current = next;
            } else {
                model.rule_out(Some(next));
                break;
            }
        }
    }
}

fn rule_out_diagonals(model: &mut OpponentModel, pos: Position) {
    for (dx, dy) in DIAGONALS {
        model.rule_out(pos.offset(dx, dy));
    }
}
