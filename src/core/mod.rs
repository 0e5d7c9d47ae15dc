//! Core sea battle engine (no_std compatible)
//!
//! Pure game logic: grids, placement, targeting and the match session. Only
//! `rand` and `log` are needed, plus `alloc` for the grids.

pub mod board;
pub mod common;
pub mod config;
pub mod coord;
pub mod opponent;
pub mod placement;
pub mod session;
pub mod targeting;

// Re-export commonly used types
pub use board::{Board, Cell};
pub use common::{Axis, GameError, Invariant, ParseError, ShotResult};
pub use config::*;
pub use coord::{Direction, Orientation, Position};
pub use opponent::{Intel, OpponentModel};
pub use placement::generate_field;
pub use session::{GameState, GameStatus, Session};
pub use targeting::{
    diagonal_positions, diagonal_shots, mark_surrounding_as_miss, next_possible_shots, LastShot,
    Mode, ProbeSchedule, Targeter,
};
