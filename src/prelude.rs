//! Commonly used types and utilities for ease of import.

pub use crate::{
    format_position, parse_position, GameConfig, GameError, GameStatus, Position, Session,
    ShotResult,
};

#[cfg(feature = "std")]
pub use crate::simulation::{play_match, shots_to_sink, MatchReport};
