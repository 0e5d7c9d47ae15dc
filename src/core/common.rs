//! Common types for the engine: shot results and errors.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// Outcome of a shot, as reported by the defending side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum ShotResult {
    /// A ship segment was struck but the ship still floats.
    Hit,
    /// The last live segment of a ship was struck.
    Kill,
    /// Nothing there.
    Miss,
}

impl ShotResult {
    /// Wire form of the result.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShotResult::Hit => "hit",
            ShotResult::Kill => "kill",
            ShotResult::Miss => "miss",
        }
    }

    /// `true` for both `Hit` and `Kill`.
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotResult::Miss)
    }
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShotResult {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let reply = s.trim();
        if reply.eq_ignore_ascii_case("hit") {
            Ok(ShotResult::Hit)
        } else if reply.eq_ignore_ascii_case("kill") {
            Ok(ShotResult::Kill)
        } else if reply.eq_ignore_ascii_case("miss") {
            Ok(ShotResult::Miss)
        } else {
            Err(GameError::InvalidReply(reply.to_string()))
        }
    }
}

/// Which half of a coordinate failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("X"),
            Axis::Y => f.write_str("Y"),
        }
    }
}

/// Errors produced while decoding a cell reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No split pattern matched the whole input.
    Unrecognized(String),
    /// The input split into two tokens but one of them is not a coordinate.
    Axis { axis: Axis, token: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Unrecognized(text) => write!(f, "Can't parse entire position: {}", text),
            ParseError::Axis { axis, token } => write!(f, "Can't parse {} point: {}", axis, token),
        }
    }
}

/// Engine states that must never be reached with consistent bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invariant {
    /// Pursuit found no unknown cell next to the wounded ship.
    NoCandidates,
    /// The opponent grid has no unknown cell left to search.
    NoUnknownCells,
    /// The placement generator gave up on a ship of this length.
    PlacementExhausted { length: usize },
    /// An attacker needed more shots than the grid has cells.
    ShotBudgetExceeded { shots: usize },
}

impl fmt::Display for Invariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invariant::NoCandidates => write!(f, "no candidate shots around the wounded ship"),
            Invariant::NoUnknownCells => write!(f, "no unknown cells left on the opponent grid"),
            Invariant::PlacementExhausted { length } => {
                write!(f, "unable to place a ship of length {}", length)
            }
            Invariant::ShotBudgetExceeded { shots } => {
                write!(f, "match still running after {} shots", shots)
            }
        }
    }
}

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Position components fall outside `1..=size`.
    OutOfRange { x: usize, y: usize, size: usize },
    /// Coordinate text could not be decoded.
    Parse(ParseError),
    /// Reply text is not one of `hit`, `kill`, `miss`.
    InvalidReply(String),
    /// Game parameters rejected before the match starts.
    InvalidConfig(&'static str),
    /// Fatal engine state; the match should be aborted.
    InvariantViolation(Invariant),
}

impl From<ParseError> for GameError {
    fn from(err: ParseError) -> Self {
        GameError::Parse(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::OutOfRange { x, y, size } => {
                write!(f, "Wrong position: {} {} (board size {})", x, y, size)
            }
            GameError::Parse(e) => write!(f, "{}", e),
            GameError::InvalidReply(reply) => write!(f, "Unknown reply: {:?}", reply),
            GameError::InvalidConfig(reason) => write!(f, "Invalid game config: {}", reason),
            GameError::InvariantViolation(inv) => write!(f, "Invariant violated: {}", inv),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
