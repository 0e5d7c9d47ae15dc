//! One match: own field, opponent model, fleet counters and the turn protocol.

use alloc::string::String;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::board::{Board, Cell};
use super::common::{GameError, ShotResult};
use super::config::{GameConfig, MAX_BOARD_SIZE};
use super::coord::Position;
use super::opponent::OpponentModel;
use super::placement::generate_field;
use super::targeting::{Mode, Targeter};
use crate::notation;

/// Current status of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
    /// Both fleets went down; possible when the last shots cross.
    Drawn,
}

/// Serializable snapshot of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub fleet: Vec<usize>,
    pub numeric_columns: bool,
    pub own_field: Board,
    pub enemy_field: OpponentModel,
    pub own_ships_remaining: usize,
    pub enemy_ships_remaining: usize,
    pub targeter: Targeter,
}

impl GameState {
    /// Reject snapshots whose grids or counters cannot belong to one match.
    pub fn validate(&self) -> Result<(), GameError> {
        let size = self.own_field.size();
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(GameError::InvalidConfig("board size must be between 1 and 10"));
        }
        if self.own_field.cells().len() != size * size {
            return Err(GameError::InvalidConfig("own field must have size² cells"));
        }
        if self.enemy_field.size() != size || self.enemy_field.cells().len() != size * size {
            return Err(GameError::InvalidConfig("opponent field does not match own field"));
        }
        if self.fleet.is_empty() {
            return Err(GameError::InvalidConfig("fleet is empty"));
        }
        if self.own_ships_remaining > self.fleet.len() || self.enemy_ships_remaining > self.fleet.len() {
            return Err(GameError::InvalidConfig("more ships remaining than the fleet holds"));
        }
        Ok(())
    }
}

/// A single match driven by an external transport.
pub struct Session<R: Rng = SmallRng> {
    fleet: Vec<usize>,
    numeric_columns: bool,
    own: Board,
    enemy: OpponentModel,
    own_ships_remaining: usize,
    enemy_ships_remaining: usize,
    targeter: Targeter,
    rng: R,
}

impl Session<SmallRng> {
    /// Session with a reproducible random source.
    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }

    /// Session seeded from the thread-local generator.
    #[cfg(feature = "std")]
    pub fn from_entropy(config: GameConfig) -> Result<Self, GameError> {
        Self::new(config, SmallRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> Session<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self, GameError> {
        let mut session = Self {
            fleet: Vec::new(),
            numeric_columns: false,
            own: Board::new(0),
            enemy: OpponentModel::new(0),
            own_ships_remaining: 0,
            enemy_ships_remaining: 0,
            targeter: Targeter::default(),
            rng,
        };
        session.start_new_game(config)?;
        Ok(session)
    }

    /// Rebuild a session from a snapshot, checking it first.
    pub fn from_state(state: GameState, rng: R) -> Result<Self, GameError> {
        state.validate()?;
        Ok(Self {
            fleet: state.fleet,
            numeric_columns: state.numeric_columns,
            own: state.own_field,
            enemy: state.enemy_field,
            own_ships_remaining: state.own_ships_remaining,
            enemy_ships_remaining: state.enemy_ships_remaining,
            targeter: state.targeter,
            rng,
        })
    }

    /// Reset everything for a new match, keeping the random source.
    pub fn start_new_game(&mut self, config: GameConfig) -> Result<(), GameError> {
        config.validate()?;
        let GameConfig {
            size,
            field,
            fleet,
            numeric_columns,
        } = config;

        self.own = match field {
            Some(cells) => Board::from_cells(size, cells)?,
            None => generate_field(size, &fleet, &mut self.rng)?,
        };
        self.enemy = OpponentModel::new(size);
        self.own_ships_remaining = fleet.len();
        self.enemy_ships_remaining = fleet.len();
        self.targeter = Targeter::new(size);
        self.numeric_columns = numeric_columns;
        self.fleet = fleet;
        log::info!("new game: {}x{} board, {} ships each", size, size, self.fleet.len());
        Ok(())
    }

    /// Snapshot of the whole match.
    pub fn state(&self) -> GameState {
        GameState {
            fleet: self.fleet.clone(),
            numeric_columns: self.numeric_columns,
            own_field: self.own.clone(),
            enemy_field: self.enemy.clone(),
            own_ships_remaining: self.own_ships_remaining,
            enemy_ships_remaining: self.enemy_ships_remaining,
            targeter: self.targeter.clone(),
        }
    }

    pub fn size(&self) -> usize {
        self.own.size()
    }

    pub fn fleet(&self) -> &[usize] {
        &self.fleet
    }

    pub fn own_field(&self) -> &Board {
        &self.own
    }

    pub fn enemy_field(&self) -> &OpponentModel {
        &self.enemy
    }

    pub fn own_ships_remaining(&self) -> usize {
        self.own_ships_remaining
    }

    pub fn enemy_ships_remaining(&self) -> usize {
        self.enemy_ships_remaining
    }

    pub fn targeting_mode(&self) -> Mode {
        self.targeter.mode()
    }

    /// Position of the shot awaiting a reply.
    pub fn last_shot(&self) -> Option<Position> {
        self.targeter.last_shot().map(|s| s.position)
    }

    /// Resolve the opponent's shot against the own field.
    pub fn apply_incoming_shot(&mut self, pos: Position) -> Result<ShotResult, GameError> {
        let was_hit = self.own.get(pos) == Some(Cell::Hit);
        let result = self.own.apply_incoming_shot(pos)?;
        // a repeated strike on a dead ship must not count twice
        if result == ShotResult::Kill && !was_hit {
            self.own_ships_remaining = self.own_ships_remaining.saturating_sub(1);
        }
        log::debug!("incoming shot at {}: {}", pos, result);
        Ok(result)
    }

    /// Text form of [`Session::apply_incoming_shot`].
    pub fn apply_incoming_shot_text(&mut self, text: &str) -> Result<ShotResult, GameError> {
        let pos = notation::parse_position(text)?;
        self.apply_incoming_shot(pos)
    }

    /// Pick the next target and remember it as the outstanding shot.
    pub fn decide_next_shot(&mut self) -> Result<Position, GameError> {
        let pos = self
            .targeter
            .next_shot(&mut self.enemy, self.enemy_ships_remaining, &mut self.rng)?;
        log::debug!("shooting at {} ({:?})", pos, self.targeter.mode());
        Ok(pos)
    }

    /// [`Session::decide_next_shot`] rendered in the session's column format.
    pub fn decide_next_shot_text(&mut self) -> Result<String, GameError> {
        let pos = self.decide_next_shot()?;
        Ok(notation::format_position(pos, self.numeric_columns))
    }

    /// Re-render the outstanding shot with a numeric column, for retransmission.
    pub fn repeat_last_shot(&self) -> Option<String> {
        self.last_shot().map(|pos| notation::format_position(pos, true))
    }

    /// Drop the outstanding shot so that a late reply is ignored.
    pub fn reset_last_shot(&mut self) {
        self.targeter.forget_last_shot();
    }

    /// Feed the opponent's answer to the outstanding shot.
    pub fn record_reply(&mut self, result: ShotResult) {
        let Some(pos) = self.last_shot() else {
            log::warn!("reply {} with no shot outstanding, ignored", result);
            return;
        };
        if !self.enemy.is_unknown(pos) {
            log::warn!("duplicate reply {} for {}, ignored", result, pos);
            return;
        }
        self.enemy.record(pos, result);
        if result == ShotResult::Kill {
            self.enemy_ships_remaining = self.enemy_ships_remaining.saturating_sub(1);
        }
    }

    /// Text form of [`Session::record_reply`].
    pub fn record_reply_text(&mut self, reply: &str) -> Result<(), GameError> {
        self.record_reply(reply.parse()?);
        Ok(())
    }

    pub fn is_victory(&self) -> bool {
        self.enemy_ships_remaining == 0
    }

    pub fn is_defeat(&self) -> bool {
        self.own_ships_remaining == 0
    }

    pub fn is_end_game(&self) -> bool {
        self.is_victory() || self.is_defeat()
    }

    pub fn status(&self) -> GameStatus {
        match (self.is_victory(), self.is_defeat()) {
            (true, true) => GameStatus::Drawn,
            (true, false) => GameStatus::Won,
            (false, true) => GameStatus::Lost,
            (false, false) => GameStatus::InProgress,
        }
    }

    /// Dump both grids to the log at debug level.
    pub fn log_fields(&self) {
        log::debug!("own field:\n{}", self.own);
        log::debug!("enemy field:\n{}", self.enemy);
    }
}
