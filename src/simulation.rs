//! Engine-versus-engine matches for benchmarking and end-to-end checks.
//!
//! Each side is a full [`Session`]: shots are answered by the defender's own
//! field and the answer is fed back to the attacker, exactly as a transport
//! would relay them.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::core::{Board, GameConfig, GameError, GameStatus, Invariant, Session};

/// Outcome of one simulated side.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SideReport {
    pub status: GameStatus,
    pub shots: usize,
    pub ships_remaining: usize,
}

/// Outcome of a simulated match.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MatchReport {
    pub seeds: (u64, u64),
    pub first: SideReport,
    pub second: SideReport,
    pub winner: Option<&'static str>,
}

/// Fire one shot from `attacker` at `defender` and relay the reply.
fn exchange(attacker: &mut Session, defender: &mut Session) -> Result<(), GameError> {
    let target = attacker.decide_next_shot()?;
    let reply = defender.apply_incoming_shot(target)?;
    attacker.record_reply(reply);
    Ok(())
}

fn side(session: &Session, shots: usize) -> SideReport {
    SideReport {
        status: session.status(),
        shots,
        ships_remaining: session.own_ships_remaining(),
    }
}

/// Play one match between two engines; `first` shoots first.
///
/// Every shot lands on a cell the attacker has not resolved yet, so a side
/// needing more than `size²` shots means the bookkeeping is broken.
pub fn play_match(config: &GameConfig, seed_a: u64, seed_b: u64) -> Result<MatchReport, GameError> {
    let mut first = Session::seeded(config.clone(), seed_a)?;
    let mut second = Session::seeded(config.clone(), seed_b)?;
    let budget = config.size * config.size;
    let (mut shots_first, mut shots_second) = (0, 0);

    loop {
        exchange(&mut first, &mut second)?;
        shots_first += 1;
        if first.is_end_game() || second.is_end_game() {
            break;
        }
        exchange(&mut second, &mut first)?;
        shots_second += 1;
        if first.is_end_game() || second.is_end_game() {
            break;
        }
        if shots_first > budget || shots_second > budget {
            return Err(GameError::InvariantViolation(Invariant::ShotBudgetExceeded {
                shots: shots_first.max(shots_second),
            }));
        }
    }

    first.log_fields();
    second.log_fields();
    let winner = match (first.status(), second.status()) {
        (GameStatus::Won, _) => Some("first"),
        (_, GameStatus::Won) => Some("second"),
        _ => None,
    };
    log::debug!(
        "match {}/{} over after {} + {} shots, winner {:?}",
        seed_a,
        seed_b,
        shots_first,
        shots_second,
        winner
    );

    Ok(MatchReport {
        seeds: (seed_a, seed_b),
        first: side(&first, shots_first),
        second: side(&second, shots_second),
        winner,
    })
}

/// Shots one engine needs to sink every ship on `target`.
pub fn shots_to_sink(target: &Board, config: &GameConfig, seed: u64) -> Result<usize, GameError> {
    let mut attacker = Session::new(config.clone(), SmallRng::seed_from_u64(seed))?;
    let mut target = target.clone();
    let budget = target.size() * target.size();
    let mut shots = 0;
    while !attacker.is_victory() {
        if shots == budget {
            return Err(GameError::InvariantViolation(Invariant::ShotBudgetExceeded { shots }));
        }
        let pos = attacker.decide_next_shot()?;
        let reply = target.apply_incoming_shot(pos)?;
        attacker.record_reply(reply);
        shots += 1;
    }
    Ok(shots)
}
