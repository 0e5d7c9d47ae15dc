use std::collections::HashSet;

use seabattle::{
    diagonal_shots, mark_surrounding_as_miss, next_possible_shots, Board, GameError, Intel,
    Invariant, Mode, OpponentModel, Position, ShotResult, Targeter,
};
use rand::{rngs::SmallRng, SeedableRng};

const FIELD: [u8; 100] = [
    0, 0, 0, 0, 0, 0, 1, 0, 0, 0,
    1, 1, 1, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 1, 0, 1, 0, 1, 0, 0,
    1, 1, 0, 1, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 1, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 1, 0, 1, 1, 1, 0, 0,
    0, 1, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 1, 0, 0, 1, 1, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 1, 0,
];

fn pos(x: usize, y: usize) -> Position {
    Position::new(x, y)
}

fn model_from(codes: &[u8]) -> OpponentModel {
    let cells = codes
        .iter()
        .map(|c| match c {
            1 => Intel::Ship,
            4 => Intel::Miss,
            _ => Intel::Unknown,
        })
        .collect();
    OpponentModel::from_cells(10, cells).unwrap()
}

fn as_set(shots: Vec<Position>) -> HashSet<Position> {
    shots.into_iter().collect()
}

#[test]
fn test_diagonal_shots_cover_lattice() {
    let step_4: HashSet<Position> = [
        (4, 1), (8, 1), (3, 2), (7, 2), (2, 3), (6, 3), (10, 3), (1, 4), (5, 4), (9, 4),
        (4, 5), (8, 5), (3, 6), (7, 6), (2, 7), (6, 7), (10, 7), (1, 8), (5, 8), (9, 8),
        (4, 9), (8, 9), (3, 10), (7, 10),
    ]
    .into_iter()
    .map(|(x, y)| pos(x, y))
    .collect();
    let shots = diagonal_shots(10, 4);
    assert_eq!(shots.len(), 24);
    assert_eq!(as_set(shots), step_4);

    let step_2 = diagonal_shots(10, 2);
    assert_eq!(step_2.len(), 50);
    assert!(step_2.iter().all(|p| (p.x + p.y) % 2 == 1));
    assert!(step_4.is_subset(&as_set(step_2)));
}

#[test]
fn test_diagonal_shots_sink_every_lattice_boat() {
    for step in [4, 2] {
        let lattice = diagonal_shots(10, step);
        let codes: Vec<u8> = (0..100)
            .map(|i| u8::from(lattice.contains(&Position::from_index(i, 10))))
            .collect();
        let mut board = Board::from_codes(10, &codes).unwrap();
        for p in lattice {
            assert_eq!(board.apply_incoming_shot(p).unwrap(), ShotResult::Kill);
        }
    }
}

#[test]
fn test_get_next_possible_shots() {
    let model = model_from(&FIELD);

    let shots = as_set(next_possible_shots(&model, pos(7, 1)));
    assert_eq!(shots, as_set(vec![pos(6, 1), pos(8, 1), pos(7, 2)]));

    let shots = as_set(next_possible_shots(&model, pos(7, 7)));
    assert_eq!(shots, as_set(vec![pos(9, 7), pos(5, 7)]));

    let shots = as_set(next_possible_shots(&model, pos(2, 8)));
    assert_eq!(shots, as_set(vec![pos(2, 7), pos(2, 10)]));
}

#[test]
fn test_candidates_commit_to_known_axis() {
    let mut model = OpponentModel::new(10);
    model.mark(pos(5, 5), Intel::Ship);
    model.mark(pos(6, 5), Intel::Ship);
    let shots = as_set(next_possible_shots(&model, pos(5, 5)));
    assert_eq!(shots, as_set(vec![pos(4, 5), pos(7, 5)]));

    // a miss at one end leaves only the other
    model.mark(pos(7, 5), Intel::Miss);
    assert_eq!(next_possible_shots(&model, pos(5, 5)), vec![pos(4, 5)]);
}

#[test]
fn test_candidates_clipped_at_edges() {
    let mut model = OpponentModel::new(10);
    model.mark(pos(1, 1), Intel::Ship);
    assert_eq!(
        as_set(next_possible_shots(&model, pos(1, 1))),
        as_set(vec![pos(2, 1), pos(1, 2)])
    );
}

#[test]
fn test_mark_positions_around_ship_as_missed() {
    let mut model = model_from(&FIELD);
    mark_surrounding_as_miss(&mut model, pos(7, 1));
    for (x, y) in [(6, 1), (8, 1), (6, 2), (7, 2), (8, 2)] {
        assert_eq!(model.status(pos(x, y)), Some(Intel::Miss), "{},{}", x, y);
    }
    assert_eq!(model.status(pos(7, 1)), Some(Intel::Ship));

    let mut model = model_from(&FIELD);
    mark_surrounding_as_miss(&mut model, pos(7, 7));
    let halo = [
        (5, 6), (6, 6), (7, 6), (8, 6), (9, 6),
        (5, 7), (9, 7),
        (5, 8), (6, 8), (7, 8), (8, 8), (9, 8),
    ];
    for (x, y) in halo {
        assert_eq!(model.status(pos(x, y)), Some(Intel::Miss), "{},{}", x, y);
    }
    for (x, y) in [(6, 7), (7, 7), (8, 7), (4, 7)] {
        assert_eq!(model.status(pos(x, y)), Some(Intel::Ship), "{},{}", x, y);
    }
    // nothing beyond the halo is touched
    assert_eq!(model.status(pos(10, 7)), Some(Intel::Unknown));
    assert_eq!(model.status(pos(7, 9)), Some(Intel::Unknown));
}

#[test]
fn test_hunt_and_target_cycle() {
    let mut rng = SmallRng::seed_from_u64(11);
    let mut model = OpponentModel::new(10);
    let mut targeter = Targeter::new(10);

    let first = targeter.next_shot(&mut model, 10, &mut rng).unwrap();
    assert_eq!(targeter.mode(), Mode::Searching);
    assert!(diagonal_shots(10, 4).contains(&first));
    model.record(first, ShotResult::Hit);

    let second = targeter.next_shot(&mut model, 10, &mut rng).unwrap();
    assert_eq!(targeter.mode(), Mode::Pursuing { anchor: first });
    assert_eq!(first.x.abs_diff(second.x) + first.y.abs_diff(second.y), 1);
    model.record(second, ShotResult::Miss);

    let third = targeter.next_shot(&mut model, 10, &mut rng).unwrap();
    assert_eq!(targeter.mode(), Mode::Pursuing { anchor: first });
    assert_ne!(third, second);
    assert_eq!(first.x.abs_diff(third.x) + first.y.abs_diff(third.y), 1);
    model.record(third, ShotResult::Kill);

    let fourth = targeter.next_shot(&mut model, 9, &mut rng).unwrap();
    assert_eq!(targeter.mode(), Mode::Searching);
    for ship in [first, third] {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(n) = ship.offset(dx, dy) else { continue };
                if n == first || n == third {
                    continue;
                }
                if let Some(intel) = model.status(n) {
                    assert_eq!(intel, Intel::Miss, "halo cell {} left open", n);
                }
            }
        }
    }
    assert!(model.is_unknown(fourth));
}

#[test]
fn test_kill_on_first_hit_stays_searching() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut model = OpponentModel::new(10);
    let mut targeter = Targeter::new(10);

    let first = targeter.next_shot(&mut model, 10, &mut rng).unwrap();
    model.record(first, ShotResult::Kill);
    let next = targeter.next_shot(&mut model, 9, &mut rng).unwrap();

    assert_eq!(targeter.mode(), Mode::Searching);
    assert!(model.is_unknown(next));
    for dy in -1..=1 {
        for dx in -1..=1 {
            if let Some(n) = first.offset(dx, dy).filter(|n| *n != first) {
                if let Some(intel) = model.status(n) {
                    assert_eq!(intel, Intel::Miss);
                }
            }
        }
    }
}

#[test]
fn test_probe_schedule_order_then_fallback() {
    let mut rng = SmallRng::seed_from_u64(99);
    let mut model = OpponentModel::new(10);
    let mut targeter = Targeter::new(10);
    let step_4 = as_set(diagonal_shots(10, 4));
    let step_2 = as_set(diagonal_shots(10, 2));

    let mut fired = HashSet::new();
    for n in 0..100 {
        let shot = targeter.next_shot(&mut model, 10, &mut rng).unwrap();
        assert!(fired.insert(shot), "{} fired twice", shot);
        if n < 24 {
            assert!(step_4.contains(&shot));
        } else if n < 50 {
            assert!(step_2.contains(&shot) && !step_4.contains(&shot));
        } else {
            assert!(!step_2.contains(&shot));
        }
        model.record(shot, ShotResult::Miss);
    }
    assert_eq!(targeter.probes().remaining(), 0);
    assert_eq!(
        targeter.next_shot(&mut model, 10, &mut rng).unwrap_err(),
        GameError::InvariantViolation(Invariant::NoUnknownCells)
    );
}

#[test]
fn test_no_candidates_is_an_invariant_violation() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut model = OpponentModel::new(10);
    let mut targeter = Targeter::new(10);

    let first = targeter.next_shot(&mut model, 10, &mut rng).unwrap();
    model.record(first, ShotResult::Hit);
    for dir in seabattle::Direction::ALL {
        if let Some(n) = first.step(dir) {
            model.mark(n, Intel::Miss);
        }
    }
    assert_eq!(
        targeter.next_shot(&mut model, 10, &mut rng).unwrap_err(),
        GameError::InvariantViolation(Invariant::NoCandidates)
    );
}
