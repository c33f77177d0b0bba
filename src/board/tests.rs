//! Position invariants checked over random games

use super::*;
use crate::error::{Error, IllegalReason};
use crate::search::zobrist::ZOBRIST;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::collections::HashMap;

const GAMES: usize = 200;

// X O X / X O O / O X X with X still missing cell 0
const DRAW_X_MISSING_0: u16 = 0b1_1000_1100;
const DRAW_O: u16 = 0b0_0111_0010;

fn assert_invariants(position: &Position) {
    for s in 0..SUB_BOARDS as u8 {
        let sub_outcome = position.sub_board(s).outcome();
        assert_eq!(position.is_board_open(s), sub_outcome == Outcome::Ongoing);

        // Only wins reach the meta board
        let claimed = position.global_board().get(s);
        match sub_outcome {
            Outcome::Win(p) => assert_eq!(claimed, Some(p)),
            _ => assert_eq!(claimed, None),
        }
    }

    let open = (0..SUB_BOARDS as u8)
        .filter(|&s| position.sub_board(s).outcome() == Outcome::Ongoing)
        .count();
    assert_eq!(position.legal_boards().count_ones() as usize, open);

    if let Some(f) = position.forced_sub_board() {
        assert!(position.is_board_open(f));
    }

    assert_eq!(position.hash(), ZOBRIST.hash(position));
    assert_eq!(position.evaluate(), -position.swapped().evaluate());
}

fn random_game(rng: &mut Xoshiro256PlusPlus, mut visit: impl FnMut(&Position, Move)) -> Position {
    let mut position = Position::new();
    loop {
        let moves = position.legal_moves();
        if moves.is_empty() {
            return position;
        }
        let mv = moves[rng.random_range(0..moves.len())];
        visit(&position, mv);
        position.play(mv).unwrap();
    }
}

#[test]
fn test_random_games_keep_invariants() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);

    for _ in 0..GAMES {
        let last = random_game(&mut rng, |position, mv| {
            assert_invariants(position);

            let next = position.after(mv).unwrap();
            assert_eq!(next.free_cells(), position.free_cells() - 1);
            assert_eq!(next.to_move(), position.to_move().opponent());

            // The cell just played picks the next target unless that board closed
            match next.forced_sub_board() {
                Some(f) => assert_eq!(f, mv.cell),
                None => assert!(!next.is_board_open(mv.cell)),
            }
        });

        assert_invariants(&last);
        assert!(last.global_outcome().is_terminal());
    }
}

#[test]
fn test_random_games_legal_moves_ascending() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(11);

    for _ in 0..50 {
        random_game(&mut rng, |position, _| {
            let moves = position.legal_moves();
            assert!(moves.windows(2).all(|w| w[0].to_index() < w[1].to_index()));
            assert!(moves.iter().all(|&m| position.is_legal(m)));

            let legal_count = (0..TOTAL_CELLS)
                .filter(|&idx| position.is_legal(Move::from_index(idx)))
                .count();
            assert_eq!(legal_count, moves.len());
        });
    }
}

#[test]
fn test_random_games_no_hash_collisions() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(23);
    let mut seen: HashMap<u64, Position> = HashMap::new();

    for _ in 0..GAMES {
        random_game(&mut rng, |position, _| {
            if let Some(previous) = seen.insert(position.hash(), position.clone()) {
                assert_eq!(&previous, position);
            }
        });
    }
}

#[test]
fn test_illegal_moves_leave_position_unchanged() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(31);

    for _ in 0..20 {
        random_game(&mut rng, |position, _| {
            for idx in 0..TOTAL_CELLS {
                let mv = Move::from_index(idx);
                if position.is_legal(mv) {
                    continue;
                }
                let mut copy = position.clone();
                assert!(matches!(copy.play(mv), Err(Error::IllegalMove { .. })));
                assert_eq!(&copy, position);
            }
        });
    }
}

#[test]
fn test_drawn_sub_board_closes_without_claim() {
    let mut subs = [SubBoard::new(); SUB_BOARDS];
    subs[0] = SubBoard::from_masks(DRAW_X_MISSING_0, DRAW_O).unwrap();
    let mut position = Position::from_parts(subs, Player::X, Some(0)).unwrap();

    let outcome = position.play(Move::new(0, 0)).unwrap();

    assert_eq!(outcome, Outcome::Draw);
    assert!(!position.is_board_open(0));
    assert_eq!(position.global_board().get(0), None);
    // Cell 0 points back at the board that just closed
    assert_eq!(position.forced_sub_board(), None);
    assert_eq!(position.legal_moves().len(), 8 * CELLS);
    assert_invariants(&position);
}

#[test]
fn test_from_parts_derives_closed_boards() {
    let mut subs = [SubBoard::new(); SUB_BOARDS];
    subs[3] = SubBoard::from_masks(DRAW_X_MISSING_0 | 1, DRAW_O).unwrap();
    subs[5] = SubBoard::from_masks(0b111, 0b11_0000).unwrap();

    let position = Position::from_parts(subs, Player::O, None).unwrap();

    assert_eq!(position.legal_boards(), FULL_MASK & !(1 << 3) & !(1 << 5));
    assert_eq!(position.global_board().get(3), None);
    assert_eq!(position.global_board().get(5), Some(Player::X));
    assert_invariants(&position);
}

#[test]
fn test_from_parts_rejects_bad_forced_board() {
    let mut subs = [SubBoard::new(); SUB_BOARDS];
    subs[2] = SubBoard::from_masks(0b1_0001_0001, 0b110).unwrap();

    assert!(matches!(
        Position::from_parts(subs, Player::O, Some(2)),
        Err(Error::Configuration(_))
    ));
    assert!(matches!(
        Position::from_parts(subs, Player::O, Some(9)),
        Err(Error::Configuration(_))
    ));
    assert!(Position::from_parts(subs, Player::O, Some(1)).is_ok());
}

#[test]
fn test_finished_game_rejects_every_move() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(43);
    let last = random_game(&mut rng, |_, _| {});

    for idx in 0..TOTAL_CELLS {
        let err = last.after(Move::from_index(idx)).unwrap_err();
        assert_eq!(
            err,
            Error::IllegalMove {
                mv: Move::from_index(idx),
                reason: IllegalReason::GameOver,
            }
        );
    }
}
