//! Move legality at the position boundary
//!
//! A move is rejected, never redirected: a mismatch with the forced
//! sub-board is an error even when the requested sub-board is open.

use crate::board::{Move, Position};
use crate::error::{Error, IllegalReason, Result};

/// Validate `mv` for the side to move in `position`.
///
/// Checks, in order: index range, game over, forced sub-board, decided
/// sub-board, occupied cell.
pub fn check_move(position: &Position, mv: Move) -> Result<()> {
    illegal_reason(position, mv).map_or(Ok(()), |reason| Err(Error::IllegalMove { mv, reason }))
}

/// First rule `mv` breaks, if any
pub fn illegal_reason(position: &Position, mv: Move) -> Option<IllegalReason> {
    if !mv.is_valid() {
        return Some(IllegalReason::OutOfRange);
    }
    if position.global_outcome().is_terminal() {
        return Some(IllegalReason::GameOver);
    }
    if let Some(forced) = position.forced_sub_board() {
        if forced != mv.sub {
            return Some(IllegalReason::WrongSubBoard { forced });
        }
    }
    if !position.is_board_open(mv.sub) {
        return Some(IllegalReason::SubBoardClosed);
    }
    if !position.sub_board(mv.sub).is_cell_free(mv.cell) {
        return Some(IllegalReason::CellOccupied);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Player, SubBoard};

    #[test]
    fn test_opening_moves_legal() {
        let position = Position::new();
        for idx in 0..81 {
            assert!(check_move(&position, Move::from_index(idx)).is_ok());
        }
    }

    #[test]
    fn test_out_of_range() {
        let position = Position::new();
        assert_eq!(
            illegal_reason(&position, Move::new(9, 0)),
            Some(IllegalReason::OutOfRange)
        );
        assert_eq!(
            illegal_reason(&position, Move::new(0, 9)),
            Some(IllegalReason::OutOfRange)
        );
    }

    #[test]
    fn test_forced_sub_board_mismatch_rejected() {
        let mut position = Position::new();
        position.play(Move::new(4, 0)).unwrap();
        // Sub-board 0 is forced; a move elsewhere is an error, not a redirect
        let err = check_move(&position, Move::new(3, 3)).unwrap_err();
        assert_eq!(
            err,
            Error::IllegalMove {
                mv: Move::new(3, 3),
                reason: IllegalReason::WrongSubBoard { forced: 0 },
            }
        );
        assert!(check_move(&position, Move::new(0, 5)).is_ok());
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut position = Position::new();
        position.play(Move::new(0, 0)).unwrap();
        assert_eq!(
            illegal_reason(&position, Move::new(0, 0)),
            Some(IllegalReason::CellOccupied)
        );
    }

    #[test]
    fn test_closed_sub_board_rejected() {
        let mut subs = [SubBoard::new(); 9];
        subs[2] = SubBoard::from_masks(0b000_000_111, 0b000_011_000).unwrap();
        let position = Position::from_parts(subs, Player::O, None).unwrap();
        assert_eq!(
            illegal_reason(&position, Move::new(2, 8)),
            Some(IllegalReason::SubBoardClosed)
        );
    }

    #[test]
    fn test_game_over_rejected() {
        let mut subs = [SubBoard::new(); 9];
        for s in [0, 4, 8] {
            subs[s] = SubBoard::from_masks(0b111_000_000, 0).unwrap();
        }
        let position = Position::from_parts(subs, Player::O, None).unwrap();
        assert_eq!(
            illegal_reason(&position, Move::new(1, 0)),
            Some(IllegalReason::GameOver)
        );
    }
}
