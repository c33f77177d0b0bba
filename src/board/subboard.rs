//! A single 3x3 grid with two occupancy masks

use super::bitboard::Bitboard;
use super::{Outcome, Player, CELLS};
use crate::error::IllegalReason;
use crate::eval::evaluate_board;
use crate::rules::win::grid_outcome;

/// One local 3x3 grid.
///
/// Each player owns a 9-bit mask; the two masks never share a bit.
/// Once the grid is won or drawn no further claims are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SubBoard {
    x: Bitboard,
    o: Bitboard,
}

/// The meta board: cell `s` is claimed by whoever wins sub-board `s`.
///
/// Only `Position` writes to it, and only when a sub-board is won.
pub type GlobalBoard = SubBoard;

impl SubBoard {
    pub const fn new() -> Self {
        Self {
            x: Bitboard::new(),
            o: Bitboard::new(),
        }
    }

    /// Build from raw masks. Returns `None` if the masks overlap.
    pub fn from_masks(x: u16, o: u16) -> Option<Self> {
        let (x, o) = (Bitboard::from_bits(x), Bitboard::from_bits(o));
        if x.bits() & o.bits() != 0 {
            return None;
        }
        Some(Self { x, o })
    }

    /// Occupancy mask of a player
    #[inline]
    pub fn cells(&self, player: Player) -> Bitboard {
        match player {
            Player::X => self.x,
            Player::O => self.o,
        }
    }

    /// Occupancy of both players
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.x.union(self.o)
    }

    /// Owner of a cell
    #[inline]
    pub fn get(&self, cell: u8) -> Option<Player> {
        if self.x.get(cell) {
            Some(Player::X)
        } else if self.o.get(cell) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Check if neither player holds the cell
    #[inline]
    pub fn is_cell_free(&self, cell: u8) -> bool {
        !self.occupied().get(cell)
    }

    /// Number of empty cells
    #[inline]
    pub fn free_count(&self) -> u32 {
        CELLS as u32 - self.occupied().count()
    }

    /// Claim a cell for `player` and report the grid's new state.
    ///
    /// Fails if the cell is out of range, already taken, or the grid is
    /// already decided. Nothing is modified on failure.
    pub fn play(&mut self, cell: u8, player: Player) -> Result<Outcome, IllegalReason> {
        if cell as usize >= CELLS {
            return Err(IllegalReason::OutOfRange);
        }
        if self.outcome().is_terminal() {
            return Err(IllegalReason::SubBoardClosed);
        }
        if !self.is_cell_free(cell) {
            return Err(IllegalReason::CellOccupied);
        }

        match player {
            Player::X => self.x.set(cell),
            Player::O => self.o.set(cell),
        }
        Ok(self.outcome())
    }

    /// Set a cell without legality checks; the meta board derivation uses this
    pub(crate) fn claim(&mut self, cell: u8, player: Player) {
        debug_assert!(self.is_cell_free(cell));
        match player {
            Player::X => self.x.set(cell),
            Player::O => self.o.set(cell),
        }
    }

    /// Win, draw or ongoing
    #[inline]
    pub fn outcome(&self) -> Outcome {
        grid_outcome(self.x, self.o)
    }

    /// Line-control score, positive for X
    #[inline]
    pub fn evaluate(&self) -> i32 {
        evaluate_board(self)
    }

    /// Same grid with the players' pieces exchanged
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            x: self.o,
            o: self.x,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_marks_cell() {
        let mut board = SubBoard::new();
        assert!(board.is_cell_free(4));
        assert_eq!(board.play(4, Player::X), Ok(Outcome::Ongoing));
        assert!(!board.is_cell_free(4));
        assert_eq!(board.get(4), Some(Player::X));
        assert_eq!(board.get(0), None);
        assert_eq!(board.free_count(), 8);
    }

    #[test]
    fn test_play_occupied_cell_rejected() {
        let mut board = SubBoard::new();
        board.play(4, Player::X).unwrap();
        assert_eq!(board.play(4, Player::O), Err(IllegalReason::CellOccupied));
        assert_eq!(board.play(4, Player::X), Err(IllegalReason::CellOccupied));
        // Rejection leaves the board untouched
        assert_eq!(board.cells(Player::O).count(), 0);
    }

    #[test]
    fn test_play_out_of_range() {
        let mut board = SubBoard::new();
        assert_eq!(board.play(9, Player::X), Err(IllegalReason::OutOfRange));
    }

    #[test]
    fn test_play_completing_line_wins() {
        let mut board = SubBoard::new();
        board.play(6, Player::O).unwrap();
        board.play(7, Player::O).unwrap();
        assert_eq!(board.play(8, Player::O), Ok(Outcome::Win(Player::O)));
    }

    #[test]
    fn test_closed_board_rejects_moves() {
        let mut board = SubBoard::from_masks(0b111_000_000, 0).unwrap();
        assert_eq!(board.outcome(), Outcome::Win(Player::X));
        assert_eq!(board.play(0, Player::O), Err(IllegalReason::SubBoardClosed));
    }

    #[test]
    fn test_draw_detected_on_last_cell() {
        let mut board = SubBoard::from_masks(0b110_001_100, 0b001_110_010).unwrap();
        assert_eq!(board.outcome(), Outcome::Ongoing);
        assert_eq!(board.play(0, Player::X), Ok(Outcome::Draw));
        assert_eq!(board.free_count(), 0);
    }

    #[test]
    fn test_from_masks_rejects_overlap() {
        assert!(SubBoard::from_masks(0b1, 0b1).is_none());
        assert!(SubBoard::from_masks(0b1, 0b10).is_some());
    }

    #[test]
    fn test_swapped_negates_evaluation() {
        let board = SubBoard::from_masks(0b000_011_001, 0b100_000_010).unwrap();
        assert_eq!(board.swapped().evaluate(), -board.evaluate());
        assert_eq!(board.swapped().swapped(), board);
    }
}
