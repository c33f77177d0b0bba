//! Win and draw detection on a 3x3 grid
//!
//! The same rules apply to a sub-board and to the meta board: three cells in
//! a row (horizontal, vertical or diagonal) win, a full grid without such a
//! line is a draw.

use crate::board::{Bitboard, Outcome, Player};

/// The 8 three-in-a-row masks (bit i = cell i)
pub const WIN_LINES: [u16; 8] = [
    0b111_000_000,
    0b000_111_000,
    0b000_000_111,
    0b100_100_100,
    0b010_010_010,
    0b001_001_001,
    0b100_010_001,
    0b001_010_100,
];

/// Check if the cells contain a complete line
#[inline]
pub fn has_line(cells: Bitboard) -> bool {
    WIN_LINES.iter().any(|&line| cells.contains(line))
}

/// Find the first complete line, if any
pub fn winning_line(cells: Bitboard) -> Option<u16> {
    WIN_LINES.iter().copied().find(|&line| cells.contains(line))
}

/// Classify a grid from both players' occupancy.
///
/// Win if either player owns a full line (X checked first), Draw if every
/// cell is taken, otherwise Ongoing.
pub fn grid_outcome(x: Bitboard, o: Bitboard) -> Outcome {
    if has_line(x) {
        return Outcome::Win(Player::X);
    }
    if has_line(o) {
        return Outcome::Win(Player::O);
    }
    if x.union(o).is_full() {
        return Outcome::Draw;
    }
    Outcome::Ongoing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_line_wins() {
        for &line in &WIN_LINES {
            let x = Bitboard::from_bits(line);
            assert_eq!(grid_outcome(x, Bitboard::new()), Outcome::Win(Player::X));
            assert_eq!(grid_outcome(Bitboard::new(), x), Outcome::Win(Player::O));
        }
    }

    #[test]
    fn test_top_row_win() {
        let x = Bitboard::from_bits(0b111_000_000);
        assert!(has_line(x));
        assert_eq!(winning_line(x), Some(0b111_000_000));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let x = Bitboard::from_bits(0b110_001_101);
        let o = Bitboard::from_bits(0b001_110_010);
        assert_eq!(x.bits() & o.bits(), 0);
        assert!(x.union(o).is_full());
        assert_eq!(grid_outcome(x, o), Outcome::Draw);
    }

    #[test]
    fn test_full_board_with_line_is_win() {
        let x = Bitboard::from_bits(0b111_010_100);
        let o = Bitboard::from_bits(0b000_101_011);
        assert!(x.union(o).is_full());
        assert_eq!(grid_outcome(x, o), Outcome::Win(Player::X));
    }

    #[test]
    fn test_partial_board_ongoing() {
        let x = Bitboard::from_bits(0b110_000_000);
        let o = Bitboard::from_bits(0b001_000_000);
        assert_eq!(grid_outcome(x, o), Outcome::Ongoing);
        assert_eq!(winning_line(x), None);
    }
}
