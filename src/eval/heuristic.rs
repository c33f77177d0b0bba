//! Heuristic evaluation function for Ultimate Tic-Tac-Toe positions
//!
//! This module provides the static evaluation used at the leaves of the
//! minimax search. Every 3x3 grid is scored by line control: for each of the
//! eight lines, a player who is alone on it earns `10^(n-1)` for `n` pieces.
//! The position score adds all sub-boards and the meta board at ten times
//! weight, since meta-level control decides the game.

use crate::board::{Player, Position, SubBoard, SUB_BOARDS};
use crate::rules::win::WIN_LINES;

use super::patterns::{line_score, LineScore};

/// Evaluate a single 3x3 grid.
///
/// Returns a score where:
/// - Positive values indicate advantage for X
/// - Negative values indicate advantage for O
///
/// Antisymmetric: swapping the two occupancy masks negates the result.
#[must_use]
pub fn evaluate_board(board: &SubBoard) -> i32 {
    let x = board.cells(Player::X);
    let o = board.cells(Player::O);

    let mut score = 0;
    for &line in &WIN_LINES {
        let xc = x.count_in(line);
        let oc = o.count_in(line);
        match (xc, oc) {
            // Contested: neither side can complete it
            (a, b) if a > 0 && b > 0 => {}
            (a, 0) => score += line_score(a),
            (0, b) => score -= line_score(b),
            _ => {}
        }
    }
    score
}

/// Evaluate a whole position.
///
/// Sum of the nine sub-board scores plus the meta board's score multiplied
/// by `LineScore::GLOBAL_WEIGHT`. Terminal detection is the search's job;
/// this is purely heuristic.
///
/// # Arguments
/// * `position` - The position to score
///
/// # Returns
/// An i32 score, positive for X
#[must_use]
pub fn evaluate(position: &Position) -> i32 {
    let local: i32 = (0..SUB_BOARDS as u8)
        .map(|s| evaluate_board(position.sub_board(s)))
        .sum();
    local + evaluate_board(position.global_board()) * LineScore::GLOBAL_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Move, Outcome};

    fn board(x: u16, o: u16) -> SubBoard {
        SubBoard::from_masks(x, o).unwrap()
    }

    #[test]
    fn test_empty_board_scores_zero() {
        assert_eq!(evaluate_board(&SubBoard::new()), 0);
        assert_eq!(evaluate(&Position::new()), 0);
    }

    #[test]
    fn test_single_piece_counts_its_lines() {
        // Center sits on 4 lines, corners on 3, edges on 2
        assert_eq!(evaluate_board(&board(1 << 4, 0)), 4);
        assert_eq!(evaluate_board(&board(1 << 0, 0)), 3);
        assert_eq!(evaluate_board(&board(1 << 1, 0)), 2);
        assert_eq!(evaluate_board(&board(0, 1 << 4)), -4);
    }

    #[test]
    fn test_two_in_a_line() {
        // Cells 0 and 1: shared row scores 10, plus col0, diag, col1 with one piece each
        assert_eq!(evaluate_board(&board(0b11, 0)), 10 + 1 + 1 + 1);
    }

    #[test]
    fn test_contested_line_scores_zero() {
        // X at 0, O at 1: the top row is contested
        // X: col0 + diag = 2, O: col1 = -1
        assert_eq!(evaluate_board(&board(1 << 0, 1 << 1)), 1);
    }

    #[test]
    fn test_completed_line_scores_hundred() {
        // Row {0,1,2} = 100, cols 0/1/2 = 3, both diagonals = 2
        assert_eq!(evaluate_board(&board(0b111, 0)), 100 + 3 + 2);
    }

    #[test]
    fn test_board_antisymmetry() {
        let cases = [
            (0b000_010_001, 0b100_000_000),
            (0b111_000_000, 0b000_011_000),
            (0b110_001_101, 0b001_110_010),
            (0, 0b000_000_111),
        ];
        for (x, o) in cases {
            assert_eq!(evaluate_board(&board(x, o)), -evaluate_board(&board(o, x)));
        }
    }

    #[test]
    fn test_global_board_weighted() {
        let mut position = Position::new();
        // X takes sub-board 4 with cells 0, 1, 2
        for mv in [
            Move::new(4, 0),
            Move::new(0, 4),
            Move::new(4, 1),
            Move::new(1, 4),
            Move::new(4, 2),
        ] {
            position.play(mv).unwrap();
        }
        assert_eq!(position.sub_board(4).outcome(), Outcome::Win(Player::X));
        // Meta board: X holds the center, worth 4
        assert_eq!(evaluate_board(position.global_board()), 4);

        let local: i32 = (0..9u8).map(|s| evaluate_board(position.sub_board(s))).sum();
        assert_eq!(evaluate(&position), local + 4 * LineScore::GLOBAL_WEIGHT);
    }
}
