//! Evaluation module for Ultimate Tic-Tac-Toe positions
//!
//! Scores are signed with fixed polarity: positive favours X, negative favours O.
//! The evaluation considers:
//! - Uncontested line control on every sub-board
//! - The same line control on the meta board, weighted ten times higher

pub mod heuristic;
pub mod patterns;

pub use heuristic::{evaluate, evaluate_board};
pub use patterns::{line_score, LineScore};
