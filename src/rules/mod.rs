//! Game rules for Ultimate Tic-Tac-Toe
//!
//! This module implements the rule set shared by the sub-boards and the meta board:
//! - Three-in-a-row win and full-grid draw detection
//! - Move legality, including the forced sub-board rule

pub mod legality;
pub mod win;

// Re-exports for convenient access
pub use legality::{check_move, illegal_reason};
pub use win::{grid_outcome, has_line, winning_line, WIN_LINES};
