//! Ultimate Tic-Tac-Toe AI Engine
//!
//! Nine 3x3 sub-boards arranged in a 3x3 meta board:
//! - Winning a sub-board claims the matching cell of the meta board
//! - Three claimed meta cells in a row win the game
//! - The cell a player picks decides the sub-board the opponent must play in
//!   next; if that sub-board is already decided, the opponent may play in any
//!   open sub-board
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Sub-board bitmasks and the full game position
//! - [`rules`]: Win detection and move legality
//! - [`eval`]: Line-control heuristic
//! - [`search`]: Zobrist hashing, transposition table and alpha-beta search
//! - [`engine`]: Main AI engine integrating all components
//! - [`config`]: Engine settings
//!
//! # Quick Start
//!
//! ```
//! use uttt::{apply_move, best_move, new_game, Move};
//!
//! let position = new_game();
//! let position = apply_move(&position, 4, 4).unwrap();
//!
//! // O is now forced into sub-board 4
//! let reply = best_move(&position, 2).unwrap();
//! assert_eq!(reply.sub, 4);
//!
//! // Playing anywhere else is rejected
//! assert!(apply_move(&position, 0, 0).is_err());
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{GlobalBoard, Move, Outcome, Player, Position, SubBoard};
pub use config::EngineConfig;
pub use engine::{AIEngine, MoveResult, SearchType};
pub use error::{Error, IllegalReason, Result};
pub use search::position_hash;

use search::Searcher;

/// Cache slots used by [`best_move`]
const BEST_MOVE_TT_CAPACITY: usize = 65_537;

/// Empty position: nine empty sub-boards, X to move anywhere
#[must_use]
pub fn new_game() -> Position {
    Position::new()
}

/// Copy of `position` with the side to move playing `cell` of sub-board `sub`.
///
/// # Errors
///
/// `Error::IllegalMove` if the move breaks a rule; `position` is unchanged.
pub fn apply_move(position: &Position, sub: u8, cell: u8) -> Result<Position> {
    position.after(Move::new(sub, cell))
}

/// Best move for the side to move, searched to `depth` plies.
///
/// Returns `None` only if the game is already over. A depth of 0 is treated
/// as 1.
#[must_use]
pub fn best_move(position: &Position, depth: u8) -> Option<Move> {
    let mut searcher = Searcher::new(BEST_MOVE_TT_CAPACITY).ok()?;
    searcher
        .search(position, depth.max(1))
        .ok()
        .and_then(|result| result.best_move)
}
