//! Board representation for Ultimate Tic-Tac-Toe

pub mod bitboard;
pub mod position;
pub mod subboard;

#[cfg(test)]
mod tests;

use std::fmt;

// Re-exports
pub use bitboard::{Bitboard, FULL_MASK};
pub use position::Position;
pub use subboard::{GlobalBoard, SubBoard};

/// Cells per 3x3 grid
pub const CELLS: usize = 9;
/// Number of sub-boards
pub const SUB_BOARDS: usize = 9;
/// Total cells across all sub-boards
pub const TOTAL_CELLS: usize = SUB_BOARDS * CELLS; // 81

/// The two players. X moves first and maximizes the evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get opponent
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Table index (X = 0, O = 1)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }

    /// Score polarity: positive favours X
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Player::X => 1,
            Player::O => -1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// State of a 3x3 grid or of the whole game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Ongoing,
    Draw,
    Win(Player),
}

impl Outcome {
    /// Won or drawn
    #[inline]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }
}

/// A move: cell `cell` of sub-board `sub`, both 0-8 in row-major order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub sub: u8,
    pub cell: u8,
}

impl Move {
    #[inline]
    pub fn new(sub: u8, cell: u8) -> Self {
        Self { sub, cell }
    }

    /// Both indices in 0-8
    #[inline]
    pub fn is_valid(self) -> bool {
        (self.sub as usize) < SUB_BOARDS && (self.cell as usize) < CELLS
    }

    /// Flat index 0-80 (sub-board major)
    #[inline]
    pub fn to_index(self) -> usize {
        self.sub as usize * CELLS + self.cell as usize
    }

    #[inline]
    pub fn from_index(idx: usize) -> Self {
        Self {
            sub: (idx / CELLS) as u8,
            cell: (idx % CELLS) as u8,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.sub, self.cell)
    }
}
