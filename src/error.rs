//! Error types for the engine

use std::fmt;

use crate::board::Move;

/// Why a move was rejected at the position boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IllegalReason {
    /// Sub-board or cell index outside 0-8
    OutOfRange,
    /// Target cell already claimed
    CellOccupied,
    /// Target sub-board is already won or drawn
    SubBoardClosed,
    /// Previous move forces play into another sub-board
    WrongSubBoard { forced: u8 },
    /// The meta board is already decided
    GameOver,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllegalReason::OutOfRange => write!(f, "index out of range"),
            IllegalReason::CellOccupied => write!(f, "cell is occupied"),
            IllegalReason::SubBoardClosed => write!(f, "sub-board is already decided"),
            IllegalReason::WrongSubBoard { forced } => {
                write!(f, "play is forced into sub-board {forced}")
            }
            IllegalReason::GameOver => write!(f, "game is over"),
        }
    }
}

/// Engine errors
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Move rejected by the legality rules
    #[error("Illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: IllegalReason },

    /// Search requested on a finished game
    #[error("No legal moves: the game is already over")]
    NoLegalMoves,

    /// Invalid engine or cache configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::IllegalMove {
            mv: Move::new(3, 4),
            reason: IllegalReason::WrongSubBoard { forced: 2 },
        };
        assert_eq!(
            err.to_string(),
            "Illegal move (3, 4): play is forced into sub-board 2"
        );
        assert_eq!(
            Error::Configuration("capacity must be positive".into()).to_string(),
            "Configuration error: capacity must be positive"
        );
    }
}
