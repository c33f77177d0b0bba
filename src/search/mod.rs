//! Search module for Ultimate Tic-Tac-Toe
//!
//! Contains:
//! - Zobrist hashing for position identification
//! - Transposition table for caching search results
//! - Minimax search with alpha-beta pruning and iterative deepening

pub mod alphabeta;
pub mod tt;
pub mod zobrist;

pub use alphabeta::{SearchLimits, SearchResult, SearchStats, Searcher};
pub use tt::{EntryType, TTEntry, TTStats, TranspositionTable, DEFAULT_CAPACITY};
pub use zobrist::{position_hash, ZobristTable, ZOBRIST};
