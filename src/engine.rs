//! Main AI Engine integrating the search components
//!
//! The engine picks a move for the side to move in this order:
//!
//! 1. **Immediate win**: a move that completes a line on the meta board
//! 2. **Alpha-Beta**: minimax search with transposition table, either to a
//!    fixed depth or by iterative deepening under a time limit
//!
//! # Example
//!
//! ```
//! use uttt::{AIEngine, EngineConfig, Position, SearchType};
//!
//! let config = EngineConfig::default().with_tt_capacity(65_537).with_max_depth(2);
//! let mut engine = AIEngine::with_config(config).unwrap();
//! let mut position = Position::new();
//!
//! let result = engine.get_move_with_stats(&position).unwrap();
//! assert_eq!(result.search_type, SearchType::AlphaBeta);
//! position.play(result.best_move).unwrap();
//! ```

use std::time::Instant;

use log::{info, warn};

use crate::board::{Move, Outcome, Player, Position};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::eval::LineScore;
use crate::search::{SearchLimits, SearchResult, Searcher, TTStats, TranspositionTable};

/// Type of search that produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchType {
    /// Move completes a line on the meta board
    ImmediateWin,
    /// Regular alpha-beta search result
    AlphaBeta,
}

/// Result of a move search with detailed statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub best_move: Move,
    /// Score of the move, positive for X
    pub score: i32,
    /// Type of search that found this move
    pub search_type: SearchType,
    /// Deepest completed search depth (0 for immediate wins)
    pub depth: u8,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Number of nodes searched
    pub nodes: u64,
    /// Search was cut short by a time limit or node budget
    pub aborted: bool,
}

impl MoveResult {
    #[inline]
    fn immediate_win(mv: Move, player: Player, time_ms: u64) -> Self {
        Self {
            best_move: mv,
            score: player.sign() * LineScore::WIN,
            search_type: SearchType::ImmediateWin,
            depth: 0,
            time_ms,
            nodes: 1,
            aborted: false,
        }
    }

    #[inline]
    fn from_alphabeta(mv: Move, result: &SearchResult, time_ms: u64) -> Self {
        Self {
            best_move: mv,
            score: result.score,
            search_type: SearchType::AlphaBeta,
            depth: result.depth,
            time_ms,
            nodes: result.nodes,
            aborted: result.aborted,
        }
    }
}

/// Main AI Engine for Ultimate Tic-Tac-Toe.
///
/// Owns a searcher whose transposition table persists between moves; call
/// `clear_cache()` when starting a new game.
pub struct AIEngine {
    searcher: Searcher,
    config: EngineConfig,
}

impl AIEngine {
    /// Create a new AI engine with default settings.
    ///
    /// Default configuration:
    /// - 1,000,003-slot transposition table
    /// - Fixed depth 6
    /// - No time limit or node budget
    #[must_use]
    pub fn new() -> Self {
        Self {
            searcher: Searcher::with_table(TranspositionTable::default()),
            config: EngineConfig::default(),
        }
    }

    /// Create an AI engine with custom configuration.
    ///
    /// # Errors
    ///
    /// `Error::Configuration` if the configuration does not validate.
    ///
    /// # Example
    ///
    /// ```
    /// use uttt::{AIEngine, EngineConfig};
    ///
    /// let config = EngineConfig::default().with_max_depth(8).with_time_limit_ms(500);
    /// let engine = AIEngine::with_config(config).unwrap();
    /// assert_eq!(engine.max_depth(), 8);
    ///
    /// assert!(AIEngine::with_config(EngineConfig::default().with_max_depth(0)).is_err());
    /// ```
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            searcher: Searcher::new(config.tt_capacity)?,
            config,
        })
    }

    /// Get the best move for the given position.
    ///
    /// Returns `None` if the game is already over.
    #[must_use]
    pub fn get_move(&mut self, position: &Position) -> Option<Move> {
        self.get_move_with_stats(position).ok().map(|r| r.best_move)
    }

    /// Get the best move with detailed search statistics.
    ///
    /// # Errors
    ///
    /// `Error::NoLegalMoves` if the game is already over.
    pub fn get_move_with_stats(&mut self, position: &Position) -> Result<MoveResult> {
        let start = Instant::now();

        let moves = position.legal_moves();
        let Some(&first) = moves.first() else {
            return Err(Error::NoLegalMoves);
        };
        let player = position.to_move();

        if let Some(mv) = self.find_immediate_win(position) {
            info!("{player} wins immediately with {mv}");
            return Ok(MoveResult::immediate_win(
                mv,
                player,
                start.elapsed().as_millis() as u64,
            ));
        }

        self.searcher.set_limits(SearchLimits {
            deadline: None,
            node_budget: self.config.node_budget,
        });
        let result = match self.config.time_limit() {
            Some(limit) => self
                .searcher
                .search_timed(position, self.config.max_depth, limit)?,
            None => self.searcher.search(position, self.config.max_depth)?,
        };

        let best_move = match result.best_move {
            Some(mv) => mv,
            None => {
                warn!("Search returned no move, falling back to {first}");
                first
            }
        };

        let time_ms = start.elapsed().as_millis() as u64;
        info!(
            "{player} plays {best_move} (score {}, depth {}, {} nodes, {time_ms}ms)",
            result.score, result.depth, result.nodes
        );
        Ok(MoveResult::from_alphabeta(best_move, &result, time_ms))
    }

    /// First move, in enumeration order, that wins the meta board for the
    /// side to move.
    fn find_immediate_win(&self, position: &Position) -> Option<Move> {
        let player = position.to_move();
        position.legal_moves().into_iter().find(|&mv| {
            position
                .after(mv)
                .is_ok_and(|next| next.global_outcome() == Outcome::Win(player))
        })
    }

    /// Set the search depth. A depth of 0 is raised to 1.
    pub fn set_max_depth(&mut self, depth: u8) {
        if depth == 0 {
            warn!("max_depth 0 is not searchable, using 1");
        }
        self.config.max_depth = depth.max(1);
    }

    /// Set or remove the per-move time limit.
    pub fn set_time_limit(&mut self, time_ms: Option<u64>) {
        self.config.time_limit_ms = time_ms;
    }

    /// Clear the transposition table cache.
    ///
    /// Call this when starting a new game to avoid stale positions.
    pub fn clear_cache(&mut self) {
        self.searcher.clear_tt();
    }

    /// Get the current maximum search depth.
    #[must_use]
    pub fn max_depth(&self) -> u8 {
        self.config.max_depth
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get transposition table statistics.
    #[must_use]
    pub fn tt_stats(&self) -> Option<TTStats> {
        self.searcher.tt_stats()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new()
    }
}
