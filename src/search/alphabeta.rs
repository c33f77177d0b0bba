//! Minimax search with alpha-beta pruning and transposition table
//!
//! Scores have fixed polarity: X maximizes, O minimizes, regardless of whose
//! turn it is at the root. Every node works on its own copy of the position;
//! nothing is made and unmade in place.
//!
//! # Features
//!
//! - Alpha-beta pruning below the root; root moves each get a fresh window
//! - Transposition table probed before expanding a node and written after
//! - Deadline, node budget and external stop flag checked at every node
//! - Iterative deepening for time-limited play
//!
//! # Example
//!
//! ```
//! use uttt::board::{Move, Position};
//! use uttt::search::Searcher;
//!
//! let mut searcher = Searcher::new(65_537).unwrap();
//! let position = Position::new();
//!
//! let result = searcher.search(&position, 1).unwrap();
//! assert_eq!(result.best_move, Some(Move::new(0, 4)));
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::board::{Move, Outcome, Player, Position};
use crate::error::{Error, Result};
use crate::eval::LineScore;

use super::{EntryType, TTStats, TranspositionTable};

/// Infinity score for alpha-beta bounds
const INF: i32 = LineScore::WIN + 1;

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Sibling loops cut short by `beta <= alpha`
    pub cutoffs: u64,
    /// Total TT probes
    pub tt_probes: u64,
    /// TT probes that returned a usable score
    pub tt_hits: u64,
    /// Entries written to the TT
    pub tt_stores: u64,
}

impl SearchStats {
    /// TT hit rate in percent
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 / self.tt_probes as f64 * 100.0
        }
    }

    fn merge(&mut self, other: &SearchStats) {
        self.cutoffs += other.cutoffs;
        self.tt_probes += other.tt_probes;
        self.tt_hits += other.tt_hits;
        self.tt_stores += other.tt_stores;
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best move found; `None` only if the search was aborted before any
    /// root move finished
    pub best_move: Option<Move>,
    /// Score of the best move, positive for X
    pub score: i32,
    /// Deepest fully completed iteration (0 if none completed)
    pub depth: u8,
    /// Total nodes searched
    pub nodes: u64,
    /// True if a deadline, node budget or stop request cut the search short
    pub aborted: bool,
    /// Search diagnostics
    pub stats: SearchStats,
}

impl SearchResult {
    fn empty() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            aborted: false,
            stats: SearchStats::default(),
        }
    }

    /// Score decides the game
    #[inline]
    pub fn is_terminal_score(&self) -> bool {
        self.score.abs() >= LineScore::WIN
    }
}

/// Resource limits checked at every node
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Abort once this instant has passed
    pub deadline: Option<Instant>,
    /// Abort after this many nodes
    pub node_budget: Option<u64>,
}

impl SearchLimits {
    /// No limits
    pub fn none() -> Self {
        Self::default()
    }

    /// Abort `limit` from now
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.deadline = Some(Instant::now() + limit);
        self
    }

    pub fn with_node_budget(mut self, budget: u64) -> Self {
        self.node_budget = Some(budget);
        self
    }
}

/// Alpha-beta search engine.
///
/// The transposition table persists across searches. For a new game, call
/// `clear_tt()` to drop the cached positions.
pub struct Searcher {
    tt: Option<TranspositionTable>,
    limits: SearchLimits,
    stop: Arc<AtomicBool>,
    nodes: u64,
    aborted: bool,
    stats: SearchStats,
}

impl Searcher {
    /// Create a searcher whose cache holds at least `tt_capacity` entries
    /// (rounded up to a prime).
    ///
    /// # Errors
    ///
    /// `Error::Configuration` if `tt_capacity` is 0.
    pub fn new(tt_capacity: usize) -> Result<Self> {
        Ok(Self::with_table(TranspositionTable::with_prime_capacity(
            tt_capacity,
        )?))
    }

    /// Create a searcher using an existing table
    pub fn with_table(tt: TranspositionTable) -> Self {
        Self::build(Some(tt))
    }

    /// Plain minimax alpha-beta with no cache
    pub fn without_cache() -> Self {
        Self::build(None)
    }

    fn build(tt: Option<TranspositionTable>) -> Self {
        Self {
            tt,
            limits: SearchLimits::none(),
            stop: Arc::new(AtomicBool::new(false)),
            nodes: 0,
            aborted: false,
            stats: SearchStats::default(),
        }
    }

    /// Shared flag that aborts the running search when set.
    ///
    /// The searcher never clears it; reset it to `false` before reusing.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    pub fn set_limits(&mut self, limits: SearchLimits) {
        self.limits = limits;
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    #[inline]
    pub fn has_cache(&self) -> bool {
        self.tt.is_some()
    }

    /// Search `position` to a fixed `depth`.
    ///
    /// Returns the best root move for the side to move; ties go to the first
    /// move in enumeration order.
    ///
    /// # Errors
    ///
    /// - `Error::NoLegalMoves` if the game is already over
    /// - `Error::Configuration` if `depth` is 0
    pub fn search(&mut self, position: &Position, depth: u8) -> Result<SearchResult> {
        let moves = Self::root_moves(position, depth)?;
        self.reset_counters();

        let start = Instant::now();
        let mut result = self.search_root(position, &moves, depth);
        if result.aborted {
            warn!(
                "Search aborted at depth {} after {} nodes",
                depth, self.nodes
            );
        } else {
            result.depth = depth;
            debug!(
                "depth {} score {} best {:?} nodes {} in {:?}",
                depth,
                result.score,
                result.best_move,
                self.nodes,
                start.elapsed()
            );
        }

        result.nodes = self.nodes;
        result.stats = self.stats.clone();
        Ok(result)
    }

    /// Iterative deepening from depth 1 to `max_depth` within `time_limit`.
    ///
    /// Keeps the result of the last fully completed depth and stops early
    /// once a decisive score is found. If not even depth 1 completes, the
    /// partial depth-1 result is returned with `aborted` set.
    ///
    /// # Errors
    ///
    /// Same as [`Searcher::search`].
    pub fn search_timed(
        &mut self,
        position: &Position,
        max_depth: u8,
        time_limit: Duration,
    ) -> Result<SearchResult> {
        let moves = Self::root_moves(position, max_depth)?;
        self.reset_counters();

        let saved = self.limits;
        let deadline = Instant::now() + time_limit;
        self.limits.deadline = Some(match saved.deadline {
            Some(d) => d.min(deadline),
            None => deadline,
        });

        let start = Instant::now();
        let mut best = SearchResult::empty();
        let mut stats = SearchStats::default();

        for depth in 1..=max_depth {
            self.stats = SearchStats::default();
            let mut result = self.search_root(position, &moves, depth);
            stats.merge(&self.stats);

            if result.aborted {
                warn!(
                    "Search aborted during depth {} after {} nodes",
                    depth, self.nodes
                );
                if best.best_move.is_none() {
                    best = result;
                }
                best.aborted = true;
                break;
            }

            result.depth = depth;
            debug!(
                "depth {} score {} best {:?} nodes {} in {:?}",
                depth,
                result.score,
                result.best_move,
                self.nodes,
                start.elapsed()
            );
            best = result;

            if best.is_terminal_score() {
                break;
            }
        }

        self.limits = saved;
        best.nodes = self.nodes;
        best.stats = stats;
        Ok(best)
    }

    /// Get statistics about the transposition table.
    pub fn tt_stats(&self) -> Option<TTStats> {
        self.tt.as_ref().map(TranspositionTable::stats)
    }

    /// Clear the transposition table.
    pub fn clear_tt(&mut self) {
        if let Some(tt) = self.tt.as_mut() {
            tt.clear();
        }
    }

    fn root_moves(position: &Position, depth: u8) -> Result<Vec<Move>> {
        if depth == 0 {
            return Err(Error::Configuration(
                "search depth must be at least 1".to_string(),
            ));
        }
        let moves = position.legal_moves();
        if moves.is_empty() {
            return Err(Error::NoLegalMoves);
        }
        Ok(moves)
    }

    fn reset_counters(&mut self) {
        self.nodes = 0;
        self.aborted = false;
        self.stats = SearchStats::default();
    }

    /// Check the stop flag, node budget and deadline.
    #[inline]
    fn should_stop(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        let stop = self.stop.load(Ordering::Relaxed)
            || self.limits.node_budget.is_some_and(|n| self.nodes > n)
            || self.limits.deadline.is_some_and(|d| Instant::now() >= d);
        if stop {
            self.aborted = true;
        }
        stop
    }

    /// Root: every move is searched with a fresh full window.
    fn search_root(&mut self, position: &Position, moves: &[Move], depth: u8) -> SearchResult {
        let maximizing = position.to_move() == Player::X;
        let mut result = SearchResult::empty();
        let mut best_score = if maximizing { -INF } else { INF };

        for &mv in moves {
            let child = match position.after(mv) {
                Ok(child) => child,
                Err(e) => {
                    debug_assert!(false, "generated move rejected: {e}");
                    continue;
                }
            };

            let score = self.alpha_beta(&child, depth - 1, -INF, INF);
            if self.aborted {
                break;
            }

            // Strict comparison keeps the first of equal moves
            let better = if maximizing {
                score > best_score
            } else {
                score < best_score
            };
            if better || result.best_move.is_none() {
                best_score = score;
                result.best_move = Some(mv);
            }
        }

        result.score = if result.best_move.is_some() { best_score } else { 0 };
        result.aborted = self.aborted;

        if !self.aborted {
            self.store(position.hash(), depth, best_score, EntryType::Exact, result.best_move);
        }
        result
    }

    /// Minimax with alpha-beta pruning.
    ///
    /// Returns a fail-soft score; meaningless (0) once `self.aborted` is set.
    fn alpha_beta(
        &mut self,
        position: &Position,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes += 1;
        if self.should_stop() {
            return 0;
        }

        match position.global_outcome() {
            Outcome::Win(p) => return p.sign() * LineScore::WIN,
            Outcome::Draw => return 0,
            Outcome::Ongoing => {}
        }

        if depth == 0 {
            return position.evaluate();
        }

        let hash = position.hash();
        if let Some(tt) = &self.tt {
            self.stats.tt_probes += 1;
            if let Some(score) = tt.probe(hash, depth, alpha, beta) {
                self.stats.tt_hits += 1;
                return score;
            }
        }

        let (alpha_orig, beta_orig) = (alpha, beta);
        let maximizing = position.to_move() == Player::X;
        let mut best = if maximizing { -INF } else { INF };
        let mut best_move = None;

        for mv in position.legal_moves() {
            let child = match position.after(mv) {
                Ok(child) => child,
                Err(e) => {
                    debug_assert!(false, "generated move rejected: {e}");
                    continue;
                }
            };

            let score = self.alpha_beta(&child, depth - 1, alpha, beta);
            if self.aborted {
                return 0;
            }

            if maximizing {
                if score > best {
                    best = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(best);
            } else {
                if score < best {
                    best = score;
                    best_move = Some(mv);
                }
                beta = beta.min(best);
            }

            if beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        let entry_type = if best <= alpha_orig {
            EntryType::UpperBound
        } else if best >= beta_orig {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        self.store(hash, depth, best, entry_type, best_move);

        best
    }

    #[inline]
    fn store(
        &mut self,
        hash: u64,
        depth: u8,
        score: i32,
        entry_type: EntryType,
        best_move: Option<Move>,
    ) {
        if let Some(tt) = self.tt.as_mut() {
            tt.put(hash, depth, score, entry_type, best_move);
            self.stats.tt_stores += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SubBoard;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;

    /// X holds sub-boards 0 and 1; completing column 0-3-6 of sub-board 2
    /// wins the meta board's top row.
    fn x_one_move_from_win(forced: Option<u8>) -> Position {
        let mut subs = [SubBoard::new(); 9];
        subs[0] = SubBoard::from_masks(0b000_000_111, 0b000_011_000).unwrap();
        subs[1] = SubBoard::from_masks(0b000_000_111, 0b110_000_000).unwrap();
        subs[2] = SubBoard::from_masks(0b000_001_001, 0b000_000_110).unwrap();
        subs[5] = SubBoard::from_masks(0, 0b000_010_000).unwrap();
        Position::from_parts(subs, Player::X, forced).unwrap()
    }

    /// Plain minimax used as a reference for the pruned search
    fn minimax(position: &Position, depth: u8) -> i32 {
        match position.global_outcome() {
            Outcome::Win(p) => return p.sign() * LineScore::WIN,
            Outcome::Draw => return 0,
            Outcome::Ongoing => {}
        }
        if depth == 0 {
            return position.evaluate();
        }
        let scores = position
            .legal_moves()
            .into_iter()
            .map(|mv| minimax(&position.after(mv).unwrap(), depth - 1));
        if position.to_move() == Player::X {
            scores.max().unwrap()
        } else {
            scores.min().unwrap()
        }
    }

    fn random_position(rng: &mut Xoshiro256PlusPlus, plies: usize) -> Position {
        let mut position = Position::new();
        for _ in 0..plies {
            let moves = position.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[rng.random_range(0..moves.len())];
            position.play(mv).unwrap();
        }
        position
    }

    #[test]
    fn test_search_opening_depth_one() {
        let mut searcher = Searcher::new(65_537).unwrap();
        let result = searcher.search(&Position::new(), 1).unwrap();

        // Centre of the first sub-board: 4 lines, first in enumeration order
        assert_eq!(result.best_move, Some(Move::new(0, 4)));
        assert_eq!(result.score, 4);
        assert_eq!(result.depth, 1);
        assert_eq!(result.nodes, 81);
        assert!(!result.aborted);
    }

    #[test]
    fn test_search_opening_without_cache() {
        let mut searcher = Searcher::without_cache();
        let result = searcher.search(&Position::new(), 1).unwrap();
        assert_eq!(result.best_move, Some(Move::new(0, 4)));
        assert!(searcher.tt_stats().is_none());
    }

    #[test]
    fn test_search_finds_meta_win() {
        for forced in [None, Some(2)] {
            let position = x_one_move_from_win(forced);
            for depth in [2, 3] {
                let mut searcher = Searcher::new(65_537).unwrap();
                let result = searcher.search(&position, depth).unwrap();
                assert_eq!(result.score, LineScore::WIN);
                if depth == 2 {
                    assert_eq!(result.best_move, Some(Move::new(2, 6)));
                }

                let mut plain = Searcher::without_cache();
                let reference = plain.search(&position, depth).unwrap();
                assert_eq!(reference.score, LineScore::WIN);
                assert_eq!(reference.best_move, result.best_move);
            }
        }
    }

    #[test]
    fn test_search_minimizer_finds_meta_win() {
        let position = x_one_move_from_win(Some(2)).swapped();
        assert_eq!(position.to_move(), Player::O);

        let mut searcher = Searcher::new(65_537).unwrap();
        let result = searcher.search(&position, 2).unwrap();
        assert_eq!(result.best_move, Some(Move::new(2, 6)));
        assert_eq!(result.score, -LineScore::WIN);
    }

    #[test]
    fn test_search_finished_game() {
        let mut position = x_one_move_from_win(Some(2));
        position.play(Move::new(2, 6)).unwrap();
        assert_eq!(position.global_outcome(), Outcome::Win(Player::X));

        let mut searcher = Searcher::new(1009).unwrap();
        assert_eq!(searcher.search(&position, 3).unwrap_err(), Error::NoLegalMoves);
        assert_eq!(
            searcher
                .search_timed(&position, 3, Duration::from_millis(100))
                .unwrap_err(),
            Error::NoLegalMoves
        );
    }

    #[test]
    fn test_search_zero_depth_rejected() {
        let mut searcher = Searcher::without_cache();
        assert!(matches!(
            searcher.search(&Position::new(), 0),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_alpha_beta_matches_minimax() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        for _ in 0..6 {
            let position = random_position(&mut rng, 12);
            if position.global_outcome().is_terminal() {
                continue;
            }
            for depth in [1u8, 2] {
                let mut plain = Searcher::without_cache();
                let mut cached = Searcher::new(65_537).unwrap();
                let a = plain.search(&position, depth).unwrap();
                let b = cached.search(&position, depth).unwrap();

                let children: Vec<i32> = position
                    .legal_moves()
                    .into_iter()
                    .map(|mv| minimax(&position.after(mv).unwrap(), depth - 1))
                    .collect();
                let expected = if position.to_move() == Player::X {
                    *children.iter().max().unwrap()
                } else {
                    *children.iter().min().unwrap()
                };

                assert_eq!(a.score, expected);
                assert_eq!(b.score, expected);
                assert_eq!(a.best_move, b.best_move);
            }
        }
    }

    #[test]
    fn test_cache_hits_on_repeat_search() {
        let mut searcher = Searcher::new(65_537).unwrap();
        let position = Position::new();

        let first = searcher.search(&position, 3).unwrap();
        assert!(first.stats.tt_stores > 0);
        assert!(searcher.tt_stats().unwrap().used > 0);

        let second = searcher.search(&position, 3).unwrap();
        assert!(second.stats.tt_hits > 0);
        assert!(second.nodes < first.nodes);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
    }

    #[test]
    fn test_clear_tt() {
        let mut searcher = Searcher::new(1009).unwrap();
        searcher.search(&Position::new(), 2).unwrap();
        assert!(searcher.tt_stats().unwrap().used > 0);

        searcher.clear_tt();
        assert_eq!(searcher.tt_stats().unwrap().used, 0);
    }

    #[test]
    fn test_node_budget_aborts() {
        let mut searcher = Searcher::new(65_537).unwrap();
        searcher.set_limits(SearchLimits::none().with_node_budget(50));

        let result = searcher.search(&Position::new(), 4).unwrap();
        assert!(result.aborted);
        assert_eq!(result.depth, 0);
        assert!(result.nodes <= 51);
    }

    #[test]
    fn test_stop_flag_aborts() {
        let mut searcher = Searcher::new(1009).unwrap();
        let stop = searcher.stop_handle();
        stop.store(true, Ordering::Relaxed);

        let result = searcher.search(&Position::new(), 3).unwrap();
        assert!(result.aborted);
        assert_eq!(result.best_move, None);
        // Aborted subtrees leave the cache untouched
        assert_eq!(searcher.tt_stats().unwrap().used, 0);

        stop.store(false, Ordering::Relaxed);
        let result = searcher.search(&Position::new(), 1).unwrap();
        assert!(!result.aborted);
    }

    #[test]
    fn test_search_timed_completes_shallow_depths() {
        let mut searcher = Searcher::new(65_537).unwrap();
        let result = searcher
            .search_timed(&Position::new(), 2, Duration::from_secs(30))
            .unwrap();
        assert_eq!(result.depth, 2);
        assert!(!result.aborted);
        assert!(result.best_move.is_some());
        // Temporary deadline is not left behind
        assert_eq!(searcher.limits(), SearchLimits::none());
    }

    #[test]
    fn test_search_timed_stops_on_decisive_score() {
        let mut searcher = Searcher::new(65_537).unwrap();
        let result = searcher
            .search_timed(&x_one_move_from_win(None), 6, Duration::from_secs(30))
            .unwrap();
        // The winning child is terminal, so depth 1 already sees it
        assert_eq!(result.depth, 1);
        assert_eq!(result.score, LineScore::WIN);
        assert_eq!(result.best_move, Some(Move::new(2, 6)));
    }

    #[test]
    fn test_search_timed_keeps_completed_depth_on_abort() {
        let mut searcher = Searcher::new(65_537).unwrap();
        // Depth 1 costs 81 nodes; depth 2 cannot finish within the budget
        searcher.set_limits(SearchLimits::none().with_node_budget(200));

        let result = searcher
            .search_timed(&Position::new(), 5, Duration::from_secs(30))
            .unwrap();
        assert!(result.aborted);
        assert_eq!(result.depth, 1);
        assert_eq!(result.best_move, Some(Move::new(0, 4)));
    }
}
