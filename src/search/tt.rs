//! Transposition Table for caching search results
//!
//! Entries are indexed by `hash mod capacity` with a prime capacity so that
//! Zobrist keys spread evenly over the slots. Each slot holds at most one
//! entry and stores the full 64-bit hash, so an index collision between two
//! unrelated positions reads as a miss rather than a wrong score.
//!
//! # Example
//!
//! ```
//! use uttt::board::Move;
//! use uttt::search::{EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1009).unwrap();
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.put(hash, 4, 120, EntryType::Exact, Some(Move::new(4, 4)));
//!
//! let entry = tt.get(hash).unwrap();
//! assert_eq!(entry.score, 120);
//! assert_eq!(tt.probe(hash, 3, -1000, 1000), Some(120));
//! ```

use crate::board::Move;
use crate::error::{Error, Result};

/// Default slot count, prime
pub const DEFAULT_CAPACITY: usize = 1_000_003;

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - every child was searched inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    /// Full Zobrist hash of the position
    pub hash: u64,
    /// Remaining depth the score was computed with
    pub depth: u8,
    /// Evaluation score, positive for X
    pub score: i32,
    pub entry_type: EntryType,
    /// Best move found for this position
    pub best_move: Option<Move>,
}

/// Fixed-capacity, direct-mapped transposition table.
///
/// Writes overwrite their slot unconditionally; the most recent result for an
/// index always wins.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    capacity: usize,
}

impl TranspositionTable {
    /// Create a table with exactly `capacity` slots.
    ///
    /// A prime capacity is recommended (see [`with_prime_capacity`]).
    ///
    /// # Errors
    ///
    /// `Error::Configuration` if `capacity` is 0.
    ///
    /// [`with_prime_capacity`]: TranspositionTable::with_prime_capacity
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::Configuration(
                "transposition table capacity must be positive".to_string(),
            ));
        }
        Ok(Self::allocate(capacity))
    }

    fn allocate(capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity],
            capacity,
        }
    }

    /// Create a table whose capacity is the smallest prime `>= min_capacity`.
    ///
    /// # Errors
    ///
    /// `Error::Configuration` if `min_capacity` is 0.
    pub fn with_prime_capacity(min_capacity: usize) -> Result<Self> {
        if min_capacity == 0 {
            return Err(Error::Configuration(
                "transposition table capacity must be positive".to_string(),
            ));
        }
        Self::new(next_prime(min_capacity))
    }

    /// Number of slots
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash % self.capacity as u64) as usize
    }

    /// Look up an entry. Only a slot holding exactly `hash` is a hit.
    #[must_use]
    pub fn get(&self, hash: u64) -> Option<TTEntry> {
        self.entries[self.index(hash)].filter(|e| e.hash == hash)
    }

    /// Store an entry, replacing whatever occupied its slot
    pub fn put(
        &mut self,
        hash: u64,
        depth: u8,
        score: i32,
        entry_type: EntryType,
        best_move: Option<Move>,
    ) {
        let idx = self.index(hash);
        self.entries[idx] = Some(TTEntry {
            hash,
            depth,
            score,
            entry_type,
            best_move,
        });
    }

    /// Probe for a score usable at remaining depth `depth` in window
    /// `(alpha, beta)`.
    ///
    /// The stored search must be at least as deep as the query. Exact scores
    /// are always usable, lower bounds only when they reach `beta`, upper
    /// bounds only when they stay at or below `alpha`.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
        let entry = self.get(hash)?;
        if entry.depth < depth {
            return None;
        }
        match entry.entry_type {
            EntryType::Exact => Some(entry.score),
            EntryType::LowerBound if entry.score >= beta => Some(entry.score),
            EntryType::UpperBound if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// Best move stored for a position, regardless of depth
    #[must_use]
    pub fn get_best_move(&self, hash: u64) -> Option<Move> {
        self.get(hash).and_then(|e| e.best_move)
    }

    /// Clear all entries in the table.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.capacity,
            used,
            usage_percent: (used as f64 / self.capacity as f64 * 100.0) as u8,
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::allocate(DEFAULT_CAPACITY)
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
    /// Percentage of table in use (0-100)
    pub usage_percent: u8,
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Smallest prime `>= n`
fn next_prime(n: usize) -> usize {
    let mut candidate = n.max(2);
    while !is_prime(candidate) {
        candidate += 1;
    }
    candidate
}
