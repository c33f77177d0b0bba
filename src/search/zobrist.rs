//! Zobrist hashing for position identification
//!
//! Every (sub-board, cell, owner) triple gets an independent random 64-bit
//! key, plus one key per side to move. A position's hash is the XOR of the
//! keys of its occupied cells and of the side to move, so placing a piece is
//! an O(1) incremental update.
//!
//! The forced sub-board is part of the position too: two positions with the
//! same pieces but different forced targets have different move sets and
//! must not share a cache slot. Each forced target has its own key; free
//! choice contributes nothing.
//!
//! # Example
//!
//! ```
//! use uttt::board::{Move, Player, Position};
//! use uttt::search::ZOBRIST;
//!
//! let mut position = Position::new();
//! let hash1 = ZOBRIST.hash(&position);
//!
//! let mv = Move::new(4, 4);
//! position.play(mv).unwrap();
//!
//! // Incremental update is equivalent to full recomputation
//! let hash_incremental = ZOBRIST.update_place(hash1, mv, Player::X);
//! let hash_incremental = ZOBRIST.update_forced(hash_incremental, None, Some(4));
//! assert_eq!(hash_incremental, ZOBRIST.hash(&position));
//! ```

use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::board::{Move, Player, Position, CELLS, SUB_BOARDS};

/// Seed for the process-wide table
const ZOBRIST_SEED: u64 = 0x1234_5678_9ABC_DEF0;

lazy_static! {
    /// Process-wide key table, built once before first use and never mutated
    pub static ref ZOBRIST: ZobristTable = ZobristTable::new();
}

/// Zobrist hash table for position hashing.
///
/// 9 x 9 x 2 = 162 cell keys, 2 side-to-move keys and 9 forced-target keys.
pub struct ZobristTable {
    /// Keys indexed by [sub-board][cell][owner]
    cells: [[[u64; 2]; CELLS]; SUB_BOARDS],
    /// Keys indexed by side to move
    side: [u64; 2],
    /// Keys indexed by forced sub-board
    forced: [u64; SUB_BOARDS],
}

impl ZobristTable {
    /// Create a table with the fixed process seed.
    ///
    /// Uses a seeded xoshiro generator so hashes are reproducible across runs.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(ZOBRIST_SEED)
    }

    /// Create a table from an explicit seed
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

        let mut cells = [[[0u64; 2]; CELLS]; SUB_BOARDS];
        for sub in cells.iter_mut() {
            for cell in sub.iter_mut() {
                cell[0] = rng.random();
                cell[1] = rng.random();
            }
        }

        let side = [rng.random(), rng.random()];

        let mut forced = [0u64; SUB_BOARDS];
        for key in forced.iter_mut() {
            *key = rng.random();
        }

        Self { cells, side, forced }
    }

    /// Key for `player` holding `mv.cell` of `mv.sub`
    #[inline]
    pub fn cell_key(&self, mv: Move, player: Player) -> u64 {
        self.cells[mv.sub as usize][mv.cell as usize][player.index()]
    }

    /// Key for the side to move
    #[inline]
    pub fn side_key(&self, player: Player) -> u64 {
        self.side[player.index()]
    }

    /// Key for the forced sub-board (0 when the choice is free)
    #[inline]
    pub fn forced_key(&self, forced: Option<u8>) -> u64 {
        forced.map_or(0, |s| self.forced[s as usize])
    }

    /// Compute the full hash of a position.
    ///
    /// Iterates over every occupied cell. During play and search the hash is
    /// kept up to date with `update_place` instead.
    #[must_use]
    pub fn hash(&self, position: &Position) -> u64 {
        let mut h = 0u64;

        for s in 0..SUB_BOARDS as u8 {
            let sub = position.sub_board(s);
            for player in [Player::X, Player::O] {
                for cell in sub.cells(player).iter_ones() {
                    h ^= self.cell_key(Move::new(s, cell), player);
                }
            }
        }

        h ^ self.side_key(position.to_move()) ^ self.forced_key(position.forced_sub_board())
    }

    /// Incrementally update a hash after `player` places at `mv`.
    ///
    /// Also hands the move over to the opponent. The forced target changes
    /// separately through `update_forced`.
    #[inline]
    #[must_use]
    pub fn update_place(&self, hash: u64, mv: Move, player: Player) -> u64 {
        hash ^ self.cell_key(mv, player)
            ^ self.side_key(player)
            ^ self.side_key(player.opponent())
    }

    /// Incrementally update a hash when the forced target changes
    #[inline]
    #[must_use]
    pub fn update_forced(&self, hash: u64, old: Option<u8>, new: Option<u8>) -> u64 {
        hash ^ self.forced_key(old) ^ self.forced_key(new)
    }
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Stable 64-bit key of a position, usable as an external cache key
#[inline]
#[must_use]
pub fn position_hash(position: &Position) -> u64 {
    position.hash()
}
