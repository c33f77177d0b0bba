//! Full game state: nine sub-boards, the meta board and move forcing

use super::bitboard::FULL_MASK;
use super::subboard::{GlobalBoard, SubBoard};
use super::{Move, Outcome, Player, CELLS, SUB_BOARDS};
use crate::error::{Error, Result};
use crate::eval::evaluate;
use crate::rules::legality::check_move;
use crate::search::zobrist::ZOBRIST;

/// Game position.
///
/// Invariants:
/// - bit `s` of `legal_boards` is clear iff sub-board `s` is won or drawn
/// - if `forced` is set, its `legal_boards` bit is set
/// - `global` cell `s` is claimed iff sub-board `s` is won
/// - `hash` equals the full Zobrist hash of the position
///
/// Positions are cheap to copy; search clones instead of unmaking moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    subs: [SubBoard; SUB_BOARDS],
    global: GlobalBoard,
    /// 1 = sub-board still playable
    legal_boards: u16,
    /// Sub-board the next move must target
    forced: Option<u8>,
    to_move: Player,
    hash: u64,
}

impl Position {
    /// Empty position, X to move anywhere
    pub fn new() -> Self {
        let mut position = Self {
            subs: [SubBoard::new(); SUB_BOARDS],
            global: GlobalBoard::new(),
            legal_boards: FULL_MASK,
            forced: None,
            to_move: Player::X,
            hash: 0,
        };
        position.hash = ZOBRIST.hash(&position);
        position
    }

    /// Build a position from explicit sub-boards.
    ///
    /// The meta board and playable mask are derived from the sub-board
    /// outcomes. Fails if `forced` names a sub-board that is out of range or
    /// already decided.
    pub fn from_parts(
        subs: [SubBoard; SUB_BOARDS],
        to_move: Player,
        forced: Option<u8>,
    ) -> Result<Self> {
        let mut global = GlobalBoard::new();
        let mut legal_boards = FULL_MASK;

        for (s, sub) in subs.iter().enumerate() {
            match sub.outcome() {
                Outcome::Win(p) => {
                    global.claim(s as u8, p);
                    legal_boards &= !(1 << s);
                }
                Outcome::Draw => legal_boards &= !(1 << s),
                Outcome::Ongoing => {}
            }
        }

        if let Some(f) = forced {
            if f as usize >= SUB_BOARDS || legal_boards & (1 << f) == 0 {
                return Err(Error::Configuration(format!(
                    "forced sub-board {f} is not playable"
                )));
            }
        }

        let mut position = Self {
            subs,
            global,
            legal_boards,
            forced,
            to_move,
            hash: 0,
        };
        position.hash = ZOBRIST.hash(&position);
        Ok(position)
    }

    #[inline]
    pub fn sub_board(&self, s: u8) -> &SubBoard {
        &self.subs[s as usize]
    }

    #[inline]
    pub fn global_board(&self) -> &GlobalBoard {
        &self.global
    }

    /// 9-bit mask of sub-boards still in play
    #[inline]
    pub fn legal_boards(&self) -> u16 {
        self.legal_boards
    }

    /// Check if sub-board `s` is still in play
    #[inline]
    pub fn is_board_open(&self, s: u8) -> bool {
        (s as usize) < SUB_BOARDS && self.legal_boards & (1 << s) != 0
    }

    #[inline]
    pub fn forced_sub_board(&self) -> Option<u8> {
        self.forced
    }

    #[inline]
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Zobrist hash, maintained incrementally
    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Empty cells over all sub-boards, including decided ones
    pub fn free_cells(&self) -> u32 {
        self.subs.iter().map(SubBoard::free_count).sum()
    }

    /// Sub-board `s` may receive the next move
    #[inline]
    pub fn is_target(&self, s: u8) -> bool {
        self.is_board_open(s) && self.forced.map_or(true, |f| f == s)
    }

    /// Validate and apply a move for the side to move.
    ///
    /// Returns the target sub-board's outcome after the move. An illegal move
    /// is rejected with `Error::IllegalMove` and leaves the position untouched;
    /// it is never redirected to another sub-board.
    pub fn play(&mut self, mv: Move) -> Result<Outcome> {
        check_move(self, mv)?;

        let player = self.to_move;
        let s = mv.sub as usize;
        let local = self.subs[s]
            .play(mv.cell, player)
            .map_err(|reason| Error::IllegalMove { mv, reason })?;

        match local {
            Outcome::Win(p) => {
                self.global
                    .play(mv.sub, p)
                    .map_err(|reason| Error::IllegalMove { mv, reason })?;
                self.legal_boards &= !(1 << s);
            }
            // Drawn sub-boards close without a meta claim
            Outcome::Draw => self.legal_boards &= !(1 << s),
            Outcome::Ongoing => {}
        }

        let forced = if self.legal_boards & (1 << mv.cell) != 0 {
            Some(mv.cell)
        } else {
            None
        };
        let hash = ZOBRIST.update_place(self.hash, mv, player);
        self.hash = ZOBRIST.update_forced(hash, self.forced, forced);
        self.forced = forced;
        self.to_move = player.opponent();

        Ok(local)
    }

    /// Copy of the position with `mv` applied
    pub fn after(&self, mv: Move) -> Result<Position> {
        let mut next = self.clone();
        next.play(mv)?;
        Ok(next)
    }

    /// Check if a move is legal without applying it
    #[inline]
    pub fn is_legal(&self, mv: Move) -> bool {
        check_move(self, mv).is_ok()
    }

    /// All legal moves in ascending (sub-board, cell) order.
    ///
    /// The order is fixed; search tie-breaking depends on it.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.global_outcome().is_terminal() {
            return Vec::new();
        }

        let mut moves = Vec::with_capacity(CELLS * SUB_BOARDS);
        for s in 0..SUB_BOARDS as u8 {
            if !self.is_target(s) {
                continue;
            }
            let sub = &self.subs[s as usize];
            for cell in 0..CELLS as u8 {
                if sub.is_cell_free(cell) {
                    moves.push(Move::new(s, cell));
                }
            }
        }
        moves
    }

    /// Game result.
    ///
    /// Win when the meta board has a line; Draw once every sub-board is
    /// decided without one; otherwise Ongoing.
    pub fn global_outcome(&self) -> Outcome {
        match self.global.outcome() {
            Outcome::Win(p) => Outcome::Win(p),
            _ if self.legal_boards == 0 => Outcome::Draw,
            _ => Outcome::Ongoing,
        }
    }

    /// Heuristic score, positive for X
    #[inline]
    pub fn evaluate(&self) -> i32 {
        evaluate(self)
    }

    /// Same position with X and O exchanged everywhere, including the side to move
    #[must_use]
    pub fn swapped(&self) -> Position {
        let mut subs = self.subs;
        for sub in &mut subs {
            *sub = sub.swapped();
        }
        let mut position = Self {
            subs,
            global: self.global.swapped(),
            legal_boards: self.legal_boards,
            forced: self.forced,
            to_move: self.to_move.opponent(),
            hash: 0,
        };
        position.hash = ZOBRIST.hash(&position);
        position
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

