//! 9-bit occupancy mask for a single 3x3 grid

use super::CELLS;

/// All nine cells set
pub const FULL_MASK: u16 = 0b1_1111_1111;

/// Occupancy mask over the 9 cells of a 3x3 grid.
///
/// Bit `i` corresponds to cell `i` in row-major order (0 = top-left, 8 = bottom-right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Bitboard {
    bits: u16,
}

impl Bitboard {
    /// Create empty bitboard
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Create from raw bits; anything above bit 8 is dropped
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self {
            bits: bits & FULL_MASK,
        }
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.bits
    }

    /// Set the bit for `cell`
    #[inline]
    pub fn set(&mut self, cell: u8) {
        debug_assert!((cell as usize) < CELLS);
        self.bits |= 1 << cell;
    }

    /// Check if bit is set for `cell`
    #[inline]
    pub fn get(self, cell: u8) -> bool {
        (self.bits >> cell) & 1 == 1
    }

    /// True if every bit of `mask` is set
    #[inline]
    pub fn contains(self, mask: u16) -> bool {
        self.bits & mask == mask
    }

    /// Number of set bits within `mask`
    #[inline]
    pub fn count_in(self, mask: u16) -> u32 {
        (self.bits & mask).count_ones()
    }

    /// Count total set bits (popcount)
    #[inline]
    pub fn count(self) -> u32 {
        self.bits.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    #[inline]
    pub fn is_full(self) -> bool {
        self.bits == FULL_MASK
    }

    /// Union of two masks
    #[inline]
    pub fn union(self, other: Bitboard) -> Bitboard {
        Bitboard {
            bits: self.bits | other.bits,
        }
    }

    /// Iterate over set cells in ascending order
    pub fn iter_ones(self) -> BitboardIter {
        BitboardIter { bits: self.bits }
    }
}

/// Iterator over set cells in a Bitboard
pub struct BitboardIter {
    bits: u16,
}

impl Iterator for BitboardIter {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bits == 0 {
            return None;
        }
        let cell = self.bits.trailing_zeros() as u8;
        // Clear lowest set bit
        self.bits &= self.bits - 1;
        Some(cell)
    }
}
