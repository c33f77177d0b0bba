//! Line scores for Ultimate Tic-Tac-Toe evaluation
//!
//! A line that only one player occupies is worth `10^(n-1)` for `n` pieces,
//! so one piece scores 1, two score 10 and a completed line scores 100.
//! Contested lines can never be completed and score nothing.

/// Scoring weights for evaluation
pub struct LineScore;

impl LineScore {
    /// One uncontested piece on a line
    pub const ONE: i32 = 1;
    /// Two uncontested pieces on a line (one move from completion)
    pub const TWO: i32 = 10;
    /// Completed line
    pub const THREE: i32 = 100;

    /// Multiplier applied to the meta board's line score
    pub const GLOBAL_WEIGHT: i32 = 10;

    /// Decided game. Must dominate every reachable heuristic magnitude:
    /// 9 sub-boards * 8 lines * 100 + 10 * 8 * 100 = 15_200.
    pub const WIN: i32 = 1_000_000;
}

/// Score of a single uncontested line holding `count` pieces of one player
///
/// # Arguments
/// * `count` - Pieces on the line (0-3)
///
/// # Returns
/// Unsigned line value; callers apply the owner's sign
#[inline]
#[must_use]
pub fn line_score(count: u32) -> i32 {
    match count {
        0 => 0,
        1 => LineScore::ONE,
        2 => LineScore::TWO,
        _ => LineScore::THREE,
    }
}
