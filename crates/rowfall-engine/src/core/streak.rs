use serde::{Deserialize, Serialize};

use super::Position;

/// A run of cells cleared together with a score multiplier.
///
/// Streaks come from two places: a confirmed row selection (bonus 1) and
/// vertical match detection (bonus 2 for a run of three, 3 for anything longer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    bonus: u32,
    cells: Vec<Position>,
}

impl Streak {
    /// Bonus applied to a player-selected row.
    pub const SELECTION_BONUS: u32 = 1;

    #[must_use]
    pub fn new(bonus: u32, cells: Vec<Position>) -> Self {
        Self { bonus, cells }
    }

    #[must_use]
    pub fn selection(cells: Vec<Position>) -> Self {
        Self::new(Self::SELECTION_BONUS, cells)
    }

    /// Bonus for a vertical run of `len` same-colored pieces.
    ///
    /// The bonus is flat beyond three: a run of four or more is worth 3.
    #[must_use]
    pub const fn run_bonus(len: usize) -> u32 {
        if len == 3 { 2 } else { 3 }
    }

    #[must_use]
    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    #[must_use]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
