use serde::{Deserialize, Serialize};

use super::{PieceColor, Points};

/// Stable identity of a piece allocation.
///
/// A piece keeps its id for its whole lifetime, across any number of trips
/// through the [`PiecePool`](super::PiecePool).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("#{_0}")]
pub struct PieceId(u32);

impl PieceId {
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }
}

/// A colored, valued token placed on a board cell.
///
/// Pieces are never cloned: a piece is owned either by exactly one cell or by
/// the pool, and moves between them. Reusing a pooled piece goes through
/// [`Piece::reset`], which keeps its [`PieceId`].
///
/// `display_row` is the row the presentation layer currently shows the piece at.
/// It differs from the owning cell's row while the piece is falling, and is
/// negative for refilled pieces waiting above the board edge.
#[derive(Debug, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    color: PieceColor,
    value: u32,
    display_row: i32,
}

impl Piece {
    pub(crate) fn new(id: PieceId, color: PieceColor, value: u32, display_row: i32) -> Self {
        Self {
            id,
            color,
            value,
            display_row,
        }
    }

    #[must_use]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.color
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }

    #[must_use]
    pub fn display_row(&self) -> i32 {
        self.display_row
    }

    /// Reassigns color and value in place for reuse.
    pub fn reset(&mut self, color: PieceColor, value: u32) {
        self.color = color;
        self.value = value;
    }

    pub(crate) fn set_display_row(&mut self, row: i32) {
        self.display_row = row;
    }

    /// Label revealed over this piece when it is cleared with `bonus`.
    #[must_use]
    pub fn label(&self, bonus: u32) -> PointLabel {
        PointLabel {
            amount: self.value * bonus,
            negative: self.color.is_detrimental(),
        }
    }

    /// Adds this piece's contribution, `value * bonus`, into `points`.
    pub fn score_into(&self, bonus: u32, points: &mut Points) {
        points.award(self.color, i64::from(self.value) * i64::from(bonus));
    }
}

/// Signed point label shown over a cleared piece.
///
/// ```
/// use rowfall_engine::PointLabel;
///
/// assert_eq!(PointLabel { amount: 4, negative: false }.to_string(), "+4");
/// assert_eq!(PointLabel { amount: 2, negative: true }.to_string(), "-2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
#[display("{}{amount}", if *negative { '-' } else { '+' })]
pub struct PointLabel {
    pub amount: u32,
    pub negative: bool,
}
