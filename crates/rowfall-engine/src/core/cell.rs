use serde::{Deserialize, Serialize};

use super::Piece;

/// Board coordinate. `y` grows downward, row 0 is the top of the board.
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
#[display("({x}, {y})")]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A fixed board cell holding at most one [`Piece`].
///
/// Cells are allocated once with the board and never move; only the piece
/// they hold changes.
#[derive(Debug)]
pub struct Cell {
    position: Position,
    piece: Option<Piece>,
}

impl Cell {
    pub(crate) fn new(position: Position) -> Self {
        Self {
            position,
            piece: None,
        }
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.piece.is_none()
    }

    #[must_use]
    pub fn piece(&self) -> Option<&Piece> {
        self.piece.as_ref()
    }

    pub(crate) fn piece_mut(&mut self) -> Option<&mut Piece> {
        self.piece.as_mut()
    }

    /// Detaches the piece, leaving the cell empty.
    pub(crate) fn take_piece(&mut self) -> Option<Piece> {
        self.piece.take()
    }

    /// Puts `piece` into an empty cell.
    pub(crate) fn place(&mut self, piece: Piece) {
        debug_assert!(
            self.piece.is_none(),
            "cell {} already holds a piece",
            self.position
        );
        self.piece = Some(piece);
    }
}
