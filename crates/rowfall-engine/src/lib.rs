pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Rejected [`BoardConfig`] values.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },
    #[display("{field} must be within 1..={max}, got {count}")]
    ColorCount {
        field: &'static str,
        count: usize,
        max: usize,
    },
    #[display("piece value must be at least 1")]
    ZeroPieceValue,
    #[display("tile size must be a positive finite number, got {_0}")]
    TileSize(#[error(not(source))] f32),
}

/// Errors raised while building a board from a textual layout.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum BoardError {
    #[display("invalid board config: {_0}")]
    #[from]
    Config(ConfigError),
    #[display("expected {expected} rows, got {actual}")]
    RowCount { expected: usize, actual: usize },
    #[display("row {row} must have {expected} cells, got {actual}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display("unknown piece color '{_0}'")]
    UnknownColor(#[error(not(source))] char),
}

/// Violation of the single-owner discipline between cells and the piece pool.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvariantError {
    #[display("piece {_0} is owned twice")]
    DuplicatePiece(#[error(not(source))] PieceId),
    #[display("{on_board} pieces on board + {pooled} pooled != {allocated} allocated")]
    PieceCountMismatch {
        on_board: usize,
        pooled: usize,
        allocated: usize,
    },
}
