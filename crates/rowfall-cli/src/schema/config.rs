use anyhow::Context;
use rowfall_engine::{Board, BoardConfig, BoardSeed};
use serde::{Deserialize, Serialize};

/// Session setup read from `--config` files and stored in recordings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Board dimensions, color counts and timings
    pub board: BoardConfig,
    /// Fixed starting layout, one string per row (`H`, `G`, `E`, `M`, `C` or `.`).
    /// The board is filled randomly when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_rows: Option<Vec<String>>,
}

impl SessionConfig {
    pub fn build_board(&self, seed: BoardSeed) -> anyhow::Result<Board> {
        let board = match &self.initial_rows {
            Some(rows) => Board::from_rows(self.board.clone(), seed, rows.as_slice())
                .context("Failed to build board from initial rows")?,
            None => Board::with_seed(self.board.clone(), seed)
                .context("Invalid board configuration")?,
        };
        Ok(board)
    }
}
