use chrono::{DateTime, Utc};
use rowfall_engine::{BoardSeed, BoardSnapshot, CascadeReport, Points};
use serde::{Deserialize, Serialize};

use crate::{model::player::PlayerStats, schema::config::SessionConfig};

/// Recorded play session with metadata for replay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedSession {
    /// Timestamp when recording was created (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    /// Seed driving the initial fill and every refill
    pub seed: BoardSeed,
    /// Board configuration and optional fixed starting layout
    pub config: SessionConfig,
    /// Board colors before the first turn
    pub initial_board: BoardSnapshot,
    /// Every completed turn in order
    pub turns: Vec<TurnRecord>,
    /// Board colors after the last turn
    pub final_board: BoardSnapshot,
    /// Player panel at the time of recording
    pub final_stats: PlayerStats,
}

/// A single completed turn, from selection until the board settled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Turn number (0-indexed)
    pub turn: usize,
    /// Selected row
    pub row: usize,
    /// Points of each scored streak, in scoring order
    pub streaks: Vec<Points>,
    /// Summary of the cascade the selection started
    pub report: CascadeReport,
    /// Virtual time the cascade took, in milliseconds
    pub elapsed_ms: u64,
}
