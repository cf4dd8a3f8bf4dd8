use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{ConfigError, PieceColor, Position};

/// Board construction parameters.
///
/// Every field has a default, so a partial JSON object is a valid config:
///
/// ```
/// use rowfall_engine::BoardConfig;
///
/// let config: BoardConfig = serde_json::from_str(r#"{ "width": 5 }"#).unwrap();
/// assert_eq!(config.width, 5);
/// assert_eq!(config.height, 9);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    /// Number of colors drawn when the board is first filled.
    pub initial_colors: usize,
    /// Number of colors drawn when cleared cells are refilled.
    pub refill_colors: usize,
    /// Value given to every new piece.
    pub piece_value: u32,
    /// Color draws per cell when avoiding a match in the initial fill.
    pub max_init_retries: u32,
    pub layout: Layout,
    pub timings: Timings,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 7,
            height: 9,
            initial_colors: 3,
            refill_colors: PieceColor::LEN,
            piece_value: 1,
            max_init_retries: 10,
            layout: Layout::default(),
            timings: Timings::default(),
        }
    }
}

impl BoardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self {
            width,
            height,
            initial_colors,
            refill_colors,
            piece_value,
            max_init_retries: _,
            layout,
            timings: _,
        } = self;

        if *width == 0 || *height == 0 {
            return Err(ConfigError::EmptyBoard {
                width: *width,
                height: *height,
            });
        }
        for (field, count) in [
            ("initial_colors", *initial_colors),
            ("refill_colors", *refill_colors),
        ] {
            if !(1..=PieceColor::LEN).contains(&count) {
                return Err(ConfigError::ColorCount {
                    field,
                    count,
                    max: PieceColor::LEN,
                });
            }
        }
        if *piece_value == 0 {
            return Err(ConfigError::ZeroPieceValue);
        }
        if !(layout.tile_size.is_finite() && layout.tile_size > 0.0) {
            return Err(ConfigError::TileSize(layout.tile_size));
        }
        Ok(())
    }
}

/// Placement of the board in input space.
///
/// Maps raw pointer coordinates to signed cell coordinates. The result is not
/// bounds-checked; that is the board's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub origin_x: f32,
    pub origin_y: f32,
    pub tile_size: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            tile_size: 36.0,
        }
    }
}

impl Layout {
    /// Cell coordinates under the pointer at `(x, y)`, `None` when the pointer
    /// is not a finite position.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub fn resolve(&self, x: f32, y: f32) -> Option<(i64, i64)> {
        let col = ((x - self.origin_x) / self.tile_size).floor();
        let row = ((y - self.origin_y) / self.tile_size).floor();
        if !(col.is_finite() && row.is_finite()) {
            return None;
        }
        Some((col as i64, row as i64))
    }

    /// Pointer coordinates of the center of the cell at `pos`.
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn cell_center(&self, pos: Position) -> (f32, f32) {
        (
            self.origin_x + (pos.x as f32 + 0.5) * self.tile_size,
            self.origin_y + (pos.y as f32 + 0.5) * self.tile_size,
        )
    }
}

/// Delays and effect durations of the cascade, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Gap between two point reveals of the same streak.
    pub reveal_stagger_ms: u64,
    /// Wait after the last reveal of a streak before it is scored.
    pub score_delay_ms: u64,
    /// Wait after the last streak is scored before cells fade.
    pub clear_delay_ms: u64,
    /// Fade-out duration of a cleared cell.
    pub fade_ms: u64,
    /// Fall duration per row travelled.
    pub fall_per_row_ms: u64,
    /// Wait before a settled board with matches resolves them.
    pub match_delay_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            reveal_stagger_ms: 75,
            score_delay_ms: 200,
            clear_delay_ms: 200,
            fade_ms: 500,
            fall_per_row_ms: 100,
            match_delay_ms: 200,
        }
    }
}

impl Timings {
    #[must_use]
    pub fn reveal_stagger(&self) -> Duration {
        Duration::from_millis(self.reveal_stagger_ms)
    }

    #[must_use]
    pub fn score_delay(&self) -> Duration {
        Duration::from_millis(self.score_delay_ms)
    }

    #[must_use]
    pub fn clear_delay(&self) -> Duration {
        Duration::from_millis(self.clear_delay_ms)
    }

    #[must_use]
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }

    /// Duration of a fall across `rows` rows.
    #[must_use]
    pub fn fall(&self, rows: u32) -> Duration {
        Duration::from_millis(self.fall_per_row_ms.saturating_mul(u64::from(rows)))
    }

    #[must_use]
    pub fn match_delay(&self) -> Duration {
        Duration::from_millis(self.match_delay_ms)
    }
}
