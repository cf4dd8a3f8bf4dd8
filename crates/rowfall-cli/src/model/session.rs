use anyhow::{Context, ensure};
use chrono::Utc;
use rowfall_engine::{Board, BoardSnapshot, Position, Presenter};

use crate::{
    model::player::PlayerPanel,
    schema::{
        config::SessionConfig,
        record::{RecordedSession, TurnRecord},
    },
};

/// Drives a board one selected row at a time.
#[derive(Debug)]
pub struct Session<P> {
    config: SessionConfig,
    board: Board,
    initial_board: BoardSnapshot,
    panel: PlayerPanel,
    presenter: P,
    turns: Vec<TurnRecord>,
}

impl<P> Session<P>
where
    P: Presenter,
{
    pub fn new(config: SessionConfig, board: Board, presenter: P) -> Self {
        let initial_board = board.snapshot();
        Self {
            config,
            board,
            initial_board,
            panel: PlayerPanel::new(),
            presenter,
            turns: vec![],
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn panel(&self) -> &PlayerPanel {
        &self.panel
    }

    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    /// Clicks the middle cell of `row` and runs the cascade to completion.
    pub fn play_row(&mut self, row: usize) -> anyhow::Result<&TurnRecord> {
        ensure!(
            row < self.board.height(),
            "Row {row} is outside the board (height {})",
            self.board.height()
        );
        let pos = Position::new(self.board.width() / 2, row);
        let (x, y) = self.board.config().layout.cell_center(pos);

        self.board.on_press(x, y, &mut self.presenter);
        self.board
            .on_release(x, y, &mut self.panel, &mut self.presenter);
        self.sync_input();
        let elapsed = self
            .board
            .run_until_settled(&mut self.panel, &mut self.presenter);
        self.sync_input();

        self.board
            .check_invariants()
            .with_context(|| format!("Board invariant broken after selecting row {row}"))?;
        let (selected, streaks) = self.panel.take_turn();
        ensure!(
            selected == Some(pos),
            "Selecting row {row} did not start a turn"
        );

        self.turns.push(TurnRecord {
            turn: self.turns.len(),
            row,
            streaks,
            report: self.board.cascade_report().clone(),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        });
        Ok(&self.turns[self.turns.len() - 1])
    }

    fn sync_input(&mut self) {
        self.board.set_input_enabled(self.panel.accepts_input());
    }

    pub fn into_record(self) -> RecordedSession {
        RecordedSession {
            recorded_at: Utc::now(),
            seed: self.board.seed(),
            config: self.config,
            initial_board: self.initial_board,
            turns: self.turns,
            final_board: self.board.snapshot(),
            final_stats: *self.panel.stats(),
        }
    }
}
