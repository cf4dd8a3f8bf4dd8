use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{PieceColor, Points, Position, Streak};

use super::{Board, Presenter, TurnCoordinator, board::display_row};

/// Phase of the cascade state machine.
///
/// ```text
/// Idle -> ResolvingStreaks -> AwaitingScoreDelay -> Clearing -> Collapsing
///      -> Refilling -> Falling -> AwaitingMatches -> ResolvingStreaks ...
///                             \-> Idle (turn complete)
/// ```
///
/// `Collapsing` and `Refilling` complete synchronously and are never observed
/// between two scheduler steps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display, derive_more::IsVariant,
)]
pub enum CascadePhase {
    /// No cascade is running.
    #[default]
    #[display("idle")]
    Idle,
    /// Revealing the points of streak `streak`; `cell` is the next cell to reveal.
    #[display("resolving streak {streak}, cell {cell}")]
    ResolvingStreaks { streak: usize, cell: usize },
    /// Every streak is scored; waiting before the cleared cells fade.
    #[display("awaiting score delay")]
    AwaitingScoreDelay,
    /// Cleared cells are fading out; `remaining` fades are in flight.
    #[display("clearing ({remaining} remaining)")]
    Clearing { remaining: usize },
    #[display("collapsing")]
    Collapsing,
    #[display("refilling")]
    Refilling,
    /// Pieces are falling into place; `remaining` falls are in flight.
    #[display("falling ({remaining} remaining)")]
    Falling { remaining: usize },
    /// The board has matches; waiting before they are resolved.
    #[display("awaiting matches")]
    AwaitingMatches,
}

/// Summary of the most recent cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    /// Resolution passes, the selected row included.
    pub passes: usize,
    /// Streaks resolved across all passes.
    pub streaks: usize,
    /// Cells cleared across all passes.
    pub cleared_cells: usize,
    /// Sum of every streak's points.
    pub points: Points,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CascadeEvent {
    RevealNext,
    ScoreStreak,
    BeginClear,
    FadeDone(Position),
    FallDone(Position),
    CheckMatches,
}

#[derive(Debug, Default)]
pub(crate) struct Cascade {
    pub(crate) phase: CascadePhase,
    streaks: Vec<Streak>,
    report: CascadeReport,
}

impl Board {
    /// Summary of the running cascade, or of the last one once settled.
    #[must_use]
    pub fn cascade_report(&self) -> &CascadeReport {
        &self.cascade.report
    }

    /// Streaks of the current resolution pass.
    #[must_use]
    pub fn pending_streaks(&self) -> &[Streak] {
        &self.cascade.streaks
    }

    /// Advances the virtual clock by `elapsed`, running every step due by then.
    pub fn advance<C, P>(&mut self, elapsed: Duration, coordinator: &mut C, presenter: &mut P)
    where
        C: TurnCoordinator,
        P: Presenter,
    {
        let deadline = self.scheduler.now().saturating_add(elapsed);
        while let Some(event) = self.scheduler.pop_due(deadline) {
            self.handle_event(event, coordinator, presenter);
        }
        self.scheduler.advance_to(deadline);
    }

    /// Runs the cascade to completion, jumping the clock from step to step.
    ///
    /// Returns the virtual time that passed.
    pub fn run_until_settled<C, P>(&mut self, coordinator: &mut C, presenter: &mut P) -> Duration
    where
        C: TurnCoordinator,
        P: Presenter,
    {
        let start = self.scheduler.now();
        while let Some(due) = self.scheduler.next_due() {
            if let Some(event) = self.scheduler.pop_due(due) {
                self.handle_event(event, coordinator, presenter);
            }
        }
        self.scheduler.now() - start
    }

    fn handle_event<C, P>(&mut self, event: CascadeEvent, coordinator: &mut C, presenter: &mut P)
    where
        C: TurnCoordinator,
        P: Presenter,
    {
        match event {
            CascadeEvent::RevealNext => self.reveal_next(presenter),
            CascadeEvent::ScoreStreak => self.score_streak(coordinator, presenter),
            CascadeEvent::BeginClear => self.begin_clear(coordinator, presenter),
            CascadeEvent::FadeDone(pos) => self.fade_done(pos, coordinator, presenter),
            CascadeEvent::FallDone(pos) => self.fall_done(pos, coordinator),
            CascadeEvent::CheckMatches => self.check_matches(coordinator, presenter),
        }
    }

    /// Starts a resolution pass over `streaks`. A pass from a settled board
    /// starts a new cascade.
    pub(super) fn start_cascade<C, P>(
        &mut self,
        streaks: Vec<Streak>,
        coordinator: &mut C,
        presenter: &mut P,
    ) where
        C: TurnCoordinator,
        P: Presenter,
    {
        if streaks.is_empty() {
            self.finish(coordinator);
            return;
        }
        if self.cascade.phase.is_idle() {
            self.cascade.report = CascadeReport::default();
        }
        self.cascade.report.passes += 1;
        self.cascade.streaks = streaks;
        self.cascade.phase = CascadePhase::ResolvingStreaks { streak: 0, cell: 0 };
        self.reveal_next(presenter);
    }

    fn reveal_next<P>(&mut self, presenter: &mut P)
    where
        P: Presenter,
    {
        let CascadePhase::ResolvingStreaks { streak, cell } = self.cascade.phase else {
            return;
        };
        let Some(current) = self.cascade.streaks.get(streak) else {
            return;
        };
        let Some(&pos) = current.cells().get(cell) else {
            self.scheduler
                .schedule(self.config().timings.score_delay(), CascadeEvent::ScoreStreak);
            return;
        };

        if let Some(piece) = self.cell(pos).and_then(|c| c.piece()) {
            presenter.reveal_points(pos, piece, piece.label(current.bonus()));
        }
        self.cascade.phase = CascadePhase::ResolvingStreaks {
            streak,
            cell: cell + 1,
        };
        self.scheduler
            .schedule(self.config().timings.reveal_stagger(), CascadeEvent::RevealNext);
    }

    fn score_streak<C, P>(&mut self, coordinator: &mut C, presenter: &mut P)
    where
        C: TurnCoordinator,
        P: Presenter,
    {
        let CascadePhase::ResolvingStreaks { streak, .. } = self.cascade.phase else {
            return;
        };
        let Some(current) = self.cascade.streaks.get(streak) else {
            return;
        };

        let mut points = Points::ZERO;
        for &pos in current.cells() {
            if let Some(piece) = self.cell(pos).and_then(|c| c.piece()) {
                piece.score_into(current.bonus(), &mut points);
            }
        }
        self.cascade.report.streaks += 1;
        self.cascade.report.points += points;
        coordinator.on_streak_scored(points);

        let next = streak + 1;
        if next < self.cascade.streaks.len() {
            self.cascade.phase = CascadePhase::ResolvingStreaks {
                streak: next,
                cell: 0,
            };
            self.reveal_next(presenter);
        } else {
            self.cascade.phase = CascadePhase::AwaitingScoreDelay;
            self.scheduler
                .schedule(self.config().timings.clear_delay(), CascadeEvent::BeginClear);
        }
    }

    /// Fades out every distinct cell of the pass's streaks.
    fn begin_clear<C, P>(&mut self, coordinator: &mut C, presenter: &mut P)
    where
        C: TurnCoordinator,
        P: Presenter,
    {
        if !self.cascade.phase.is_awaiting_score_delay() {
            return;
        }

        let mut marked = vec![false; self.cells.len()];
        let mut targets = vec![];
        for &pos in self.cascade.streaks.iter().flat_map(Streak::cells) {
            let index = self.index(pos);
            if !marked[index] {
                marked[index] = true;
                targets.push(pos);
            }
        }

        self.cascade.report.cleared_cells += targets.len();
        if targets.is_empty() {
            self.collapse_and_refill(coordinator, presenter);
            return;
        }

        let fade = self.config().timings.fade();
        for &pos in &targets {
            if let Some(piece) = self.cell(pos).and_then(|c| c.piece()) {
                presenter.fade_out(pos, piece, fade);
            }
            self.scheduler.schedule(fade, CascadeEvent::FadeDone(pos));
        }
        self.cascade.phase = CascadePhase::Clearing {
            remaining: targets.len(),
        };
    }

    fn fade_done<C, P>(&mut self, pos: Position, coordinator: &mut C, presenter: &mut P)
    where
        C: TurnCoordinator,
        P: Presenter,
    {
        let CascadePhase::Clearing { remaining } = self.cascade.phase else {
            return;
        };
        let index = self.index(pos);
        if let Some(piece) = self.cells[index].take_piece() {
            self.release_piece(piece);
        }

        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.cascade.phase = CascadePhase::Clearing { remaining };
            return;
        }
        self.collapse_and_refill(coordinator, presenter);
    }

    fn collapse_and_refill<C, P>(&mut self, coordinator: &mut C, presenter: &mut P)
    where
        C: TurnCoordinator,
        P: Presenter,
    {
        self.cascade.phase = CascadePhase::Collapsing;
        self.collapse();
        self.cascade.phase = CascadePhase::Refilling;
        self.refill(presenter);
        self.start_falls(coordinator, presenter);
    }

    /// Shifts every piece down over the empty cells beneath it, one bottom-up
    /// pass per column.
    pub(super) fn collapse(&mut self) {
        for x in 0..self.width() {
            let mut holes = 0;
            for y in (0..self.height()).rev() {
                let index = self.index(Position::new(x, y));
                let Some(piece) = self.cells[index].take_piece() else {
                    holes += 1;
                    continue;
                };
                let target = self.index(Position::new(x, y + holes));
                self.cells[target].place(piece);
            }
        }
    }

    /// Fills the empty cells at the top of every column with pooled pieces,
    /// stacked above the board edge.
    fn refill<P>(&mut self, presenter: &mut P)
    where
        P: Presenter,
    {
        let value = self.config().piece_value;
        let colors = self.config().refill_colors;
        for x in 0..self.width() {
            let holes = (0..self.height())
                .filter(|&y| self.color_at(x, y).is_none())
                .count();
            for y in 0..holes {
                let pos = Position::new(x, y);
                let color = PieceColor::random(&mut self.rng, colors);
                let piece = self
                    .pool
                    .acquire(color, value, display_row(y) - display_row(holes));
                let index = self.index(pos);
                self.cells[index].place(piece);
                if let Some(piece) = self.cells[index].piece() {
                    presenter.spawn(pos, piece);
                }
            }
        }
    }

    fn start_falls<C, P>(&mut self, coordinator: &mut C, presenter: &mut P)
    where
        C: TurnCoordinator,
        P: Presenter,
    {
        let timings = self.config().timings;
        let mut remaining = 0;
        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                let pos = Position::new(x, y);
                let Some(piece) = self.cell(pos).and_then(|c| c.piece()) else {
                    continue;
                };
                let from = piece.display_row();
                let distance = display_row(y) - from;
                if distance == 0 {
                    continue;
                }
                let duration = timings.fall(distance.unsigned_abs());
                presenter.fall(pos, piece, from, duration);
                self.scheduler.schedule(duration, CascadeEvent::FallDone(pos));
                remaining += 1;
            }
        }

        if remaining == 0 {
            self.after_falls(coordinator);
            return;
        }
        self.cascade.phase = CascadePhase::Falling { remaining };
    }

    fn fall_done<C>(&mut self, pos: Position, coordinator: &mut C)
    where
        C: TurnCoordinator,
    {
        let CascadePhase::Falling { remaining } = self.cascade.phase else {
            return;
        };
        let index = self.index(pos);
        if let Some(piece) = self.cells[index].piece_mut() {
            piece.set_display_row(display_row(pos.y));
        }

        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.cascade.phase = CascadePhase::Falling { remaining };
            return;
        }
        self.after_falls(coordinator);
    }

    fn after_falls<C>(&mut self, coordinator: &mut C)
    where
        C: TurnCoordinator,
    {
        if !self.has_any_match() {
            self.finish(coordinator);
            return;
        }
        self.cascade.phase = CascadePhase::AwaitingMatches;
        self.scheduler
            .schedule(self.config().timings.match_delay(), CascadeEvent::CheckMatches);
    }

    fn check_matches<C, P>(&mut self, coordinator: &mut C, presenter: &mut P)
    where
        C: TurnCoordinator,
        P: Presenter,
    {
        if !self.cascade.phase.is_awaiting_matches() {
            return;
        }
        let streaks = self.detect_streaks();
        self.start_cascade(streaks, coordinator, presenter);
    }

    fn finish<C>(&mut self, coordinator: &mut C)
    where
        C: TurnCoordinator,
    {
        self.cascade.phase = CascadePhase::Idle;
        self.cascade.streaks.clear();
        coordinator.on_turn_complete();
    }
}
