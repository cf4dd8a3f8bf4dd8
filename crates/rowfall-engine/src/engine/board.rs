use std::{collections::HashSet, fmt, time::Duration};

use rand::Rng as _;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    BoardConfig, BoardError, BoardSeed, Cell, ConfigError, InvariantError, Piece, PieceColor,
    PiecePool, Position, Streak,
};

use super::{
    Presenter, Scheduler, TurnCoordinator,
    cascade::{Cascade, CascadeEvent, CascadePhase},
};

/// Row-selection state of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Selection {
    Idle,
    /// A press landed on this cell and its row is highlighted.
    RowHighlighted(Position),
}

/// The puzzle board: a fixed grid of cells, its piece pool and the cascade
/// engine that resolves clears.
///
/// # Turn flow
///
/// 1. [`Board::on_press`] highlights the row under the pointer
/// 2. [`Board::on_release`] on the same cell confirms the row clear and starts a cascade
/// 3. [`Board::advance`] (or [`Board::run_until_settled`]) drives the cascade on the
///    board's virtual clock: reveal, score, clear, collapse, refill, fall, and again
///    for every vertical match the falls produced
/// 4. The coordinator's [`TurnCoordinator::on_turn_complete`] fires once the board settles
///
/// # Example
///
/// ```
/// use rowfall_engine::{Board, BoardConfig, Position};
///
/// let mut board = Board::new(BoardConfig::default()).unwrap();
/// let (x, y) = board.config().layout.cell_center(Position::new(3, 8));
///
/// board.on_press(x, y, &mut ());
/// board.on_release(x, y, &mut (), &mut ());
/// assert!(!board.is_settled());
///
/// board.run_until_settled(&mut (), &mut ());
/// assert!(board.is_settled());
/// assert!(board.check_invariants().is_ok());
/// ```
#[derive(Debug)]
pub struct Board {
    config: BoardConfig,
    seed: BoardSeed,
    pub(super) rng: Pcg32,
    pub(super) cells: Vec<Cell>,
    pub(super) pool: PiecePool,
    selection: Selection,
    input_enabled: bool,
    pub(super) cascade: Cascade,
    pub(super) scheduler: Scheduler<CascadeEvent>,
}

impl Board {
    /// Creates a randomly filled board with a random seed.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic colors.
    pub fn with_seed(config: BoardConfig, seed: BoardSeed) -> Result<Self, ConfigError> {
        let mut board = Self::empty(config, seed)?;
        board.fill_initial();
        Ok(board)
    }

    /// Builds a board from one string per row, top row first.
    ///
    /// Each character is a color as understood by [`PieceColor::from_char`], or
    /// `.` for an empty cell. Pieces get the configured piece value.
    ///
    /// ```
    /// use rowfall_engine::{Board, BoardConfig, BoardSeed};
    ///
    /// let config = BoardConfig { width: 2, height: 3, ..BoardConfig::default() };
    /// let board = Board::from_rows(config, BoardSeed::from_bytes([0; 16]), &["GH", "GE", "G."]).unwrap();
    /// assert_eq!(board.detect_streaks().len(), 1);
    /// ```
    pub fn from_rows<S>(config: BoardConfig, seed: BoardSeed, rows: &[S]) -> Result<Self, BoardError>
    where
        S: AsRef<str>,
    {
        let mut board = Self::empty(config, seed)?;
        if rows.len() != board.height() {
            return Err(BoardError::RowCount {
                expected: board.height(),
                actual: rows.len(),
            });
        }
        let value = board.config.piece_value;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let actual = row.chars().count();
            if actual != board.width() {
                return Err(BoardError::RowWidth {
                    row: y,
                    expected: board.width(),
                    actual,
                });
            }
            for (x, c) in row.chars().enumerate() {
                if c == '.' {
                    continue;
                }
                let color = PieceColor::from_char(c).ok_or(BoardError::UnknownColor(c))?;
                board.place_new(Position::new(x, y), color, value);
            }
        }
        Ok(board)
    }

    fn empty(config: BoardConfig, seed: BoardSeed) -> Result<Self, ConfigError> {
        config.validate()?;
        let width = config.width;
        let cells = (0..config.height)
            .flat_map(|y| (0..width).map(move |x| Cell::new(Position::new(x, y))))
            .collect();
        Ok(Self {
            config,
            seed,
            rng: seed.rng(),
            cells,
            pool: PiecePool::new(),
            selection: Selection::Idle,
            input_enabled: true,
            cascade: Cascade::default(),
            scheduler: Scheduler::new(),
        })
    }

    /// Gives every cell a fresh piece, redrawing each color (up to the retry
    /// budget) while it completes a vertical match with the cells above.
    fn fill_initial(&mut self) {
        let value = self.config.piece_value;
        for y in 0..self.height() {
            for x in 0..self.width() {
                let index = self.index(Position::new(x, y));
                let piece = self
                    .pool
                    .allocate(PieceColor::Health, value, display_row(y));
                self.cells[index].place(piece);

                let mut tries = self.config.max_init_retries.max(1);
                loop {
                    tries -= 1;
                    let color = PieceColor::random(&mut self.rng, self.config.initial_colors);
                    if let Some(piece) = self.cells[index].piece_mut() {
                        piece.reset(color, value);
                    }
                    if tries == 0 || !self.is_match_at(x, y) {
                        break;
                    }
                }
            }
        }
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn seed(&self) -> BoardSeed {
        self.seed
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.config.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.config.height
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn pool(&self) -> &PiecePool {
        &self.pool
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    #[must_use]
    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Enables or disables row selection.
    ///
    /// While disabled, presses are ignored and releases only drop the highlight.
    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    /// Current time of the board's virtual clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    #[must_use]
    pub fn phase(&self) -> CascadePhase {
        self.cascade.phase
    }

    /// Returns `true` when no cascade is running.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.cascade.phase.is_idle()
    }

    /// Maps signed coordinates to a board position, `None` when out of bounds.
    #[must_use]
    pub fn position_at(&self, x: i64, y: i64) -> Option<Position> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width())?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height())?;
        Some(Position::new(x, y))
    }

    #[must_use]
    pub fn cell_at(&self, x: i64, y: i64) -> Option<&Cell> {
        self.cell(self.position_at(x, y)?)
    }

    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        if pos.x >= self.width() || pos.y >= self.height() {
            return None;
        }
        self.cells.get(self.index(pos))
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> impl Iterator<Item = &Cell> + '_ {
        let width = self.width();
        self.cells.iter().skip(y * width).take(width)
    }

    /// Color of the piece at `(x, y)`, `None` for empty or out-of-board cells.
    #[must_use]
    pub fn color_at(&self, x: usize, y: usize) -> Option<PieceColor> {
        self.cell(Position::new(x, y))?.piece().map(Piece::color)
    }

    pub(super) fn index(&self, pos: Position) -> usize {
        pos.y * self.width() + pos.x
    }

    /// Resolves a pointer position to the cell under it.
    #[must_use]
    pub fn resolve_pointer(&self, x: f32, y: f32) -> Option<Position> {
        let (col, row) = self.config.layout.resolve(x, y)?;
        self.position_at(col, row)
    }

    /// Replaces the piece at `pos` with one of the given color and value.
    ///
    /// Returns `false` (and does nothing) when `pos` is out of bounds, `value`
    /// is zero or a cascade is running.
    pub fn set_piece(&mut self, pos: Position, color: PieceColor, value: u32) -> bool {
        if value == 0 || !self.is_settled() || self.cell(pos).is_none() {
            return false;
        }
        let index = self.index(pos);
        match self.cells[index].piece_mut() {
            Some(piece) => piece.reset(color, value),
            None => self.place_new(pos, color, value),
        }
        true
    }

    /// Empties the cell at `pos`, returning its piece to the pool.
    ///
    /// Returns `false` when nothing was removed.
    pub fn clear_cell(&mut self, pos: Position) -> bool {
        if !self.is_settled() || self.cell(pos).is_none() {
            return false;
        }
        let index = self.index(pos);
        let Some(piece) = self.cells[index].take_piece() else {
            return false;
        };
        self.release_piece(piece);
        true
    }

    pub(super) fn place_new(&mut self, pos: Position, color: PieceColor, value: u32) {
        let piece = self.pool.acquire(color, value, display_row(pos.y));
        let index = self.index(pos);
        self.cells[index].place(piece);
    }

    pub(super) fn release_piece(&mut self, piece: Piece) {
        debug_assert!(
            self.cells
                .iter()
                .all(|cell| cell.piece().map(Piece::id) != Some(piece.id())),
            "released piece {} is still on the board",
            piece.id()
        );
        self.pool.release(piece);
    }

    /// Starts highlighting the row under the pointer.
    ///
    /// Ignored while input is disabled, while another row is highlighted, or
    /// when the pointer is outside the board.
    pub fn on_press<P>(&mut self, x: f32, y: f32, presenter: &mut P)
    where
        P: Presenter,
    {
        if !self.input_enabled || self.selection.is_row_highlighted() {
            return;
        }
        let Some(pos) = self.resolve_pointer(x, y) else {
            return;
        };
        self.selection = Selection::RowHighlighted(pos);
        self.highlight_row(pos.y, true, presenter);
    }

    /// Ends a selection.
    ///
    /// The highlighted row is always un-highlighted. When the release lands on
    /// the pressed cell, the row's occupied cells are cleared as a bonus-1
    /// streak; the coordinator is told about the selection before the cascade
    /// starts. A confirmation arriving while a cascade is still running is
    /// dropped.
    pub fn on_release<C, P>(&mut self, x: f32, y: f32, coordinator: &mut C, presenter: &mut P)
    where
        C: TurnCoordinator,
        P: Presenter,
    {
        let Selection::RowHighlighted(selected) = self.selection else {
            return;
        };
        self.selection = Selection::Idle;
        self.highlight_row(selected.y, false, presenter);

        if !self.input_enabled || !self.is_settled() {
            return;
        }
        if self.resolve_pointer(x, y) != Some(selected) {
            return;
        }

        coordinator.on_cell_selected(selected);
        let cells = self
            .row(selected.y)
            .filter(|cell| !cell.is_empty())
            .map(Cell::position)
            .collect();
        self.start_cascade(vec![Streak::selection(cells)], coordinator, presenter);
    }

    fn highlight_row<P>(&self, y: usize, highlighted: bool, presenter: &mut P)
    where
        P: Presenter,
    {
        for cell in self.row(y) {
            if let Some(piece) = cell.piece() {
                presenter.set_highlight(cell.position(), piece, highlighted);
            }
        }
    }

    /// Returns `true` if the piece at `(x, y)` has the same color as both
    /// pieces directly above it.
    ///
    /// Neighbours outside the board are skipped, so the two top rows never match.
    #[must_use]
    pub fn is_match_at(&self, x: usize, y: usize) -> bool {
        let Some(color) = self.color_at(x, y) else {
            return false;
        };
        let mut threshold = 3;
        for dy in 1..3 {
            let Some(above) = y.checked_sub(dy) else {
                continue;
            };
            if self.color_at(x, above) == Some(color) {
                threshold -= 1;
            }
        }
        threshold <= 1
    }

    #[must_use]
    pub fn has_any_match(&self) -> bool {
        (0..self.height()).any(|y| (0..self.width()).any(|x| self.is_match_at(x, y)))
    }

    /// Finds every vertical run of three or more same-colored pieces.
    ///
    /// Columns are scanned left to right, each from top to bottom; an empty cell
    /// breaks a run. Cells of a streak are listed from the bottom of the run up.
    #[must_use]
    pub fn detect_streaks(&self) -> Vec<Streak> {
        let mut streaks = vec![];
        for x in 0..self.width() {
            let mut run_color = None;
            let mut run_len = 0;
            for y in 0..self.height() {
                let color = self.color_at(x, y);
                if color.is_some() && color == run_color {
                    run_len += 1;
                    continue;
                }
                if let Some(end) = y.checked_sub(1) {
                    push_run(&mut streaks, x, end, run_len);
                }
                run_color = color;
                run_len = usize::from(color.is_some());
            }
            push_run(&mut streaks, x, self.height() - 1, run_len);
        }
        streaks
    }

    /// Total pieces owned by the board, placed or pooled.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count() + self.pool.len()
    }

    /// Checks that every allocated piece has exactly one owner.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let mut seen = HashSet::new();
        let placed = self.cells.iter().filter_map(Cell::piece).map(Piece::id);
        for id in placed.chain(self.pool.ids()) {
            if !seen.insert(id) {
                return Err(InvariantError::DuplicatePiece(id));
            }
        }
        let pooled = self.pool.len();
        let on_board = seen.len() - pooled;
        let allocated = self.pool.allocated();
        if on_board + pooled != allocated {
            return Err(InvariantError::PieceCountMismatch {
                on_board,
                pooled,
                allocated,
            });
        }
        Ok(())
    }

    /// Textual view of the board, one string per row.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        let rows = (0..self.height())
            .map(|y| {
                self.row(y)
                    .map(|cell| cell.piece().map_or('.', |piece| piece.color().as_char()))
                    .collect()
            })
            .collect();
        BoardSnapshot { rows }
    }
}

fn push_run(streaks: &mut Vec<Streak>, x: usize, end: usize, len: usize) {
    if len < 3 {
        return;
    }
    let cells = (0..len).map(|k| Position::new(x, end - k)).collect();
    streaks.push(Streak::new(Streak::run_bonus(len), cells));
}

pub(super) fn display_row(y: usize) -> i32 {
    i32::try_from(y).unwrap_or(i32::MAX)
}

/// Board colors as rows of characters, `.` for empty cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub rows: Vec<String>,
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.snapshot().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{Recorder, Record, board_from};

    #[test]
    fn test_new_board_is_full_and_consistent() {
        let board = Board::new(BoardConfig::default()).unwrap();
        assert_eq!(board.cells().len(), 7 * 9);
        assert!(board.cells().iter().all(|cell| !cell.is_empty()));
        assert_eq!(board.piece_count(), 7 * 9);
        assert!(board.pool().is_empty());
        assert_eq!(board.check_invariants(), Ok(()));
        assert!(board.is_settled());
    }

    #[test]
    fn test_new_board_uses_initial_colors() {
        let board = Board::new(BoardConfig::default()).unwrap();
        for cell in board.cells() {
            let color = cell.piece().unwrap().color();
            assert!(color.index() < 3, "unexpected initial color {color:?}");
        }
    }

    #[test]
    fn test_initial_fill_avoids_matches() {
        let seed = BoardSeed::from_bytes([42; 16]);
        let board = Board::with_seed(BoardConfig::default(), seed).unwrap();
        // Three colors and ten draws per cell leave a negligible chance of a match.
        assert!(!board.has_any_match(), "unexpected match:\n{board}");
    }

    #[test]
    fn test_same_seed_same_board() {
        let seed = BoardSeed::from_bytes([7; 16]);
        let a = Board::with_seed(BoardConfig::default(), seed).unwrap();
        let b = Board::with_seed(BoardConfig::default(), seed).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = BoardConfig {
            height: 0,
            ..BoardConfig::default()
        };
        assert!(matches!(
            Board::new(config),
            Err(ConfigError::EmptyBoard { .. })
        ));
    }

    #[test]
    fn test_from_rows_errors() {
        let config = BoardConfig {
            width: 2,
            height: 2,
            ..BoardConfig::default()
        };
        let seed = BoardSeed::from_bytes([0; 16]);
        assert_eq!(
            Board::from_rows(config.clone(), seed, &["GG"]).unwrap_err(),
            BoardError::RowCount {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            Board::from_rows(config.clone(), seed, &["GG", "G"]).unwrap_err(),
            BoardError::RowWidth {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            Board::from_rows(config, seed, &["GG", "GZ"]).unwrap_err(),
            BoardError::UnknownColor('Z')
        );
    }

    #[test]
    fn test_out_of_bounds_lookups() {
        let board = board_from(&["GH", "EG"]);
        assert!(board.cell_at(-1, 0).is_none());
        assert!(board.cell_at(0, -1).is_none());
        assert!(board.cell_at(2, 0).is_none());
        assert!(board.cell_at(0, 2).is_none());
        assert!(board.cell(Position::new(5, 0)).is_none());
        assert_eq!(board.color_at(1, 1), Some(PieceColor::Gold));
        assert_eq!(board.color_at(9, 9), None);
    }

    #[test]
    fn test_detect_single_run() {
        let board = board_from(&["G", "G", "G", "H", "H"]);
        let streaks = board.detect_streaks();
        assert_eq!(streaks.len(), 1);
        assert_eq!(streaks[0].bonus(), 2);
        assert_eq!(
            streaks[0].cells(),
            [Position::new(0, 2), Position::new(0, 1), Position::new(0, 0)]
        );
    }

    #[test]
    fn test_detect_run_reaching_bottom() {
        let board = board_from(&["H", "E", "E", "E", "E"]);
        let streaks = board.detect_streaks();
        assert_eq!(streaks.len(), 1);
        assert_eq!(streaks[0].bonus(), 3, "run of 4 has a flat bonus of 3");
        assert_eq!(streaks[0].len(), 4);
        assert_eq!(streaks[0].cells()[0], Position::new(0, 4));
        assert_eq!(streaks[0].cells()[3], Position::new(0, 1));
    }

    #[test]
    fn test_detect_order_is_column_major() {
        let board = board_from(&[
            "GH", //
            "GH", //
            "GH", //
            "EM", //
            "EM", //
            "EM", //
        ]);
        let streaks = board.detect_streaks();
        let heads: Vec<_> = streaks.iter().map(|s| s.cells()[0]).collect();
        assert_eq!(
            heads,
            [
                Position::new(0, 2),
                Position::new(0, 5),
                Position::new(1, 2),
                Position::new(1, 5),
            ]
        );
    }

    #[test]
    fn test_empty_cell_breaks_run() {
        let board = board_from(&["G", "G", ".", "G", "G"]);
        assert!(board.detect_streaks().is_empty());
        assert!(!board.has_any_match());
    }

    #[test]
    fn test_detection_is_idempotent() {
        let board = board_from(&["GEH", "GEH", "GEG", "HGG", "HMG"]);
        assert_eq!(board.detect_streaks(), board.detect_streaks());
    }

    #[test]
    fn test_single_row_or_column_never_matches() {
        let row = board_from(&["GGGGG"]);
        assert!(row.detect_streaks().is_empty());
        assert!(!row.has_any_match());

        let column = board_from(&["G", "G"]);
        assert!(column.detect_streaks().is_empty());
        assert!(!column.has_any_match());
    }

    #[test]
    fn test_is_match_at_needs_both_cells_above() {
        let board = board_from(&["G", "G", "G", "H", "G", "H"]);
        assert!(!board.is_match_at(0, 0));
        assert!(!board.is_match_at(0, 1));
        assert!(board.is_match_at(0, 2));
        assert!(!board.is_match_at(0, 3));
        assert!(!board.is_match_at(0, 4));
        assert!(!board.is_match_at(0, 5), "H-G-H is not a match");
        assert!(board.has_any_match());
    }

    #[test]
    fn test_press_highlights_row() {
        let mut board = board_from(&["GHE", "EGH", "HEG"]);
        let mut recorder = Recorder::default();
        let (x, y) = board.config().layout.cell_center(Position::new(1, 1));

        board.on_press(x, y, &mut recorder);
        assert_eq!(board.selection(), Selection::RowHighlighted(Position::new(1, 1)));
        assert_eq!(
            recorder.records,
            [
                Record::Highlight(Position::new(0, 1), true),
                Record::Highlight(Position::new(1, 1), true),
                Record::Highlight(Position::new(2, 1), true),
            ]
        );

        // A second press while a row is highlighted is ignored.
        let (x2, y2) = board.config().layout.cell_center(Position::new(0, 0));
        board.on_press(x2, y2, &mut recorder);
        assert_eq!(board.selection(), Selection::RowHighlighted(Position::new(1, 1)));
        assert_eq!(recorder.records.len(), 3);
    }

    #[test]
    fn test_press_outside_board_is_ignored() {
        let mut board = board_from(&["GHE", "EGH", "HEG"]);
        let mut recorder = Recorder::default();
        board.on_press(-1.0, 10.0, &mut recorder);
        board.on_press(500.0, 10.0, &mut recorder);
        assert!(board.selection().is_idle());
        assert!(recorder.records.is_empty());
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let mut board = board_from(&["GHE", "EGH", "HEG"]);
        let mut recorder = Recorder::default();
        let mut coordinator = Recorder::default();

        board.on_press(f32::NAN, f32::NAN, &mut recorder);
        assert!(board.selection().is_idle());
        board.on_release(f32::NAN, f32::NAN, &mut coordinator, &mut recorder);
        assert!(recorder.records.is_empty());

        let (x, y) = board.config().layout.cell_center(Position::new(0, 0));
        board.on_press(x, y, &mut recorder);
        board.on_release(f32::NAN, y, &mut coordinator, &mut recorder);
        assert!(board.selection().is_idle());
        assert!(board.is_settled());
        assert!(coordinator.records.is_empty());
    }

    #[test]
    fn test_release_on_other_cell_cancels() {
        let mut board = board_from(&["GHE", "EGH", "HEG"]);
        let mut recorder = Recorder::default();
        let layout = board.config().layout;
        let (x, y) = layout.cell_center(Position::new(0, 2));
        let (x2, y2) = layout.cell_center(Position::new(1, 2));

        board.on_press(x, y, &mut recorder);
        let mut coordinator = Recorder::default();
        board.on_release(x2, y2, &mut coordinator, &mut recorder);

        assert!(board.selection().is_idle());
        assert!(board.is_settled());
        assert!(coordinator.records.is_empty());
        let unhighlighted = recorder
            .records
            .iter()
            .filter(|r| matches!(r, Record::Highlight(_, false)))
            .count();
        assert_eq!(unhighlighted, 3);
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut board = board_from(&["GHE", "EGH", "HEG"]);
        let mut recorder = Recorder::default();
        let (x, y) = board.config().layout.cell_center(Position::new(0, 0));
        board.on_release(x, y, &mut (), &mut recorder);
        assert!(recorder.records.is_empty());
        assert!(board.is_settled());
    }

    #[test]
    fn test_disabled_input() {
        let mut board = board_from(&["GHE", "EGH", "HEG"]);
        let (x, y) = board.config().layout.cell_center(Position::new(0, 0));

        board.set_input_enabled(false);
        board.on_press(x, y, &mut ());
        assert!(board.selection().is_idle());

        board.set_input_enabled(true);
        board.on_press(x, y, &mut ());
        board.set_input_enabled(false);
        let mut coordinator = Recorder::default();
        board.on_release(x, y, &mut coordinator, &mut ());
        assert!(board.selection().is_idle());
        assert!(board.is_settled());
        assert!(coordinator.records.is_empty());
    }

    #[test]
    fn test_set_and_clear_piece() {
        let mut board = board_from(&["GH", "EG"]);
        let pos = Position::new(0, 0);
        let id = board.cell(pos).unwrap().piece().unwrap().id();

        assert!(!board.set_piece(pos, PieceColor::Curse, 0));
        assert_eq!(board.cell(pos).unwrap().piece().unwrap().value(), 1);

        assert!(board.set_piece(pos, PieceColor::Curse, 4));
        let piece = board.cell(pos).unwrap().piece().unwrap();
        assert_eq!(piece.id(), id);
        assert_eq!((piece.color(), piece.value()), (PieceColor::Curse, 4));

        assert!(board.clear_cell(pos));
        assert!(!board.clear_cell(pos));
        assert_eq!(board.pool().len(), 1);
        assert_eq!(board.check_invariants(), Ok(()));

        assert!(board.set_piece(pos, PieceColor::Gold, 2));
        assert_eq!(board.cell(pos).unwrap().piece().unwrap().id(), id);
        assert!(board.pool().is_empty());
        assert!(!board.set_piece(Position::new(2, 0), PieceColor::Gold, 1));
    }

    #[test]
    fn test_snapshot() {
        let board = board_from(&["GH.", "ECM"]);
        assert_eq!(board.snapshot().rows, ["GH.", "ECM"]);
        assert_eq!(board.to_string(), "GH.\nECM\n");
    }
}
