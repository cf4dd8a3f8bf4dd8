use std::time::Duration;

use crate::{BoardConfig, BoardSeed, Piece, PointLabel, Points, Position};

use super::{Board, Presenter, TurnCoordinator};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Record {
    Highlight(Position, bool),
    Reveal(Position, PointLabel),
    Fade(Position),
    Spawn(Position, i32),
    Fall(Position, i32, Duration),
    Selected(Position),
    Scored(Points),
    TurnComplete,
}

/// Coordinator and presenter that logs every call.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub(crate) records: Vec<Record>,
}

impl Recorder {
    pub(crate) fn scored(&self) -> Vec<Points> {
        self.records
            .iter()
            .filter_map(|r| match r {
                Record::Scored(points) => Some(*points),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn count(&self, pred: impl Fn(&Record) -> bool) -> usize {
        self.records.iter().filter(|r| pred(r)).count()
    }
}

impl TurnCoordinator for Recorder {
    fn on_cell_selected(&mut self, cell: Position) {
        self.records.push(Record::Selected(cell));
    }

    fn on_streak_scored(&mut self, points: Points) {
        self.records.push(Record::Scored(points));
    }

    fn on_turn_complete(&mut self) {
        self.records.push(Record::TurnComplete);
    }
}

impl Presenter for Recorder {
    fn set_highlight(&mut self, pos: Position, _piece: &Piece, highlighted: bool) {
        self.records.push(Record::Highlight(pos, highlighted));
    }

    fn reveal_points(&mut self, pos: Position, _piece: &Piece, label: PointLabel) {
        self.records.push(Record::Reveal(pos, label));
    }

    fn fade_out(&mut self, pos: Position, _piece: &Piece, _duration: Duration) {
        self.records.push(Record::Fade(pos));
    }

    fn spawn(&mut self, pos: Position, piece: &Piece) {
        self.records.push(Record::Spawn(pos, piece.display_row()));
    }

    fn fall(&mut self, pos: Position, _piece: &Piece, from_row: i32, duration: Duration) {
        self.records.push(Record::Fall(pos, from_row, duration));
    }
}

pub(crate) const SEED: BoardSeed = BoardSeed::from_bytes([0x5a; 16]);

/// Board sized to `rows`, using the default config otherwise.
pub(crate) fn board_from(rows: &[&str]) -> Board {
    board_with(BoardConfig::default(), rows)
}

pub(crate) fn board_with(config: BoardConfig, rows: &[&str]) -> Board {
    let config = BoardConfig {
        width: rows[0].chars().count(),
        height: rows.len(),
        ..config
    };
    Board::from_rows(config, SEED, rows).unwrap()
}

/// Steps the clock 1ms at a time until `pred` holds. Returns `false` if the
/// board settled first.
pub(crate) fn advance_until<C, P>(
    board: &mut Board,
    coordinator: &mut C,
    presenter: &mut P,
    pred: impl Fn(&Board) -> bool,
) -> bool
where
    C: TurnCoordinator,
    P: Presenter,
{
    for _ in 0..100_000 {
        if pred(board) {
            return true;
        }
        if board.is_settled() {
            return false;
        }
        board.advance(Duration::from_millis(1), coordinator, presenter);
    }
    false
}

/// Presses and releases the center of `pos`.
pub(crate) fn click<C, P>(board: &mut Board, pos: Position, coordinator: &mut C, presenter: &mut P)
where
    C: TurnCoordinator,
    P: Presenter,
{
    let (x, y) = board.config().layout.cell_center(pos);
    board.on_press(x, y, presenter);
    board.on_release(x, y, coordinator, presenter);
}
