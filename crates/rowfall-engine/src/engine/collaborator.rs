use std::time::Duration;

use crate::{Piece, PointLabel, Points, Position};

/// Receives turn-level notifications from a [`Board`](super::Board).
pub trait TurnCoordinator {
    /// A row clear was confirmed on `cell`. Fired before the cascade starts.
    fn on_cell_selected(&mut self, cell: Position);

    /// A streak was resolved. Fired once per streak, in resolution order.
    fn on_streak_scored(&mut self, points: Points);

    /// The cascade settled with no remaining matches. Fired once per cascade.
    fn on_turn_complete(&mut self);
}

impl TurnCoordinator for () {
    fn on_cell_selected(&mut self, _cell: Position) {}
    fn on_streak_scored(&mut self, _points: Points) {}
    fn on_turn_complete(&mut self) {}
}

/// Visual side effects requested by a [`Board`](super::Board).
///
/// The board never waits on the presenter: effect completion is tracked on the
/// board's own clock using the durations passed here. Every method defaults to
/// doing nothing.
pub trait Presenter {
    /// Turns the row highlight of the piece at `pos` on or off.
    fn set_highlight(&mut self, _pos: Position, _piece: &Piece, _highlighted: bool) {}

    /// Shows the point label of a piece being cleared.
    fn reveal_points(&mut self, _pos: Position, _piece: &Piece, _label: PointLabel) {}

    /// Fades out a cleared piece over `duration`.
    fn fade_out(&mut self, _pos: Position, _piece: &Piece, _duration: Duration) {}

    /// A refilled piece appeared at `pos`, shown above the board edge.
    fn spawn(&mut self, _pos: Position, _piece: &Piece) {}

    /// Moves the piece now owned by `pos` from `from_row` to `pos.y` over `duration`.
    fn fall(&mut self, _pos: Position, _piece: &Piece, _from_row: i32, _duration: Duration) {}
}

impl Presenter for () {}
