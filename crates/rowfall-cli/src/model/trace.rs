use std::time::Duration;

use rowfall_engine::{Piece, PointLabel, Position, Presenter};

/// Presenter that prints every visual effect to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracePresenter;

impl Presenter for TracePresenter {
    fn set_highlight(&mut self, pos: Position, piece: &Piece, highlighted: bool) {
        let state = if highlighted { "on" } else { "off" };
        eprintln!("[trace] highlight {state} {pos} piece {}", piece.id());
    }

    fn reveal_points(&mut self, pos: Position, piece: &Piece, label: PointLabel) {
        eprintln!(
            "[trace] reveal {pos} {} {label}",
            piece.color().as_char()
        );
    }

    fn fade_out(&mut self, pos: Position, piece: &Piece, duration: Duration) {
        eprintln!(
            "[trace] fade {pos} piece {} over {}ms",
            piece.id(),
            duration.as_millis()
        );
    }

    fn spawn(&mut self, pos: Position, piece: &Piece) {
        eprintln!(
            "[trace] spawn {} piece {} above {pos} at row {}",
            piece.color().as_char(),
            piece.id(),
            piece.display_row()
        );
    }

    fn fall(&mut self, pos: Position, piece: &Piece, from_row: i32, duration: Duration) {
        eprintln!(
            "[trace] fall piece {} row {from_row} -> {pos} over {}ms",
            piece.id(),
            duration.as_millis()
        );
    }
}
