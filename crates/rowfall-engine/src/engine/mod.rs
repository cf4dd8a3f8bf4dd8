//! Board resolution engine.
//!
//! - [`Board`] - the grid, its piece pool, the selection protocol and match detection
//! - [`CascadePhase`] - the state machine that resolves a cleared row and every
//!   chain reaction it causes
//! - [`Scheduler`] - the virtual clock the cascade runs on
//! - [`TurnCoordinator`] / [`Presenter`] - the collaborators the board reports to
//! - [`BoardConfig`] - board size, color counts, pointer layout and cascade timings
//!
//! # Cascade
//!
//! A confirmed row selection becomes a single streak with bonus 1. Resolving a
//! streak set reveals every cell's points one after another, scores each
//! streak, fades the cells out, collapses the columns, refills them from the
//! pool and lets the pieces fall. If the fallen board holds a vertical run of
//! three or more, those runs are resolved the same way, until the board settles
//! and the turn ends.
//!
//! Every step runs from [`Board::advance`] or [`Board::run_until_settled`];
//! nothing happens between calls, so the phase can be inspected at any point.

pub use self::{board::*, cascade::*, collaborator::*, config::*, scheduler::*};

mod board;
mod cascade;
mod collaborator;
mod config;
mod scheduler;

#[cfg(test)]
pub(crate) mod testing;
