use std::path::PathBuf;

use anyhow::ensure;
use rowfall_engine::Presenter;

use crate::{
    model::{session::Session, trace::TracePresenter},
    schema::record::RecordedSession,
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Path to the recording file (JSON format)
    recording_file: PathBuf,
    /// Print every visual effect to stderr
    #[arg(long)]
    trace: bool,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg {
        recording_file,
        trace,
    } = arg;

    eprintln!("Loading recording from {}", recording_file.display());
    let recorded = util::read_recording_file(recording_file)?;
    eprintln!(
        "Loaded {} turns recorded at {}",
        recorded.turns.len(),
        recorded.recorded_at
    );

    let board = recorded.config.build_board(recorded.seed)?;
    let config = recorded.config.clone();
    if *trace {
        replay(Session::new(config, board, TracePresenter), &recorded)?;
    } else {
        replay(Session::new(config, board, ()), &recorded)?;
    }

    eprintln!("Replayed {} turns; session reproduces", recorded.turns.len());
    Ok(())
}

fn replay<P>(mut session: Session<P>, recorded: &RecordedSession) -> anyhow::Result<()>
where
    P: Presenter,
{
    ensure!(
        session.board().snapshot() == recorded.initial_board,
        "Initial board differs from the recording:\n{}",
        session.board()
    );
    for expected in &recorded.turns {
        let actual = session.play_row(expected.row)?;
        ensure!(
            actual == expected,
            "Turn {} diverged from the recording: expected {expected:?}, got {actual:?}",
            expected.turn
        );
    }

    let replayed = session.into_record();
    ensure!(
        replayed.final_board == recorded.final_board,
        "Final board differs from the recording:\n{}",
        replayed.final_board
    );
    ensure!(
        replayed.final_stats == recorded.final_stats,
        "Final stats differ: expected {}, got {}",
        recorded.final_stats,
        replayed.final_stats
    );
    Ok(())
}
