use std::path::PathBuf;

use rand::Rng as _;
use rowfall_engine::{BoardSeed, Presenter};

use crate::{
    model::{session::Session, trace::TracePresenter},
    schema::{config::SessionConfig, record::RecordedSession},
    util,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Session configuration file (JSON format)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Board width, overriding the configuration file
    #[arg(long)]
    width: Option<usize>,
    /// Board height, overriding the configuration file
    #[arg(long)]
    height: Option<usize>,
    /// Seed as 32 hex digits (random when omitted)
    #[arg(long)]
    seed: Option<BoardSeed>,
    /// Number of turns to play with randomly selected rows
    #[arg(long, default_value_t = 10)]
    turns: usize,
    /// Rows to select, one per turn (overrides --turns)
    #[arg(long, value_delimiter = ',')]
    rows: Vec<usize>,
    /// Output file path for the session recording (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print every visual effect to stderr
    #[arg(long)]
    trace: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        config,
        width,
        height,
        seed,
        turns,
        rows,
        output,
        trace,
    } = arg;

    let mut session_config = match config {
        Some(path) => util::read_config_file(path)?,
        None => SessionConfig::default(),
    };
    if let Some(width) = width {
        session_config.board.width = *width;
    }
    if let Some(height) = height {
        session_config.board.height = *height;
    }
    let seed = seed.unwrap_or_else(rand::random);
    eprintln!("Seed: {seed}");

    let board = session_config.build_board(seed)?;
    let rows = if rows.is_empty() {
        let mut rng = rand::rng();
        (0..*turns)
            .map(|_| rng.random_range(0..board.height()))
            .collect()
    } else {
        rows.clone()
    };

    let record = if *trace {
        play(Session::new(session_config, board, TracePresenter), &rows)?
    } else {
        play(Session::new(session_config, board, ()), &rows)?
    };
    eprintln!("Final board:\n{}", record.final_board);
    eprintln!("{}", record.final_stats);

    util::save_json(&record, output.clone())?;
    Ok(())
}

fn play<P>(
    mut session: Session<P>,
    rows: &[usize],
) -> anyhow::Result<RecordedSession>
where
    P: Presenter,
{
    eprintln!("Initial board:\n{}", session.board());
    for &row in rows {
        let turn = session.play_row(row)?;
        eprintln!(
            "Turn {}: row {row}, {} streak(s) over {} pass(es) in {}ms",
            turn.turn, turn.report.streaks, turn.report.passes, turn.elapsed_ms
        );
        if let Some(points) = turn.streaks.first() {
            eprintln!("  selection scored {points:?}");
        }
        eprintln!("  {}", session.panel().stats());
    }
    Ok(session.into_record())
}
