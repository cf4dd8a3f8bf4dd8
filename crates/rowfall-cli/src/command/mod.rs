use clap::{Parser, Subcommand};

use self::{play::PlayArg, replay::ReplayArg};

mod play;
mod replay;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a number of turns and write the session recording
    Play(#[clap(flatten)] PlayArg),
    /// Re-run a recorded session and check that it reproduces
    Replay(#[clap(flatten)] ReplayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Replay(arg) => replay::run(&arg)?,
    }
    Ok(())
}
