use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stackfall_engine::SessionConfig;
use tracing::Level;

use crate::logging;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Write logs to this file
    #[clap(long, global = true)]
    log_file: Option<PathBuf>,
    /// Maximum level of logged events
    #[clap(long, global = true, default_value_t = Level::INFO)]
    log_level: Level,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    #[command(name = "play")]
    Play(#[clap(flatten)] play::PlayArg),
}

/// Board shape and piece seed shared by every mode.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BoardArg {
    /// Field width in blocks (pieces spawn across columns 3 to 6)
    #[clap(long, default_value_t = 10, value_parser = clap::value_parser!(u16).range(7..=64))]
    width: u16,
    /// Field height in blocks
    #[clap(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..=64))]
    height: u16,
    /// Seed of the piece sequence (random when omitted)
    #[clap(long)]
    seed: Option<u64>,
}

impl Default for BoardArg {
    fn default() -> Self {
        Self {
            width: 10,
            height: 20,
            seed: None,
        }
    }
}

impl BoardArg {
    pub(crate) fn session_config(&self) -> SessionConfig {
        SessionConfig {
            width: usize::from(self.width),
            height: usize::from(self.height),
            seed: self.seed,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    logging::init(args.log_file.as_deref(), args.log_level)?;
    match args.mode.unwrap_or(Mode::Play(play::PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}
