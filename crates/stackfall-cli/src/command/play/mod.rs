use tracing::info;

use crate::{
    command::{BoardArg, play::app::PlayApp},
    tui::Tui,
};

mod app;
mod controller;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    pub(super) board: BoardArg,
    /// Simulation frames per second
    #[clap(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,
    /// Hide the landing preview
    #[clap(long)]
    no_ghost: bool,
    /// Show the debug panel on start
    #[clap(long)]
    debug: bool,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            board: BoardArg::default(),
            fps: 60,
            no_ghost: false,
            debug: false,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        board,
        fps,
        no_ghost,
        debug,
    } = arg;

    let config = board.session_config();
    info!(
        width = config.width,
        height = config.height,
        seed = ?config.seed,
        fps,
        "starting play session"
    );

    let mut app = PlayApp::new(config, *fps)
        .show_ghost(!no_ghost)
        .debug(*debug);
    Tui::new().run(&mut app)?;

    let session = app.session();
    info!(
        lines = session.cleared_lines(),
        pieces = session.locked_pieces(),
        frames = session.frame(),
        "play session finished"
    );
    Ok(())
}
