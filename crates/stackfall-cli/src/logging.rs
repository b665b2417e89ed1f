use std::{fs::File, path::Path, sync::Mutex};

use anyhow::Context as _;
use tracing::Level;

/// Installs the global `tracing` subscriber writing to `path`.
///
/// The terminal belongs to the TUI, so nothing is logged unless a log file is given.
pub(crate) fn init(path: Option<&Path>, level: Level) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install log subscriber")?;
    tracing::info!(path = %path.display(), %level, "logging started");
    Ok(())
}
