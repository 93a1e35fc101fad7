use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;

/// Install the global tracing subscriber, appending to `log_file`. The
/// alternate screen owns stdout and stderr while the desktop runs, so
/// without a file nothing is installed and log macros are no-ops.
///
/// Safe to call multiple times; subsequent calls leave the existing global
/// subscriber in place.
pub fn init(log_file: Option<&Path>) -> io::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
