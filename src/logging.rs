//! Tracing setup.
//!
//! One-shot commands log to stderr. The board UI owns the terminal, so it logs
//! to a file next to the store instead.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Environment variable overriding the log filter, e.g. `KANBAN_LOG=debug`.
pub const LOG_ENV: &str = "KANBAN_LOG";

fn build_filter(verbose: bool) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level.to_string()))
}

/// Install the global subscriber. With `log_file`, output goes there without
/// ANSI colours; if the file cannot be created, stderr is used.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) {
    let file = log_file.and_then(|path| {
        if let Some(dir) = path.parent() {
            if let Err(e) = fs::create_dir_all(dir) {
                eprintln!("Warning: could not create log directory {}: {e}", dir.display());
            }
        }
        match File::create(path) {
            Ok(f) => Some(f),
            Err(e) => {
                eprintln!(
                    "Warning: could not create log file {}: {e}. Falling back to stderr.",
                    path.display()
                );
                None
            }
        }
    });

    let result = match file {
        Some(f) => registry()
            .with(build_filter(verbose))
            .with(fmt::layer().with_writer(Mutex::new(f)).with_ansi(false))
            .try_init(),
        None => registry()
            .with(build_filter(verbose))
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
    if let Err(e) = result {
        eprintln!("Warning: logging already initialised: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logging_writes_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("kanban.log");
        init_logging(false, Some(&path));
        tracing::warn!(slot = "kanbanTasks", "board slot is corrupt");

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("board slot is corrupt"));
        assert!(!written.contains('\u{1b}'));
    }
}
