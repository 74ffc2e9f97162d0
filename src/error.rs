//! Error types for board, store and terminal operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for board operations.
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur while loading, mutating or presenting the board.
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Reading or writing the store file failed.
    #[error("store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The board or store could not be encoded.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// No task matches the identifier the user typed.
    #[error("no task found matching '{identifier}'")]
    TaskNotFound { identifier: String },

    /// More than one task matches the identifier.
    #[error("'{identifier}' matches several tasks: {}", candidates.join(", "))]
    AmbiguousTask {
        identifier: String,
        candidates: Vec<String>,
    },

    /// Due date input was not recognised.
    #[error(
        "unrecognised due date '{input}'. Use YYYY-MM-DD, 'today', 'tomorrow', a weekday, or 'in Nd'"
    )]
    InvalidDueDate { input: String },

    /// Terminal setup or drawing failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
}

impl KanbanError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        KanbanError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ambiguous_lists_candidates() {
        let err = KanbanError::AmbiguousTask {
            identifier: "ab".into(),
            candidates: vec!["abc1".into(), "abd2".into()],
        };
        assert_eq!(
            err.to_string(),
            "'ab' matches several tasks: abc1, abd2"
        );
    }

    #[test]
    fn io_error_names_path() {
        let err = KanbanError::io(
            "/tmp/store.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("/tmp/store.json"));
    }
}
