//! Command implementations for the CLI interface.
//!
//! Each subcommand loads nothing itself: it receives the already-initialised
//! `BoardState` from `main`, performs one operation and reports on stdout.

use chrono::Utc;
use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::board::BoardState;
use crate::cli::Cli;
use crate::error::Result;
use crate::fields::Status;
use crate::store::KeyValueStore;
use crate::util::{parse_optional_due, print_table, short_id};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive board (default).
    Ui,

    /// Add a new task to the To Do column.
    Add {
        /// Task text.
        text: String,
        /// Tag; defaults to "General".
        #[arg(long)]
        tag: Option<String>,
        /// Due date: YYYY-MM-DD, "today", "tomorrow", a weekday, or "in Nd".
        #[arg(long)]
        due: Option<String>,
    },

    /// Move a task to another column.
    Move {
        /// Task id, id prefix, or exact text.
        id: String,
        /// Target column: todo | in-progress | done.
        #[arg(value_enum)]
        status: Status,
    },

    /// Move a task to In Progress.
    Start {
        /// Task id, id prefix, or exact text.
        id: String,
    },

    /// Move a task to Done.
    Done {
        /// Task id, id prefix, or exact text.
        id: String,
    },

    /// Move a task back to To Do.
    Reopen {
        /// Task id, id prefix, or exact text.
        id: String,
    },

    /// Delete a task.
    Delete {
        /// Task id, id prefix, or exact text.
        id: String,
    },

    /// List tasks column by column.
    List {
        /// Only this column.
        #[arg(long, value_enum)]
        status: Option<Status>,
        /// Case-insensitive substring of the task text.
        #[arg(long, default_value = "")]
        text: String,
        /// Case-insensitive tag.
        #[arg(long, default_value = "")]
        tag: String,
    },

    /// Show per-column counts.
    Stats {
        #[arg(long, default_value = "")]
        text: String,
        #[arg(long, default_value = "")]
        tag: String,
    },

    /// List distinct tags and counts.
    Tags,

    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Add a task; blank text is reported and ignored.
pub fn cmd_add<S: KeyValueStore>(
    board: &mut BoardState<S>,
    text: &str,
    tag: Option<&str>,
    due: Option<&str>,
) -> Result<Option<String>> {
    let due_date = parse_optional_due(due.unwrap_or(""))?;
    let added = board.add_task(text, tag, due_date)?;
    match &added {
        Some(id) => println!("Added task {}", short_id(id)),
        None => println!("Nothing to add: task text is empty."),
    }
    Ok(added)
}

/// Move the task named by `identifier` to `status`.
pub fn cmd_move<S: KeyValueStore>(
    board: &mut BoardState<S>,
    identifier: &str,
    status: Status,
) -> Result<()> {
    let id = board.resolve(identifier)?.id.clone();
    board.update_status(&id, status)?;
    println!("Moved {} to {}", short_id(&id), status.title());
    Ok(())
}

/// Delete the task named by `identifier`.
pub fn cmd_delete<S: KeyValueStore>(board: &mut BoardState<S>, identifier: &str) -> Result<()> {
    let id = board.resolve(identifier)?.id.clone();
    board.delete_task(&id)?;
    println!("Deleted task {}", short_id(&id));
    Ok(())
}

/// Print each column (or just `status`) with the filters applied.
pub fn cmd_list<S: KeyValueStore>(
    board: &BoardState<S>,
    status: Option<Status>,
    text: &str,
    tag: &str,
) {
    let now = Utc::now();
    let columns: Vec<Status> = match status {
        Some(s) => vec![s],
        None => Status::ALL.to_vec(),
    };
    for (i, s) in columns.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        let tasks = board.query_by_status(s, text, tag);
        println!("== {} ({})", s.title(), tasks.len());
        if !tasks.is_empty() {
            print_table(&tasks, now);
        }
    }
}

/// Print the three column counts for the filtered board.
pub fn cmd_stats<S: KeyValueStore>(board: &BoardState<S>, text: &str, tag: &str) {
    let counts = board.counts(text, tag);
    for s in Status::ALL {
        println!("{:<12} {}", s.title(), counts.get(s));
    }
    println!("{:<12} {}", "Total", counts.total());
}

/// Print distinct tags with counts.
pub fn cmd_tags<S: KeyValueStore>(board: &BoardState<S>) {
    let tags = board.tags();
    if tags.is_empty() {
        println!("No tags.");
        return;
    }
    for (tag, count) in tags {
        println!("{tag:<20} {count}");
    }
}

/// Write a completion script for `shell` to stdout.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KanbanError;
    use crate::store::MemoryStore;

    fn board() -> BoardState<MemoryStore> {
        BoardState::initialize(MemoryStore::new())
    }

    #[test]
    fn add_rejects_bad_due_date_without_adding() {
        let mut b = board();
        let err = cmd_add(&mut b, "Ship it", None, Some("someday")).unwrap_err();
        assert!(matches!(err, KanbanError::InvalidDueDate { .. }));
        assert!(b.is_empty());
    }

    #[test]
    fn add_with_blank_text_is_quiet_noop() {
        let mut b = board();
        assert_eq!(cmd_add(&mut b, "  ", Some("bug"), None).unwrap(), None);
        assert!(b.is_empty());
    }

    #[test]
    fn move_and_delete_resolve_by_text() {
        let mut b = board();
        cmd_add(&mut b, "Write spec", Some("design"), Some("2024-01-01")).unwrap();
        cmd_move(&mut b, "write spec", Status::Done).unwrap();
        assert_eq!(b.tasks()[0].status, Status::Done);

        cmd_delete(&mut b, "Write spec").unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn unknown_identifier_is_an_error_at_the_cli() {
        let mut b = board();
        let err = cmd_move(&mut b, "ghost", Status::Done).unwrap_err();
        assert!(matches!(err, KanbanError::TaskNotFound { .. }));
    }
}
