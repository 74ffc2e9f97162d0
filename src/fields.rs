//! Enumerations and field types for the board.
//!
//! `Status` is the only enumerated field a task carries; it names the column
//! the task sits in.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Stage of a task on the board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    /// All statuses in column order.
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    /// Column position on the board (0..=2).
    pub fn column(self) -> usize {
        match self {
            Status::Todo => 0,
            Status::InProgress => 1,
            Status::Done => 2,
        }
    }

    /// Status for a column position, if in range.
    pub fn from_column(index: usize) -> Option<Status> {
        Status::ALL.get(index).copied()
    }

    /// The next stage to the right, if any.
    pub fn next(self) -> Option<Status> {
        Status::from_column(self.column() + 1)
    }

    /// The previous stage to the left, if any.
    pub fn prev(self) -> Option<Status> {
        self.column().checked_sub(1).and_then(Status::from_column)
    }

    /// Human-readable column title.
    pub fn title(self) -> &'static str {
        match self {
            Status::Todo => "To Do",
            Status::InProgress => "In Progress",
            Status::Done => "Done",
        }
    }

    /// Stored wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_kebab_case() {
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), "\"in-progress\"");
        assert_eq!(
            serde_json::from_str::<Status>("\"todo\"").unwrap(),
            Status::Todo
        );
        assert!(serde_json::from_str::<Status>("\"blocked\"").is_err());
    }

    #[test]
    fn stages_step_within_bounds() {
        assert_eq!(Status::Todo.next(), Some(Status::InProgress));
        assert_eq!(Status::Done.next(), None);
        assert_eq!(Status::Todo.prev(), None);
        assert_eq!(Status::Done.prev(), Some(Status::InProgress));
    }
}
