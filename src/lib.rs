//! # kb - Kanban board for the terminal
//!
//! A three-column task board (To Do, In Progress, Done) with an interactive
//! terminal UI and a scriptable CLI.
//!
//! ## Key Features
//!
//! - **Short text tasks**: each task carries a tag (default `General`) and an optional due date
//! - **Stage moves**: cards step between columns one stage at a time
//! - **Filters**: case-insensitive text substring and tag equality, with per-column counts
//! - **Overdue highlighting**: cards past their due date that are not done are drawn in red
//! - **Single-slot storage**: the whole board is one JSON value in a small key-value file
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the board
//! kb
//!
//! # Add a task from the shell
//! kb add "Write spec" --tag design --due tomorrow
//!
//! # Move it along
//! kb start "Write spec"
//! kb done "Write spec"
//!
//! # Review
//! kb list --tag design
//! kb stats
//! ```
//!
//! Data is stored in `~/.kanban/store.json` unless `--store` is given. The board
//! UI writes its log to `kanban.log` in the same directory.

pub mod board;
pub mod cli;
pub mod cmd;
pub mod error;
pub mod fields;
pub mod logging;
pub mod store;
pub mod task;
pub mod util;
pub mod tui {
    pub mod add_form;
    pub mod board;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
}

pub use board::{BoardState, StatusCounts, TaskFilter, STORAGE_KEY};
pub use error::{KanbanError, Result};
pub use fields::Status;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use task::Task;
