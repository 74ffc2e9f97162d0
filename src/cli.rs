use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// File-backed three-column kanban board.
/// Storage defaults to ~/.kanban/store.json or a path passed via --store.
#[derive(Parser)]
#[command(name = "kb", version, about = "Kanban board for the terminal")]
pub struct Cli {
    /// Path to the JSON store file.
    #[arg(long, global = true, visible_alias = "db")]
    pub store: Option<PathBuf>,

    /// Log at debug level (overridden by KANBAN_LOG).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Defaults to `ui` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// `--store`, else `$HOME/.kanban/store.json`, else `./.kanban/store.json`.
    pub fn store_path(&self) -> PathBuf {
        if let Some(path) = self.store.as_ref() {
            return path.clone();
        }
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".kanban").join("store.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Status;

    #[test]
    fn parses_global_store_after_subcommand() {
        let cli = Cli::parse_from(["kb", "list", "--store", "/tmp/x.json"]);
        assert_eq!(cli.store_path(), PathBuf::from("/tmp/x.json"));
        assert!(matches!(cli.command, Some(Commands::List { .. })));
    }

    #[test]
    fn no_subcommand_means_ui() {
        let cli = Cli::parse_from(["kb"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn move_takes_status_value() {
        let cli = Cli::parse_from(["kb", "move", "abc", "in-progress"]);
        match cli.command {
            Some(Commands::Move { id, status }) => {
                assert_eq!(id, "abc");
                assert_eq!(status, Status::InProgress);
            }
            _ => panic!("expected move"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
