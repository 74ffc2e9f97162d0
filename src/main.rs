use clap::Parser;

use kanban_board::board::BoardState;
use kanban_board::cli::Cli;
use kanban_board::cmd::*;
use kanban_board::error::Result;
use kanban_board::fields::Status;
use kanban_board::logging::init_logging;
use kanban_board::store::FileStore;
use kanban_board::tui::run::run_board_tui;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let store_path = cli.store_path();
    let command = cli.command.unwrap_or(Commands::Ui);

    // The board UI owns the terminal, so its log goes next to the store.
    let log_file = matches!(command, Commands::Ui).then(|| store_path.with_file_name("kanban.log"));
    init_logging(cli.verbose, log_file.as_deref());

    let open = || {
        tracing::debug!(store = %store_path.display(), "opening board");
        BoardState::initialize(FileStore::new(&store_path))
    };

    match command {
        Commands::Ui => run_board_tui(open(), &store_path.display().to_string())?,
        Commands::Add { text, tag, due } => {
            cmd_add(&mut open(), &text, tag.as_deref(), due.as_deref())?;
        }
        Commands::Move { id, status } => cmd_move(&mut open(), &id, status)?,
        Commands::Start { id } => cmd_move(&mut open(), &id, Status::InProgress)?,
        Commands::Done { id } => cmd_move(&mut open(), &id, Status::Done)?,
        Commands::Reopen { id } => cmd_move(&mut open(), &id, Status::Todo)?,
        Commands::Delete { id } => cmd_delete(&mut open(), &id)?,
        Commands::List { status, text, tag } => cmd_list(&open(), status, &text, &tag),
        Commands::Stats { text, tag } => cmd_stats(&open(), &text, &tag),
        Commands::Tags => cmd_tags(&open()),
        Commands::Completions { shell } => cmd_completions(shell),
    }
    Ok(())
}
