use clap::{Parser, Subcommand};
use crate::board::{Board, Outcome};
use crate::cli::error::{user_error, validate_column, validate_task_id, warn_user};
use crate::cli::output::{format_board, format_board_json, BoardRenderOptions};
use crate::cli::shell::Shell;
use crate::db::DbConnection;
use crate::repo::{KeyValueStore, MemoryStore, SqliteStore};
use anyhow::{Context, Result};
use std::io::IsTerminal;

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(about = "TaskFlow - a three-column kanban board for the terminal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task to the To Do column
    Add {
        /// Task description (optional)
        #[arg(short = 'd', long, default_value = "")]
        description: String,
        /// Task title
        title: Vec<String>,
    },
    /// Show the board
    #[command(visible_alias = "board")]
    List {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
    /// Delete a task
    Delete {
        /// Task ID
        task_id: String,
    },
    /// Drag a task onto another column
    Move {
        /// Task ID
        task_id: String,
        /// Target column (todo, progress, done)
        column: String,
    },
    /// Interactive session: one board event per line
    Shell,
}

pub fn run() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not errors
            let is_error = e.use_stderr();
            e.print()?;
            if is_error {
                std::process::exit(1);
            }
            return Ok(());
        }
    };

    handle_command(cli)
}

fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Add { description, title } => handle_task_add(title, description),
        Commands::List { json } => handle_board_list(json),
        Commands::Delete { task_id } => handle_task_delete(task_id),
        Commands::Move { task_id, column } => handle_task_move(task_id, column),
        Commands::Shell => handle_shell(),
    }
}

/// Open the stored board, falling back to an unsaved in-memory board when
/// the database cannot be opened
pub fn open_board() -> Board<Box<dyn KeyValueStore>> {
    match DbConnection::connect() {
        Ok(conn) => Board::load(Box::new(SqliteStore::new(conn)) as Box<dyn KeyValueStore>),
        Err(e) => {
            log::warn!("Falling back to in-memory storage: {:#}", e);
            warn_user(&format!("storage unavailable ({:#}); changes will not be saved", e));
            let mut board = Board::load(Box::new(MemoryStore::new()) as Box<dyn KeyValueStore>);
            board.mark_persistence_degraded();
            board
        }
    }
}

fn report_outcome(outcome: &Outcome) {
    if let Some(e) = outcome.save_error() {
        warn_user(&format!("changes could not be saved: {}", e));
    }
}

/// Handle task creation through the new-task dialog
fn handle_task_add(title: Vec<String>, description: String) -> Result<()> {
    let mut board = open_board();

    let modal = board.modal_mut();
    modal.open();
    modal.set_title(&title.join(" "));
    modal.set_description(&description);

    // A blank title is silently ignored
    if let Some((id, outcome)) = board.submit_modal() {
        let title = board
            .tasks()
            .get(id)
            .map(|task| task.title.clone())
            .unwrap_or_default();
        println!("Created task {}: {}", id, title);
        report_outcome(&outcome);
    }

    Ok(())
}

fn handle_board_list(json: bool) -> Result<()> {
    let board = open_board();
    let projection = board.projection();

    if json {
        let output = format_board_json(&projection)
            .context("Failed to serialize board")?;
        println!("{}", output);
    } else {
        print!("{}", format_board(&projection, &BoardRenderOptions::for_terminal()));
    }

    Ok(())
}

/// Handle task deletion
fn handle_task_delete(task_id_str: String) -> Result<()> {
    let task_id = match validate_task_id(&task_id_str) {
        Ok(id) => id,
        Err(e) => user_error(&e),
    };

    let mut board = open_board();
    let title = match board.tasks().get(task_id) {
        Some(task) => task.title.clone(),
        None => {
            warn_user(&format!("Task {} not found", task_id));
            return Ok(());
        }
    };

    let outcome = board.delete(task_id);
    println!("Deleted task {}: {}", task_id, title);
    report_outcome(&outcome);

    Ok(())
}

/// Handle moving a task: drag its card and drop it on the target column
fn handle_task_move(task_id_str: String, column_str: String) -> Result<()> {
    let task_id = match validate_task_id(&task_id_str) {
        Ok(id) => id,
        Err(e) => user_error(&e),
    };
    let column = match validate_column(&column_str) {
        Ok(column) => column,
        Err(e) => {
            warn_user(&e);
            return Ok(());
        }
    };

    let mut board = open_board();
    if !board.tasks().contains(task_id) {
        warn_user(&format!("Task {} not found", task_id));
        return Ok(());
    }

    let outcome = board.move_task(task_id, column);
    if outcome.is_changed() {
        println!("Moved task {} to {}", task_id, column.label());
        report_outcome(&outcome);
    } else {
        println!("Task {} is already in {}", task_id, column.label());
    }

    Ok(())
}

fn handle_shell() -> Result<()> {
    let mut board = open_board();
    let interactive = std::io::stdin().is_terminal();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();

    Shell::new(&mut board, stdout.lock(), BoardRenderOptions::for_terminal())
        .with_prompt(interactive)
        .run(stdin.lock())
        .context("Failed to run board session")
}
