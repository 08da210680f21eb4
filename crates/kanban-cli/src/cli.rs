use clap::{Args, Parser, Subcommand};
use kanban_domain::RemoteId;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanban-board")]
#[command(about = "Client for a remote kanban board service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Base URL of the board API (or set KANBAN_API_URL)
    #[arg(long, global = true, env = "KANBAN_API_URL")]
    pub api_url: Option<String>,

    /// Bearer token (or set KANBAN_TOKEN)
    #[arg(long, global = true, env = "KANBAN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE", env = "KANBAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Board operations
    Board(BoardCommand),
    /// Column operations
    Column(ColumnCommand),
    /// Task operations
    Task(TaskCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// Board commands
#[derive(Args)]
pub struct BoardCommand {
    #[command(subcommand)]
    pub action: BoardAction,
}

#[derive(Subcommand)]
pub enum BoardAction {
    /// List your boards
    List,
    /// Create a new board
    Create {
        #[arg(long)]
        name: String,
    },
    /// Delete a board
    Delete {
        #[arg(long)]
        id: RemoteId,
    },
    /// Show a board with its columns and tasks
    Show {
        #[arg(long)]
        id: RemoteId,
    },
}

// Column commands
#[derive(Args)]
pub struct ColumnCommand {
    #[command(subcommand)]
    pub action: ColumnAction,
}

#[derive(Subcommand)]
pub enum ColumnAction {
    /// Append a column to a board
    Create {
        #[arg(long)]
        board_id: RemoteId,
        #[arg(long)]
        title: String,
    },
    /// Delete a column
    Delete {
        #[arg(long)]
        board_id: RemoteId,
        #[arg(long)]
        id: RemoteId,
    },
    /// Drag a column to a new position
    Move {
        #[arg(long)]
        board_id: RemoteId,
        #[arg(long)]
        id: RemoteId,
        /// Target index, counted with the column already removed
        #[arg(long)]
        position: usize,
    },
}

// Task commands
#[derive(Args)]
pub struct TaskCommand {
    #[command(subcommand)]
    pub action: TaskAction,
}

#[derive(Subcommand)]
pub enum TaskAction {
    /// Append a task to a column
    Create {
        #[arg(long)]
        board_id: RemoteId,
        #[arg(long)]
        column_id: RemoteId,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a task
    Delete {
        #[arg(long)]
        board_id: RemoteId,
        #[arg(long)]
        id: RemoteId,
    },
    /// Drag a task to a column and position
    Move {
        #[arg(long)]
        board_id: RemoteId,
        #[arg(long)]
        id: RemoteId,
        /// Destination column; defaults to the task's current column
        #[arg(long)]
        column_id: Option<RemoteId>,
        #[arg(long)]
        position: usize,
    },
    /// Edit a task's title or description
    Update(TaskUpdateArgs),
}

#[derive(Args)]
pub struct TaskUpdateArgs {
    #[arg(long)]
    pub board_id: RemoteId,
    #[arg(long)]
    pub id: RemoteId,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
}
