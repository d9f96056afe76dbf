use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A local-first kanban task board", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the board file (or set TASKBOARD_FILE env var)
    #[arg(long, global = true, value_name = "FILE", env = "TASKBOARD_FILE")]
    pub file: Option<PathBuf>,

    /// Path to an alternative config file
    #[arg(long, global = true, value_name = "FILE", env = "TASKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, env = "TASKBOARD_USERNAME")]
    pub username: Option<String>,

    #[arg(long, global = true, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List operations
    List(ListCommand),
    /// Card operations
    Card(CardCommand),
    /// Apply a drag-completion event given as JSON
    Drag {
        #[arg(long)]
        event: String,
    },
    /// Card checklist operations
    Checklist(ChecklistCommand),
    /// Card comment operations
    Comment(CommentCommand),
    /// Toggle a user's assignment to a card
    Assign {
        #[arg(long)]
        card_id: Uuid,
        #[arg(long)]
        user_id: String,
    },
    /// Attach a file reference to a card
    Attach(AttachArgs),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// List commands
#[derive(Args)]
pub struct ListCommand {
    #[command(subcommand)]
    pub action: ListAction,
}

#[derive(Subcommand)]
pub enum ListAction {
    /// Create a new list, optionally seeded with cards
    Create {
        #[arg(long)]
        name: String,
        #[arg(long = "card")]
        cards: Vec<String>,
    },
    /// Rename a list
    Rename {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        name: String,
    },
    /// Delete a list and its cards
    Delete {
        #[arg(long)]
        id: Uuid,
    },
    /// Show a single list
    Show {
        #[arg(long)]
        id: Uuid,
    },
    /// List all lists in board order
    Ls,
    /// Move a list to another position on the board
    Move {
        #[arg(long)]
        from_index: usize,
        #[arg(long)]
        to_index: usize,
    },
}

// Card commands
#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Append a card to a list
    Add {
        #[arg(long)]
        list_id: Uuid,
        #[arg(long)]
        text: String,
    },
    /// Remove the card at a position in a list
    Remove {
        #[arg(long)]
        list_id: Uuid,
        #[arg(long)]
        index: usize,
    },
    /// Move a card within a list or to another list
    Move {
        #[arg(long)]
        from_list: Uuid,
        #[arg(long)]
        from_index: usize,
        #[arg(long)]
        to_list: Uuid,
        #[arg(long)]
        to_index: usize,
    },
    /// Show a single card
    Show {
        #[arg(long)]
        id: Uuid,
    },
    /// Update card fields
    Update(CardUpdateArgs),
}

#[derive(Args)]
pub struct CardUpdateArgs {
    #[arg(long)]
    pub id: Uuid,
    #[arg(long)]
    pub text: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub clear_description: bool,
    #[arg(long)]
    pub priority: Option<String>,
    #[arg(long)]
    pub reminder: Option<String>,
    #[arg(long)]
    pub start_date: Option<String>,
    #[arg(long, conflicts_with = "start_date")]
    pub clear_start_date: bool,
    #[arg(long)]
    pub end_date: Option<String>,
    #[arg(long, conflicts_with = "end_date")]
    pub clear_end_date: bool,
    #[arg(long)]
    pub assigned_by: Option<String>,
    #[arg(long)]
    pub archived: Option<bool>,
}

// Checklist commands
#[derive(Args)]
pub struct ChecklistCommand {
    #[command(subcommand)]
    pub action: ChecklistAction,
}

#[derive(Subcommand)]
pub enum ChecklistAction {
    /// Add an item to a card's checklist
    Add {
        #[arg(long)]
        card_id: Uuid,
        #[arg(long)]
        text: String,
    },
    /// Toggle an item between open and completed
    Toggle {
        #[arg(long)]
        card_id: Uuid,
        #[arg(long)]
        item_id: Uuid,
    },
    /// Remove an open checklist item
    Remove {
        #[arg(long)]
        card_id: Uuid,
        #[arg(long)]
        item_id: Uuid,
    },
    /// Toggle hiding of completed items
    HideCompleted {
        #[arg(long)]
        card_id: Uuid,
    },
}

// Comment commands
#[derive(Args)]
pub struct CommentCommand {
    #[command(subcommand)]
    pub action: CommentAction,
}

#[derive(Subcommand)]
pub enum CommentAction {
    /// Add a comment as the logged-in user
    Add {
        #[arg(long)]
        card_id: Uuid,
        #[arg(long)]
        text: String,
    },
}

#[derive(Args)]
pub struct AttachArgs {
    #[arg(long)]
    pub card_id: Uuid,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub size_bytes: Option<u64>,
    #[arg(long)]
    pub media_type: Option<String>,
}
