use aura_domain::{LeadStatus, Priority, SortOrder, TaskSortBy};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aura")]
#[command(about = "Sales lead pipeline manager with CSV import", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub session: SessionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options that shape the in-memory session every command runs against.
#[derive(Args, Clone, Default)]
pub struct SessionArgs {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE", env = "AURA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Start without the demo leads and tasks
    #[arg(long, global = true)]
    pub no_seed: bool,

    /// Import a CSV file with the default mapping before running the command
    #[arg(long = "csv", global = true, value_name = "FILE")]
    pub csv: Vec<PathBuf>,

    /// Create a list before running the command, as NAME=LEAD[,LEAD...]
    #[arg(long = "list", global = true, value_name = "NAME=LEADS")]
    pub lists: Vec<String>,

    /// Answer yes to confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the inferred column mapping and a preview of the first row
    Mapping(MappingArgs),
    /// Import leads from a CSV file
    Import(ImportArgs),
    /// Show the pipeline board
    Board {
        /// Only print per-column totals
        #[arg(long)]
        summary: bool,
    },
    /// Drag a lead onto a board column
    Move {
        /// Lead id or exact name
        lead: String,
        /// Target column
        status: LeadStatus,
    },
    /// Lead operations
    Leads(LeadsCommand),
    /// Named list operations
    Lists(ListsCommand),
    /// Export leads as CSV
    Export(ExportArgs),
    /// Task operations
    Tasks(TasksCommand),
    /// Prune list members and task links that point at missing leads
    Reconcile,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct MappingArgs {
    pub file: PathBuf,
    /// Override a column target, as HEADER=FIELD (empty FIELD skips the column)
    #[arg(long = "map", value_name = "HEADER=FIELD")]
    pub overrides: Vec<String>,
}

#[derive(Args)]
pub struct ImportArgs {
    pub file: PathBuf,
    /// Override a column target, as HEADER=FIELD (empty FIELD skips the column)
    #[arg(long = "map", value_name = "HEADER=FIELD")]
    pub overrides: Vec<String>,
    /// Tag attached to imported leads (defaults to the configured import tag)
    #[arg(long)]
    pub tag: Option<String>,
}

/// Leads picked on the command line, standing in for list checkboxes.
#[derive(Args, Clone, Default)]
pub struct SelectionArgs {
    /// Lead id or exact name; repeat to select several
    #[arg(long = "lead", value_name = "LEAD")]
    pub leads: Vec<String>,
    /// Select every lead
    #[arg(long, conflicts_with = "leads")]
    pub all: bool,
}

// Lead commands
#[derive(Args)]
pub struct LeadsCommand {
    #[command(subcommand)]
    pub action: LeadsAction,
}

#[derive(Subcommand)]
pub enum LeadsAction {
    /// List leads
    List {
        #[arg(long)]
        status: Option<LeadStatus>,
        #[arg(long)]
        tag: Option<String>,
        /// List id or name
        #[arg(long = "in-list")]
        in_list: Option<String>,
    },
    /// Add a lead by hand
    Add(LeadAddArgs),
    /// Delete the selected leads
    Delete {
        #[command(flatten)]
        selection: SelectionArgs,
        /// Prune dangling list members and task links afterwards
        #[arg(long)]
        reconcile: bool,
    },
    /// Add or remove tags on a lead
    Tag {
        lead: String,
        #[arg(long)]
        add: Vec<String>,
        #[arg(long)]
        remove: Vec<String>,
    },
}

#[derive(Args)]
pub struct LeadAddArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub company: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub value: f64,
    #[arg(long)]
    pub status: Option<LeadStatus>,
}

// List commands
#[derive(Args)]
pub struct ListsCommand {
    #[command(subcommand)]
    pub action: ListsAction,
}

#[derive(Subcommand)]
pub enum ListsAction {
    /// Save the selected leads as a new list
    Create {
        name: String,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Merge the selected leads into an existing list
    Add {
        /// List id or name
        list: String,
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Show every list
    Show,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
    /// Write the file into this directory instead of printing it
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

// Task commands
#[derive(Args)]
pub struct TasksCommand {
    #[command(subcommand)]
    pub action: TasksAction,
}

#[derive(Subcommand)]
pub enum TasksAction {
    /// List tasks, open ones first
    List {
        #[arg(long, value_enum)]
        sort: Option<TaskSortArg>,
        #[arg(long, value_enum, default_value = "asc")]
        order: SortOrderArg,
        /// Date used for the overdue flag (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        today: Option<NaiveDate>,
        /// Only show overdue tasks
        #[arg(long)]
        overdue: bool,
    },
    /// Quick-add a task
    Add(TaskAddArgs),
    /// Flip a task between open and done
    Toggle {
        /// Task id or exact title
        task: String,
    },
    /// Delete a task
    Delete {
        /// Task id or exact title
        task: String,
    },
}

#[derive(Args)]
pub struct TaskAddArgs {
    pub title: String,
    #[arg(long)]
    pub priority: Option<Priority>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub due: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Lead id or exact name the task is about
    #[arg(long)]
    pub lead: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TaskSortArg {
    Priority,
    DueDate,
    Title,
}

impl From<TaskSortArg> for TaskSortBy {
    fn from(arg: TaskSortArg) -> Self {
        match arg {
            TaskSortArg::Priority => TaskSortBy::Priority,
            TaskSortArg::DueDate => TaskSortBy::DueDate,
            TaskSortArg::Title => TaskSortBy::Title,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SortOrderArg {
    Asc,
    Desc,
}

impl From<SortOrderArg> for SortOrder {
    fn from(arg: SortOrderArg) -> Self {
        match arg {
            SortOrderArg::Asc => SortOrder::Ascending,
            SortOrderArg::Desc => SortOrder::Descending,
        }
    }
}
