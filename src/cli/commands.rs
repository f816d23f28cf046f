use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(
    name = "taskboard",
    version = crate::VERSION,
    about = "Task, project, calendar and team board with a REST API",
    after_help = "\
STORAGE:
  `useDatabase: true` in the config selects SQLite (databasePath);
  otherwise records live in JSON files under dataDir.
  Run `taskboard init` before any other command.

VALUES:
  status    pending | in-progress | done   (also 대기중, 진행중, 완료)
  priority  low | medium | high            (also 낮음, 중간, 높음)
  dates     YYYY-MM-DD; event times YYYY-MM-DDTHH:MM[:SS]

EXIT CODES:
  0  Success
  1  Error (not initialized, not found, validation, storage)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default config if missing, create storage and seed sample data
    Init {
        /// Use SQLite instead of JSON files (only when writing a new config)
        #[arg(long)]
        database: bool,
    },

    /// Run the HTTP API
    Serve {
        /// Port to listen on (overrides serverPort and PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Task management
    #[command(subcommand)]
    Task(TaskCommands),

    /// Project management
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Calendar events
    #[command(subcommand)]
    Event(EventCommands),

    /// Team members
    #[command(subcommand)]
    Member(MemberCommands),

    /// Dashboard: task counts, upcoming deadlines, project progress
    Status,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a task
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        assignee: Option<String>,
        /// Owning project id
        #[arg(long)]
        project: Option<i64>,
    },
    /// List tasks
    List {
        /// Substring of title or description
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        tag: Option<String>,
        /// title | status | priority | dueDate | createdAt
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long)]
        desc: bool,
        /// Other field filter as key=value (repeatable)
        #[arg(long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,
    },
    /// Show a task
    Show { id: i64 },
    /// Change fields of a task
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        due: Option<String>,
        /// Replace tags (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        assignee: Option<String>,
        #[arg(long)]
        project: Option<i64>,
        /// Clear an optional field (description, due, tags, assignee, project)
        #[arg(long = "clear", value_name = "FIELD")]
        clear: Vec<String>,
    },
    /// Delete a task
    Delete { id: i64 },
}

/// Shared listing flags for projects, events and members.
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Substring of the record's text fields
    #[arg(long)]
    pub search: Option<String>,
    /// Field to sort by (camelCase wire name)
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
    /// Field filter as key=value (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a project
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        priority: Option<String>,
        #[arg(long)]
        budget: Option<i64>,
        /// Percent complete; clamped to 0..=100
        #[arg(long, allow_hyphen_values = true)]
        progress: Option<i64>,
        #[arg(long)]
        manager: Option<String>,
        /// Team member name (repeatable)
        #[arg(long = "member")]
        team: Vec<String>,
    },
    /// List projects
    List(ListArgs),
    /// Show a project
    Show { id: i64 },
    /// Delete a project
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum EventCommands {
    /// Create a calendar event
    Add {
        title: String,
        /// Start (YYYY-MM-DD for all-day, or YYYY-MM-DDTHH:MM[:SS])
        #[arg(long)]
        start: String,
        /// End; defaults to start
        #[arg(long)]
        end: Option<String>,
        /// meeting | task | deadline | training | vacation | other
        #[arg(long = "type")]
        event_type: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Hex color; defaults to the type's color
        #[arg(long)]
        color: Option<String>,
    },
    /// List events
    List(ListArgs),
    /// Show an event
    Show { id: i64 },
    /// Delete an event
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a team member
    Add {
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        role: Option<String>,
        /// Join date (YYYY-MM-DD)
        #[arg(long)]
        join_date: Option<String>,
        /// active | on-leave | left
        #[arg(long)]
        status: Option<String>,
    },
    /// List members
    List(ListArgs),
    /// Show a member
    Show { id: i64 },
    /// Remove a member
    Delete { id: i64 },
}
