//! taskboard: tasks, projects, calendar events and team members behind a
//! REST API and a CLI, stored in SQLite or in JSON files.

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod files;
pub mod models;
pub mod output;
pub mod query;
pub mod server;
pub mod session;
pub mod stats;
pub mod store;

pub const VERSION: &str = env!("TASKBOARD_VERSION");
