//! Backend-neutral storage: the `Repository` trait and the configured `Store`.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::AppConfig;
use crate::db::{SqliteStore, Table};
use crate::error::{Result, TaskboardError};
use crate::files::JsonStore;
use crate::models::{CalendarEvent, ListParams, Member, Project, Resource, Task};
use crate::stats::Dashboard;

/// CRUD over one resource collection.
pub trait Repository<R: Resource>: Send + Sync {
    /// All records, newest `createdAt` first.
    fn list(&self) -> Result<Vec<R>>;
    fn get(&self, id: i64) -> Result<R>;
    fn create(&self, draft: R::Draft) -> Result<R>;
    fn update(&self, id: i64, patch: R::Patch) -> Result<R>;
    /// Removes and returns the record.
    fn delete(&self, id: i64) -> Result<R>;

    /// `list` narrowed and ordered by list parameters.
    fn query(&self, params: &ListParams) -> Result<Vec<R>> {
        R::query(self.list()?, params)
    }
}

pub const COLLECTIONS: [&str; 4] = [
    Task::COLLECTION,
    Project::COLLECTION,
    CalendarEvent::COLLECTION,
    Member::COLLECTION,
];

/// Storage selected by `useDatabase`.
pub enum Store {
    Sqlite(SqliteStore),
    Files(JsonStore),
}

/// Records seeded per collection by [`Store::init`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub tasks: usize,
    pub projects: usize,
    pub calendar: usize,
    pub members: usize,
}

impl SeedReport {
    pub fn total(&self) -> usize {
        self.tasks + self.projects + self.calendar + self.members
    }
}

const SAMPLE_TASKS: &str = include_str!("../samples/tasks.json");
const SAMPLE_PROJECTS: &str = include_str!("../samples/projects.json");
const SAMPLE_EVENTS: &str = include_str!("../samples/calendar.json");
const SAMPLE_MEMBERS: &str = include_str!("../samples/members.json");

impl Store {
    /// Open the configured backend; it must have been initialized.
    pub fn open(config: &AppConfig) -> Result<Self> {
        let store = if config.use_database {
            Store::Sqlite(SqliteStore::open(&config.database_path)?)
        } else {
            Store::Files(JsonStore::open(&config.data_dir, config.lock_timeout_ms)?)
        };
        tracing::info!(mode = config.mode(), "storage opened");
        Ok(store)
    }

    /// Create the configured backend and seed empty collections with sample data
    /// when `useSampleData` is set.
    pub fn init(config: &AppConfig) -> Result<(Self, SeedReport)> {
        let store = if config.use_database {
            Store::Sqlite(SqliteStore::init(&config.database_path)?)
        } else {
            let files = JsonStore::new(&config.data_dir, config.lock_timeout_ms);
            files.init(&COLLECTIONS)?;
            Store::Files(files)
        };
        let report = if config.use_sample_data {
            store.seed_samples()?
        } else {
            SeedReport::default()
        };
        tracing::info!(mode = config.mode(), seeded = report.total(), "storage initialized");
        Ok((store, report))
    }

    pub fn seed_samples(&self) -> Result<SeedReport> {
        Ok(SeedReport {
            tasks: self.seed::<Task>(SAMPLE_TASKS)?,
            projects: self.seed::<Project>(SAMPLE_PROJECTS)?,
            calendar: self.seed::<CalendarEvent>(SAMPLE_EVENTS)?,
            members: self.seed::<Member>(SAMPLE_MEMBERS)?,
        })
    }

    /// Create every draft in `samples` if the collection is empty.
    fn seed<R: Table>(&self, samples: &str) -> Result<usize> {
        if !Repository::<R>::list(self)?.is_empty() {
            return Ok(0);
        }
        let drafts: Vec<R::Draft> = serde_json::from_str(samples).map_err(|e| {
            TaskboardError::internal(format!("bundled {} samples are invalid: {e}", R::COLLECTION))
        })?;
        let count = drafts.len();
        for draft in drafts {
            Repository::<R>::create(self, draft)?;
        }
        Ok(count)
    }

    pub fn dashboard(&self, today: NaiveDate) -> Result<Dashboard> {
        let tasks: Vec<Task> = Repository::<Task>::list(self)?;
        let projects: Vec<Project> = Repository::<Project>::list(self)?;
        let events: Vec<CalendarEvent> = Repository::<CalendarEvent>::list(self)?;
        let members: Vec<Member> = Repository::<Member>::list(self)?;
        Ok(Dashboard::build(&tasks, &projects, events.len(), members.len(), today))
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Store::Sqlite(_) => "database",
            Store::Files(_) => "files",
        }
    }
}

impl<R: Table> Repository<R> for Store {
    fn list(&self) -> Result<Vec<R>> {
        match self {
            Store::Sqlite(s) => Repository::<R>::list(s),
            Store::Files(s) => Repository::<R>::list(s),
        }
    }

    fn get(&self, id: i64) -> Result<R> {
        match self {
            Store::Sqlite(s) => Repository::<R>::get(s, id),
            Store::Files(s) => Repository::<R>::get(s, id),
        }
    }

    fn create(&self, draft: R::Draft) -> Result<R> {
        match self {
            Store::Sqlite(s) => Repository::<R>::create(s, draft),
            Store::Files(s) => Repository::<R>::create(s, draft),
        }
    }

    fn update(&self, id: i64, patch: R::Patch) -> Result<R> {
        match self {
            Store::Sqlite(s) => Repository::<R>::update(s, id, patch),
            Store::Files(s) => Repository::<R>::update(s, id, patch),
        }
    }

    fn delete(&self, id: i64) -> Result<R> {
        match self {
            Store::Sqlite(s) => Repository::<R>::delete(s, id),
            Store::Files(s) => Repository::<R>::delete(s, id),
        }
    }
}
