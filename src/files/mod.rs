//! Flat-file backend: one pretty-printed JSON array per collection.

pub mod lock;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;

use crate::error::{Result, TaskboardError};
use crate::models::{sort_newest_first, Resource};
use crate::store::Repository;

use lock::{lock_path_for, write_atomic, FileLock};

/// Collections stored as `<data_dir>/<collection>.json`.
///
/// Every operation holds the store mutex and the collection's `.lock`
/// sidecar, so concurrent writers in this or another process serialize.
pub struct JsonStore {
    dir: PathBuf,
    lock_timeout_ms: u64,
    guard: Mutex<()>,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>, lock_timeout_ms: u64) -> Self {
        Self {
            dir: dir.into(),
            lock_timeout_ms,
            guard: Mutex::new(()),
        }
    }

    /// Create the data directory and an empty file for each missing collection.
    pub fn init(&self, collections: &[&str]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        for name in collections {
            let path = self.dir.join(format!("{name}.json"));
            if !path.exists() {
                write_atomic(&path, b"[]\n")?;
            }
        }
        Ok(())
    }

    /// Fails with NOT_INITIALIZED when the data directory is missing.
    pub fn open(dir: impl Into<PathBuf>, lock_timeout_ms: u64) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(TaskboardError::not_initialized(format!(
                "Data directory {} does not exist",
                dir.display()
            )));
        }
        Ok(Self::new(dir, lock_timeout_ms))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for<R: Resource>(&self) -> PathBuf {
        self.dir.join(format!("{}.json", R::COLLECTION))
    }

    /// Run `f` on the collection under both locks; persist when it reports a change.
    fn with_collection<R, T, F>(&self, f: F) -> Result<T>
    where
        R: Resource,
        F: FnOnce(&mut Vec<R>) -> Result<(T, bool)>,
    {
        let _guard = self
            .guard
            .lock()
            .map_err(|_| TaskboardError::internal("file store mutex poisoned"))?;
        let path = self.file_for::<R>();
        let _lock = FileLock::acquire(lock_path_for(&path), self.lock_timeout_ms)?;

        let mut items = read_collection::<R>(&path)?;
        let (out, dirty) = f(&mut items)?;
        if dirty {
            let body = serde_json::to_string_pretty(&items)
                .map_err(|e| TaskboardError::internal(e.to_string()))?;
            write_atomic(&path, format!("{body}\n").as_bytes())?;
        }
        Ok(out)
    }
}

fn read_collection<R: Resource>(path: &Path) -> Result<Vec<R>> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(&content).map_err(|e| {
        TaskboardError::database(format!("Corrupt data file {}: {e}", path.display()))
    })
}

fn next_id<R: Resource>(items: &[R]) -> i64 {
    items.iter().map(|item| item.id()).max().unwrap_or(0) + 1
}

fn position<R: Resource>(items: &[R], id: i64) -> Result<usize> {
    items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| TaskboardError::not_found(R::LABEL, id))
}

impl<R: Resource> Repository<R> for JsonStore {
    fn list(&self) -> Result<Vec<R>> {
        let mut items = self.with_collection(|items: &mut Vec<R>| Ok((items.clone(), false)))?;
        sort_newest_first(&mut items);
        Ok(items)
    }

    fn get(&self, id: i64) -> Result<R> {
        self.with_collection(|items: &mut Vec<R>| {
            let idx = position(items, id)?;
            Ok((items[idx].clone(), false))
        })
    }

    fn create(&self, draft: R::Draft) -> Result<R> {
        self.with_collection(|items: &mut Vec<R>| {
            let record = R::build(next_id(items), draft, Utc::now())?;
            items.push(record.clone());
            tracing::debug!(collection = R::COLLECTION, id = record.id(), "created");
            Ok((record, true))
        })
    }

    fn update(&self, id: i64, patch: R::Patch) -> Result<R> {
        self.with_collection(|items: &mut Vec<R>| {
            let idx = position(items, id)?;
            let mut record = items[idx].clone();
            record.apply(patch, Utc::now())?;
            items[idx] = record.clone();
            tracing::debug!(collection = R::COLLECTION, id, "updated");
            Ok((record, true))
        })
    }

    fn delete(&self, id: i64) -> Result<R> {
        self.with_collection(|items: &mut Vec<R>| {
            let idx = position(items, id)?;
            let removed = items.remove(idx);
            tracing::debug!(collection = R::COLLECTION, id, "deleted");
            Ok((removed, true))
        })
    }
}
