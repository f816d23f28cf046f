use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::Connection;

use super::{connection, Table};
use crate::error::{Result, TaskboardError};
use crate::store::Repository;

/// SQLite-backed store. One connection, one writer at a time.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(connection::open_db(path)?))
    }

    pub fn init(path: &Path) -> Result<Self> {
        Ok(Self::new(connection::init_db(path)?))
    }

    pub fn in_memory() -> Result<Self> {
        Ok(Self::new(connection::open_in_memory()?))
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| TaskboardError::internal("database mutex poisoned"))
    }
}

impl<R: Table> Repository<R> for SqliteStore {
    fn list(&self) -> Result<Vec<R>> {
        let conn = self.conn()?;
        R::fetch_all(&conn)
    }

    fn get(&self, id: i64) -> Result<R> {
        let conn = self.conn()?;
        R::fetch(&conn, id)?.ok_or_else(|| TaskboardError::not_found(R::LABEL, id))
    }

    fn create(&self, draft: R::Draft) -> Result<R> {
        let mut record = R::build(0, draft, Utc::now())?;
        let conn = self.conn()?;
        let id = connection::in_transaction(&conn, |conn| R::insert(conn, &record))?;
        record.set_id(id);
        tracing::debug!(collection = R::COLLECTION, id, "created");
        Ok(record)
    }

    fn update(&self, id: i64, patch: R::Patch) -> Result<R> {
        let conn = self.conn()?;
        let record = connection::in_transaction(&conn, |conn| {
            let mut record =
                R::fetch(conn, id)?.ok_or_else(|| TaskboardError::not_found(R::LABEL, id))?;
            record.apply(patch, Utc::now())?;
            R::save(conn, &record)?;
            Ok(record)
        })?;
        tracing::debug!(collection = R::COLLECTION, id, "updated");
        Ok(record)
    }

    fn delete(&self, id: i64) -> Result<R> {
        let conn = self.conn()?;
        let removed = connection::in_transaction(&conn, |conn| {
            let record =
                R::fetch(conn, id)?.ok_or_else(|| TaskboardError::not_found(R::LABEL, id))?;
            R::remove(conn, id)?;
            Ok(record)
        })?;
        tracing::debug!(collection = R::COLLECTION, id, "deleted");
        Ok(removed)
    }
}
