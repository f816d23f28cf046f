//! SQLite backend.

pub mod connection;
pub mod event_repo;
pub mod member_repo;
pub mod migrations;
pub mod project_repo;
pub mod store;
pub mod task_repo;

pub use connection::*;
pub use store::SqliteStore;

use std::collections::HashMap;

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::Resource;

/// Row-level access for a resource stored in its own table.
pub trait Table: Resource {
    /// Insert `record` (its id is ignored) and return the assigned id.
    fn insert(conn: &Connection, record: &Self) -> Result<i64>;
    fn fetch(conn: &Connection, id: i64) -> Result<Option<Self>>;
    fn fetch_all(conn: &Connection) -> Result<Vec<Self>>;
    fn save(conn: &Connection, record: &Self) -> Result<()>;
    /// Returns false when no row had `id`.
    fn remove(conn: &Connection, id: i64) -> Result<bool>;
}

/// Ordered string list kept in a child table (`task_tags`, `project_team`).
pub(crate) struct NameList {
    pub table: &'static str,
    pub owner: &'static str,
    pub value: &'static str,
}

impl NameList {
    pub fn replace(&self, conn: &Connection, owner_id: i64, names: &[String]) -> Result<()> {
        conn.execute(
            &format!("DELETE FROM {} WHERE {} = ?1", self.table, self.owner),
            params![owner_id],
        )?;
        let mut stmt = conn.prepare(&format!(
            "INSERT INTO {} ({}, position, {}) VALUES (?1, ?2, ?3)",
            self.table, self.owner, self.value
        ))?;
        for (position, name) in names.iter().enumerate() {
            stmt.execute(params![owner_id, position as i64, name])?;
        }
        Ok(())
    }

    pub fn load(&self, conn: &Connection, owner_id: i64) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM {} WHERE {} = ?1 ORDER BY position",
            self.value, self.table, self.owner
        ))?;
        let names = stmt
            .query_map(params![owner_id], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    pub fn load_all(&self, conn: &Connection) -> Result<HashMap<i64, Vec<String>>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {}, {} FROM {} ORDER BY {}, position",
            self.owner, self.value, self.table, self.owner
        ))?;
        let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;
        let mut by_owner: HashMap<i64, Vec<String>> = HashMap::new();
        for row in rows {
            let (owner, name) = row?;
            by_owner.entry(owner).or_default().push(name);
        }
        Ok(by_owner)
    }
}
