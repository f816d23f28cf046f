use rusqlite::{params, Connection, OptionalExtension};

use super::{NameList, Table};
use crate::error::Result;
use crate::models::{Priority, Status, Task};

const TAGS: NameList = NameList {
    table: "task_tags",
    owner: "task_id",
    value: "tag",
};

const COLUMNS: &str = "id, title, description, status, priority, due_date, assignee, project_id,
                       created_at, updated_at";

pub fn insert_task(conn: &Connection, task: &Task) -> Result<i64> {
    conn.execute(
        "INSERT INTO tasks (title, description, status, priority, due_date, assignee, project_id,
                            created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            task.title,
            task.description,
            task.status.as_str(),
            task.priority.as_str(),
            task.due_date,
            task.assignee,
            task.project_id,
            task.created_at,
            task.updated_at,
        ],
    )?;
    let id = conn.last_insert_rowid();
    TAGS.replace(conn, id, &task.tags)?;
    Ok(id)
}

pub fn get_task(conn: &Connection, id: i64) -> Result<Option<Task>> {
    let task = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM tasks WHERE id = ?1"),
            params![id],
            row_to_task,
        )
        .optional()?;
    match task {
        Some(mut task) => {
            task.tags = TAGS.load(conn, id)?;
            Ok(Some(task))
        }
        None => Ok(None),
    }
}

pub fn list_tasks(conn: &Connection) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM tasks ORDER BY created_at DESC, id DESC"
    ))?;
    let mut tasks = stmt
        .query_map([], row_to_task)?
        .collect::<Result<Vec<_>, _>>()?;
    let mut tags = TAGS.load_all(conn)?;
    for task in &mut tasks {
        task.tags = tags.remove(&task.id).unwrap_or_default();
    }
    Ok(tasks)
}

pub fn save_task(conn: &Connection, task: &Task) -> Result<()> {
    conn.execute(
        "UPDATE tasks SET title = ?1, description = ?2, status = ?3, priority = ?4,
                due_date = ?5, assignee = ?6, project_id = ?7, updated_at = ?8
         WHERE id = ?9",
        params![
            task.title,
            task.description,
            task.status.as_str(),
            task.priority.as_str(),
            task.due_date,
            task.assignee,
            task.project_id,
            task.updated_at,
            task.id,
        ],
    )?;
    TAGS.replace(conn, task.id, &task.tags)
}

pub fn delete_task(conn: &Connection, id: i64) -> Result<bool> {
    Ok(conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])? > 0)
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: Status::from_str(&row.get::<_, String>(3)?).unwrap_or_default(),
        priority: Priority::from_str(&row.get::<_, String>(4)?).unwrap_or_default(),
        due_date: row.get(5)?,
        tags: Vec::new(),
        assignee: row.get(6)?,
        project_id: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

impl Table for Task {
    fn insert(conn: &Connection, record: &Self) -> Result<i64> {
        insert_task(conn, record)
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Self>> {
        get_task(conn, id)
    }

    fn fetch_all(conn: &Connection) -> Result<Vec<Self>> {
        list_tasks(conn)
    }

    fn save(conn: &Connection, record: &Self) -> Result<()> {
        save_task(conn, record)
    }

    fn remove(conn: &Connection, id: i64) -> Result<bool> {
        delete_task(conn, id)
    }
}
