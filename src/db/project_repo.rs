use rusqlite::{params, Connection, OptionalExtension};

use super::{NameList, Table};
use crate::error::Result;
use crate::models::{Priority, Project, Status};

const TEAM: NameList = NameList {
    table: "project_team",
    owner: "project_id",
    value: "member",
};

const COLUMNS: &str = "id, name, description, start_date, end_date, status, priority, budget,
                       progress, manager, created_at, updated_at";

pub fn insert_project(conn: &Connection, project: &Project) -> Result<i64> {
    conn.execute(
        "INSERT INTO projects (name, description, start_date, end_date, status, priority, budget,
                               progress, manager, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            project.name,
            project.description,
            project.start_date,
            project.end_date,
            project.status.as_str(),
            project.priority.as_str(),
            project.budget,
            project.progress,
            project.manager,
            project.created_at,
            project.updated_at,
        ],
    )?;
    let id = conn.last_insert_rowid();
    TEAM.replace(conn, id, &project.team)?;
    Ok(id)
}

pub fn get_project(conn: &Connection, id: i64) -> Result<Option<Project>> {
    let project = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM projects WHERE id = ?1"),
            params![id],
            row_to_project,
        )
        .optional()?;
    match project {
        Some(mut project) => {
            project.team = TEAM.load(conn, id)?;
            Ok(Some(project))
        }
        None => Ok(None),
    }
}

pub fn list_projects(conn: &Connection) -> Result<Vec<Project>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC"
    ))?;
    let mut projects = stmt
        .query_map([], row_to_project)?
        .collect::<Result<Vec<_>, _>>()?;
    let mut teams = TEAM.load_all(conn)?;
    for project in &mut projects {
        project.team = teams.remove(&project.id).unwrap_or_default();
    }
    Ok(projects)
}

pub fn save_project(conn: &Connection, project: &Project) -> Result<()> {
    conn.execute(
        "UPDATE projects SET name = ?1, description = ?2, start_date = ?3, end_date = ?4,
                status = ?5, priority = ?6, budget = ?7, progress = ?8, manager = ?9,
                updated_at = ?10
         WHERE id = ?11",
        params![
            project.name,
            project.description,
            project.start_date,
            project.end_date,
            project.status.as_str(),
            project.priority.as_str(),
            project.budget,
            project.progress,
            project.manager,
            project.updated_at,
            project.id,
        ],
    )?;
    TEAM.replace(conn, project.id, &project.team)
}

pub fn delete_project(conn: &Connection, id: i64) -> Result<bool> {
    Ok(conn.execute("DELETE FROM projects WHERE id = ?1", params![id])? > 0)
}

fn row_to_project(row: &rusqlite::Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        status: Status::from_str(&row.get::<_, String>(5)?).unwrap_or_default(),
        priority: Priority::from_str(&row.get::<_, String>(6)?).unwrap_or_default(),
        budget: row.get(7)?,
        progress: row.get(8)?,
        manager: row.get(9)?,
        team: Vec::new(),
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

impl Table for Project {
    fn insert(conn: &Connection, record: &Self) -> Result<i64> {
        insert_project(conn, record)
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Self>> {
        get_project(conn, id)
    }

    fn fetch_all(conn: &Connection) -> Result<Vec<Self>> {
        list_projects(conn)
    }

    fn save(conn: &Connection, record: &Self) -> Result<()> {
        save_project(conn, record)
    }

    fn remove(conn: &Connection, id: i64) -> Result<bool> {
        delete_project(conn, id)
    }
}
