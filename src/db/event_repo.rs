use rusqlite::{params, Connection, OptionalExtension};

use super::Table;
use crate::error::Result;
use crate::models::{CalendarEvent, EventType};

const COLUMNS: &str = "id, title, starts_at, ends_at, all_day, description, location, event_type,
                       color, created_at, updated_at";

pub fn insert_event(conn: &Connection, event: &CalendarEvent) -> Result<i64> {
    conn.execute(
        "INSERT INTO events (title, starts_at, ends_at, all_day, description, location,
                             event_type, color, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            event.title,
            event.start,
            event.end,
            event.all_day,
            event.description,
            event.location,
            event.event_type.as_str(),
            event.color,
            event.created_at,
            event.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_event(conn: &Connection, id: i64) -> Result<Option<CalendarEvent>> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM events WHERE id = ?1"),
            params![id],
            row_to_event,
        )
        .optional()?)
}

pub fn list_events(conn: &Connection) -> Result<Vec<CalendarEvent>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM events ORDER BY created_at DESC, id DESC"
    ))?;
    let events = stmt
        .query_map([], row_to_event)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(events)
}

pub fn save_event(conn: &Connection, event: &CalendarEvent) -> Result<()> {
    conn.execute(
        "UPDATE events SET title = ?1, starts_at = ?2, ends_at = ?3, all_day = ?4,
                description = ?5, location = ?6, event_type = ?7, color = ?8, updated_at = ?9
         WHERE id = ?10",
        params![
            event.title,
            event.start,
            event.end,
            event.all_day,
            event.description,
            event.location,
            event.event_type.as_str(),
            event.color,
            event.updated_at,
            event.id,
        ],
    )?;
    Ok(())
}

pub fn delete_event(conn: &Connection, id: i64) -> Result<bool> {
    Ok(conn.execute("DELETE FROM events WHERE id = ?1", params![id])? > 0)
}

fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<CalendarEvent> {
    Ok(CalendarEvent {
        id: row.get(0)?,
        title: row.get(1)?,
        start: row.get(2)?,
        end: row.get(3)?,
        all_day: row.get(4)?,
        description: row.get(5)?,
        location: row.get(6)?,
        event_type: EventType::from_str(&row.get::<_, String>(7)?).unwrap_or_default(),
        color: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

impl Table for CalendarEvent {
    fn insert(conn: &Connection, record: &Self) -> Result<i64> {
        insert_event(conn, record)
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Self>> {
        get_event(conn, id)
    }

    fn fetch_all(conn: &Connection) -> Result<Vec<Self>> {
        list_events(conn)
    }

    fn save(conn: &Connection, record: &Self) -> Result<()> {
        save_event(conn, record)
    }

    fn remove(conn: &Connection, id: i64) -> Result<bool> {
        delete_event(conn, id)
    }
}
