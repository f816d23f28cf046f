use rusqlite::{params, Connection, OptionalExtension};

use super::Table;
use crate::error::Result;
use crate::models::{Member, MemberStatus};

const COLUMNS: &str = "id, name, email, phone, department, role, join_date, status,
                       created_at, updated_at";

pub fn insert_member(conn: &Connection, member: &Member) -> Result<i64> {
    conn.execute(
        "INSERT INTO members (name, email, phone, department, role, join_date, status,
                              created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            member.name,
            member.email,
            member.phone,
            member.department,
            member.role,
            member.join_date,
            member.status.as_str(),
            member.created_at,
            member.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_member(conn: &Connection, id: i64) -> Result<Option<Member>> {
    Ok(conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM members WHERE id = ?1"),
            params![id],
            row_to_member,
        )
        .optional()?)
}

pub fn list_members(conn: &Connection) -> Result<Vec<Member>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM members ORDER BY created_at DESC, id DESC"
    ))?;
    let members = stmt
        .query_map([], row_to_member)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(members)
}

pub fn save_member(conn: &Connection, member: &Member) -> Result<()> {
    conn.execute(
        "UPDATE members SET name = ?1, email = ?2, phone = ?3, department = ?4, role = ?5,
                join_date = ?6, status = ?7, updated_at = ?8
         WHERE id = ?9",
        params![
            member.name,
            member.email,
            member.phone,
            member.department,
            member.role,
            member.join_date,
            member.status.as_str(),
            member.updated_at,
            member.id,
        ],
    )?;
    Ok(())
}

pub fn delete_member(conn: &Connection, id: i64) -> Result<bool> {
    Ok(conn.execute("DELETE FROM members WHERE id = ?1", params![id])? > 0)
}

fn row_to_member(row: &rusqlite::Row) -> rusqlite::Result<Member> {
    Ok(Member {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        department: row.get(4)?,
        role: row.get(5)?,
        join_date: row.get(6)?,
        status: MemberStatus::from_str(&row.get::<_, String>(7)?).unwrap_or_default(),
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

impl Table for Member {
    fn insert(conn: &Connection, record: &Self) -> Result<i64> {
        insert_member(conn, record)
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Self>> {
        get_member(conn, id)
    }

    fn fetch_all(conn: &Connection) -> Result<Vec<Self>> {
        list_members(conn)
    }

    fn save(conn: &Connection, record: &Self) -> Result<()> {
        save_member(conn, record)
    }

    fn remove(conn: &Connection, id: i64) -> Result<bool> {
        delete_member(conn, id)
    }
}
