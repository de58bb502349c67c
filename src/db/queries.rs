use crate::errors::{AppError, AppResult};
use crate::models::calendar::DayEntry;
use crate::models::entity::{EntityKind, NamedEntity};
use crate::models::record::RecordRow;
use crate::models::status::Status;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

/// Column list shared by every joined record query.
const RECORD_SELECT: &str = "
    SELECT r.id, r.date, m.name, d.name, r.start_time, r.end_time,
           r.hours, r.comment, c.name, r.status
    FROM records r
    JOIN machines m ON r.machine_id = m.id
    JOIN drivers d ON r.driver_id = d.id
    LEFT JOIN counterparties c ON r.counterparty_id = c.id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// Most recent first (listings).
    Descending,
    /// Oldest first (reports).
    Ascending,
}

/// A validated record ready to be written.
#[derive(Debug, Clone)]
pub struct RecordInsert<'a> {
    pub date: NaiveDate,
    pub machine_id: i64,
    pub driver_id: i64,
    pub status: Status,
    pub start_time: Option<&'a str>,
    pub end_time: Option<&'a str>,
    pub hours: u32,
    pub comment: Option<&'a str>,
    pub counterparty_id: Option<i64>,
}

// ---------------------------
// Named entities
// ---------------------------

/// Insert a name; `None` when the name is already taken.
pub fn insert_named(conn: &Connection, kind: EntityKind, name: &str) -> AppResult<Option<i64>> {
    let sql = format!(
        "INSERT INTO {} (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
        kind.table()
    );

    let changed = conn.execute(&sql, [name])?;
    if changed == 0 {
        return Ok(None);
    }
    Ok(Some(conn.last_insert_rowid()))
}

pub fn delete_named(conn: &Connection, kind: EntityKind, id: i64) -> AppResult<usize> {
    let sql = format!("DELETE FROM {} WHERE id = ?1", kind.table());
    Ok(conn.execute(&sql, [id])?)
}

pub fn list_named(conn: &Connection, kind: EntityKind) -> AppResult<Vec<NamedEntity>> {
    let sql = format!("SELECT id, name FROM {} ORDER BY id ASC", kind.table());
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt.query_map([], |row| {
        Ok(NamedEntity {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_named(conn: &Connection, kind: EntityKind, id: i64) -> AppResult<Option<NamedEntity>> {
    let sql = format!("SELECT id, name FROM {} WHERE id = ?1", kind.table());

    let found = conn
        .query_row(&sql, [id], |row| {
            Ok(NamedEntity {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .optional()?;

    Ok(found)
}

pub fn named_exists(conn: &Connection, kind: EntityKind, id: i64) -> AppResult<bool> {
    Ok(find_named(conn, kind, id)?.is_some())
}

// ---------------------------
// Records
// ---------------------------

pub fn insert_record(conn: &Connection, rec: &RecordInsert<'_>) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO records
            (date, machine_id, driver_id, status, start_time, end_time, hours, comment, counterparty_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            rec.date.format("%Y-%m-%d").to_string(),
            rec.machine_id,
            rec.driver_id,
            rec.status.to_db_str(),
            rec.start_time,
            rec.end_time,
            rec.hours,
            rec.comment,
            rec.counterparty_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn delete_record(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM records WHERE id = ?1", [id])?)
}

/// All records joined with names; ties on the date keep insertion order.
pub fn load_records(conn: &Connection, order: DateOrder) -> AppResult<Vec<RecordRow>> {
    let sql = match order {
        DateOrder::Descending => format!("{RECORD_SELECT} ORDER BY r.date DESC, r.id ASC"),
        DateOrder::Ascending => format!("{RECORD_SELECT} ORDER BY r.date ASC, r.id ASC"),
    };

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_record_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_record(conn: &Connection, id: i64) -> AppResult<Option<RecordRow>> {
    let sql = format!("{RECORD_SELECT} WHERE r.id = ?1");
    Ok(conn.query_row(&sql, [id], map_record_row).optional()?)
}

/// Calendar entries of one machine between two dates (inclusive).
pub fn load_machine_entries(
    conn: &Connection,
    machine_id: i64,
    first: NaiveDate,
    last: NaiveDate,
) -> AppResult<Vec<(NaiveDate, DayEntry)>> {
    let mut stmt = conn.prepare(
        "SELECT r.id, r.date, d.name, r.status, r.start_time, r.end_time, c.name
         FROM records r
         JOIN drivers d ON r.driver_id = d.id
         LEFT JOIN counterparties c ON r.counterparty_id = c.id
         WHERE r.machine_id = ?1 AND r.date BETWEEN ?2 AND ?3
         ORDER BY r.date ASC, r.id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            machine_id,
            first.format("%Y-%m-%d").to_string(),
            last.format("%Y-%m-%d").to_string(),
        ],
        |row| {
            let date = parse_date_column(row, 1)?;
            let status = parse_status_column(row, 3)?;
            Ok((
                date,
                DayEntry {
                    record_id: row.get(0)?,
                    driver: row.get(2)?,
                    status,
                    start_time: row.get(4)?,
                    end_time: row.get(5)?,
                    counterparty: row.get(6)?,
                },
            ))
        },
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Mapping DB → RecordRow (column order of RECORD_SELECT).
fn map_record_row(row: &Row<'_>) -> rusqlite::Result<RecordRow> {
    Ok(RecordRow {
        id: row.get(0)?,
        date: parse_date_column(row, 1)?,
        machine: row.get(2)?,
        driver: row.get(3)?,
        start_time: row.get(4)?,
        end_time: row.get(5)?,
        hours: row.get(6)?,
        comment: row.get(7)?,
        counterparty: row.get(8)?,
        status: parse_status_column(row, 9)?,
    })
}

fn parse_date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let date_str: String = row.get(idx)?;
    NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })
}

fn parse_status_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Status> {
    let status_str: String = row.get(idx)?;
    Status::from_db_str(&status_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidStatus(status_str.clone())),
        )
    })
}
