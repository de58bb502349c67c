use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::OptionalExtension;
use std::fs;

/// Summary shown by `db --info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbInfo {
    pub path: String,
    pub size_bytes: u64,
    pub machines: i64,
    pub drivers: i64,
    pub counterparties: i64,
    pub records: i64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
}

fn count(pool: &DbPool, table: &str) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    Ok(pool.conn.query_row(&sql, [], |row| row.get(0))?)
}

pub fn db_info(pool: &DbPool) -> AppResult<DbInfo> {
    let size_bytes = fs::metadata(pool.path()).map(|m| m.len()).unwrap_or(0);

    let first_date: Option<String> = pool
        .conn
        .query_row("SELECT MIN(date) FROM records", [], |row| row.get(0))
        .optional()?
        .flatten();

    let last_date: Option<String> = pool
        .conn
        .query_row("SELECT MAX(date) FROM records", [], |row| row.get(0))
        .optional()?
        .flatten();

    Ok(DbInfo {
        path: pool.path().to_string(),
        size_bytes,
        machines: count(pool, "machines")?,
        drivers: count(pool, "drivers")?,
        counterparties: count(pool, "counterparties")?,
        records: count(pool, "records")?,
        first_date,
        last_date,
    })
}

/// `PRAGMA integrity_check` plus a foreign key scan; empty when healthy.
pub fn integrity_problems(pool: &DbPool) -> AppResult<Vec<String>> {
    let mut problems = Vec::new();

    let integrity: String = pool
        .conn
        .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;
    if integrity != "ok" {
        problems.push(integrity);
    }

    let mut stmt = pool.conn.prepare("PRAGMA foreign_key_check;")?;
    let rows = stmt.query_map([], |row| {
        let table: String = row.get(0)?;
        let rowid: Option<i64> = row.get(1)?;
        let parent: String = row.get(2)?;
        Ok(format!(
            "{table} row {} references a missing {parent} row",
            rowid.map(|r| r.to_string()).unwrap_or_else(|| "?".into())
        ))
    })?;
    for r in rows {
        problems.push(r?);
    }

    Ok(problems)
}
