use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::FileOptions;

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

/// Applied in order; each one is recorded in `log` and never re-run.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20241001_0001_create_registry_tables",
        description: "Created machines, drivers and counterparties tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS machines (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT UNIQUE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS drivers (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT UNIQUE NOT NULL
        );

        CREATE TABLE IF NOT EXISTS counterparties (
            id    INTEGER PRIMARY KEY AUTOINCREMENT,
            name  TEXT UNIQUE NOT NULL
        );
        "#,
    },
    Migration {
        version: "20241001_0002_create_records",
        description: "Created records table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS records (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            date             TEXT NOT NULL,
            machine_id       INTEGER NOT NULL,
            driver_id        INTEGER NOT NULL,
            start_time       TEXT,
            end_time         TEXT,
            hours            INTEGER NOT NULL DEFAULT 0 CHECK(hours >= 0),
            comment          TEXT,
            counterparty_id  INTEGER,
            status           TEXT NOT NULL CHECK(status IN ('work','stop','repair','holiday')),
            FOREIGN KEY(machine_id) REFERENCES machines(id) ON DELETE CASCADE,
            FOREIGN KEY(driver_id) REFERENCES drivers(id) ON DELETE CASCADE,
            FOREIGN KEY(counterparty_id) REFERENCES counterparties(id) ON DELETE SET NULL
        );
        "#,
    },
    Migration {
        version: "20241015_0003_records_indexes",
        description: "Added date and machine indexes to records",
        sql: r#"
        CREATE INDEX IF NOT EXISTS idx_records_date ON records(date);
        CREATE INDEX IF NOT EXISTS idx_records_machine_date ON records(machine_id, date);
        CREATE INDEX IF NOT EXISTS idx_records_driver ON records(driver_id);
        CREATE INDEX IF NOT EXISTS idx_records_counterparty ON records(counterparty_id);
        "#,
    },
];

/// Ensure that the `log` table exists; it also stores migration markers.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)
        .map_err(|e| AppError::Migration(format!("{}: {}", m.version, e)))?;

    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, 'migration_applied', ?2, ?3)",
        [Local::now().to_rfc3339().as_str(), m.version, m.description],
    )?;

    tx.commit()?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Tables are only created when absent, so running this on every start is safe.
/// Returns the versions applied by this call, empty when the schema was current.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
            applied.push(m.version);
        }
    }

    Ok(applied)
}

/// Versions recorded as applied, in order.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Drop every application table, log included. Only used by an explicit reset.
///
/// Foreign keys are switched off for the drops and back on afterwards,
/// whether or not the drops succeeded.
pub(crate) fn drop_all_tables(conn: &Connection) -> AppResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = OFF;")?;

    let dropped = drop_tables_in_transaction(conn);
    let restored = conn.execute_batch("PRAGMA foreign_keys = ON;");

    dropped?;
    restored?;
    Ok(())
}

fn drop_tables_in_transaction(conn: &Connection) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(
        r#"
        DROP TABLE IF EXISTS records;
        DROP TABLE IF EXISTS machines;
        DROP TABLE IF EXISTS drivers;
        DROP TABLE IF EXISTS counterparties;
        DROP TABLE IF EXISTS log;
        "#,
    )?;
    tx.commit()?;
    Ok(())
}

/// Zip the database file next to itself before a destructive operation.
pub(crate) fn backup_database(db_path: &str) -> AppResult<PathBuf> {
    let db_file = Path::new(db_path);
    let stem = db_file
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "database".to_string());
    let backup_name = format!(
        "{}-{}-backup_before_reset.zip",
        stem,
        Local::now().format("%Y%m%d_%H%M%S")
    );

    let backup_path = db_file
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(&backup_name);

    let file = File::create(&backup_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("database.sqlite", options)
        .map_err(|e| std::io::Error::other(format!("Backup failed (start_file): {e}")))?;

    let db_content = fs::read(db_path)?;
    zip.write_all(&db_content)?;

    zip.finish()
        .map_err(|e| std::io::Error::other(format!("Backup failed (finish): {e}")))?;

    Ok(backup_path)
}
