use crate::db::migrate::{backup_database, drop_all_tables, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Initialize the database.
/// Delegates all schema creation to the migration engine; existing data is kept.
/// Returns the migration versions applied by this call.
pub fn init_db(conn: &Connection) -> AppResult<Vec<&'static str>> {
    run_pending_migrations(conn)
}

/// Destructive reset: back the file up, drop every table, recreate the schema.
///
/// Returns the backup path, `None` when the database is not file backed.
pub fn reset_db(pool: &mut DbPool) -> AppResult<Option<PathBuf>> {
    let db_path = pool.path().to_string();

    let backup = if !db_path.is_empty() && Path::new(&db_path).exists() {
        Some(backup_database(&db_path)?)
    } else {
        None
    };

    drop_all_tables(&pool.conn)?;
    run_pending_migrations(&pool.conn)?;

    Ok(backup)
}
