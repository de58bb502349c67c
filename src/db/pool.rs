//! SQLite connection wrapper: one connection per operation.

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::errors::AppResult;
use rusqlite::{Connection, Transaction};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(20);

pub struct DbPool {
    pub conn: Connection,
    path: String,
}

impl DbPool {
    pub fn new(path: &str) -> AppResult<Self> {
        Self::with_timeout(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Open `path` with foreign keys enforced and a bounded wait on locks.
    pub fn with_timeout(path: &str, busy_timeout: Duration) -> AppResult<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(busy_timeout)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self {
            conn,
            path: path.to_string(),
        })
    }

    /// Open the configured database and bring its schema up to date.
    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        if let Some(parent) = Path::new(&cfg.database).parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let pool = Self::with_timeout(&cfg.database, cfg.busy_timeout())?;
        init_db(&pool.conn)?;
        Ok(pool)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run `func` inside a transaction; it commits only if `func` succeeds.
    pub fn in_transaction<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> AppResult<T>,
    {
        let tx = self.conn.transaction()?;
        let out = func(&tx)?;
        tx.commit()?;
        Ok(out)
    }
}
