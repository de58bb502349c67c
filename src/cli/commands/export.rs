use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::{ExportLogic, write_document};
use crate::ui::messages::{info, warning};
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        force,
    } = cmd
    {
        let pool = DbPool::from_config(cfg)?;
        let doc = ExportLogic::export_report(&pool, *format)?;

        if doc.rows.is_empty() {
            warning("No records found: the report only contains the header.");
        }

        let path = match file {
            Some(f) => PathBuf::from(f),
            None => PathBuf::from(&cfg.export_dir).join(&doc.file_name),
        };

        info(format!("Exporting {} record(s) to {}", doc.rows.len(), path.display()));
        write_document(&doc, &path, *force)?;
    }
    Ok(())
}
