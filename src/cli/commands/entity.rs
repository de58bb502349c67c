use crate::cli::commands::ask_confirmation;
use crate::cli::parser::EntityAction;
use crate::config::Config;
use crate::core::registry::RegistryLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entity::{AddOutcome, DeleteOutcome, EntityKind};
use crate::ui::messages::{info, success, warning};
use crate::utils::table::{Cell, Table};

/// Shared handler for `machine`, `driver` and `counterparty`.
pub fn handle(kind: EntityKind, action: &EntityAction, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::from_config(cfg)?;

    match action {
        EntityAction::Add { name } => match RegistryLogic::add(&mut pool, kind, name)? {
            AddOutcome::Inserted(id) => {
                success(format!("Added {} '{}' (#{}).", kind.label(), name.trim(), id))
            }
            AddOutcome::AlreadyExists => warning(format!(
                "A {} named '{}' already exists; nothing added.",
                kind.label(),
                name.trim()
            )),
        },

        EntityAction::Del { id, yes } => {
            let Some(existing) = RegistryLogic::find(&pool, kind, *id)? else {
                info(format!("No {} #{}; nothing to delete.", kind.label(), id));
                return Ok(());
            };

            let consequence = match kind {
                EntityKind::Machine | EntityKind::Driver => " and ALL its records",
                EntityKind::Counterparty => " (its records are kept without a counterparty)",
            };
            let prompt = format!(
                "Delete {} '{}' (#{}){}? This action is irreversible.",
                kind.label(),
                existing.name,
                id,
                consequence
            );

            if !ask_confirmation(&prompt, *yes) {
                info("Operation cancelled.");
                return Ok(());
            }

            match RegistryLogic::delete(&mut pool, kind, *id)? {
                DeleteOutcome::Deleted => {
                    success(format!("Deleted {} '{}' (#{}).", kind.label(), existing.name, id))
                }
                DeleteOutcome::Missing => {
                    info(format!("No {} #{}; nothing to delete.", kind.label(), id))
                }
            }
        }

        EntityAction::List { json } => {
            let rows = RegistryLogic::list(&pool, kind)?;

            if *json {
                let out = serde_json::to_string_pretty(&rows)
                    .map_err(|e| AppError::Export(e.to_string()))?;
                println!("{out}");
                return Ok(());
            }

            if rows.is_empty() {
                info(format!("No {} entries yet.", kind.label()));
                return Ok(());
            }

            let mut table = Table::new(vec!["ID", "Name"]);
            for r in rows {
                table.add_row(vec![Cell::plain(r.id.to_string()), Cell::plain(r.name)]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
