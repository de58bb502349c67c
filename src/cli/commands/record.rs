use crate::cli::commands::ask_confirmation;
use crate::cli::parser::RecordAction;
use crate::config::Config;
use crate::core::record::RecordLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::entity::DeleteOutcome;
use crate::models::record::NewRecord;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::color_for_status;
use crate::utils::date::display_date;
use crate::utils::table::{Cell, Table};

pub fn handle(action: &RecordAction, cfg: &Config) -> AppResult<()> {
    let mut pool = DbPool::from_config(cfg)?;

    match action {
        RecordAction::Add {
            date,
            machine_id,
            driver_id,
            status,
            start,
            end,
            comment,
            counterparty_id,
        } => {
            let input = NewRecord {
                date: date.clone(),
                machine_id: *machine_id,
                driver_id: *driver_id,
                status: status.clone(),
                start_time: start.clone(),
                end_time: end.clone(),
                comment: comment.clone(),
                counterparty_id: *counterparty_id,
            };

            let added = RecordLogic::add(&mut pool, &input)?;

            if let Some(bad) = &added.malformed_time {
                warning(format!("Could not read time '{}': hours set to 0.", bad));
            }
            success(format!("Added record #{} ({}h).", added.id, added.hours));
        }

        RecordAction::Del { id, yes } => {
            let Some(existing) = RecordLogic::find(&pool, *id)? else {
                info(format!("No record #{}; nothing to delete.", id));
                return Ok(());
            };

            let prompt = format!(
                "Delete record #{} ({} {} / {})? This action is irreversible.",
                id,
                display_date(&existing.date),
                existing.machine,
                existing.driver
            );

            if !ask_confirmation(&prompt, *yes) {
                info("Operation cancelled.");
                return Ok(());
            }

            match RecordLogic::delete(&mut pool, *id)? {
                DeleteOutcome::Deleted => success(format!("Deleted record #{}.", id)),
                DeleteOutcome::Missing => info(format!("No record #{}; nothing to delete.", id)),
            }
        }

        RecordAction::List { json } => {
            let rows = RecordLogic::list(&pool)?;

            if *json {
                let out = serde_json::to_string_pretty(&rows)
                    .map_err(|e| AppError::Export(e.to_string()))?;
                println!("{out}");
                return Ok(());
            }

            if rows.is_empty() {
                info("No records yet.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                "ID",
                "Date",
                "Machine",
                "Driver",
                "Time",
                "Hours",
                "Counterparty",
                "Comment",
                "Status",
            ]);

            for r in &rows {
                table.add_row(vec![
                    Cell::plain(r.id.to_string()),
                    Cell::plain(display_date(&r.date)),
                    Cell::plain(r.machine.as_str()),
                    Cell::plain(r.driver.as_str()),
                    Cell::plain(r.time_span().unwrap_or_else(|| "-".into())),
                    Cell::plain(r.hours.to_string()),
                    Cell::plain(r.counterparty.as_deref().unwrap_or("-")),
                    Cell::plain(r.comment.as_deref().unwrap_or("-")),
                    Cell::colored(r.status.label(), color_for_status(r.status)),
                ]);
            }

            print!("{}", table.render());
        }
    }

    Ok(())
}
