use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::calendar::CalendarLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::calendar::{DayEntry, MonthView};
use crate::ui::messages::header;
use crate::utils::colors::{RESET, color_for_status, colorize_optional};
use crate::utils::date::{parse_year_month, today};
use chrono::Datelike;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Calendar {
        machine_id,
        month,
        json,
    } = cmd
    {
        let (year, month) = match month {
            Some(m) => parse_year_month(m)?,
            None => {
                let t = today();
                (t.year(), t.month())
            }
        };

        let pool = DbPool::from_config(cfg)?;
        let view = CalendarLogic::build_month_view(&pool, *machine_id, year, month)?;

        if *json {
            let out = serde_json::to_string_pretty(&view)
                .map_err(|e| AppError::Export(e.to_string()))?;
            println!("{out}");
        } else {
            print_month(&view);
        }
    }

    Ok(())
}

fn print_month(view: &MonthView) {
    let title = view
        .days
        .first()
        .map(|d| d.date.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{:04}-{:02}", view.year, view.month));

    header(format!("{} - {}", view.machine.name, title));

    for day in &view.days {
        println!("{} {}", day.date.format("%d.%m"), day.date.format("%a"));

        if day.entries.is_empty() {
            println!("    {}", colorize_optional(None));
            continue;
        }

        for e in &day.entries {
            println!("    {}", describe_entry(e));
        }
    }

    println!("\n{} record(s) this month.", view.record_count());
}

fn describe_entry(e: &DayEntry) -> String {
    let mut line = format!(
        "{}{}{} - {}",
        color_for_status(e.status),
        e.status.label(),
        RESET,
        e.driver
    );

    if let (Some(s), Some(end)) = (&e.start_time, &e.end_time) {
        line.push_str(&format!(" {}-{}", s, end));
    }
    if let Some(cp) = &e.counterparty {
        line.push_str(&format!(" [{}]", cp));
    }

    line
}
