use crate::core::registry::RegistryLogic;
use crate::db::pool::DbPool;
use crate::db::queries::load_machine_entries;
use crate::errors::{AppError, AppResult};
use crate::models::calendar::{CalendarDay, DayEntry, MonthView};
use crate::utils::date::all_days_of_month;
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub struct CalendarLogic;

impl CalendarLogic {
    /// One entry per day of `year`-`month` for the given machine.
    ///
    /// Days without records are present with an empty entry list.
    pub fn build_month_view(
        pool: &DbPool,
        machine_id: i64,
        year: i32,
        month: u32,
    ) -> AppResult<MonthView> {
        let days = all_days_of_month(year, month)?;

        let machine = RegistryLogic::find_machine(pool, machine_id)?.ok_or(
            AppError::NotFound {
                entity: "machine",
                id: machine_id,
            },
        )?;

        let (Some(first), Some(last)) = (days.first().copied(), days.last().copied()) else {
            return Err(AppError::InvalidDate(format!("{year:04}-{month:02}")));
        };

        let mut by_date: BTreeMap<NaiveDate, Vec<DayEntry>> = BTreeMap::new();
        for (date, entry) in load_machine_entries(&pool.conn, machine_id, first, last)? {
            by_date.entry(date).or_default().push(entry);
        }

        let days = days
            .into_iter()
            .map(|date| CalendarDay {
                date,
                entries: by_date.remove(&date).unwrap_or_default(),
            })
            .collect();

        Ok(MonthView {
            machine,
            year,
            month,
            days,
        })
    }
}
