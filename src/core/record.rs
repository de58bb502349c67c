use crate::core::calculator::hours::try_compute_hours;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{self, DateOrder, RecordInsert};
use crate::errors::{AppError, AppResult};
use crate::models::entity::{DeleteOutcome, EntityKind};
use crate::models::record::{AddedRecord, NewRecord, RecordRow};
use crate::models::status::Status;
use crate::utils::date::parse_date;
use crate::utils::time::non_blank;
use rusqlite::Connection;

pub struct RecordLogic;

impl RecordLogic {
    /// Validate and insert one usage record.
    ///
    /// Date, status and references are checked inside the same transaction as
    /// the insert, so a failure leaves nothing behind. A malformed start or end
    /// time does not reject the record: hours become 0 and the bad value is
    /// reported in `AddedRecord::malformed_time`.
    pub fn add(pool: &mut DbPool, input: &NewRecord) -> AppResult<AddedRecord> {
        let date = parse_date(&input.date)
            .ok_or_else(|| AppError::InvalidDate(format!("{} (expected YYYY-MM-DD)", input.date)))?;

        let status = Status::from_db_str(&input.status)
            .ok_or_else(|| AppError::InvalidStatus(input.status.clone()))?;

        let start_time = non_blank(input.start_time.as_deref());
        let end_time = non_blank(input.end_time.as_deref());
        let comment = non_blank(input.comment.as_deref());

        let (hours, malformed_time) = match try_compute_hours(start_time, end_time) {
            Ok(h) => (h.unwrap_or(0), None),
            Err(AppError::InvalidTime(t)) => (0, Some(t)),
            Err(e) => return Err(e),
        };

        pool.in_transaction(|tx| {
            ensure_exists(tx, EntityKind::Machine, input.machine_id)?;
            ensure_exists(tx, EntityKind::Driver, input.driver_id)?;
            if let Some(cp) = input.counterparty_id {
                ensure_exists(tx, EntityKind::Counterparty, cp)?;
            }

            let id = queries::insert_record(
                tx,
                &RecordInsert {
                    date,
                    machine_id: input.machine_id,
                    driver_id: input.driver_id,
                    status,
                    start_time,
                    end_time,
                    hours,
                    comment,
                    counterparty_id: input.counterparty_id,
                },
            )?;

            ttlog(
                tx,
                "add",
                "record",
                &format!(
                    "Added record #{} on {} (machine #{}, driver #{}, {}, {}h)",
                    id,
                    date,
                    input.machine_id,
                    input.driver_id,
                    status.to_db_str(),
                    hours
                ),
            )?;

            Ok(AddedRecord {
                id,
                hours,
                malformed_time,
            })
        })
    }

    pub fn delete(pool: &mut DbPool, id: i64) -> AppResult<DeleteOutcome> {
        pool.in_transaction(|tx| {
            let outcome = DeleteOutcome::from_affected(queries::delete_record(tx, id)?);
            if outcome == DeleteOutcome::Deleted {
                ttlog(tx, "del", "record", &format!("Deleted record #{}", id))?;
            }
            Ok(outcome)
        })
    }

    /// Most recent first.
    pub fn list(pool: &DbPool) -> AppResult<Vec<RecordRow>> {
        queries::load_records(&pool.conn, DateOrder::Descending)
    }

    pub fn find(pool: &DbPool, id: i64) -> AppResult<Option<RecordRow>> {
        queries::find_record(&pool.conn, id)
    }
}

fn ensure_exists(conn: &Connection, kind: EntityKind, id: i64) -> AppResult<()> {
    if queries::named_exists(conn, kind, id)? {
        Ok(())
    } else {
        Err(AppError::ReferenceNotFound {
            entity: kind.label(),
            id,
        })
    }
}
