use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_named, find_named, insert_named, list_named};
use crate::errors::{AppError, AppResult};
use crate::models::entity::{AddOutcome, DeleteOutcome, EntityKind, NamedEntity};

/// Machines, drivers and counterparties: add by name, delete by id, list.
///
/// Rows are never renamed; a typo is fixed by deleting and re-adding.
pub struct RegistryLogic;

impl RegistryLogic {
    pub fn add(pool: &mut DbPool, kind: EntityKind, name: &str) -> AppResult<AddOutcome> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation(format!("{} name is required", kind.label())));
        }

        pool.in_transaction(|tx| match insert_named(tx, kind, name)? {
            Some(id) => {
                ttlog(tx, "add", kind.label(), &format!("Added {} '{}' (#{})", kind.label(), name, id))?;
                Ok(AddOutcome::Inserted(id))
            }
            None => Ok(AddOutcome::AlreadyExists),
        })
    }

    /// Deleting a machine or driver also deletes its records; deleting a
    /// counterparty only detaches it from its records.
    pub fn delete(pool: &mut DbPool, kind: EntityKind, id: i64) -> AppResult<DeleteOutcome> {
        pool.in_transaction(|tx| {
            let outcome = DeleteOutcome::from_affected(delete_named(tx, kind, id)?);
            if outcome == DeleteOutcome::Deleted {
                ttlog(tx, "del", kind.label(), &format!("Deleted {} #{}", kind.label(), id))?;
            }
            Ok(outcome)
        })
    }

    pub fn list(pool: &DbPool, kind: EntityKind) -> AppResult<Vec<NamedEntity>> {
        list_named(&pool.conn, kind)
    }

    pub fn find(pool: &DbPool, kind: EntityKind, id: i64) -> AppResult<Option<NamedEntity>> {
        find_named(&pool.conn, kind, id)
    }

    pub fn find_machine(pool: &DbPool, id: i64) -> AppResult<Option<NamedEntity>> {
        Self::find(pool, EntityKind::Machine, id)
    }

    pub fn add_machine(pool: &mut DbPool, name: &str) -> AppResult<AddOutcome> {
        Self::add(pool, EntityKind::Machine, name)
    }

    pub fn add_driver(pool: &mut DbPool, name: &str) -> AppResult<AddOutcome> {
        Self::add(pool, EntityKind::Driver, name)
    }

    pub fn add_counterparty(pool: &mut DbPool, name: &str) -> AppResult<AddOutcome> {
        Self::add(pool, EntityKind::Counterparty, name)
    }

    pub fn delete_machine(pool: &mut DbPool, id: i64) -> AppResult<DeleteOutcome> {
        Self::delete(pool, EntityKind::Machine, id)
    }

    pub fn delete_driver(pool: &mut DbPool, id: i64) -> AppResult<DeleteOutcome> {
        Self::delete(pool, EntityKind::Driver, id)
    }

    pub fn delete_counterparty(pool: &mut DbPool, id: i64) -> AppResult<DeleteOutcome> {
        Self::delete(pool, EntityKind::Counterparty, id)
    }

    pub fn list_machines(pool: &DbPool) -> AppResult<Vec<NamedEntity>> {
        Self::list(pool, EntityKind::Machine)
    }

    pub fn list_drivers(pool: &DbPool) -> AppResult<Vec<NamedEntity>> {
        Self::list(pool, EntityKind::Driver)
    }

    pub fn list_counterparties(pool: &DbPool) -> AppResult<Vec<NamedEntity>> {
        Self::list(pool, EntityKind::Counterparty)
    }
}
