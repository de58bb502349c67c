mod common;
use common::{add_counterparty, add_driver, add_machine, open_pool, record, timed};
use fleetlog::core::record::RecordLogic;
use fleetlog::core::registry::RegistryLogic;
use fleetlog::db::pool::DbPool;
use fleetlog::errors::{AppError, ErrorKind};
use fleetlog::models::entity::DeleteOutcome;
use fleetlog::models::status::Status;
use rusqlite::Connection;
use std::time::Duration;

#[test]
fn test_every_valid_status_is_accepted() {
    let mut pool = open_pool("record_valid_statuses");
    let m = add_machine(&mut pool, "Excavator-1");
    let d = add_driver(&mut pool, "Ivanov");

    for status in Status::ALL {
        let added = RecordLogic::add(&mut pool, &record("2024-03-10", m, d, status.to_db_str()))
            .expect("valid status");
        assert_eq!(added.hours, 0);
    }

    let rows = RecordLogic::list(&pool).unwrap();
    assert_eq!(rows.len(), 4);
    let statuses: Vec<Status> = rows.iter().map(|r| r.status).collect();
    assert_eq!(statuses, Status::ALL.to_vec());
}

#[test]
fn test_invalid_status_is_rejected_and_nothing_written() {
    let mut pool = open_pool("record_invalid_status");
    let m = add_machine(&mut pool, "Excavator-1");
    let d = add_driver(&mut pool, "Ivanov");

    for bad in ["broken", "", "Work", " work", "HOLIDAY"] {
        let err = RecordLogic::add(&mut pool, &record("2024-03-10", m, d, bad)).unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus(_)), "{bad:?} gave {err:?}");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    assert!(RecordLogic::list(&pool).unwrap().is_empty());
}

#[test]
fn test_invalid_date_is_rejected() {
    let mut pool = open_pool("record_invalid_date");
    let m = add_machine(&mut pool, "Excavator-1");
    let d = add_driver(&mut pool, "Ivanov");

    for bad in ["", "2024-02-30", "10.03.2024"] {
        let err = RecordLogic::add(&mut pool, &record(bad, m, d, "work")).unwrap_err();
        assert!(matches!(err, AppError::InvalidDate(_)));
    }
    assert!(RecordLogic::list(&pool).unwrap().is_empty());
}

#[test]
fn test_missing_references_fail_atomically() {
    let mut pool = open_pool("record_missing_refs");
    let m = add_machine(&mut pool, "Excavator-1");
    let d = add_driver(&mut pool, "Ivanov");

    let err = RecordLogic::add(&mut pool, &record("2024-03-10", 999, d, "work")).unwrap_err();
    assert!(matches!(err, AppError::ReferenceNotFound { entity: "machine", id: 999 }));

    let err = RecordLogic::add(&mut pool, &record("2024-03-10", m, 999, "work")).unwrap_err();
    assert!(matches!(err, AppError::ReferenceNotFound { entity: "driver", id: 999 }));

    let mut with_cp = record("2024-03-10", m, d, "work");
    with_cp.counterparty_id = Some(999);
    let err = RecordLogic::add(&mut pool, &with_cp).unwrap_err();
    assert!(matches!(err, AppError::ReferenceNotFound { entity: "counterparty", .. }));
    assert_eq!(err.kind(), ErrorKind::Reference);

    assert!(RecordLogic::list(&pool).unwrap().is_empty());
}

#[test]
fn test_hours_are_derived_from_times() {
    let mut pool = open_pool("record_hours");
    let m = add_machine(&mut pool, "Excavator-1");
    let d = add_driver(&mut pool, "Ivanov");

    let added = RecordLogic::add(&mut pool, &timed(record("2024-03-10", m, d, "work"), "08:00", "16:00"))
        .unwrap();
    assert_eq!(added.hours, 8);
    assert!(added.malformed_time.is_none());

    let night = RecordLogic::add(&mut pool, &timed(record("2024-03-11", m, d, "work"), "22:00", "06:00"))
        .unwrap();
    assert_eq!(night.hours, 8);

    let rows = RecordLogic::list(&pool).unwrap();
    assert_eq!(rows.iter().map(|r| r.hours).collect::<Vec<_>>(), vec![8, 8]);
}

#[test]
fn test_malformed_time_degrades_to_zero_hours() {
    let mut pool = open_pool("record_malformed_time");
    let m = add_machine(&mut pool, "Excavator-1");
    let d = add_driver(&mut pool, "Ivanov");

    let added = RecordLogic::add(&mut pool, &timed(record("2024-03-10", m, d, "work"), "10:00", "invalid"))
        .expect("malformed time must not reject the record");

    assert_eq!(added.hours, 0);
    assert_eq!(added.malformed_time.as_deref(), Some("invalid"));
    assert_eq!(RecordLogic::list(&pool).unwrap().len(), 1);
}

#[test]
fn test_blank_optional_fields_are_stored_as_absent() {
    let mut pool = open_pool("record_blank_optionals");
    let m = add_machine(&mut pool, "Excavator-1");
    let d = add_driver(&mut pool, "Ivanov");

    let mut rec = timed(record("2024-03-10", m, d, "stop"), "", " ");
    rec.comment = Some("   ".into());
    RecordLogic::add(&mut pool, &rec).unwrap();

    let row = &RecordLogic::list(&pool).unwrap()[0];
    assert_eq!(row.start_time, None);
    assert_eq!(row.end_time, None);
    assert_eq!(row.comment, None);
    assert_eq!(row.counterparty, None);
    assert_eq!(row.time_span(), None);
}

#[test]
fn test_list_is_date_descending_with_insertion_ties() {
    let mut pool = open_pool("record_list_order");
    let m = add_machine(&mut pool, "Excavator-1");
    let d1 = add_driver(&mut pool, "Ivanov");
    let d2 = add_driver(&mut pool, "Petrov");

    RecordLogic::add(&mut pool, &record("2024-03-01", m, d1, "work")).unwrap();
    RecordLogic::add(&mut pool, &record("2024-03-15", m, d1, "work")).unwrap();
    RecordLogic::add(&mut pool, &record("2024-03-15", m, d2, "repair")).unwrap();
    RecordLogic::add(&mut pool, &record("2024-02-28", m, d2, "holiday")).unwrap();

    let rows = RecordLogic::list(&pool).unwrap();
    let keys: Vec<(String, String)> = rows
        .iter()
        .map(|r| (r.date.to_string(), r.driver.clone()))
        .collect();

    assert_eq!(
        keys,
        vec![
            ("2024-03-15".to_string(), "Ivanov".to_string()),
            ("2024-03-15".to_string(), "Petrov".to_string()),
            ("2024-03-01".to_string(), "Ivanov".to_string()),
            ("2024-02-28".to_string(), "Petrov".to_string()),
        ]
    );
}

#[test]
fn test_deleting_machine_cascades_to_records() {
    let mut pool = open_pool("record_cascade_machine");
    let m1 = add_machine(&mut pool, "Excavator-1");
    let m2 = add_machine(&mut pool, "Crane-7");
    let d = add_driver(&mut pool, "Ivanov");

    RecordLogic::add(&mut pool, &record("2024-03-10", m1, d, "work")).unwrap();
    RecordLogic::add(&mut pool, &record("2024-03-11", m1, d, "stop")).unwrap();
    RecordLogic::add(&mut pool, &record("2024-03-12", m2, d, "work")).unwrap();

    RegistryLogic::delete_machine(&mut pool, m1).unwrap();

    let rows = RecordLogic::list(&pool).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].machine, "Crane-7");
}

#[test]
fn test_deleting_driver_cascades_to_records() {
    let mut pool = open_pool("record_cascade_driver");
    let m = add_machine(&mut pool, "Excavator-1");
    let d = add_driver(&mut pool, "Ivanov");

    RecordLogic::add(&mut pool, &record("2024-03-10", m, d, "work")).unwrap();
    RegistryLogic::delete_driver(&mut pool, d).unwrap();

    assert!(RecordLogic::list(&pool).unwrap().is_empty());
    assert_eq!(RegistryLogic::list_machines(&pool).unwrap().len(), 1);
}

#[test]
fn test_deleting_counterparty_keeps_records() {
    let mut pool = open_pool("record_setnull_counterparty");
    let m = add_machine(&mut pool, "Excavator-1");
    let d = add_driver(&mut pool, "Ivanov");
    let cp = add_counterparty(&mut pool, "StroyTrest");

    let mut rec = record("2024-03-10", m, d, "work");
    rec.counterparty_id = Some(cp);
    rec.comment = Some("Foundation pit".into());
    RecordLogic::add(&mut pool, &rec).unwrap();

    assert_eq!(
        RecordLogic::list(&pool).unwrap()[0].counterparty.as_deref(),
        Some("StroyTrest")
    );

    RegistryLogic::delete_counterparty(&mut pool, cp).unwrap();

    let rows = RecordLogic::list(&pool).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].counterparty, None);
    assert_eq!(rows[0].comment.as_deref(), Some("Foundation pit"));
}

#[test]
fn test_delete_record() {
    let mut pool = open_pool("record_delete");
    let m = add_machine(&mut pool, "Excavator-1");
    let d = add_driver(&mut pool, "Ivanov");

    let added = RecordLogic::add(&mut pool, &record("2024-03-10", m, d, "work")).unwrap();

    assert_eq!(RecordLogic::delete(&mut pool, added.id).unwrap(), DeleteOutcome::Deleted);
    assert_eq!(RecordLogic::delete(&mut pool, added.id).unwrap(), DeleteOutcome::Missing);
    assert!(RecordLogic::find(&pool, added.id).unwrap().is_none());
}

#[test]
fn test_storage_rejects_bad_status_even_without_core_checks() {
    let mut pool = open_pool("record_check_constraint");
    let m = add_machine(&mut pool, "Excavator-1");
    let d = add_driver(&mut pool, "Ivanov");

    let raw = pool.conn.execute(
        "INSERT INTO records (date, machine_id, driver_id, status) VALUES ('2024-03-10', ?1, ?2, 'party')",
        [m, d],
    );
    let err = AppError::from(raw.unwrap_err());
    assert_eq!(err.kind(), ErrorKind::Validation);

    let raw = pool.conn.execute(
        "INSERT INTO records (date, machine_id, driver_id, status) VALUES ('2024-03-10', 777, ?1, 'work')",
        [d],
    );
    let err = AppError::from(raw.unwrap_err());
    assert_eq!(err.kind(), ErrorKind::Reference);
}

#[test]
fn test_locked_storage_is_transient_and_writes_nothing() {
    let mut seed = open_pool("record_locked_storage");
    let m = add_machine(&mut seed, "Excavator-1");
    let d = add_driver(&mut seed, "Ivanov");
    let db_path = seed.path().to_string();
    drop(seed);

    let blocker = Connection::open(&db_path).unwrap();
    blocker.execute_batch("BEGIN IMMEDIATE;").unwrap();

    let mut pool = DbPool::with_timeout(&db_path, Duration::from_millis(200)).unwrap();

    let err = RegistryLogic::add_machine(&mut pool, "Crane-7").unwrap_err();
    assert!(matches!(err, AppError::StorageUnavailable(_)), "{err:?}");
    assert_eq!(err.kind(), ErrorKind::Unavailable);
    assert!(err.is_transient());
    assert_eq!(err.user_message(), "Storage is busy, please try again.");

    let err = RecordLogic::add(&mut pool, &timed(record("2024-03-10", m, d, "work"), "08:00", "16:00"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unavailable);
    assert!(err.is_transient());

    blocker.execute_batch("ROLLBACK;").unwrap();

    assert!(RecordLogic::list(&pool).unwrap().is_empty());
    assert_eq!(RegistryLogic::list_machines(&pool).unwrap().len(), 1);
}
