#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use fleetlog::core::registry::RegistryLogic;
use fleetlog::db::initialize::init_db;
use fleetlog::db::pool::DbPool;
use fleetlog::models::entity::AddOutcome;
use fleetlog::models::record::NewRecord;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn flt() -> Command {
    let mut cmd = cargo_bin_cmd!("fleetlog");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_fleetlog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh database opened through the library, schema applied.
pub fn open_pool(name: &str) -> DbPool {
    let db_path = setup_test_db(name);
    let pool = DbPool::new(&db_path).expect("open db");
    init_db(&pool.conn).expect("init db");
    pool
}

pub fn inserted(outcome: AddOutcome) -> i64 {
    match outcome {
        AddOutcome::Inserted(id) => id,
        AddOutcome::AlreadyExists => panic!("expected a new row"),
    }
}

pub fn add_machine(pool: &mut DbPool, name: &str) -> i64 {
    inserted(RegistryLogic::add_machine(pool, name).expect("add machine"))
}

pub fn add_driver(pool: &mut DbPool, name: &str) -> i64 {
    inserted(RegistryLogic::add_driver(pool, name).expect("add driver"))
}

pub fn add_counterparty(pool: &mut DbPool, name: &str) -> i64 {
    inserted(RegistryLogic::add_counterparty(pool, name).expect("add counterparty"))
}

pub fn record(date: &str, machine_id: i64, driver_id: i64, status: &str) -> NewRecord {
    NewRecord {
        date: date.to_string(),
        machine_id,
        driver_id,
        status: status.to_string(),
        ..NewRecord::default()
    }
}

pub fn timed(mut rec: NewRecord, start: &str, end: &str) -> NewRecord {
    rec.start_time = Some(start.to_string());
    rec.end_time = Some(end.to_string());
    rec
}

/// Initialize a DB via the CLI with one machine, one driver and one counterparty.
pub fn init_db_with_registry(db_path: &str) {
    flt()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    for (kind, name) in [
        ("machine", "Excavator-1"),
        ("driver", "Ivanov"),
        ("counterparty", "StroyTrest"),
    ] {
        flt()
            .args(["--db", db_path, kind, "add", name])
            .assert()
            .success();
    }
}
