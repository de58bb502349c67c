mod common;
use common::{add_counterparty, add_driver, add_machine, open_pool, record, temp_out, timed};
use fleetlog::core::record::RecordLogic;
use fleetlog::export::logic::report_file_name;
use fleetlog::export::{ExportFormat, ExportLogic, REPORT_HEADERS, write_document};
use fleetlog::models::status::Status;
use regex::Regex;
use std::fs;
use std::io::{Cursor, Read};

fn seeded_pool(name: &str) -> fleetlog::db::pool::DbPool {
    let mut pool = open_pool(name);
    let m = add_machine(&mut pool, "Excavator-1");
    let d = add_driver(&mut pool, "Ivanov");
    let cp = add_counterparty(&mut pool, "StroyTrest");

    let mut rec = timed(record("2024-03-10", m, d, "work"), "08:00", "16:00");
    rec.counterparty_id = Some(cp);
    rec.comment = Some("Foundation pit".into());
    RecordLogic::add(&mut pool, &rec).unwrap();
    RecordLogic::add(&mut pool, &record("2024-03-01", m, d, "repair")).unwrap();
    RecordLogic::add(&mut pool, &record("2024-03-20", m, d, "stop")).unwrap();

    pool
}

fn zip_entry(content: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(content)).expect("valid xlsx archive");
    let mut file = archive.by_name(name).expect("entry present");
    let mut out = String::new();
    file.read_to_string(&mut out).expect("utf-8 entry");
    out
}

#[test]
fn test_rows_are_date_ascending_with_placeholders() {
    let pool = seeded_pool("export_rows");

    let doc = ExportLogic::export_report(&pool, ExportFormat::Xlsx).unwrap();

    let dates: Vec<&str> = doc.rows.iter().map(|r| r.date.as_str()).collect();
    assert_eq!(dates, vec!["01.03.2024", "10.03.2024", "20.03.2024"]);

    let repair = &doc.rows[0];
    assert_eq!(repair.status, Status::Repair);
    assert_eq!(repair.status_label, "Repair");
    assert_eq!(repair.start_time, "-");
    assert_eq!(repair.end_time, "-");
    assert_eq!(repair.counterparty, "-");
    assert_eq!(repair.comment, "-");
    assert_eq!(repair.hours, 0);

    let work = &doc.rows[1];
    assert_eq!(
        work.cells(),
        [
            "10.03.2024",
            "Excavator-1",
            "Ivanov",
            "Work",
            "08:00",
            "16:00",
            "8",
            "StroyTrest",
            "Foundation pit",
        ]
        .map(String::from)
    );
}

#[test]
fn test_export_is_rebuilt_from_storage_each_time() {
    let mut pool = seeded_pool("export_idempotent");

    let first = ExportLogic::export_report(&pool, ExportFormat::Csv).unwrap();
    let second = ExportLogic::export_report(&pool, ExportFormat::Csv).unwrap();
    assert_eq!(first.rows, second.rows);
    assert_eq!(first.content, second.content);

    let m = add_machine(&mut pool, "Crane-7");
    let d = add_driver(&mut pool, "Petrov");
    RecordLogic::add(&mut pool, &record("2024-03-05", m, d, "holiday")).unwrap();

    let third = ExportLogic::export_report(&pool, ExportFormat::Csv).unwrap();
    assert_eq!(third.rows.len(), 4);
    assert_eq!(third.rows[1].machine, "Crane-7");
}

#[test]
fn test_xlsx_workbook_layout() {
    let pool = seeded_pool("export_xlsx");

    let doc = ExportLogic::export_report(&pool, ExportFormat::Xlsx).unwrap();

    assert!(doc.content.starts_with(b"PK"));
    assert!(doc.file_name.ends_with(".xlsx"));

    let workbook = zip_entry(&doc.content, "xl/workbook.xml");
    assert!(workbook.contains("Equipment report"));

    let strings = zip_entry(&doc.content, "xl/sharedStrings.xml");
    for header in REPORT_HEADERS {
        assert!(strings.contains(header), "missing header {header}");
    }
    assert!(strings.contains("Excavator-1"));
    assert!(strings.contains("StroyTrest"));
}

#[test]
fn test_empty_storage_still_produces_a_workbook() {
    let pool = open_pool("export_empty");

    let doc = ExportLogic::export_report(&pool, ExportFormat::Xlsx).unwrap();
    assert!(doc.rows.is_empty());
    assert!(doc.content.starts_with(b"PK"));
}

#[test]
fn test_csv_and_json_content() {
    let pool = seeded_pool("export_csv_json");

    let csv = ExportLogic::export_report(&pool, ExportFormat::Csv).unwrap();
    let text = String::from_utf8(csv.content).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(REPORT_HEADERS.join(",").as_str()));
    assert_eq!(
        lines.next(),
        Some("01.03.2024,Excavator-1,Ivanov,Repair,-,-,0,-,-")
    );
    assert_eq!(text.lines().count(), 4);

    let json = ExportLogic::export_report(&pool, ExportFormat::Json).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&json.content).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[1]["Status"], "Work");
    assert_eq!(items[1]["Hours"], 8);
    assert_eq!(items[1]["Counterparty"], "StroyTrest");
    assert!(items[1].get("status").is_none());
}

#[test]
fn test_file_name_is_timestamped() {
    let pool = open_pool("export_file_name");

    let doc = ExportLogic::export_report(&pool, ExportFormat::Json).unwrap();
    let re = Regex::new(r"^report_\d{8}_\d{4}\.json$").unwrap();
    assert!(re.is_match(&doc.file_name), "{}", doc.file_name);
    assert_eq!(doc.file_name, report_file_name(&doc.generated_at, ExportFormat::Json));

    let at = chrono::NaiveDate::from_ymd_opt(2024, 3, 10)
        .unwrap()
        .and_hms_opt(9, 5, 0)
        .unwrap();
    assert_eq!(report_file_name(&at, ExportFormat::Xlsx), "report_20240310_0905.xlsx");
    assert_eq!(report_file_name(&at, ExportFormat::Csv), "report_20240310_0905.csv");
}

#[test]
fn test_mime_types() {
    assert_eq!(
        ExportFormat::Xlsx.mime_type(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
    assert_eq!(ExportFormat::Json.mime_type(), "application/json");
}

#[test]
fn test_write_document_with_force_overwrites() {
    let pool = seeded_pool("export_write");
    let out = temp_out("export_write", "json");
    fs::write(&out, "stale").unwrap();

    let doc = ExportLogic::export_report(&pool, ExportFormat::Json).unwrap();
    write_document(&doc, std::path::Path::new(&out), true).unwrap();

    assert_eq!(fs::read(&out).unwrap(), doc.content);
}
