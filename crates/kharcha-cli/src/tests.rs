//! CLI command tests

use std::io::Write;

use kharcha_core::db::Database;

use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

// ========== Expense Command Tests ==========

#[test]
fn test_cmd_add_and_list() {
    let db = setup_test_db();

    commands::cmd_add(&db, "local", 450.0, "Food", Some("Dinner")).unwrap();
    assert_eq!(db.count_expenses("local", None).unwrap(), 1);

    let result = commands::cmd_list(&db, "local", 20, None);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_add_rejects_invalid() {
    let db = setup_test_db();

    assert!(commands::cmd_add(&db, "local", -5.0, "Food", None).is_err());
    assert!(commands::cmd_add(&db, "local", 100.0, "X", None).is_err());
    assert_eq!(db.count_expenses("local", None).unwrap(), 0);
}

#[test]
fn test_cmd_delete() {
    let db = setup_test_db();

    commands::cmd_add(&db, "local", 100.0, "Food", None).unwrap();
    let id = db.list_expenses("local", None, 1, 0).unwrap()[0].id;

    commands::cmd_delete(&db, "local", id).unwrap();
    assert_eq!(db.count_expenses("local", None).unwrap(), 0);

    // Deleting again fails
    assert!(commands::cmd_delete(&db, "local", id).is_err());
}

#[test]
fn test_cmd_summary() {
    let db = setup_test_db();

    commands::cmd_add(&db, "local", 100.0, "Food", None).unwrap();
    commands::cmd_add(&db, "local", 700.0, "Transport", None).unwrap();

    assert!(commands::cmd_summary(&db, "local", None, None).is_ok());
    assert!(commands::cmd_summary(&db, "local", Some("not-a-date"), Some("2026-01-01")).is_err());
}

// ========== Scan Command Tests ==========

#[test]
fn test_cmd_scan_records_history() {
    let db = setup_test_db();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Cafe Day\nCoffee 180.00\nTotal: 212.40").unwrap();

    commands::cmd_scan(&db, "local", file.path()).unwrap();

    let scans = db.list_scans("local", 10).unwrap();
    assert_eq!(scans.len(), 1);
    assert_eq!(scans[0].amount, Some(212.40));
    assert_eq!(scans[0].confidence, 95);
}

#[test]
fn test_cmd_scan_missing_file() {
    let db = setup_test_db();
    let result = commands::cmd_scan(&db, "local", std::path::Path::new("/nonexistent/ocr.txt"));
    assert!(result.is_err());
}

// ========== Utilities ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a very long description", 10), "a very ...");
}
