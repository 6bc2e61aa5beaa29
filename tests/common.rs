#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use dashlogger::models::delivery::Delivery;
use dashlogger::models::session::Session;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn dl() -> Command {
    cargo_bin_cmd!("dashlogger")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_dashlogger.sqlite", name));
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

/// Initialize DB and add a small dataset useful for many tests:
///
/// | date       | dash | active | gas | deliveries                         |
/// |------------|------|--------|-----|------------------------------------|
/// | 2025-09-01 | 120  | 90     | 5   | McDonald's 4+2, Kroger 6+1         |
/// | 2025-09-03 | 60   | 45     | -   | Target 5+1, McDonald's 3           |
/// | 2025-09-15 | 60   | 30     | -   | Olive Garden 8+4                   |
///
/// Earnings 34.00, gas 5.00, 5 deliveries, two ISO weeks.
pub fn init_db_with_data(db_path: &str) {
    dl().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    dl().args([
        "--db",
        db_path,
        "add",
        "2025-09-01",
        "--start",
        "10:00",
        "--end",
        "12:00",
        "--active",
        "90",
        "--gas",
        "5",
        "--delivery",
        "McDonald's=4+2",
        "--delivery",
        "Kroger=6+1",
    ])
    .assert()
    .success();

    dl().args([
        "--db",
        db_path,
        "add",
        "2025-09-03",
        "--dash",
        "60",
        "--active",
        "45",
        "--delivery",
        "Target=5+1",
        "--delivery",
        "McDonald's=3",
    ])
    .assert()
    .success();

    dl().args([
        "--db",
        db_path,
        "add",
        "2025-09-15",
        "--dash",
        "60",
        "--active",
        "30",
        "--delivery",
        "Olive Garden=8+4",
    ])
    .assert()
    .success();
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// In-memory session with `(merchant, base, tip)` deliveries.
pub fn session(day: &str, deliveries: &[(&str, f64, f64)]) -> Session {
    Session::new(
        date(day),
        deliveries
            .iter()
            .map(|(name, base, tip)| Delivery::new(*name, *base, *tip))
            .collect(),
    )
}
