mod common;
use common::{dl, init_db_with_data, setup_test_db, temp_out};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use std::fs;

#[test]
fn test_export_sessions_csv_all() {
    let db_path = setup_test_db("export_sessions_csv_all");
    init_db_with_data(&db_path);

    let out = temp_out("export_sessions_csv_all", "csv");

    dl().args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let content = fs::read_to_string(&out).expect("read exported csv");
    let mut lines = content.lines();
    let header = lines.next().expect("csv header");
    assert!(header.starts_with("id,date,start_time,end_time"));
    assert!(header.contains("net"));
    assert_eq!(lines.count(), 3);
    assert!(content.contains("2025-09-01,10:00,12:00,90,120,2,13.0,5.0,8.0,cli"));
}

#[test]
fn test_export_deliveries_json_period() {
    let db_path = setup_test_db("export_deliveries_json_period");
    init_db_with_data(&db_path);

    let out = temp_out("export_deliveries_json_period", "json");

    dl().args([
        "--db", &db_path, "export", "--format", "json", "--file", &out, "--what", "deliveries",
        "--period", "2025-09-01",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&out).expect("read exported json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    let rows = rows.as_array().expect("json array");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["restaurant"], "McDonald's");
    assert_eq!(rows[0]["merchant_type"], "Fast Food");
    assert_eq!(rows[0]["total"].as_f64(), Some(6.0));
    assert_eq!(rows[1]["merchant_type"], "Grocery");
}

#[test]
fn test_export_merchants_and_weekly() {
    let db_path = setup_test_db("export_merchants_weekly");
    init_db_with_data(&db_path);

    let merchants = temp_out("export_merchants", "csv");
    dl().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &merchants, "--what",
        "merchants",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&merchants).expect("read merchants csv");
    assert!(content.starts_with("name,merchant_type,deliveries_count"));
    assert!(content.contains("McDonald's,Fast Food,2,7.0,2.0,9.0,4.5,2"));

    let weekly = temp_out("export_weekly", "json");
    dl().args([
        "--db", &db_path, "export", "--format", "json", "--file", &weekly, "--what", "weekly",
    ])
    .assert()
    .success();

    let content = fs::read_to_string(&weekly).expect("read weekly json");
    let rows: serde_json::Value = serde_json::from_str(&content).expect("valid json");
    assert_eq!(rows[0]["week_number"], 36);
    assert_eq!(rows[0]["start_date"], "2025-09-01");
    assert_eq!(rows[0]["time_efficiency_pct"], 75);
    assert_eq!(rows[1]["week_id"], 2);
}

#[test]
fn test_export_empty_period_writes_nothing() {
    let db_path = setup_test_db("export_empty_period");
    init_db_with_data(&db_path);

    let out = temp_out("export_empty_period", "csv");

    dl().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out, "--period", "2020",
    ])
    .assert()
    .success()
    .stdout(contains("No sessions found"));

    assert!(!std::path::Path::new(&out).exists());
}

#[test]
fn test_export_existing_file_needs_confirmation() {
    let db_path = setup_test_db("export_existing_file");
    init_db_with_data(&db_path);

    let out = temp_out("export_existing_file", "csv");
    fs::write(&out, "keep me").expect("seed output file");

    dl().args(["--db", &db_path, "export", "--format", "csv", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).expect("read"), "keep me");

    dl().args([
        "--db", &db_path, "export", "--format", "csv", "--file", &out, "--force",
    ])
    .assert()
    .success();
    assert!(fs::read_to_string(&out).expect("read").contains("2025-09-15"));
}

#[test]
fn test_export_requires_absolute_path() {
    let db_path = setup_test_db("export_relative_path");
    init_db_with_data(&db_path);

    dl().args([
        "--db",
        &db_path,
        "export",
        "--format",
        "csv",
        "--file",
        "relative_out.csv",
    ])
    .assert()
    .failure()
    .stderr(contains("must be absolute"));
}

#[test]
fn test_import_json_file() {
    let db_path = setup_test_db("import_json_file");
    dl().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let input = temp_out("import_json_file", "json");
    fs::write(
        &input,
        r#"{"sessions": [
            {"date": "2024-01-01", "active_time_minutes": 90, "dash_time_minutes": 120,
             "deliveries_count": 1,
             "deliveries": [{"restaurant": "McDonald's", "doordash_pay": 4, "tip": 2, "total": 6}]},
            {"date": "2024-01-02", "deliveries_count": 1,
             "deliveries": [{"restaurant": "Kroger", "doordash_pay": "$6.00", "tip": "$1.00"}]},
            {"date": "2024-01-03", "deliveries_count": 4, "deliveries": []},
            {"date": "2024-01-04", "challenge_bonus": 50}
        ]}"#,
    )
    .expect("write import file");

    dl().args(["--db", &db_path, "import", "--file", &input])
        .assert()
        .success()
        .stdout(contains("Imported 2 session(s)"))
        .stdout(contains("Skipped 1 malformed record(s)"))
        .stdout(contains("challenge-bonus"));

    dl().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("2024-01-01"))
        .stdout(contains("2024-01-02"))
        .stdout(contains("2024-01-03").not());

    dl().args(["--db", &db_path, "locations"])
        .assert()
        .success()
        .stdout(contains("Kroger"));

    dl().args(["--db", &db_path, "import", "--file", "/nonexistent/dashlogger.json"])
        .assert()
        .failure();
}
