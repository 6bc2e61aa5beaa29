use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{dl, init_db_with_data, setup_test_db};

#[test]
fn test_init_creates_schema() {
    let db_path = setup_test_db("init_creates_schema");

    dl().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    // second run applies nothing new
    dl().args(["--db", &db_path, "db", "--migrate"])
        .assert()
        .success()
        .stdout(contains("already up to date"));
}

#[test]
fn test_add_and_list_sessions() {
    let db_path = setup_test_db("add_and_list");
    init_db_with_data(&db_path);

    dl().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("2025-09-01"))
        .stdout(contains("2025-09-03"))
        .stdout(contains("2025-09-15"))
        .stdout(contains("$13.00"));
}

#[test]
fn test_list_period_filter() {
    let db_path = setup_test_db("list_period_filter");
    init_db_with_data(&db_path);

    dl().args(["--db", &db_path, "list", "--period", "2025-09-01:2025-09-07"])
        .assert()
        .success()
        .stdout(contains("2025-09-01"))
        .stdout(contains("2025-09-03"))
        .stdout(contains("2025-09-15").not());

    dl().args(["--db", &db_path, "list", "--period", "2024"])
        .assert()
        .success()
        .stdout(contains("No sessions found"));
}

#[test]
fn test_list_details_shows_merchant_types() {
    let db_path = setup_test_db("list_details");
    init_db_with_data(&db_path);

    dl().args(["--db", &db_path, "list", "--details"])
        .assert()
        .success()
        .stdout(contains("McDonald's"))
        .stdout(contains("Fast Food"))
        .stdout(contains("Grocery"));
}

#[test]
fn test_add_rejects_bad_input() {
    let db_path = setup_test_db("add_bad_input");
    dl().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    dl().args(["--db", &db_path, "add", "2025-13-01"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));

    dl().args(["--db", &db_path, "add", "2025-09-01", "--delivery", "Kroger"])
        .assert()
        .failure()
        .stderr(contains("Invalid delivery"));

    dl().args([
        "--db",
        &db_path,
        "add",
        "2025-09-01",
        "--delivery",
        "Kroger=-6",
    ])
    .assert()
    .failure()
    .stderr(contains("Invalid amount"));

    dl().args(["--db", &db_path, "add", "2025-09-01", "--start", "25:00"])
        .assert()
        .failure()
        .stderr(contains("Invalid time"));
}

#[test]
fn test_summary_totals_include_bonus_once() {
    let db_path = setup_test_db("summary_totals");
    init_db_with_data(&db_path);

    // 34.00 earned + 50.00 bonus, 5.00 gas
    dl().args(["--db", &db_path, "summary"])
        .assert()
        .success()
        .stdout(contains("Summary (All Time)"))
        .stdout(contains("$84.00"))
        .stdout(contains("$79.00"))
        .stdout(contains("Deliveries Made"))
        .stdout(contains("69%"))
        .stdout(contains("Top Delivery Locations"))
        .stdout(contains("McDonald's"));
}

#[test]
fn test_summary_week_selection() {
    let db_path = setup_test_db("summary_week");
    init_db_with_data(&db_path);

    dl().args(["--db", &db_path, "summary", "--week"])
        .assert()
        .success()
        .stdout(contains("Week 38"));

    dl().args(["--db", &db_path, "summary", "--week", "1"])
        .assert()
        .success()
        .stdout(contains("Week 36"))
        .stdout(contains("2025-09-07"));

    dl().args(["--db", &db_path, "summary", "--week", "7"])
        .assert()
        .success()
        .stdout(contains("No such week"));
}

#[test]
fn test_weekly_rollups() {
    let db_path = setup_test_db("weekly_rollups");
    init_db_with_data(&db_path);

    dl().args(["--db", &db_path, "weekly"])
        .assert()
        .success()
        .stdout(contains("Weekly Summary"))
        .stdout(contains("2025-09-01"))
        .stdout(contains("2025-09-07"))
        .stdout(contains("2025-09-15"))
        .stdout(contains("$22.00"));
}

#[test]
fn test_merchants_ranking() {
    let db_path = setup_test_db("merchants_ranking");
    init_db_with_data(&db_path);

    dl().args(["--db", &db_path, "merchants"])
        .assert()
        .success()
        .stdout(contains("Most frequent"))
        .stdout(contains("McDonald's"))
        .stdout(contains("Olive Garden"))
        .stdout(contains("Shopping"));

    dl().args([
        "--db", &db_path, "merchants", "--sort", "earnings", "--type", "restaurant", "--top",
        "1",
    ])
    .assert()
    .success()
    .stdout(contains("$12.00"));

    dl().args(["--db", &db_path, "merchants", "--search", "nothing-like-this"])
        .assert()
        .success()
        .stdout(contains("No merchants match"));

    dl().args(["--db", &db_path, "merchants", "--sort", "rating"])
        .assert()
        .failure()
        .stderr(contains("Invalid sort field"));

    dl().args(["--db", &db_path, "merchants", "--type", "bakery"])
        .assert()
        .failure()
        .stderr(contains("Invalid merchant type"));
}

#[test]
fn test_locations_from_store() {
    let db_path = setup_test_db("locations_store");
    init_db_with_data(&db_path);

    dl().args(["--db", &db_path, "locations", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("McDonald's"))
        .stdout(contains("Kroger").not());
}

#[test]
fn test_series_json() {
    let db_path = setup_test_db("series_json");
    init_db_with_data(&db_path);

    let out = dl()
        .args(["--db", &db_path, "series", "--json"])
        .output()
        .expect("run series");
    assert!(out.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("series output is JSON");
    let earnings = value["earnings"].as_array().expect("earnings array");
    assert_eq!(earnings.len(), 3);
    assert_eq!(earnings[2]["value"].as_f64(), Some(34.0));
    assert_eq!(value["deliveries"][2]["value"].as_f64(), Some(5.0));

    // 3 points, 2 inserted between each pair
    let out = dl()
        .args(["--db", &db_path, "series", "--json", "--interpolate", "2"])
        .output()
        .expect("run series");
    let value: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("series output is JSON");
    assert_eq!(value["dash_time"].as_array().map(Vec::len), Some(7));

    dl().args(["--db", &db_path, "series", "--range", "1y"])
        .assert()
        .failure()
        .stderr(contains("Invalid time range"));
}

#[test]
fn test_series_table() {
    let db_path = setup_test_db("series_table");
    init_db_with_data(&db_path);

    dl().args(["--db", &db_path, "series", "--max-points", "2"])
        .assert()
        .success()
        .stdout(contains("Cumulative Series"))
        .stdout(contains("2025-09-01"))
        .stdout(contains("2025-09-15"))
        .stdout(contains("2025-09-03").not());
}

#[test]
fn test_delete_session() {
    let db_path = setup_test_db("delete_session");
    init_db_with_data(&db_path);

    dl().args(["--db", &db_path, "del", "3"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Operation cancelled"));

    dl().args(["--db", &db_path, "del", "3"])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains("has been deleted"));

    dl().args(["--db", &db_path, "list"])
        .assert()
        .success()
        .stdout(contains("2025-09-15").not());

    dl().args(["--db", &db_path, "del", "3", "--yes"])
        .assert()
        .failure()
        .stderr(contains("Session not found"));
}

#[test]
fn test_internal_log() {
    let db_path = setup_test_db("internal_log");
    init_db_with_data(&db_path);

    dl().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("Internal log"))
        .stdout(contains("migration_applied"))
        .stdout(contains("init"))
        .stdout(contains("Session #1 on 2025-09-01"));
}

#[test]
fn test_db_info_and_check() {
    let db_path = setup_test_db("db_info_check");
    init_db_with_data(&db_path);

    dl().args(["--db", &db_path, "db", "--info", "--check", "--vacuum"])
        .assert()
        .success()
        .stdout(contains("Total sessions"))
        .stdout(contains("Total deliveries"))
        .stdout(contains("Integrity check passed"))
        .stdout(contains("Vacuum completed"));
}

#[test]
fn test_config_print() {
    let db_path = setup_test_db("config_print");

    dl().args(["--db", &db_path, "config", "--print"])
        .assert()
        .success()
        .stdout(contains("challenge_bonus"))
        .stdout(contains("max_chart_points"))
        .stdout(contains(db_path.as_str()));
}

#[test]
fn test_config_edit_reports_missing_editor() {
    let db_path = setup_test_db("config_edit");

    dl().args([
        "--db",
        &db_path,
        "config",
        "--edit",
        "--editor",
        "dashlogger-no-such-editor",
    ])
    .assert()
    .failure()
    .stderr(contains("could not run editor 'dashlogger-no-such-editor'"));
}

#[test]
fn test_series_rejects_out_of_range_interpolation() {
    let db_path = setup_test_db("series_interp_range");
    init_db_with_data(&db_path);

    dl().args(["--db", &db_path, "series", "--interpolate", "101"])
        .assert()
        .failure();

    dl().args(["--db", &db_path, "series", "--interpolate", "100", "--json"])
        .assert()
        .success();
}
