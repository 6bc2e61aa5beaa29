mod common;
use common::{date, session, setup_test_db};

use dashlogger::core::add::{AddLogic, NewSession, parse_amount, parse_delivery};
use dashlogger::core::import::parse_records;
use dashlogger::core::logic::Core;
use dashlogger::core::provider::{LocationProvider, SessionProvider};
use dashlogger::db::initialize::{init_db, open_initialized};
use dashlogger::db::queries::{
    delete_session, insert_session, insert_sessions, load_session, load_sessions,
};
use dashlogger::errors::AppError;
use dashlogger::utils::date::parse_period;
use rusqlite::Connection;

fn sample_sessions() -> Vec<dashlogger::models::session::Session> {
    vec![
        session("2025-05-02", &[("Aldi", 5.0, 1.0), ("Sonic", 3.0, 0.0)])
            .with_minutes(Some(40), Some(60))
            .with_gas(Some(2.5)),
        session("2025-05-01", &[("Sonic", 4.0, 2.0)]),
        session("2025-05-03", &[("Aldi", 6.0, 0.0), ("KFC", 2.0, 2.0), ("Sonic", 1.0, 0.0)]),
    ]
}

#[test]
fn test_migrations_are_idempotent() {
    let db_path = setup_test_db("store_migrations");
    let conn = Connection::open(&db_path).expect("open db");

    let first = init_db(&conn).expect("first init");
    let second = init_db(&conn).expect("second init");

    assert_eq!(first, 3);
    assert_eq!(second, 0);

    let applied: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |row| row.get(0),
        )
        .expect("count log rows");
    assert_eq!(applied, 3);
}

#[test]
fn test_insert_and_load_round_trip_keeps_order() {
    let db_path = setup_test_db("store_round_trip");
    let mut pool = open_initialized(&db_path).expect("open db");

    for s in sample_sessions() {
        insert_session(&mut pool.conn, &s).expect("insert");
    }

    let loaded = load_sessions(&pool.conn).expect("load");
    let dates: Vec<_> = loaded.iter().map(|s| s.date).collect();
    assert_eq!(
        dates,
        vec![date("2025-05-01"), date("2025-05-02"), date("2025-05-03")]
    );

    let third = &loaded[2];
    let names: Vec<&str> = third.deliveries.iter().map(|d| d.restaurant.as_str()).collect();
    assert_eq!(names, vec!["Aldi", "KFC", "Sonic"]);
    assert_eq!(third.deliveries_count(), 3);
    assert_eq!(loaded[1].gas_cost, Some(2.5));
    assert_eq!(loaded[1].active_time_minutes, Some(40));
    assert_eq!(loaded[0].dash_time_minutes, None);
}

#[test]
fn test_db_and_memory_providers_agree() {
    let db_path = setup_test_db("store_providers");
    let mut pool = open_initialized(&db_path).expect("open db");

    let mut memory = sample_sessions();
    for s in &memory {
        insert_session(&mut pool.conn, s).expect("insert");
    }

    let from_db = pool.top_locations(3).expect("db locations");
    // the in-memory provider sees sessions in date order, like the store
    memory.sort_by_key(|s| s.date);
    let from_memory = memory.top_locations(3).expect("memory locations");

    assert_eq!(from_db, from_memory);
    assert_eq!(from_db[0].name, "Sonic");
    assert_eq!(from_db[0].count, 3);
    assert_eq!(from_db[1].name, "Aldi");

    let snap_db = Core::snapshot(&mut pool).expect("db snapshot");
    let snap_mem = Core::snapshot(&mut memory).expect("memory snapshot");
    assert_eq!(snap_db.len(), snap_mem.len());
    assert_eq!(
        snap_db.iter().map(|s| s.earnings()).sum::<f64>(),
        snap_mem.iter().map(|s| s.earnings()).sum::<f64>()
    );
    assert_eq!(memory.list_sessions().expect("list").len(), 3);
}

#[test]
fn test_delete_removes_deliveries() {
    let db_path = setup_test_db("store_delete");
    let mut pool = open_initialized(&db_path).expect("open db");

    let id = insert_session(&mut pool.conn, &sample_sessions()[0]).expect("insert");
    assert!(delete_session(&mut pool.conn, id).expect("delete"));
    assert!(!delete_session(&mut pool.conn, id).expect("delete again"));

    let orphans: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM deliveries WHERE session_id = ?1",
            [id],
            |row| row.get(0),
        )
        .expect("count deliveries");
    assert_eq!(orphans, 0);

    assert!(matches!(
        load_session(&pool.conn, id),
        Err(AppError::SessionNotFound(_))
    ));
}

#[test]
fn test_add_logic_fills_dash_from_shift() {
    let input = NewSession {
        date: Some(date("2025-06-01")),
        start: chrono::NaiveTime::from_hms_opt(22, 30, 0),
        end: chrono::NaiveTime::from_hms_opt(1, 0, 0),
        active: Some(100),
        ..NewSession::default()
    };

    let s = AddLogic::build(input).expect("valid session");
    // wraps past midnight
    assert_eq!(s.dash_time_minutes, Some(150));

    let bad = NewSession {
        date: Some(date("2025-06-01")),
        active: Some(-5),
        ..NewSession::default()
    };
    assert!(AddLogic::build(bad).is_err());
    assert!(AddLogic::build(NewSession::default()).is_err());
}

#[test]
fn test_parse_amount_and_delivery() {
    assert_eq!(parse_amount("$1,204.10").ok(), Some(1204.10));
    assert_eq!(parse_amount(" 4 ").ok(), Some(4.0));
    assert!(parse_amount("-3").is_err());
    assert!(parse_amount("abc").is_err());
    assert!(parse_amount("inf").is_err());

    let d = parse_delivery("Kroger=6.00+1.50").expect("valid delivery");
    assert_eq!(d.restaurant, "Kroger");
    assert_eq!(d.total(), 7.5);

    // the last '=' splits name from amounts
    let d = parse_delivery("A=B Diner=5").expect("valid delivery");
    assert_eq!(d.restaurant, "A=B Diner");
    assert_eq!(d.tip, 0.0);

    assert!(parse_delivery("Kroger").is_err());
    assert!(parse_delivery("=5+1").is_err());
}

#[test]
fn test_parse_period_forms() {
    assert_eq!(parse_period(None).ok(), Some(None));
    assert_eq!(parse_period(Some("all")).ok(), Some(None));

    let (from, to) = parse_period(Some("2024-02"))
        .ok()
        .flatten()
        .expect("month bounds");
    assert_eq!(from, date("2024-02-01"));
    assert_eq!(to, date("2024-02-29"));

    let (_, to) = parse_period(Some("2023-02")).ok().flatten().expect("month bounds");
    assert_eq!(to, date("2023-02-28"));
    let (_, to) = parse_period(Some("2025-12")).ok().flatten().expect("december");
    assert_eq!(to, date("2025-12-31"));
    assert!(parse_period(Some("2025-13")).is_err());

    let (from, to) = parse_period(Some("2024:2025"))
        .ok()
        .flatten()
        .expect("year range");
    assert_eq!(from, date("2024-01-01"));
    assert_eq!(to, date("2025-12-31"));

    assert!(parse_period(Some("2025-03-01:2025-02-01")).is_err());
    assert!(parse_period(Some("2025:2025-02")).is_err());
    assert!(parse_period(Some("yesterday")).is_err());
}

#[test]
fn test_parse_import_records() {
    let json = r#"{
        "sessions": [
            {
                "date": "2024-01-01",
                "start_time": "17:00",
                "end_time": "19:00",
                "active_time_minutes": 90,
                "dash_time_minutes": "120",
                "deliveries_count": 2,
                "deliveries": [
                    {"restaurant": "McDonald's", "doordash_pay": "$4.00", "tip": 2, "total": 999},
                    {"restaurant": "Kroger", "doordash_pay": 6, "tip": "1.00"}
                ]
            },
            {"date": "2024-01-02", "deliveries_count": 3, "deliveries": []},
            {"date": "not a date", "deliveries": []},
            {"date": "2024-01-03", "challenge_bonus": 50},
            {"date": "2024-01-04", "deliveries": [{"restaurant": "Aldi", "doordash_pay": -2, "tip": 0}]},
            {"date": "2024-01-05", "gas": "$3.25"}
        ]
    }"#;

    let (sessions, report) = parse_records(json).expect("valid json");

    assert_eq!(sessions.len(), 2);
    assert_eq!(report.malformed, 3);
    assert_eq!(report.bonus_records, 1);

    let first = &sessions[0];
    // stored totals are ignored and recomputed
    assert_eq!(first.earnings(), 13.0);
    assert_eq!(first.dash_time_minutes, Some(120));
    assert_eq!(first.source, "import");

    assert_eq!(sessions[1].gas_cost, Some(3.25));
    assert_eq!(sessions[1].deliveries_count(), 0);

    let bare = r#"[{"date": "2024-02-01", "deliveries": []}]"#;
    assert_eq!(parse_records(bare).expect("bare array").0.len(), 1);

    assert!(parse_records(r#"{"entries": []}"#).is_err());
    assert!(parse_records("not json").is_err());
}

#[test]
fn test_parse_records_rejects_negative_minutes() {
    let json = r#"{"sessions": [
        {"date": "2025-06-01", "active_time_minutes": 90, "dash_time_minutes": 120,
         "deliveries": [{"restaurant": "Wendy's", "doordash_pay": 4, "tip": 2}]},
        {"date": "2025-06-02", "active_time_minutes": -60, "dash_time_minutes": -100,
         "deliveries": [{"restaurant": "Wendy's", "doordash_pay": 3, "tip": 0}]},
        {"date": "2025-06-03", "active_time_minutes": 30, "dash_time_minutes": "-5"}
    ]}"#;

    let (sessions, report) = parse_records(json).expect("valid json");
    assert_eq!(sessions.len(), 1);
    assert_eq!(report.malformed, 2);

    // summary and series now see the same minutes
    let metrics = dashlogger::core::analytics::summary::compute_summary(&sessions);
    let series = dashlogger::core::analytics::timeseries::build_cumulative_series(&sessions);
    let last_dash = series.dash_time.last().expect("dash point").value;
    assert_eq!(metrics.total_dash_minutes as f64, last_dash);
    assert_eq!(metrics.total_dash_minutes, 120);
}

#[test]
fn test_insert_sessions_is_all_or_nothing() {
    let db_path = setup_test_db("store_insert_batch");
    let mut pool = open_initialized(&db_path).expect("open db");

    assert_eq!(
        insert_sessions(&mut pool.conn, &sample_sessions()).expect("batch insert"),
        3
    );
    assert_eq!(load_sessions(&pool.conn).expect("load").len(), 3);

    // first session has no deliveries and goes in, the second one fails
    pool.conn
        .execute_batch("DROP TABLE deliveries")
        .expect("drop deliveries");
    let batch = vec![
        session("2025-07-01", &[]),
        session("2025-07-02", &[("Sonic", 4.0, 1.0)]),
    ];
    assert!(insert_sessions(&mut pool.conn, &batch).is_err());

    let stored: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))
        .expect("count sessions");
    assert_eq!(stored, 3);
}
