use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// A schema step, applied once and recorded in the `log` table.
struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_sessions",
        description: "Created sessions table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS sessions (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            date            TEXT NOT NULL,
            start_time      TEXT,
            end_time        TEXT,
            active_minutes  INTEGER,
            dash_minutes    INTEGER,
            source          TEXT NOT NULL DEFAULT 'cli',
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_date ON sessions(date);
        "#,
    },
    Migration {
        version: "20250301_0002_create_deliveries",
        description: "Created deliveries table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS deliveries (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            session_id  INTEGER NOT NULL REFERENCES sessions(id) ON DELETE CASCADE,
            position    INTEGER NOT NULL DEFAULT 0,
            restaurant  TEXT NOT NULL,
            base_pay    REAL NOT NULL DEFAULT 0 CHECK(base_pay >= 0),
            tip         REAL NOT NULL DEFAULT 0 CHECK(tip >= 0)
        );

        CREATE INDEX IF NOT EXISTS idx_deliveries_session ON deliveries(session_id, position);
        CREATE INDEX IF NOT EXISTS idx_deliveries_restaurant ON deliveries(restaurant);
        "#,
    },
    Migration {
        version: "20250412_0003_add_gas_cost",
        description: "Added gas_cost to sessions",
        sql: "ALTER TABLE sessions ADD COLUMN gas_cost REAL;",
    },
];

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    conn.execute_batch("BEGIN;")?;

    let outcome = conn.execute_batch(m.sql).and_then(|_| {
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [m.version, m.description],
        )
    });

    match outcome {
        Ok(_) => {
            conn.execute_batch("COMMIT;")?;
            Ok(())
        }
        Err(e) => {
            conn.execute_batch("ROLLBACK;").ok();
            Err(e)
        }
    }
}

/// Public entry point: run all pending migrations in order.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<usize> {
    ensure_log_table(conn)?;

    let mut applied = 0;
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        apply(conn, m)?;
        applied += 1;

        tracing::info!(version = m.version, "migration applied");
        success(format!("Migration applied: {} → {}", m.version, m.description));
    }

    Ok(applied)
}
