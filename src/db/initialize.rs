use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the database.
/// All schema is owned by the migration engine; returns how many migrations
/// were applied by this call.
pub fn init_db(conn: &Connection) -> AppResult<usize> {
    let applied = run_pending_migrations(conn)?;
    tracing::debug!(applied, "database schema up to date");
    Ok(applied)
}

/// Open the database at `path`, creating or upgrading the schema if needed.
pub fn open_initialized(path: &str) -> AppResult<DbPool> {
    let pool = DbPool::new(path)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
