use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_session, load_session};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

pub struct DeleteLogic;

impl DeleteLogic {
    pub fn apply(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let session = load_session(&pool.conn, id)?;

        if !delete_session(&mut pool.conn, id)? {
            return Err(AppError::SessionNotFound(id));
        }

        let message = format!(
            "Deleted session #{} ({}, {} deliveries)",
            id,
            session.date_str(),
            session.deliveries_count()
        );

        if let Err(e) = ttlog(&pool.conn, "del", &session.date_str(), &message) {
            tracing::warn!(error = %e, "failed to write internal log");
        }

        info(message);
        Ok(())
    }
}
