use crate::core::provider::{LocationProvider, SessionProvider};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::delivery::Delivery;
use crate::models::session::Session;
use crate::models::summary::LocationCount;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, Result, Row, Transaction, params};
use std::collections::HashMap;

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_optional_time(raw: Option<String>) -> Result<Option<NaiveTime>> {
    match raw {
        Some(s) if !s.trim().is_empty() => NaiveTime::parse_from_str(&s, "%H:%M")
            .map(Some)
            .map_err(|_| conversion_error(AppError::InvalidTime(s.clone()))),
        _ => Ok(None),
    }
}

/// Map a `sessions` row; deliveries are attached afterwards.
pub fn map_session_row(row: &Row) -> Result<Session> {
    let date_str: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(AppError::InvalidDate(date_str.clone())))?;

    Ok(Session {
        id: row.get("id")?,
        date,
        start_time: parse_optional_time(row.get("start_time")?)?,
        end_time: parse_optional_time(row.get("end_time")?)?,
        active_time_minutes: row.get("active_minutes")?,
        dash_time_minutes: row.get("dash_minutes")?,
        gas_cost: row.get("gas_cost")?,
        deliveries: Vec::new(),
        source: row.get("source")?,
        created_at: row.get("created_at")?,
    })
}

fn map_delivery_row(row: &Row) -> Result<(i64, Delivery)> {
    Ok((
        row.get("session_id")?,
        Delivery {
            restaurant: row.get("restaurant")?,
            base_pay: row.get("base_pay")?,
            tip: row.get("tip")?,
        },
    ))
}

/// Insert a session and its deliveries atomically. Returns the new id.
pub fn insert_session(conn: &mut Connection, session: &Session) -> AppResult<i64> {
    let tx = conn.transaction()?;
    let id = insert_in_tx(&tx, session)?;
    tx.commit()?;
    Ok(id)
}

/// Insert many sessions in one transaction: either all are stored or none.
pub fn insert_sessions(conn: &mut Connection, sessions: &[Session]) -> AppResult<usize> {
    let tx = conn.transaction()?;
    for session in sessions {
        insert_in_tx(&tx, session)?;
    }
    tx.commit()?;
    Ok(sessions.len())
}

fn insert_in_tx(tx: &Transaction, session: &Session) -> AppResult<i64> {
    tx.execute(
        "INSERT INTO sessions (date, start_time, end_time, active_minutes, dash_minutes, gas_cost, source, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            session.date_str(),
            session.start_time.map(|t| t.format("%H:%M").to_string()),
            session.end_time.map(|t| t.format("%H:%M").to_string()),
            session.active_time_minutes,
            session.dash_time_minutes,
            session.gas_cost,
            session.source,
            session.created_at,
        ],
    )?;
    let id = tx.last_insert_rowid();

    if !session.deliveries.is_empty() {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO deliveries (session_id, position, restaurant, base_pay, tip)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for (pos, d) in session.deliveries.iter().enumerate() {
            stmt.execute(params![id, pos as i64, d.restaurant, d.base_pay, d.tip])?;
        }
    }

    Ok(id)
}

/// Load every session, oldest first, deliveries in entry order.
pub fn load_sessions(conn: &Connection) -> AppResult<Vec<Session>> {
    let mut stmt = conn.prepare("SELECT * FROM sessions ORDER BY date ASC, id ASC")?;
    let mut sessions = Vec::new();
    for r in stmt.query_map([], map_session_row)? {
        sessions.push(r?);
    }

    let mut by_session: HashMap<i64, Vec<Delivery>> = HashMap::new();
    let mut stmt = conn.prepare(
        "SELECT session_id, restaurant, base_pay, tip FROM deliveries
         ORDER BY session_id ASC, position ASC, id ASC",
    )?;
    for r in stmt.query_map([], map_delivery_row)? {
        let (session_id, delivery) = r?;
        by_session.entry(session_id).or_default().push(delivery);
    }

    for s in &mut sessions {
        s.deliveries = by_session.remove(&s.id).unwrap_or_default();
    }

    Ok(sessions)
}

pub fn load_session(conn: &Connection, id: i64) -> AppResult<Session> {
    let mut stmt = conn.prepare("SELECT * FROM sessions WHERE id = ?1")?;
    let mut rows = stmt.query_map([id], map_session_row)?;
    let mut session = match rows.next() {
        Some(r) => r?,
        None => return Err(AppError::SessionNotFound(id)),
    };

    let mut stmt = conn.prepare(
        "SELECT session_id, restaurant, base_pay, tip FROM deliveries
         WHERE session_id = ?1 ORDER BY position ASC, id ASC",
    )?;
    for r in stmt.query_map([id], map_delivery_row)? {
        session.deliveries.push(r?.1);
    }

    Ok(session)
}

/// Delete a session and its deliveries. Returns false if no such id.
pub fn delete_session(conn: &mut Connection, id: i64) -> AppResult<bool> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM deliveries WHERE session_id = ?1", [id])?;
    let removed = tx.execute("DELETE FROM sessions WHERE id = ?1", [id])?;
    tx.commit()?;
    Ok(removed > 0)
}

/// Most visited merchants. Ties keep first-seen order (lowest delivery id).
pub fn load_top_locations(conn: &Connection, limit: usize) -> AppResult<Vec<LocationCount>> {
    let mut stmt = conn.prepare(
        "SELECT d.restaurant AS name, COUNT(*) AS cnt, MIN(s.date || printf('%010d', d.session_id) || printf('%06d', d.position)) AS first_seen
         FROM deliveries d
         JOIN sessions s ON s.id = d.session_id
         WHERE TRIM(d.restaurant) <> ''
         GROUP BY d.restaurant
         ORDER BY cnt DESC, first_seen ASC
         LIMIT ?1",
    )?;

    let rows = stmt.query_map([limit as i64], |row| {
        Ok(LocationCount {
            name: row.get("name")?,
            count: row.get::<_, i64>("cnt")? as usize,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

impl SessionProvider for DbPool {
    fn list_sessions(&mut self) -> AppResult<Vec<Session>> {
        load_sessions(&self.conn)
    }
}

impl LocationProvider for DbPool {
    fn top_locations(&mut self, limit: usize) -> AppResult<Vec<LocationCount>> {
        load_top_locations(&self.conn, limit)
    }
}
