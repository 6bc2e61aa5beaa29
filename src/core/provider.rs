//! Seams between the analytics engine and whatever holds the records.

use crate::core::analytics::ranking;
use crate::errors::AppResult;
use crate::models::session::Session;
use crate::models::summary::LocationCount;

/// Source of the full session snapshot, deliveries populated.
/// Ordering is not guaranteed.
pub trait SessionProvider {
    fn list_sessions(&mut self) -> AppResult<Vec<Session>>;
}

/// Source of "most visited merchant" counts, most visited first.
pub trait LocationProvider {
    fn top_locations(&mut self, limit: usize) -> AppResult<Vec<LocationCount>>;
}

impl SessionProvider for Vec<Session> {
    fn list_sessions(&mut self) -> AppResult<Vec<Session>> {
        Ok(self.clone())
    }
}

impl LocationProvider for Vec<Session> {
    fn top_locations(&mut self, limit: usize) -> AppResult<Vec<LocationCount>> {
        Ok(ranking::top_locations(self, limit))
    }
}
