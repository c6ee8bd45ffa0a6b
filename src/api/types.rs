//! Shared state for the API layer.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::ai::TextGenerate;
use crate::api::error::ApiError;
use crate::config::ProviderConfig;

/// Shared context for all API routes.
///
/// The SQLite connection is serialized behind a mutex — acceptable for the
/// low-concurrency administrative workload this API serves. Provider
/// configuration and client are constructed once in `main` and injected here.
#[derive(Clone)]
pub struct ApiContext {
    pub db: Arc<Mutex<Connection>>,
    pub provider: Arc<ProviderConfig>,
    pub client: Arc<dyn TextGenerate>,
}

impl ApiContext {
    pub fn new(
        db: Arc<Mutex<Connection>>,
        provider: Arc<ProviderConfig>,
        client: Arc<dyn TextGenerate>,
    ) -> Self {
        Self {
            db,
            provider,
            client,
        }
    }

    /// Lock the database connection for the duration of a request.
    pub fn lock_db(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.db
            .lock()
            .map_err(|_| ApiError::Internal("database lock poisoned".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::MockTextClient;
    use crate::db::open_memory_database;

    #[test]
    fn context_is_cloneable_and_shares_db() {
        let conn = open_memory_database().unwrap();
        let ctx = ApiContext::new(
            Arc::new(Mutex::new(conn)),
            Arc::new(ProviderConfig::new("k", "http://localhost:9", vec!["m".into()])),
            Arc::new(MockTextClient::new("ok")),
        );
        let clone = ctx.clone();

        {
            let guard = ctx.lock_db().unwrap();
            guard
                .execute(
                    "INSERT INTO patients (name, age, gender, disease_stage)
                     VALUES ('A', 1, 'F', 'Early')",
                    [],
                )
                .unwrap();
        }
        let guard = clone.lock_db().unwrap();
        let count: i64 = guard
            .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
