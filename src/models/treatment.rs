use serde::{Deserialize, Serialize};

/// A recorded treatment outcome. Never mutated or deleted.
///
/// Carries the resolved `medicine_name` so API responses can display it
/// without a second lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Treatment {
    pub id: i64,
    pub patient_id: i64,
    pub medicine_id: i64,
    /// RFC 3339 timestamp, set at creation time.
    pub start_date: String,
    pub end_date: Option<String>,
    /// Conceptually bounded to [0, 100]; not enforced by storage.
    pub improvement_percent: f64,
    pub doctor_notes: Option<String>,
    pub medicine_name: String,
}
