use serde::{Deserialize, Serialize};

/// A patient record. Immutable once created — there is no update path.
///
/// `disease_stage` is stored as free text; the stage-based logic assumes one
/// of Early / Middle / Severe and joins on it with an exact, case-sensitive
/// match. Name lookup is the only case-insensitive operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub gender: String,
    pub disease_stage: String,
}
