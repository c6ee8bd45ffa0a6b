use serde::{Deserialize, Serialize};

/// A catalog medicine, referenced (not owned) by treatments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medicine {
    pub id: i64,
    pub name: String,
    /// Free-form category, serialized as `type` on the wire.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: Option<String>,
}
