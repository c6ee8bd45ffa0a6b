//! API endpoint handlers.
//!
//! Each module corresponds to a resource or analysis feature. Handlers
//! validate their payloads, delegate to repositories and composers, and
//! map failures per the error-handling policy: 400 for create-time
//! validation/store errors, 500 for store faults during analysis reads,
//! graceful degradation for provider faults.

pub mod analysis;
pub mod chat;
pub mod home;
pub mod medicines;
pub mod patients;
pub mod recommendations;
pub mod research;
pub mod treatments;

use crate::api::error::ApiError;

/// Unwrap a required request field or fail with a 400.
pub(crate) fn required<T>(field: Option<T>, name: &str) -> Result<T, ApiError> {
    field.ok_or_else(|| ApiError::BadRequest(format!("missing field `{name}`")))
}
