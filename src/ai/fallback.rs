//! Model degradation chain: primary → secondary → tertiary, then a fixed
//! mock payload.
//!
//! Not retry-with-backoff — each model identity is tried exactly once, in
//! order, and the first success short-circuits.

use super::{ProviderError, TextGenerate};

/// Fixed payload returned when every model in the chain has failed.
///
/// Combines the progression-report and research-summary keys so either
/// composer can parse the slice it needs.
pub const MOCK_REPLY: &str = r#"{
  "progression_summary": "Simulated AI Analysis (Hub unreachable): The patient shows stable cognitive patterns based on the provided inputs.",
  "cognitive_status": "Stable",
  "key_findings": ["No significant decline detected", "Engagement levels appear consistent"],
  "caregiver_recommendations": ["Continue stimulating activities", "maintaining social contact", "Regular exercise"],
  "medical_focus": "Routine Checkup",
  "global_prevalence": "55 Million+",
  "key_statistics": ["Affects 1 in 9 people age 65+"],
  "recent_breakthroughs": [{"title": "New Drug Approved", "summary": "Lecanemab shows promise."}],
  "projected_growth": "Rising to 139 million by 2050"
}"#;

/// Try each model in order; first success wins.
///
/// Every failure is logged and the chain moves on. Exhaustion reports the
/// last failure reason.
pub fn generate_with_fallback(
    client: &dyn TextGenerate,
    models: &[String],
    prompt: &str,
) -> Result<String, ProviderError> {
    let mut last_error: Option<ProviderError> = None;

    for model in models {
        tracing::debug!(model = %model, "attempting provider model");
        match client.generate(model, prompt) {
            Ok(text) => {
                tracing::debug!(model = %model, "provider reply received");
                return Ok(text);
            }
            Err(e) => {
                tracing::warn!(model = %model, error = %e, "provider model failed");
                last_error = Some(e);
            }
        }
    }

    Err(ProviderError::AllModelsFailed(
        last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no models configured".to_string()),
    ))
}

/// Like [`generate_with_fallback`], but exhaustion yields [`MOCK_REPLY`]
/// instead of an error. Used by the report composers, which never surface
/// provider failures to their callers.
pub fn generate_or_mock(client: &dyn TextGenerate, models: &[String], prompt: &str) -> String {
    match generate_with_fallback(client, models, prompt) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "all provider models failed, returning mock payload");
            MOCK_REPLY.to_string()
        }
    }
}
