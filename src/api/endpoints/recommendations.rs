//! Stage-based medicine recommendations.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::recommend::{self, RecommendationEntry};

pub const DISCLAIMER: &str =
    "This is an educational prototype. Do not use for real medical prescription.";

#[derive(Serialize)]
pub struct RecommendationsResponse {
    /// The stage after normalization (exact lowercase matches only).
    pub stage: String,
    pub recommendations: Vec<RecommendationEntry>,
    pub disclaimer: &'static str,
}

/// `GET /api/recommendations/:stage` — ranked medicines for a stage.
///
/// An unknown or unmatched stage yields an empty list, not an error.
pub async fn for_stage(
    State(ctx): State<ApiContext>,
    Path(stage): Path<String>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let normalized = recommend::normalize_stage(&stage);

    let guard = ctx.lock_db()?;
    let recommendations = recommend::recommend(&guard, &normalized)?;

    Ok(Json(RecommendationsResponse {
        stage: normalized,
        recommendations,
        disclaimer: DISCLAIMER,
    }))
}
