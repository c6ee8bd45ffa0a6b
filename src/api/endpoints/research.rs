//! Aggregate research summary.

use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::reports::research::{self, ResearchSummary};

/// `GET /api/research/alzheimers` — AI-derived or fallback statistics.
/// Always a 200; every failure path lands on fixed fallback content.
pub async fn alzheimers(
    State(ctx): State<ApiContext>,
) -> Result<Json<ResearchSummary>, ApiError> {
    let summary = tokio::task::spawn_blocking(move || {
        research::compose_research_summary(ctx.client.as_ref(), &ctx.provider.models)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("research task failed: {e}")))?;

    Ok(Json(summary))
}
