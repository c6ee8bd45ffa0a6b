//! Progression analysis — the narrative composition endpoint.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::reports::progression::{self, ProgressionReport};

#[derive(Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub historical_reports: Vec<String>,
    #[serde(default)]
    pub current_observations: Vec<String>,
}

/// `POST /neural-analysis` — compose a progression report.
///
/// Provider and extraction failures degrade to fallback content with a 200;
/// only store faults surface as a 500. The provider call blocks, so the
/// whole composition runs on the blocking pool. The matched record is
/// loaded first and the lock released, so other requests can reach the
/// database while the provider call is in flight.
pub async fn analyze(
    State(ctx): State<ApiContext>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<ProgressionReport>, ApiError> {
    let report = tokio::task::spawn_blocking(move || {
        let matched = {
            let guard = ctx.lock_db()?;
            progression::load_matched_records(&guard, &req.patient_name)
                .map_err(ApiError::from)?
        };
        Ok::<_, ApiError>(progression::compose_with_records(
            ctx.client.as_ref(),
            &ctx.provider.models,
            &req.patient_name,
            &req.stage,
            &req.historical_reports,
            &req.current_observations,
            matched,
        ))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("analysis task failed: {e}")))??;

    Ok(Json(report))
}
