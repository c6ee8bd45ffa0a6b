//! Treatment-outcome recording and per-patient history.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::endpoints::required;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::treatments;
use crate::models::Treatment;

#[derive(Deserialize)]
pub struct CreateTreatmentRequest {
    pub patient_id: Option<i64>,
    pub medicine_id: Option<i64>,
    pub improvement_percent: Option<f64>,
    pub doctor_notes: Option<String>,
}

/// `POST /api/treatments` — record a treatment outcome.
///
/// Responds with the created record, including the resolved medicine name.
/// Dangling references are a 400, like any other create-time failure.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreateTreatmentRequest>,
) -> Result<(StatusCode, Json<Treatment>), ApiError> {
    let patient_id = required(req.patient_id, "patient_id")?;
    let medicine_id = required(req.medicine_id, "medicine_id")?;
    let improvement_percent = required(req.improvement_percent, "improvement_percent")?;

    let guard = ctx.lock_db()?;
    let treatment = treatments::insert_treatment(
        &guard,
        patient_id,
        medicine_id,
        improvement_percent,
        req.doctor_notes.as_deref(),
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(treatment)))
}

/// `GET /api/treatments/patient/:id` — a patient's treatment history.
pub async fn for_patient(
    State(ctx): State<ApiContext>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Vec<Treatment>>, ApiError> {
    let guard = ctx.lock_db()?;
    let history = treatments::treatments_for_patient(&guard, patient_id)?;
    Ok(Json(history))
}
