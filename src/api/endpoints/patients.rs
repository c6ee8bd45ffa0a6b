//! Patient intake and listing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::endpoints::required;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::patients;
use crate::models::Patient;

#[derive(Deserialize)]
pub struct CreatePatientRequest {
    pub name: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub disease_stage: Option<String>,
}

/// `POST /api/patients` — patient intake. Immutable once created.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreatePatientRequest>,
) -> Result<(StatusCode, Json<Patient>), ApiError> {
    let name = required(req.name, "name")?;
    let age = required(req.age, "age")?;
    let gender = required(req.gender, "gender")?;
    let disease_stage = required(req.disease_stage, "disease_stage")?;

    let guard = ctx.lock_db()?;
    let patient = patients::insert_patient(&guard, &name, age, &gender, &disease_stage)
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(patient)))
}

/// `GET /api/patients` — all patients.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Patient>>, ApiError> {
    let guard = ctx.lock_db()?;
    let all = patients::list_patients(&guard)?;
    Ok(Json(all))
}
