//! Medicine catalog seeding and listing.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::api::endpoints::required;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::db::repository::medicines;
use crate::models::Medicine;

#[derive(Deserialize)]
pub struct CreateMedicineRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
}

/// `POST /api/medicines` — add a medicine to the catalog.
pub async fn create(
    State(ctx): State<ApiContext>,
    Json(req): Json<CreateMedicineRequest>,
) -> Result<(StatusCode, Json<Medicine>), ApiError> {
    let name = required(req.name, "name")?;
    let kind = required(req.kind, "type")?;

    let guard = ctx.lock_db()?;
    let medicine = medicines::insert_medicine(&guard, &name, &kind, req.description.as_deref())
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok((StatusCode::CREATED, Json(medicine)))
}

/// `GET /api/medicines` — the full catalog.
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<Vec<Medicine>>, ApiError> {
    let guard = ctx.lock_db()?;
    let all = medicines::list_medicines(&guard)?;
    Ok(Json(all))
}
