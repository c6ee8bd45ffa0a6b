//! Root liveness route.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HomeResponse {
    pub message: &'static str,
}

/// `GET /` — liveness message.
pub async fn index() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Neural Care Recommendation API is running",
    })
}
