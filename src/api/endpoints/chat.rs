//! Raw prompt proxy to the generative-text provider.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::ai::fallback;
use crate::api::error::ApiError;
use crate::api::types::ApiContext;

#[derive(Deserialize)]
pub struct ChatRequest {
    pub prompt: Option<String>,
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// `POST /api/ai/chat` — forward a prompt through the model chain.
///
/// Unlike the report composers this endpoint does surface provider
/// exhaustion: a 500 whose body still carries a usable apology string.
pub async fn send(
    State(ctx): State<ApiContext>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let prompt = req
        .prompt
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::ChatUnavailable("missing field `prompt`".into()))?;

    let response = tokio::task::spawn_blocking(move || {
        fallback::generate_with_fallback(ctx.client.as_ref(), &ctx.provider.models, &prompt)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("chat task failed: {e}")))?
    .map_err(|e| ApiError::ChatUnavailable(e.to_string()))?;

    Ok(Json(ChatResponse { response }))
}
