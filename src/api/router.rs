//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! CRUD and analysis routes are nested under `/api/`; the progression
//! analysis endpoint keeps its historical top-level path.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the full API router with CORS enabled for all routes.
pub fn api_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route(
            "/patients",
            post(endpoints::patients::create).get(endpoints::patients::list),
        )
        .route(
            "/medicines",
            post(endpoints::medicines::create).get(endpoints::medicines::list),
        )
        .route("/treatments", post(endpoints::treatments::create))
        .route(
            "/treatments/patient/:id",
            get(endpoints::treatments::for_patient),
        )
        .route(
            "/recommendations/:stage",
            get(endpoints::recommendations::for_stage),
        )
        .route("/research/alzheimers", get(endpoints::research::alzheimers))
        .route("/ai/chat", post(endpoints::chat::send));

    Router::new()
        .route("/", get(endpoints::home::index))
        .route("/neural-analysis", post(endpoints::analysis::analyze))
        .nest("/api", api)
        .with_state(ctx)
        .layer(axum::middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
}

async fn log_request(req: Request, next: Next) -> Response {
    tracing::debug!(method = %req.method(), path = %req.uri().path(), "incoming request");
    next.run(req).await
}
