//! Router HTTP del servicio

pub mod submission_routes;

use axum::{routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::dto::submission_dto::HealthResponse;
use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Construir el router completo con sus capas
pub fn create_router(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .merge(submission_routes::create_submission_router(&state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
