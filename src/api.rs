// src/api.rs
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::generate::Generator;

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<Generator>,
}

impl AppState {
    pub fn new(generator: Generator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/generate", get(generate))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

async fn generate(State(state): State<AppState>) -> Response {
    match state.generator.generate().await {
        Ok(short) => (
            StatusCode::OK,
            [(header::CACHE_CONTROL, "no-store")],
            Json(short),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = ?e, "generate failed");
            let msg = e.to_string();
            let error = if msg.trim().is_empty() {
                "Failed to generate".to_string()
            } else {
                msg
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error })).into_response()
        }
    }
}
