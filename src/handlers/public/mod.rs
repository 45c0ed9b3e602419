// handlers/public/mod.rs - Routes reachable without a token

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub mod auth;

/// GET / - Service name and version
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Marketplace API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "register": "POST /register (public)",
            "login": "POST /login (public)",
            "ads": "GET|POST /ads, PUT|DELETE /ads/:id (bearer token)",
            "health": "GET /health (public)",
        }
    }))
}

/// GET /health - Liveness plus database reachability
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.credentials.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
