//! API endpoints
//!
//! Este módulo contiene los endpoints del dashboard de flota.

pub mod dashboard;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/fleet", dashboard::create_dashboard_router())
}

/// Router completo con estado y capas HTTP
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_origins.as_deref());

    create_api_router()
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Fleet risk dashboard API running",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
