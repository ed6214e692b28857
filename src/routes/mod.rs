//! Rutas HTTP
//!
//! Arma el router completo de la API sobre un `AppState`.

pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_layer;
use crate::state::AppState;

pub fn create_app_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/car", vehicle_routes::create_vehicle_router())
        .merge(vehicle_routes::create_legacy_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de prueba simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
