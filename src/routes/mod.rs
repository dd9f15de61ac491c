//! Rutas HTTP de la agencia

pub mod customer_routes;
pub mod transaction_routes;
pub mod vehicle_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;

/// Router completo de la API con CORS y trazas de requests
pub fn create_app_router(state: AppState) -> Router {
    let cors = cors_middleware(&state.config.cors_origins, state.config.is_development());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/customers", customer_routes::create_customer_router())
        .nest("/api/transactions", transaction_routes::create_transaction_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Endpoint de salud
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "agencia-autos",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
