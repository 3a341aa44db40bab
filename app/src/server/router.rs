use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use super::{api, assets};
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- QR ---
        .route("/api/qr/state", get(api::qr::get_state))
        .route("/api/qr/input", put(api::qr::update_input))
        .route("/api/qr/generate", post(api::qr::generate))
        .route("/api/qr/download", get(api::qr::download))
        .route("/api/qr/reset", post(api::qr::reset))
        // --- Logs ---
        .route("/api/logs", get(api::logs::get_logs))
        .route("/api/logs/clear", post(api::logs::clear_logs))
        // --- Page ---
        .route("/", get(assets::index))
        .fallback(assets::fallback)
        // --- Middleware ---
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
