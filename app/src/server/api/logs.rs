//! Diagnostic log API backed by the in-memory tracing capture.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::app::SharedState;
use crate::services::log_buffer;

#[derive(Debug, Deserialize)]
pub struct LogQuery {
    pub limit: Option<usize>,
}

/// GET /api/logs
pub async fn get_logs(State(state): State<SharedState>, Query(q): Query<LogQuery>) -> Json<Value> {
    let limit = q.limit.unwrap_or(state.config().log_limit);
    let logs = log_buffer::recent(limit);
    let count = logs.len();
    Json(json!({
        "logs": logs,
        "count": count,
        "limit": limit,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// POST /api/logs/clear
pub async fn clear_logs() -> Json<Value> {
    let cleared = log_buffer::clear();
    Json(json!({ "status": "ok", "cleared": cleared }))
}
