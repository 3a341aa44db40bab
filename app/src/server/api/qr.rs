//! QR generation API:
//!   GET  /api/qr/state     – current render state for display binding
//!   PUT  /api/qr/input     – keystroke-level input update
//!   POST /api/qr/generate  – validate + render
//!   GET  /api/qr/download  – export the current QR code as a PNG attachment (?text= current input)
//!   POST /api/qr/reset     – back to idle

use axum::Json;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use image_engine::EngineError;
use qr_core::{BUSY_MESSAGE, ENCODE_FAILURE_MESSAGE, ExportError, MemoryTarget, RenderOutcome, Snapshot};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::app::SharedState;

use super::err_json;

type ApiError = (StatusCode, Json<Value>);
type ApiResult = Result<Json<Value>, ApiError>;

#[derive(Debug, Deserialize)]
pub struct TextBody {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    pub text: Option<String>,
}

fn ok_snapshot(snapshot: Snapshot) -> Json<Value> {
    Json(json!({ "status": "ok", "snapshot": snapshot }))
}

fn err_snapshot(status: StatusCode, message: &str, snapshot: Snapshot) -> ApiError {
    (
        status,
        Json(json!({ "status": "error", "error": message, "snapshot": snapshot })),
    )
}

/// `Content-Disposition` value for a sanitized download name.
fn attachment_header(filename: &str) -> String {
    format!("attachment; filename=\"{filename}\"")
}

/// GET /api/qr/state
pub async fn get_state(State(state): State<SharedState>) -> Json<Value> {
    ok_snapshot(state.pipeline().await.snapshot())
}

/// PUT /api/qr/input
pub async fn update_input(
    State(state): State<SharedState>,
    Json(body): Json<TextBody>,
) -> Json<Value> {
    let mut pipeline = state.pipeline().await;
    pipeline.edit_input(body.text);
    ok_snapshot(pipeline.snapshot())
}

/// POST /api/qr/generate
///
/// The render runs in its own task so a dropped request still reaches
/// `complete` and the pipeline never stays `Loading`.
pub async fn generate(
    State(state): State<SharedState>,
    Json(body): Json<TextBody>,
) -> ApiResult {
    tokio::spawn(run_generate(state, body.text))
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Render task aborted");
            Err(err_json(500, ENCODE_FAILURE_MESSAGE))
        })
}

/// The pipeline lock is released while the encoder runs on the blocking pool;
/// the `Loading` state keeps other generate requests out meanwhile.
async fn run_generate(state: SharedState, text: String) -> ApiResult {
    let (ticket, encoder) = {
        let mut pipeline = state.pipeline().await;
        if !pipeline.generate_enabled() {
            return Err(err_snapshot(StatusCode::CONFLICT, BUSY_MESSAGE, pipeline.snapshot()));
        }

        pipeline.edit_input(text.as_str());
        match pipeline.begin(&text) {
            Ok(ticket) => (ticket, *pipeline.encoder()),
            Err(outcome) => {
                let message = match outcome {
                    RenderOutcome::Failure(message) => message,
                    RenderOutcome::Success(_) => ENCODE_FAILURE_MESSAGE.to_string(),
                };
                return Err(err_snapshot(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    &message,
                    pipeline.snapshot(),
                ));
            }
        }
    };

    let job = ticket.clone();
    let result = tokio::task::spawn_blocking(move || job.encode(&encoder))
        .await
        .unwrap_or_else(|e| Err(EngineError::Encode(format!("render task failed: {e}"))));

    let mut pipeline = state.pipeline().await;
    match pipeline.complete(ticket, result) {
        RenderOutcome::Success(artifact) => {
            let image = artifact.to_data_uri().map_err(|e| {
                tracing::error!(error = %e, "Failed to encode preview");
                err_snapshot(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ENCODE_FAILURE_MESSAGE,
                    pipeline.snapshot(),
                )
            })?;
            Ok(Json(json!({
                "status": "ok",
                "snapshot": pipeline.snapshot(),
                "image": image,
            })))
        }
        RenderOutcome::Failure(message) => Err(err_snapshot(
            StatusCode::INTERNAL_SERVER_ERROR,
            &message,
            pipeline.snapshot(),
        )),
    }
}

/// GET /api/qr/download?text=...
///
/// `text` is the page's input at click time. It replaces the stored input
/// first so the filename never comes from an older keystroke.
pub async fn download(
    State(state): State<SharedState>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let mut target = MemoryTarget::new();
    let mut pipeline = state.pipeline().await;
    if let Some(text) = query.text {
        pipeline.edit_input(text);
    }
    pipeline
        .export(&mut target)
        .map_err(|e| match e {
            ExportError::NothingToExport => err_json(409, e.user_message()),
            _ => err_json(500, e.user_message()),
        })?;
    drop(pipeline);

    let file = target
        .into_file()
        .ok_or_else(|| err_json(500, qr_core::EXPORT_FAILURE_MESSAGE))?;

    Response::builder()
        .header(header::CONTENT_TYPE, "image/png")
        .header(header::CONTENT_DISPOSITION, attachment_header(&file.filename))
        .header(header::CACHE_CONTROL, "no-store")
        .body(Body::from(file.bytes))
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to build download response");
            err_json(500, qr_core::EXPORT_FAILURE_MESSAGE)
        })
}

/// POST /api/qr/reset
pub async fn reset(State(state): State<SharedState>) -> ApiResult {
    let mut pipeline = state.pipeline().await;
    if !pipeline.generate_enabled() {
        return Err(err_snapshot(StatusCode::CONFLICT, BUSY_MESSAGE, pipeline.snapshot()));
    }
    pipeline.reset();
    Ok(ok_snapshot(pipeline.snapshot()))
}
