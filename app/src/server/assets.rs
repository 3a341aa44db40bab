//! Static file serving for the generator page (web/).

use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;
use serde_json::json;

#[derive(Embed)]
#[folder = "web/"]
struct PageAssets;

/// Serve the page for bare `/` requests.
pub async fn index() -> Response {
    serve_embedded::<PageAssets>("index.html")
}

/// Fallback handler: serve page assets for unmatched paths, JSON 404 for
/// unknown API paths.
pub async fn fallback(uri: Uri) -> Response {
    let request_path = uri.path();
    if is_api_path(request_path) {
        return (
            StatusCode::NOT_FOUND,
            axum::Json(json!({
                "error": "Not Found",
                "path": request_path,
            })),
        )
            .into_response();
    }

    serve_embedded::<PageAssets>(request_path.trim_start_matches('/'))
}

fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

fn serve_embedded<E: Embed>(path: &str) -> Response {
    let (path, asset) = match E::get(path) {
        Some(asset) => (path, Some(asset)),
        None => ("index.html", E::get("index.html")),
    };

    match asset {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
