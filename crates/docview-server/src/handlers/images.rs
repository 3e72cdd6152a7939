//! Image proxy endpoint.
//!
//! Serves per-document image files identified by a root-relative path in
//! the `path` query parameter. The path goes through the containment guard
//! before any filesystem access; files outside the document root are never
//! served.

use std::fs;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use docview_core::{decode_proxy_path, resolve_within};
use serde::Deserialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Cache-Control applied to served images.
const CACHE_CONTROL: &str = "public, max-age=3600";

/// Query parameters for GET /api/images.
#[derive(Deserialize)]
pub(crate) struct ImageQuery {
    /// Root-relative path of the image, percent-encoded.
    path: Option<String>,
}

/// Handle GET /api/images.
pub(crate) async fn get_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ImageQuery>,
) -> Result<impl IntoResponse, ServerError> {
    let raw = query.path.ok_or(ServerError::MissingParam("path"))?;
    let (content_type, bytes) = load_image(&state, &raw)?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL.to_owned()),
        ],
        bytes,
    ))
}

/// Resolve and read one image file.
///
/// Returns the content type (derived from the file extension, generic
/// binary for unknown extensions) and the file bytes.
fn load_image(state: &AppState, raw: &str) -> Result<(String, Vec<u8>), ServerError> {
    // Query parsing already decoded once; a second pass tolerates values
    // that an intermediate layer encoded twice.
    let decoded = decode_proxy_path(raw);
    // Root-absolute references keep their marker in transit; the path is
    // root-relative from here on.
    let rel = decoded.trim_start_matches('/');

    let resolved = resolve_within(&state.docs_root, rel.split('/'))
        .map_err(|_| ServerError::AccessDenied(rel.to_owned()))?;

    if !resolved.exists() {
        return Err(ServerError::FileNotFound(resolved));
    }

    let bytes = fs::read(&resolved)?;
    let mime = mime_guess::from_path(&resolved).first_or_octet_stream();

    Ok((mime.as_ref().to_owned(), bytes))
}
