//! Pages API endpoint.
//!
//! Loads and renders one document per request, returning JSON with
//! metadata, front-matter, table of contents, and HTML content. Image
//! references embedded in the markdown are rewritten onto the guarded
//! image-proxy endpoint during rendering.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use docview_core::{DocumentError, ImageSrc, load_document, proxy_url, resolve_image_ref};
use docview_renderer::{HtmlRenderer, TocEntry};
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::to_url_path;
use crate::state::AppState;

/// Fallback documents tried for the root route, in order.
const ROOT_FALLBACKS: [&str; 2] = ["README.md", "index.md"];

/// Response for GET /api/pages/{path}.
#[derive(Debug, Serialize)]
pub(crate) struct PageResponse {
    /// Page metadata.
    meta: PageMeta,
    /// Front-matter values declared by the document.
    frontmatter: serde_json::Map<String, serde_json::Value>,
    /// Table of contents entries.
    toc: Vec<TocResponse>,
    /// Rendered HTML content.
    content: String,
}

/// Page metadata.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta {
    /// Page title (from front-matter or the first H1 heading).
    title: Option<String>,
    /// URL path.
    path: String,
    /// Source file path.
    source_file: String,
}

/// Table of contents entry for serialization.
#[derive(Debug, Serialize)]
struct TocResponse {
    /// Heading level (1-6).
    level: u8,
    /// Heading text.
    title: String,
    /// Anchor ID.
    id: String,
}

impl From<&TocEntry> for TocResponse {
    fn from(entry: &TocEntry) -> Self {
        Self {
            level: entry.level,
            title: entry.title.clone(),
            id: entry.id.clone(),
        }
    }
}

/// Handle GET /api/pages/ (root route).
///
/// Tries the fallback documents at the document root; without one the
/// response is a standard not-found.
pub(crate) async fn get_root_page(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    for fallback in ROOT_FALLBACKS {
        if state.docs_root.join(fallback).exists() {
            return build_page(fallback, &state).map(Json);
        }
    }
    Err(ServerError::PageNotFound("/".to_owned()))
}

/// Handle GET /api/pages/{path}.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    build_page(&path, &state).map(Json)
}

/// Load, render, and package one document.
fn build_page(path: &str, state: &AppState) -> Result<PageResponse, ServerError> {
    let slug: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();

    let document = load_document(&state.docs_root, &slug).map_err(|err| match err {
        DocumentError::NotFound(_) => ServerError::PageNotFound(path.to_owned()),
        DocumentError::Traversal(_) => ServerError::AccessDenied(path.to_owned()),
    })?;

    // Image references resolve relative to the document's directory.
    let document_dir = match slug.split_last() {
        Some((_, dir)) => dir.join("/"),
        None => String::new(),
    };

    let renderer = HtmlRenderer::new()
        .with_title_extraction()
        .with_image_rewriter(move |src| match resolve_image_ref(&document_dir, src) {
            ImageSrc::External(url) => url,
            ImageSrc::Proxy(rel) => proxy_url(&rel),
        });
    let rendered = renderer.render(&document.body);

    // Front-matter title wins over the extracted H1.
    let title = document
        .frontmatter
        .get("title")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
        .or(rendered.title);

    Ok(PageResponse {
        meta: PageMeta {
            title,
            path: to_url_path(path),
            source_file: document.resolved_path.display().to_string(),
        },
        frontmatter: document.frontmatter.into_iter().collect(),
        toc: rendered.toc.iter().map(TocResponse::from).collect(),
        content: rendered.html,
    })
}
