//! Document tree API endpoint.
//!
//! Returns the navigable document tree. The tree is built fresh on every
//! request straight from the filesystem.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use docview_core::{FileNode, build_tree};
use serde::Serialize;

use crate::state::AppState;

/// Response for GET /api/tree.
#[derive(Serialize)]
pub(crate) struct TreeResponse {
    /// Document tree items.
    items: Vec<FileNode>,
}

/// Handle GET /api/tree.
pub(crate) async fn get_tree(State(state): State<Arc<AppState>>) -> Json<TreeResponse> {
    let items = build_tree(&state.docs_root, &state.exclude);
    Json(TreeResponse { items })
}
