//! Application state.
//!
//! Shared state for all request handlers. Everything here is immutable for
//! the process lifetime; handlers never read configuration from ambient
//! global state.

use std::path::PathBuf;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Absolute document root; every resolved path must stay under it.
    pub(crate) docs_root: PathBuf,
    /// Entry names hidden from the document tree.
    pub(crate) exclude: Vec<String>,
}
