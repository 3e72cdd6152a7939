//! Document loading.
//!
//! Resolves a slug to a markdown file under the document root and loads it,
//! splitting front-matter metadata from the body. Documents are constructed
//! fresh on every request and never cached.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;

use crate::frontmatter::split_frontmatter;
use crate::resolve::{ResolveError, resolve_within};

/// The result of loading one document.
#[derive(Debug)]
pub struct Document {
    /// Raw text content after front-matter extraction.
    pub body: String,
    /// Front-matter values; empty when the document has no metadata block.
    pub frontmatter: HashMap<String, serde_json::Value>,
    /// Absolute path actually read. Differs from the naive join when the
    /// decode-retry fallback located the file.
    pub resolved_path: PathBuf,
}

/// Document loading error.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// No file exists for the slug (including read races after the
    /// existence check).
    #[error("document not found: {0}")]
    NotFound(String),
    /// The slug resolved outside the document root.
    #[error(transparent)]
    Traversal(#[from] ResolveError),
}

/// Load the document identified by `slug` under `root`.
///
/// The slug segments are joined onto `root` as-is first. When that path
/// does not exist, each segment is retried percent-decoded — file names
/// containing spaces or special characters arrive encoded from the URL.
///
/// # Errors
///
/// [`DocumentError::Traversal`] when either candidate escapes `root`;
/// [`DocumentError::NotFound`] when no candidate exists or the read fails.
pub fn load_document(root: &Path, slug: &[String]) -> Result<Document, DocumentError> {
    let direct = resolve_within(root, slug.iter().map(String::as_str))?;

    let resolved_path = if direct.exists() {
        direct
    } else {
        let decoded: Vec<String> = slug
            .iter()
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect();
        let fallback = resolve_within(root, decoded.iter().map(String::as_str))?;
        if fallback.exists() {
            fallback
        } else {
            return Err(DocumentError::NotFound(slug.join("/")));
        }
    };

    let text = fs::read_to_string(&resolved_path).map_err(|err| {
        tracing::warn!(path = %resolved_path.display(), error = %err, "Failed to read document");
        DocumentError::NotFound(slug.join("/"))
    })?;

    let (frontmatter, body) = split_frontmatter(&text);

    Ok(Document {
        body: body.to_owned(),
        frontmatter,
        resolved_path,
    })
}
