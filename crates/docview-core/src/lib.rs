//! Document tree resolution and path-security layer.
//!
//! This crate is the filesystem-facing core of docview:
//!
//! - [`resolve_within`]: joins request path segments onto the document root
//!   and rejects any resolution that escapes it
//! - [`build_tree`]: walks the root directory into an ordered, filtered
//!   [`FileNode`] tree for navigation
//! - [`load_document`]: locates and loads a single markdown file, splitting
//!   front-matter metadata from the body
//! - [`resolve_image_ref`] / [`proxy_url`] / [`decode_proxy_path`]: map image
//!   references embedded in documents onto the guarded image-proxy endpoint
//!
//! All operations are synchronous and read-only: each call performs blocking
//! filesystem reads to completion and holds no shared mutable state. The
//! document root is passed explicitly into every call.

mod document;
mod frontmatter;
mod images;
mod resolve;
mod tree;

pub use document::{Document, DocumentError, load_document};
pub use images::{ImageSrc, decode_proxy_path, proxy_url, resolve_image_ref};
pub use resolve::{ResolveError, resolve_within};
pub use tree::{FileNode, NodeKind, build_tree};
