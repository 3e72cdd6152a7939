//! Markdown to HTML rendering.
//!
//! Provides [`HtmlRenderer`], a pulldown-cmark based renderer producing
//! semantic HTML5 with:
//!
//! - GitHub Flavored Markdown (tables, strikethrough, task lists)
//! - slugified heading anchors collected into a table of contents
//! - `<pre><code class="language-…">` fences for client-side highlighting
//! - a pluggable image-URL rewrite hook, the seam where the hosting layer
//!   routes embedded image references through its proxy endpoint
//!
//! # Example
//!
//! ```
//! use docview_renderer::HtmlRenderer;
//!
//! let result = HtmlRenderer::new()
//!     .with_title_extraction()
//!     .render("# Hello\n\n**Bold** text");
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! ```

mod renderer;
mod slug;

pub use renderer::{HtmlRenderer, RenderResult, TocEntry};
