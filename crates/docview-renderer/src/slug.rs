//! Heading anchor slugs.

use std::collections::HashMap;

/// Generates unique anchor ids from heading text.
///
/// Repeated headings get `-1`, `-2`… suffixes so every anchor in a
/// document stays addressable.
#[derive(Default)]
pub(crate) struct SlugCounter {
    seen: HashMap<String, usize>,
}

impl SlugCounter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Produce the next unique slug for `text`.
    pub(crate) fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base.clone()
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        slug
    }
}

/// Lowercase the text, map whitespace runs to single dashes, drop other
/// punctuation.
fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "section".to_owned()
    } else {
        slug
    }
}
