//! YAML front-matter extraction.
//!
//! Documents may begin with a `---`-delimited YAML block. The block is
//! parsed as a string-keyed mapping; malformed YAML is tolerated and
//! treated as absent metadata so the body still loads.

use std::collections::HashMap;

/// Front-matter values keyed by name.
///
/// The metadata schema is caller-defined, so values stay generic JSON
/// (string/number/boolean/null/list/mapping).
pub(crate) type Frontmatter = HashMap<String, serde_json::Value>;

/// Block delimiter, alone on its line.
const DELIMITER: &str = "---";

/// Split a leading front-matter block from `text`.
///
/// Returns the parsed mapping and the remaining body. When no well-formed
/// block is present — no opening delimiter, no closing delimiter, or YAML
/// that fails to parse as a mapping — the metadata is empty and the body
/// is the full input unchanged.
pub(crate) fn split_frontmatter(text: &str) -> (Frontmatter, &str) {
    let Some((block, body)) = extract_block(text) else {
        return (HashMap::new(), text);
    };

    if block.trim().is_empty() {
        return (HashMap::new(), body);
    }

    match serde_yaml::from_str::<Frontmatter>(block) {
        Ok(map) => (map, body),
        Err(err) => {
            tracing::warn!(error = %err, "Malformed front-matter block, treating as absent");
            (HashMap::new(), text)
        }
    }
}

/// Extract the raw YAML block and the body following its closing delimiter.
fn extract_block(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix(DELIMITER)?;
    let rest = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_well_formed_block() {
        let text = "---\ntitle: Guide\norder: 3\n---\n# Heading\n\nBody text.\n";
        let (meta, body) = split_frontmatter(text);

        assert_eq!(meta.get("title"), Some(&serde_json::json!("Guide")));
        assert_eq!(meta.get("order"), Some(&serde_json::json!(3)));
        assert_eq!(body, "# Heading\n\nBody text.\n");
    }

    #[test]
    fn test_split_contains_exactly_declared_keys() {
        let text = "---\ntitle: Guide\ndraft: true\n---\nBody";
        let (meta, _) = split_frontmatter(text);

        let mut keys: Vec<_> = meta.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["draft", "title"]);
    }

    #[test]
    fn test_split_structured_values() {
        let text = "---\ntags:\n  - rust\n  - docs\nauthor:\n  name: Ada\n---\nBody";
        let (meta, body) = split_frontmatter(text);

        assert_eq!(meta.get("tags"), Some(&serde_json::json!(["rust", "docs"])));
        assert_eq!(meta.get("author"), Some(&serde_json::json!({"name": "Ada"})));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_no_block() {
        let text = "# Just a document\n";
        let (meta, body) = split_frontmatter(text);

        assert!(meta.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_split_empty_block() {
        let text = "---\n---\nBody";
        let (meta, body) = split_frontmatter(text);

        assert!(meta.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_unterminated_block_is_absent() {
        let text = "---\ntitle: Guide\nBody without closing delimiter";
        let (meta, body) = split_frontmatter(text);

        assert!(meta.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_split_malformed_yaml_is_absent() {
        let text = "---\ntitle: [unclosed\n---\nBody";
        let (meta, body) = split_frontmatter(text);

        assert!(meta.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_split_non_mapping_yaml_is_absent() {
        let text = "---\njust a scalar\n---\nBody";
        let (meta, body) = split_frontmatter(text);

        assert!(meta.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_split_crlf_delimiters() {
        let text = "---\r\ntitle: Guide\r\n---\r\nBody";
        let (meta, body) = split_frontmatter(text);

        assert_eq!(meta.get("title"), Some(&serde_json::json!("Guide")));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_delimiter_not_at_start_ignored() {
        let text = "intro\n---\ntitle: Guide\n---\nBody";
        let (meta, body) = split_frontmatter(text);

        assert!(meta.is_empty());
        assert_eq!(body, text);
    }

    #[test]
    fn test_split_dashes_inside_body_untouched() {
        let text = "---\ntitle: Guide\n---\nBody\n\n---\n\nMore body";
        let (_, body) = split_frontmatter(text);

        assert_eq!(body, "Body\n\n---\n\nMore body");
    }
}
