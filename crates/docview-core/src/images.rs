//! Image reference resolution for the proxy endpoint.
//!
//! Markdown documents reference images relative to their own directory,
//! absolute from the document root, or as external URLs. The first two are
//! routed through the guarded image-proxy endpoint; external URLs pass
//! through untouched.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters that survive percent-encoding in the proxy query value.
///
/// Everything else — slashes, spaces, percent signs — is escaped, since the
/// root-relative path travels as a single query-string value.
const PROXY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Classified image reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSrc {
    /// External URL, never proxied.
    External(String),
    /// Root-relative path to fetch through the proxy endpoint. A leading
    /// `/` from a root-absolute reference is preserved here; the serving
    /// side strips it before the containment check.
    Proxy(String),
}

/// Resolve an image reference found in a document.
///
/// `document_dir` is the document's directory as a root-relative path
/// (empty for documents at the root). References starting with `http:`,
/// `https:` or `data:` pass through; references starting with `/` are
/// already root-relative; anything else is joined onto `document_dir`.
///
/// No `..` resolution happens here — containment is enforced by the guard
/// at fetch time.
#[must_use]
pub fn resolve_image_ref(document_dir: &str, src: &str) -> ImageSrc {
    if src.starts_with("http:") || src.starts_with("https:") || src.starts_with("data:") {
        return ImageSrc::External(src.to_owned());
    }

    if src.starts_with('/') {
        return ImageSrc::Proxy(src.to_owned());
    }

    let rel = src.strip_prefix("./").unwrap_or(src);
    let combined = if document_dir.is_empty() {
        rel.to_owned()
    } else {
        format!("{document_dir}/{rel}")
    };
    ImageSrc::Proxy(combined)
}

/// Build the proxy URL for a root-relative image path.
#[must_use]
pub fn proxy_url(path: &str) -> String {
    format!(
        "/api/images?path={}",
        utf8_percent_encode(path, PROXY_ENCODE_SET)
    )
}

/// Apply the defensive second decode to an incoming proxy query value.
///
/// The HTTP layer's query parsing already performed the first decode. Some
/// intermediaries encode the value a second time, so one more pass is
/// applied; when that pass produces invalid UTF-8 the failure is swallowed
/// and the once-decoded value is used.
#[must_use]
pub fn decode_proxy_path(value: &str) -> String {
    match percent_decode_str(value).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_relative_ref_joined_onto_document_dir() {
        assert_eq!(
            resolve_image_ref("A/B", "./images/pic.png"),
            ImageSrc::Proxy("A/B/images/pic.png".to_owned())
        );
    }

    #[test]
    fn test_relative_ref_without_dot_prefix() {
        assert_eq!(
            resolve_image_ref("A/B", "images/pic.png"),
            ImageSrc::Proxy("A/B/images/pic.png".to_owned())
        );
    }

    #[test]
    fn test_relative_ref_at_root_document() {
        assert_eq!(
            resolve_image_ref("", "./pic.png"),
            ImageSrc::Proxy("pic.png".to_owned())
        );
    }

    #[test]
    fn test_root_absolute_ref_keeps_marker() {
        assert_eq!(
            resolve_image_ref("A/B", "/images/pic.png"),
            ImageSrc::Proxy("/images/pic.png".to_owned())
        );
    }

    #[test]
    fn test_parent_ref_not_resolved_here() {
        // `..` survives; the guard rejects or resolves it at fetch time
        assert_eq!(
            resolve_image_ref("A/B", "../shared/pic.png"),
            ImageSrc::Proxy("A/B/../shared/pic.png".to_owned())
        );
    }

    #[test]
    fn test_external_refs_pass_through() {
        for url in [
            "http://example.com/x.png",
            "https://example.com/x.png",
            "data:image/png;base64,iVBOR",
        ] {
            assert_eq!(
                resolve_image_ref("A/B", url),
                ImageSrc::External(url.to_owned())
            );
        }
    }

    #[test]
    fn test_proxy_url_escapes_path() {
        assert_eq!(
            proxy_url("A/B/images/pic.png"),
            "/api/images?path=A%2FB%2Fimages%2Fpic.png"
        );
    }

    #[test]
    fn test_proxy_url_escapes_spaces_and_percents() {
        assert_eq!(
            proxy_url("dir/my pic 100%.png"),
            "/api/images?path=dir%2Fmy%20pic%20100%25.png"
        );
    }

    #[test]
    fn test_decode_proxy_path_plain_value_unchanged() {
        assert_eq!(decode_proxy_path("A/B/pic.png"), "A/B/pic.png");
    }

    #[test]
    fn test_decode_proxy_path_double_encoded_value() {
        // intermediary encoded the already-encoded value once more
        assert_eq!(decode_proxy_path("A%2FB%2Fpic.png"), "A/B/pic.png");
    }

    #[test]
    fn test_decode_proxy_path_invalid_utf8_swallowed() {
        assert_eq!(decode_proxy_path("pic%FF.png"), "pic%FF.png");
    }
}
