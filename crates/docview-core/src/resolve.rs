//! Path resolution and containment guard.
//!
//! Every filesystem access driven by request input goes through
//! [`resolve_within`] first: it joins untrusted path segments onto the
//! document root and rejects any join that resolves outside it.

use std::path::{Component, Path, PathBuf};

/// Path resolution error.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The joined path resolved outside the document root.
    #[error("path escapes document root: {}", .0.display())]
    Traversal(PathBuf),
}

/// Join untrusted path segments onto `root`, rejecting escapes.
///
/// Segments are joined with normal path-join semantics and the result is
/// lexically normalized (`.` and `..` resolved without touching the
/// filesystem). The normalized result must still be contained in the
/// normalized `root`; anything else is a traversal attempt.
///
/// This is a lexical containment check, not a symlink-aware
/// canonicalization: a symlink inside the root pointing outside it is not
/// caught. Deployments that need strict containment should canonicalize
/// the tree before serving it.
///
/// # Errors
///
/// Returns [`ResolveError::Traversal`] when the joined path escapes `root`.
pub fn resolve_within<I, S>(root: &Path, segments: I) -> Result<PathBuf, ResolveError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let root = normalize(root);

    let mut joined = root.clone();
    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }
        joined.push(segment);
    }

    let resolved = normalize(&joined);
    if resolved.starts_with(&root) {
        Ok(resolved)
    } else {
        Err(ResolveError::Traversal(resolved))
    }
}

/// Lexically normalize a path, resolving `.` and `..` components.
///
/// `..` at the root of an absolute path is dropped (there is no parent to
/// ascend to), mirroring how the containment check treats the filesystem
/// root.
pub(crate) fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                normalized.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}
