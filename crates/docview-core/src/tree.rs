//! Document tree building by filesystem walking.
//!
//! Walks the document root into a [`FileNode`] tree for navigation. The
//! walk filters out hidden and excluded entries, keeps only markdown files,
//! prunes directories left without visible descendants, and orders siblings
//! directories-first.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::resolve::normalize;

/// Node kind within the document tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A directory containing at least one visible descendant.
    Directory,
    /// A markdown file.
    File,
}

/// One file or directory within the document tree.
#[derive(Clone, Debug, Serialize)]
pub struct FileNode {
    /// Base name (no path separators).
    pub name: String,
    /// Root-relative path with forward-slash separators; the routing key.
    pub path: String,
    /// Node kind.
    pub kind: NodeKind,
    /// Ordered children (directories only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileNode>,
}

/// Build the navigable document tree under `root`.
///
/// Filtering rules, applied per directory entry:
/// - names starting with `.` are skipped
/// - names in `exclude` are skipped
/// - directories are recursed into; directories whose filtered subtree is
///   empty are pruned (the pruning propagates upward)
/// - files are kept only with an `.md` extension
///
/// Siblings are ordered directories-first, then case-insensitive by name
/// within each kind.
///
/// A directory that cannot be read (permissions, deletion race) yields an
/// empty subtree; the failure is logged and the rest of the tree still
/// builds. A missing `root` therefore produces an empty tree.
#[must_use]
pub fn build_tree(root: &Path, exclude: &[String]) -> Vec<FileNode> {
    let root = normalize(root);
    scan_directory(&root, &root, "", exclude)
}

/// Scan one directory level, accumulating the root-relative path prefix.
fn scan_directory(root: &Path, dir: &Path, prefix: &str, exclude: &[String]) -> Vec<FileNode> {
    // Recursion follows real directory entries, so this only triggers for
    // unexpected symlink layouts; it mirrors the request-path guard.
    if !normalize(dir).starts_with(root) {
        tracing::warn!(dir = %dir.display(), "Skipping directory outside document root");
        return Vec::new();
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::warn!(dir = %dir.display(), error = %err, "Failed to read directory");
            return Vec::new();
        }
    };

    let mut nodes = Vec::new();
    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || exclude.iter().any(|e| e == &name) {
            continue;
        }

        let path = entry.path();
        let rel_path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };

        // fs::metadata follows symlinks, so a symlinked directory is walked
        // like a real one (and caught by the containment check above when it
        // points outside the root).
        if fs::metadata(&path).is_ok_and(|m| m.is_dir()) {
            let children = scan_directory(root, &path, &rel_path, exclude);
            if children.is_empty() {
                continue;
            }
            nodes.push(FileNode {
                name,
                path: rel_path,
                kind: NodeKind::Directory,
                children,
            });
        } else if path.extension().is_some_and(|e| e == "md") {
            nodes.push(FileNode {
                name,
                path: rel_path,
                kind: NodeKind::File,
                children: Vec::new(),
            });
        }
    }

    nodes.sort_by(compare_siblings);
    nodes
}

/// Directories before files; case-insensitive name order within each kind.
fn compare_siblings(a: &FileNode, b: &FileNode) -> Ordering {
    match (a.kind, b.kind) {
        (NodeKind::Directory, NodeKind::File) => Ordering::Less,
        (NodeKind::File, NodeKind::Directory) => Ordering::Greater,
        _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    fn no_exclude() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_tree_finds_md_files() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("guide.md"), "# Guide").unwrap();

        let nodes = build_tree(temp_dir.path(), &no_exclude());

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "guide.md");
        assert_eq!(nodes[0].path, "guide.md");
        assert_eq!(nodes[0].kind, NodeKind::File);
    }

    #[test]
    fn test_tree_nested_paths_use_forward_slashes() {
        let temp_dir = create_test_dir();
        let sub = temp_dir.path().join("guide");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("intro.md"), "# Intro").unwrap();

        let nodes = build_tree(temp_dir.path(), &no_exclude());

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].path, "guide");
        assert_eq!(nodes[0].kind, NodeKind::Directory);
        assert_eq!(nodes[0].children[0].path, "guide/intro.md");
    }

    #[test]
    fn test_tree_skips_hidden_files() {
        let temp_dir = create_test_dir();
        let sub = temp_dir.path().join("guide");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("intro.md"), "# Intro").unwrap();
        fs::write(sub.join(".secret.md"), "# Secret").unwrap();

        let nodes = build_tree(temp_dir.path(), &no_exclude());

        let guide = &nodes[0];
        assert_eq!(guide.children.len(), 1);
        assert_eq!(guide.children[0].path, "guide/intro.md");
    }

    #[test]
    fn test_tree_skips_excluded_names() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("visible.md"), "x").unwrap();
        let excluded = temp_dir.path().join("node_modules");
        fs::create_dir(&excluded).unwrap();
        fs::write(excluded.join("readme.md"), "x").unwrap();

        let nodes = build_tree(temp_dir.path(), &["node_modules".to_owned()]);

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "visible.md");
    }

    #[test]
    fn test_tree_drops_non_markdown_files() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("doc.md"), "x").unwrap();
        fs::write(temp_dir.path().join("image.png"), [0u8; 4]).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "x").unwrap();

        let nodes = build_tree(temp_dir.path(), &no_exclude());

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "doc.md");
    }

    #[test]
    fn test_tree_prunes_empty_directories() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join("empty")).unwrap();
        fs::write(temp_dir.path().join("doc.md"), "x").unwrap();

        let nodes = build_tree(temp_dir.path(), &no_exclude());

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "doc.md");
    }

    #[test]
    fn test_tree_prunes_directories_recursively() {
        // inner/ holds only a non-markdown file, so inner/ prunes, which
        // leaves outer/ empty, which prunes too
        let temp_dir = create_test_dir();
        let inner = temp_dir.path().join("outer").join("inner");
        fs::create_dir_all(&inner).unwrap();
        fs::write(inner.join("data.json"), "{}").unwrap();
        fs::write(temp_dir.path().join("doc.md"), "x").unwrap();

        let nodes = build_tree(temp_dir.path(), &no_exclude());

        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].name, "doc.md");
    }

    #[test]
    fn test_tree_never_contains_empty_directory_nodes() {
        fn assert_no_empty_dirs(nodes: &[FileNode]) {
            for node in nodes {
                if node.kind == NodeKind::Directory {
                    assert!(!node.children.is_empty(), "empty directory: {}", node.path);
                    assert_no_empty_dirs(&node.children);
                }
            }
        }

        let temp_dir = create_test_dir();
        let a = temp_dir.path().join("a");
        fs::create_dir_all(a.join("empty1").join("empty2")).unwrap();
        fs::write(a.join("doc.md"), "x").unwrap();

        let nodes = build_tree(temp_dir.path(), &no_exclude());
        assert_no_empty_dirs(&nodes);
    }

    #[test]
    fn test_tree_sorts_directories_before_files() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("aaa.md"), "x").unwrap();
        let sub = temp_dir.path().join("zzz");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("doc.md"), "x").unwrap();

        let nodes = build_tree(temp_dir.path(), &no_exclude());

        assert_eq!(nodes[0].name, "zzz");
        assert_eq!(nodes[0].kind, NodeKind::Directory);
        assert_eq!(nodes[1].name, "aaa.md");
        assert_eq!(nodes[1].kind, NodeKind::File);
    }

    #[test]
    fn test_tree_sorts_names_case_insensitively() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("Beta.md"), "x").unwrap();
        fs::write(temp_dir.path().join("alpha.md"), "x").unwrap();
        fs::write(temp_dir.path().join("Gamma.md"), "x").unwrap();

        let nodes = build_tree(temp_dir.path(), &no_exclude());

        let names: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["alpha.md", "Beta.md", "Gamma.md"]);
    }

    #[test]
    fn test_tree_missing_root_is_empty() {
        let nodes = build_tree(Path::new("/nonexistent-docview-root"), &no_exclude());
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_node_serialization() {
        let node = FileNode {
            name: "guide".to_owned(),
            path: "guide".to_owned(),
            kind: NodeKind::Directory,
            children: vec![FileNode {
                name: "intro.md".to_owned(),
                path: "guide/intro.md".to_owned(),
                kind: NodeKind::File,
                children: Vec::new(),
            }],
        };

        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["kind"], "directory");
        assert_eq!(json["children"][0]["kind"], "file");
        assert_eq!(json["children"][0]["path"], "guide/intro.md");
        // leaf nodes omit the children array entirely
        assert!(json["children"][0].get("children").is_none());
    }
}
