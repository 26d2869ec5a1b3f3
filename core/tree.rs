use crate::config::{ProjectConfig, README_FILENAME, to_forward_slashes};
use crate::error::Result;
use crate::matcher::Matcher;
use log;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    pub name: String,
    /// Relative to the configured root, forward slashes.
    pub path: String,
    pub description: Option<String>,
    /// Never empty: directories with no visible entries are dropped by their parent.
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    pub name: String,
    /// Relative to the configured root, forward slashes.
    pub path: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Directory(DirectoryNode),
    File(FileNode),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.name,
            Node::File(file) => &file.name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.path,
            Node::File(file) => &file.path,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Node::Directory(_))
    }
}

/// Walks `directory` and returns its visible entries, sorted.
///
/// Paths on the returned nodes are relative to `config.root_dir`. The root
/// call never attaches a description to `directory` itself; only
/// subdirectories reached during recursion get one.
pub fn build(directory: &Path, config: &ProjectConfig, embed_content: bool) -> Result<Vec<Node>> {
    let matcher = Matcher::from_config(config)?;
    log::info!("Mapping directory: {}", directory.display());
    let nodes = TreeBuilder {
        root: &config.root_dir,
        matcher: &matcher,
        embed_content,
    }
    .build_dir(directory)?;
    log::info!("Mapping complete: {} top-level entries", nodes.len());
    Ok(nodes)
}

struct TreeBuilder<'a> {
    root: &'a Path,
    matcher: &'a Matcher,
    embed_content: bool,
}

impl TreeBuilder<'_> {
    fn build_dir(&self, dir_path: &Path) -> Result<Vec<Node>> {
        log::debug!("Listing {}", dir_path.display());
        let mut nodes = Vec::new();

        for entry in WalkDir::new(dir_path).min_depth(1).max_depth(1) {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();

            if self.matcher.is_ignored(&name) {
                log::trace!("Ignored: {}", entry.path().display());
                continue;
            }

            let full_path = entry.path();
            let relative_path = self.relative_path(full_path);

            if entry.file_type().is_dir() {
                let children = self.build_dir(full_path)?;
                if children.is_empty() {
                    log::trace!("Dropping empty directory: {}", relative_path);
                    continue;
                }
                nodes.push(Node::Directory(DirectoryNode {
                    name,
                    path: relative_path,
                    description: read_description(full_path),
                    children,
                }));
            } else if self.matcher.is_included(&name) {
                let content = if self.embed_content {
                    read_content(full_path)
                } else {
                    None
                };
                nodes.push(Node::File(FileNode {
                    name,
                    path: relative_path,
                    content,
                }));
            } else {
                log::trace!("Excluded by extension: {}", relative_path);
            }
        }

        sort_nodes(&mut nodes);
        Ok(nodes)
    }

    fn relative_path(&self, full_path: &Path) -> String {
        let relative = pathdiff::diff_paths(full_path, self.root)
            .unwrap_or_else(|| PathBuf::from(full_path.file_name().unwrap_or_default()));
        to_forward_slashes(&relative)
    }
}

/// Directories first, then files; names compared case-insensitively with
/// lower-case winning ties.
pub fn sort_nodes(nodes: &mut [Node]) {
    nodes.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => compare_names(a.name(), b.name()),
    });
}

/// Locale-like ordering for ASCII names only: non-ASCII letters compare by code
/// point after lower-casing, so `é.ts` sorts after `f.ts`.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// First paragraph of `<dir>/README.md` that is not a heading.
pub fn read_description(dir: &Path) -> Option<String> {
    let readme_path = dir.join(README_FILENAME);
    let content = match fs::read_to_string(&readme_path) {
        Ok(content) => content,
        Err(e) => {
            log::trace!("No description from {}: {}", readme_path.display(), e);
            return None;
        }
    };
    extract_description(&content)
}

pub fn extract_description(readme: &str) -> Option<String> {
    readme
        .replace("\r\n", "\n")
        .split("\n\n")
        .find(|paragraph| !paragraph.starts_with('#'))
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(String::from)
}

fn read_content(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            log::debug!("Skipping content of {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn file(name: &str) -> Node {
        Node::File(FileNode {
            name: name.to_string(),
            path: name.to_string(),
            content: None,
        })
    }

    fn dir(name: &str) -> Node {
        Node::Directory(DirectoryNode {
            name: name.to_string(),
            path: name.to_string(),
            description: None,
            children: vec![file("x.ts")],
        })
    }

    fn names(nodes: &[Node]) -> Vec<(&str, bool)> {
        nodes.iter().map(|n| (n.name(), n.is_dir())).collect()
    }

    #[test]
    fn directories_sort_before_files() {
        let mut nodes = vec![dir("b"), file("a"), dir("a")];
        sort_nodes(&mut nodes);
        assert_eq!(names(&nodes), vec![("a", true), ("b", true), ("a", false)]);
    }

    #[test]
    fn names_compare_case_insensitively() {
        let mut nodes = vec![file("b.ts"), file("B.ts"), file("A.ts"), file("a.ts")];
        sort_nodes(&mut nodes);
        assert_eq!(
            names(&nodes),
            vec![
                ("a.ts", false),
                ("A.ts", false),
                ("b.ts", false),
                ("B.ts", false)
            ]
        );
    }

    #[test]
    fn non_ascii_names_compare_by_code_point() {
        assert_eq!(compare_names("é.ts", "f.ts"), Ordering::Greater);
        assert_eq!(compare_names("Éa", "éa"), Ordering::Greater);
    }

    #[test]
    fn description_skips_heading_paragraphs() {
        let readme = "# Title\n\nShort summary\nover two lines.\n\nMore text.";
        assert_eq!(
            extract_description(readme).as_deref(),
            Some("Short summary\nover two lines.")
        );
        assert_eq!(extract_description("# Only a heading"), None);
        assert_eq!(
            extract_description("# T\r\n\r\n  Windows text  \r\n").as_deref(),
            Some("Windows text")
        );
    }

    #[test]
    fn unreadable_content_degrades_to_none() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("bad.ts");
        fs::write(&path, [0xffu8, 0xfe, 0x00]).unwrap();
        assert_eq!(read_content(&path), None);
    }

    #[test]
    fn build_fails_for_missing_directory() {
        let tmp = tempdir().unwrap();
        let config = ProjectConfig::new(tmp.path());
        let result = build(&tmp.path().join("gone"), &config, false);
        assert!(matches!(result, Err(AppError::Traversal { .. })));
    }
}
