use crate::tree::Node;
use indexmap::IndexMap;
use log;

pub const ROOT_BRANCH: &str = "└─";
pub const NESTED_BRANCH: &str = "├─";
pub const DIRECTORY_GLYPH: &str = "📁";
pub const FILE_GLYPH: &str = "📄";
pub const CONTENTS_HEADING: &str = "## File Contents";
const BEGIN_MARKER: &str = "### Begin File: ";
const END_MARKER: &str = "### End File: ";
const FENCE: &str = "```";
const SEPARATOR: &str = "-----";

/// Relative path to raw file content, in pre-order traversal order.
pub type ContentMap = IndexMap<String, String>;

/// Renders the tree listing followed, if any node carries non-empty content,
/// by the file contents appendix. Empty files are listed but get no block.
pub fn render(nodes: &[Node]) -> String {
    let mut out = String::new();
    let contents = render_tree(nodes, 0, &mut out);
    if !contents.is_empty() {
        log::debug!("Appending contents for {} files", contents.len());
        render_contents(&contents, &mut out);
    }
    out
}

/// Writes one line per node into `out` and returns the contents met along the way.
pub fn render_tree(nodes: &[Node], depth: usize, out: &mut String) -> ContentMap {
    let mut contents = ContentMap::new();
    let indent = "  ".repeat(depth);
    let branch = if depth == 0 { ROOT_BRANCH } else { NESTED_BRANCH };

    for node in nodes {
        let glyph = if node.is_dir() { DIRECTORY_GLYPH } else { FILE_GLYPH };
        out.push_str(&format!("{indent}{branch} {glyph} {}\n", node.name()));

        match node {
            Node::Directory(dir) => {
                if let Some(description) = &dir.description {
                    out.push_str(&format!("{indent}   {description}\n"));
                }
                for (path, content) in render_tree(&dir.children, depth + 1, out) {
                    contents.entry(path).or_insert(content);
                }
            }
            Node::File(file) => {
                if let Some(content) = file.content.as_ref().filter(|c| !c.is_empty()) {
                    contents
                        .entry(file.path.clone())
                        .or_insert_with(|| content.clone());
                }
            }
        }
    }
    contents
}

pub fn render_contents(contents: &ContentMap, out: &mut String) {
    out.push('\n');
    out.push_str(CONTENTS_HEADING);
    out.push_str("\n\n");
    for (path, content) in contents {
        let extension = path.rsplit('.').next().unwrap_or_default();
        out.push_str(&format!("{BEGIN_MARKER}{path}\n"));
        out.push_str(&format!("{FENCE}{extension}\n"));
        out.push_str(content);
        out.push_str(&format!("\n{FENCE}\n{END_MARKER}{path}\n\n{SEPARATOR}\n\n"));
    }
}

/// Recovers the embedded file contents from rendered output or a full report.
pub fn extract_file_contents(text: &str) -> ContentMap {
    let mut contents = ContentMap::new();
    let mut rest = text;

    while let Some(begin) = rest.find(BEGIN_MARKER) {
        let after_marker = &rest[begin + BEGIN_MARKER.len()..];
        let Some(path_end) = after_marker.find('\n') else {
            break;
        };
        let path = &after_marker[..path_end];
        let after_path = &after_marker[path_end + 1..];

        let Some(fence_end) = after_path.find('\n') else {
            break;
        };
        if !after_path.starts_with(FENCE) {
            rest = after_path;
            continue;
        }
        let body = &after_path[fence_end + 1..];

        let closing = format!("\n{FENCE}\n{END_MARKER}{path}\n");
        let Some(body_end) = body.find(&closing) else {
            log::warn!("Unterminated content block for {}", path);
            break;
        };
        contents.insert(path.to_string(), body[..body_end].to_string());
        rest = &body[body_end + closing.len()..];
    }
    contents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{DirectoryNode, FileNode};
    use pretty_assertions::assert_eq;

    fn file(path: &str, content: Option<&str>) -> Node {
        Node::File(FileNode {
            name: path.rsplit('/').next().unwrap().to_string(),
            path: path.to_string(),
            content: content.map(String::from),
        })
    }

    fn dir(path: &str, description: Option<&str>, children: Vec<Node>) -> Node {
        Node::Directory(DirectoryNode {
            name: path.rsplit('/').next().unwrap().to_string(),
            path: path.to_string(),
            description: description.map(String::from),
            children,
        })
    }

    #[test]
    fn renders_tree_lines_with_depth_and_glyphs() {
        let nodes = vec![
            dir(
                "src",
                Some("Source code."),
                vec![dir("src/lib", None, vec![file("src/lib/a.ts", None)])],
            ),
            file("package.json", None),
        ];

        let expected = "└─ 📁 src\n   Source code.\n  ├─ 📁 lib\n    ├─ 📄 a.ts\n└─ 📄 package.json\n";
        assert_eq!(render(&nodes), expected);
    }

    #[test]
    fn appends_contents_section_in_preorder() {
        let nodes = vec![
            dir("src", None, vec![file("src/index.ts", Some("a"))]),
            file("README.md", Some("# Hi")),
        ];

        let expected = concat!(
            "└─ 📁 src\n",
            "  ├─ 📄 index.ts\n",
            "└─ 📄 README.md\n",
            "\n## File Contents\n\n",
            "### Begin File: src/index.ts\n```ts\na\n```\n### End File: src/index.ts\n\n-----\n\n",
            "### Begin File: README.md\n```md\n# Hi\n```\n### End File: README.md\n\n-----\n\n",
        );
        assert_eq!(render(&nodes), expected);
    }

    #[test]
    fn no_contents_section_without_content() {
        let nodes = vec![file("a.ts", None)];
        assert!(!render(&nodes).contains(CONTENTS_HEADING));
    }

    #[test]
    fn empty_content_gets_no_block() {
        let nodes = vec![file("empty.ts", Some(""))];
        assert_eq!(render(&nodes), "└─ 📄 empty.ts\n");

        let nodes = vec![file("empty.ts", Some("")), file("full.ts", Some("x"))];
        let rendered = render(&nodes);
        assert!(!rendered.contains("### Begin File: empty.ts"));
        assert!(rendered.contains("### Begin File: full.ts\n```ts\nx\n```\n"));
    }

    #[test]
    fn extraction_recovers_paths_and_bytes() {
        let tricky = "line one\n```inner fence```\n### End File: other.ts\n\n  trailing spaces  \n";
        let nodes = vec![
            dir(
                "src",
                None,
                vec![file("src/a.ts", Some(tricky)), file("src/b.ts", Some(""))],
            ),
            file("c.md", Some("no newline")),
        ];

        let extracted = extract_file_contents(&render(&nodes));
        let pairs: Vec<(&str, &str)> = extracted
            .iter()
            .map(|(p, c)| (p.as_str(), c.as_str()))
            .collect();
        assert_eq!(pairs, vec![("src/a.ts", tricky), ("c.md", "no newline")]);
    }
}
