use crate::error::{AppError, Result};
use log;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "docs/structure";
pub const DEFAULT_OUTPUT_FILENAME: &str = "PROJECT_STRUCTURE.md";
pub const README_FILENAME: &str = "README.md";
pub const GITIGNORE_FILENAME: &str = ".gitignore";

pub const DEFAULT_IGNORED_PATTERNS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".git",
    "*.log",
    ".DS_Store",
    ".next",
    ".turbo",
    "generated",
];

pub const DEFAULT_INCLUDED_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "json", "md", "yaml", "yml", "toml", "env", "config", "rc",
    "css", "scss", "postcss",
];

/// Everything one run of the engine needs to know about a project.
///
/// The engine only ever borrows this; persisting it is the job of
/// [`crate::settings::SettingsStore`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProjectConfig {
    pub root_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_content: Option<bool>,
    #[serde(default = "default_ignored_patterns")]
    pub ignored_patterns: Vec<String>,
    #[serde(default = "default_included_extensions")]
    pub included_extensions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
}

pub fn default_ignored_patterns() -> Vec<String> {
    DEFAULT_IGNORED_PATTERNS.iter().map(|s| s.to_string()).collect()
}

pub fn default_included_extensions() -> Vec<String> {
    DEFAULT_INCLUDED_EXTENSIONS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl ProjectConfig {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            output_path: None,
            include_content: None,
            ignored_patterns: default_ignored_patterns(),
            included_extensions: default_included_extensions(),
            project_name: None,
        }
    }

    pub fn with_ignored_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_included_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.included_extensions = normalize_extensions(extensions);
        self
    }

    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(output_path.into());
        self
    }

    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    pub fn with_include_content(mut self, include: bool) -> Self {
        self.include_content = Some(include);
        self
    }

    /// Cleans up values that may have come from a hand-edited settings file.
    pub fn normalized(mut self) -> Self {
        self.included_extensions = normalize_extensions(self.included_extensions);
        self.ignored_patterns = self
            .ignored_patterns
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.root_dir.is_dir() {
            return Err(AppError::InvalidDirectory(self.root_dir.clone()));
        }
        if let Some(output) = &self.output_path {
            if output.is_absolute() {
                return Err(AppError::Config(format!(
                    "Output path must be relative to the project root, got '{}'",
                    output.display()
                )));
            }
        }
        Ok(())
    }

    pub fn effective_project_name(&self) -> &str {
        self.project_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("Project")
    }

    pub fn output_dir(&self) -> PathBuf {
        match &self.output_path {
            Some(path) => self.root_dir.join(path),
            None => self.root_dir.join(DEFAULT_OUTPUT_DIR),
        }
    }
}

pub fn normalize_extensions<I, S>(extensions: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    extensions
        .into_iter()
        .map(|e| e.into().trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

/// Reads `.gitignore` in `dir` as a list of name patterns.
///
/// Returns `None` when the file does not exist or cannot be read.
pub fn load_gitignore(dir: &Path) -> Option<Vec<String>> {
    let gitignore_path = dir.join(GITIGNORE_FILENAME);
    let content = match fs::read_to_string(&gitignore_path) {
        Ok(content) => content,
        Err(e) => {
            log::debug!("No usable {}: {}", gitignore_path.display(), e);
            return None;
        }
    };

    let patterns: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| {
            if line.starts_with('!') {
                log::debug!("Skipping negated gitignore pattern: {}", line);
                return false;
            }
            true
        })
        .map(|line| line.trim_start_matches('/').trim_end_matches('/').to_string())
        .filter(|line| !line.is_empty())
        .collect();
    log::debug!(
        "Loaded {} patterns from {}",
        patterns.len(),
        gitignore_path.display()
    );
    Some(patterns)
}

/// Absolute, forward-slash form of `path`, used as the key for stored project settings.
pub fn normalize_path(path: &Path) -> Result<String> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut cleaned = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    Ok(to_forward_slashes(&cleaned))
}

pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn extensions_are_normalized() {
        let config = ProjectConfig::new("/tmp").with_included_extensions([".TS", " md ", ""]);
        assert_eq!(config.included_extensions, vec!["ts", "md"]);
    }

    #[test]
    fn output_dir_falls_back_to_docs_structure() {
        let config = ProjectConfig::new("/repo");
        assert_eq!(config.output_dir(), PathBuf::from("/repo/docs/structure"));

        let config = config.with_output_path("out");
        assert_eq!(config.output_dir(), PathBuf::from("/repo/out"));
    }

    #[test]
    fn blank_project_name_uses_fallback() {
        let config = ProjectConfig::new("/repo");
        assert_eq!(config.effective_project_name(), "Project");
        let config = config.with_project_name("  ");
        assert_eq!(config.effective_project_name(), "Project");
        let config = config.with_project_name("Demo");
        assert_eq!(config.effective_project_name(), "Demo");
    }

    #[test]
    fn validate_rejects_missing_root() {
        let dir = tempdir().unwrap();
        let config = ProjectConfig::new(dir.path().join("missing"));
        assert!(matches!(
            config.validate(),
            Err(AppError::InvalidDirectory(_))
        ));
        assert!(ProjectConfig::new(dir.path()).validate().is_ok());
    }

    #[test]
    fn gitignore_lines_become_name_patterns() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(".gitignore"),
            "# comment\n\n/target/\n*.log\n!keep.log\n  coverage  \n",
        )
        .unwrap();

        let patterns = load_gitignore(dir.path()).unwrap();
        assert_eq!(patterns, vec!["target", "*.log", "coverage"]);
    }

    #[test]
    fn missing_gitignore_is_none() {
        let dir = tempdir().unwrap();
        assert!(load_gitignore(dir.path()).is_none());
    }

    #[test]
    fn normalize_path_resolves_dots() {
        let normalized = normalize_path(Path::new("/a/b/../c/./d")).unwrap();
        assert_eq!(normalized, "/a/c/d");
    }
}
