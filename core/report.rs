use crate::config::{DEFAULT_OUTPUT_FILENAME, ProjectConfig};
use crate::error::{AppError, Result};
use crate::render;
use crate::tree;
use chrono::{DateTime, SecondsFormat, Utc};
use log;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub content: String,
    pub output_path: PathBuf,
}

impl Report {
    /// Writes the document to `path`, creating missing parent directories.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::DirCreation {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        fs::write(path, &self.content).map_err(|e| AppError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::info!("Report written to {}", path.display());
        Ok(())
    }
}

/// Maps the project (or `target_subpath` inside it) into a Markdown report.
///
/// The only impurity is the embedded generation timestamp.
pub fn generate_report(
    config: &ProjectConfig,
    target_subpath: Option<&str>,
    include_content: bool,
) -> Result<Report> {
    config.validate()?;
    let target_subpath = target_subpath.filter(|t| !t.trim().is_empty());

    let base_dir = match target_subpath {
        Some(target) => {
            let resolved = config.root_dir.join(target);
            if !resolved.is_dir() {
                log::error!("Target directory not found: {}", resolved.display());
                return Err(AppError::InvalidDirectory(PathBuf::from(target)));
            }
            resolved
        }
        None => config.root_dir.clone(),
    };

    let nodes = tree::build(&base_dir, config, include_content)?;
    let rendered = render::render(&nodes);
    Ok(assemble(config, target_subpath, include_content, &rendered))
}

pub fn assemble(
    config: &ProjectConfig,
    target_subpath: Option<&str>,
    include_content: bool,
    rendered_tree: &str,
) -> Report {
    assemble_at(
        config,
        target_subpath,
        include_content,
        rendered_tree,
        Utc::now(),
    )
}

pub fn assemble_at(
    config: &ProjectConfig,
    target_subpath: Option<&str>,
    include_content: bool,
    rendered_tree: &str,
    generated_at: DateTime<Utc>,
) -> Report {
    let mut content = format!("# {}\n\n", title(config, target_subpath));
    content.push_str(&format!(
        "_Generated at {}_\n\n",
        generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    ));

    let scope = match target_subpath {
        Some(target) => format!("'{}' directory", target),
        None => "project".to_string(),
    };
    content.push_str(&format!(
        "This document provides a comprehensive map of the {} structure",
        scope
    ));
    if include_content {
        content.push_str(" including file contents");
    }
    content.push_str(". It is automatically generated to maintain accuracy and serves as a reference ");
    content.push_str("for developers and AI assistants working with the codebase.\n\n");

    content.push_str("## Project Structure\n\n");
    content.push_str(&format!("```\n{}```\n", rendered_tree));

    Report {
        content,
        output_path: config.output_dir().join(output_file_name(target_subpath)),
    }
}

pub fn title(config: &ProjectConfig, target_subpath: Option<&str>) -> String {
    let mut title = format!("{} Structure", config.effective_project_name());
    if let Some(target) = target_subpath {
        title.push_str(&format!(" - {}", target));
    }
    title
}

pub fn output_file_name(target_subpath: Option<&str>) -> String {
    match target_subpath {
        Some(target) => format!("PROJECT_STRUCTURE.{}.md", sanitize_path_for_filename(target)),
        None => DEFAULT_OUTPUT_FILENAME.to_string(),
    }
}

pub fn sanitize_path_for_filename(path: &str) -> String {
    path.replace(['/', '\\'], "__")
}
