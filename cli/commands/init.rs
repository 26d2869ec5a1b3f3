use anyhow::{Context, Result};
use colored::*;
use log;
use projmap_core::config::{DEFAULT_OUTPUT_DIR, GITIGNORE_FILENAME};
use projmap_core::{ProjectConfig, SettingsStore, load_gitignore};
use std::path::{Path, PathBuf};

use crate::cli_args::Cli;
use crate::prompt;

/// Interactively builds a project config for `cwd` and saves it to `store`.
pub fn initialize_project(
    cli: &Cli,
    cwd: &Path,
    store: &mut SettingsStore,
) -> Result<ProjectConfig> {
    let defaults = store.defaults();
    let gitignore = load_gitignore(cwd);
    if gitignore.is_none() && !cli.quiet {
        println!(
            "{}",
            format!("No {} found. Using default ignore patterns.", GITIGNORE_FILENAME).yellow()
        );
    }

    let root_dir = if prompt::confirm("Use current directory as project root?", true)? {
        cwd.to_path_buf()
    } else {
        let answer = prompt::input("Project root directory:", &cwd.display().to_string())?;
        resolve_root(cwd, &answer)?
    };
    log::debug!("Initializing project rooted at {}", root_dir.display());

    let mut config = ProjectConfig::new(&root_dir);

    if !cli.clipboard {
        let output = prompt::input("Output directory for structure files:", DEFAULT_OUTPUT_DIR)?;
        config = config.with_output_path(output);
    }

    let seed_patterns = gitignore.unwrap_or(defaults.ignored_patterns);
    let ignored_patterns = if cli.config_ignored {
        prompt::edit_lines("Edit ignored patterns (one per line):", &seed_patterns)?
    } else {
        seed_patterns
    };
    config = config.with_ignored_patterns(ignored_patterns);

    let included_extensions = if cli.config_extensions {
        prompt::edit_lines(
            "Edit included file extensions (one per line):",
            &defaults.included_extensions,
        )?
    } else {
        defaults.included_extensions
    };
    config = config.with_included_extensions(included_extensions);

    if let Some(name) = cli.project_name.as_deref().filter(|n| !n.trim().is_empty()) {
        config = config.with_project_name(name.trim());
    }

    config.validate()?;
    store
        .save_project_config(&config)
        .context("Failed to save project configuration")?;
    if !cli.quiet {
        println!("{}", "Project configuration saved!".green());
    }
    Ok(config)
}

fn resolve_root(cwd: &Path, answer: &str) -> Result<PathBuf> {
    let expanded = PathBuf::from(shellexpand::tilde(answer.trim()).as_ref());
    let root = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };
    if !root.is_dir() {
        return Err(projmap_core::AppError::InvalidDirectory(root).into());
    }
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn relative_root_is_resolved_against_cwd() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("app")).unwrap();
        let root = resolve_root(dir.path(), " app ").unwrap();
        assert_eq!(root, dir.path().join("app"));
    }

    #[test]
    fn missing_root_is_rejected() {
        let dir = tempdir().unwrap();
        let err = resolve_root(dir.path(), "missing").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<projmap_core::AppError>(),
            Some(projmap_core::AppError::InvalidDirectory(_))
        ));
    }
}
