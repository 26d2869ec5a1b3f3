use anyhow::{Context, Result};
use log;
use projmap_core::{ProjectConfig, SettingsStore, generate_report};
use std::env;
use std::path::{Path, PathBuf};

use super::init;
use crate::cli_args::Cli;
use crate::output;

pub fn handle_map_command(cli: &Cli) -> Result<()> {
    let cwd = env::current_dir().context("Failed to determine current directory")?;
    let mut store = SettingsStore::open_default().context("Failed to open settings store")?;

    let stored = if cli.init {
        None
    } else {
        store.project_config_for(&cwd)?
    };
    let mut config = match stored {
        Some(config) => config,
        None => init::initialize_project(cli, &cwd, &mut store)?,
    };
    if let Some(name) = cli.project_name.as_deref().filter(|n| !n.trim().is_empty()) {
        config = config.with_project_name(name.trim());
    }

    let include_content = cli.content || config.include_content.unwrap_or(false);
    let target = cli.target_path();
    log::info!(
        "Mapping {} (target: {}, content: {})",
        config.root_dir.display(),
        target.unwrap_or("."),
        include_content
    );

    let report = generate_report(&config, target, include_content)?;
    if cli.clipboard {
        output::copy_report(&report, cli.quiet)
    } else {
        let path = destination(&config, cli.output_path(), &report.output_path);
        output::save_report(&report, &path, cli.quiet)
    }
}

/// `--output` is taken relative to the project root; otherwise the suggested path is used.
fn destination(config: &ProjectConfig, output: Option<PathBuf>, suggested: &Path) -> PathBuf {
    match output {
        Some(path) => config.root_dir.join(path),
        None => suggested.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_output_is_joined_with_root() {
        let config = ProjectConfig::new("/work/app");
        let suggested = Path::new("/work/app/docs/structure/PROJECT_STRUCTURE.md");
        assert_eq!(
            destination(&config, Some(PathBuf::from("out/map.md")), suggested),
            PathBuf::from("/work/app/out/map.md")
        );
        assert_eq!(destination(&config, None, suggested), suggested);
    }
}
