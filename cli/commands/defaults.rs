use anyhow::{Context, Result};
use colored::*;
use projmap_core::SettingsStore;

use crate::prompt;

pub fn handle_set_defaults_command(quiet: bool) -> Result<()> {
    let mut store = SettingsStore::open_default().context("Failed to open settings store")?;
    let current = store.defaults();

    let ignored_patterns = prompt::edit_lines(
        "Edit default ignored patterns (one per line):",
        &current.ignored_patterns,
    )?;
    let included_extensions = prompt::edit_lines(
        "Edit default included extensions (one per line):",
        &current.included_extensions,
    )?;

    store
        .update_defaults(Some(ignored_patterns), Some(included_extensions))
        .context("Failed to update default configuration")?;
    log::debug!("Defaults persisted to {}", store.path().display());
    if !quiet {
        println!("{}", "Default configuration updated!".green());
    }
    Ok(())
}
