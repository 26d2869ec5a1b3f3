use crate::clipboard;
use anyhow::{Context, Result};
use colored::*;
use projmap_core::Report;
use std::path::Path;

pub fn save_report(report: &Report, path: &Path, quiet: bool) -> Result<()> {
    report
        .write_to(path)
        .with_context(|| format!("Failed to save project structure to {}", path.display()))?;
    if !quiet {
        println!(
            "{} Project structure saved to: {}",
            "✅".green(),
            path.display().to_string().blue()
        );
    }
    Ok(())
}

pub fn copy_report(report: &Report, quiet: bool) -> Result<()> {
    clipboard::copy_to_clipboard(&report.content)
        .context("Failed to copy project structure to clipboard")?;
    if !quiet {
        println!("{}", "Project structure copied to clipboard!".green());
    }
    Ok(())
}
