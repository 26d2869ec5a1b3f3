use anyhow::{Context, Result};
use colored::*;
use log;
use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process::Command;

pub fn confirm(message: &str, default: bool) -> Result<bool> {
    let stdin = io::stdin();
    confirm_with(&mut stdin.lock(), &mut io::stdout(), message, default)
}

pub fn input(message: &str, default: &str) -> Result<String> {
    let stdin = io::stdin();
    input_with(&mut stdin.lock(), &mut io::stdout(), message, default)
}

pub fn confirm_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
    default: bool,
) -> Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    write!(writer, "{} {} ({}) ", "?".green(), message.bold(), hint)?;
    writer.flush().context("Failed to flush stdout")?;

    let answer = read_answer(reader)?;
    Ok(match answer.to_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    })
}

pub fn input_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
    default: &str,
) -> Result<String> {
    write!(writer, "{} {} ({}) ", "?".green(), message.bold(), default.dimmed())?;
    writer.flush().context("Failed to flush stdout")?;

    let answer = read_answer(reader)?;
    Ok(if answer.is_empty() {
        default.to_string()
    } else {
        answer
    })
}

fn read_answer<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut response = String::new();
    reader
        .read_line(&mut response)
        .context("Failed to read user input")?;
    Ok(response.trim().to_string())
}

/// Opens the user's editor on `default_lines` and returns the edited, non-empty lines.
pub fn edit_lines(message: &str, default_lines: &[String]) -> Result<Vec<String>> {
    println!("{} {}", "?".green(), message.bold());
    edit_lines_with(&editor_command(), default_lines)
}

fn edit_lines_with(editor: &str, default_lines: &[String]) -> Result<Vec<String>> {
    let mut scratch = tempfile::Builder::new()
        .prefix("projmap-")
        .suffix(".txt")
        .tempfile()
        .context("Failed to create editor scratch file")?;
    let write_result = scratch
        .write_all(default_lines.join("\n").as_bytes())
        .and_then(|()| scratch.flush());
    write_result.with_context(|| format!("Failed to write {}", scratch.path().display()))?;

    log::debug!("Launching editor '{}' on {}", editor, scratch.path().display());
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");
    let status = Command::new(program)
        .args(parts)
        .arg(scratch.path())
        .status()
        .with_context(|| format!("Failed to launch editor '{}'", editor))?;
    if !status.success() {
        anyhow::bail!("Editor '{}' exited with status: {}", editor, status);
    }

    let edited = fs::read_to_string(scratch.path())
        .with_context(|| format!("Failed to read {}", scratch.path().display()))?;
    Ok(parse_lines(&edited))
}

fn editor_command() -> String {
    env::var("VISUAL")
        .or_else(|_| env::var("EDITOR"))
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "vi".to_string()
            }
        })
}

pub fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
