mod cli_args;
mod clipboard;
mod commands;
mod output;
mod prompt;

use anyhow::Result;
use clap::Parser;
use colored::*;
use log;
use std::process;

use cli_args::Cli;
use projmap_core::AppError;

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);
    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(&cli_args) {
        Ok(()) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let exit_code = exit_code_for(&e);
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: &Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        log::debug!("Executing completions for {}", shell);
        return commands::completion::handle_completion_command(shell);
    }
    if cli.set_defaults {
        log::debug!("Executing set-defaults...");
        return commands::defaults::handle_set_defaults_command(cli.quiet);
    }
    commands::map::handle_map_command(cli)
}

/// 1: bad input or configuration, 2: filesystem, 3: settings store.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<AppError>() {
        Some(e) if e.is_input_error() => 1,
        Some(AppError::Traversal { .. }) => 2,
        Some(AppError::Io(_)) => 2,
        Some(AppError::FileWrite { .. }) => 2,
        Some(AppError::DirCreation { .. }) => 2,
        Some(AppError::SettingsRead { .. }) => 3,
        Some(AppError::SettingsWrite { .. }) => 3,
        Some(AppError::TomlParse(_)) => 3,
        Some(AppError::TomlSerialize(_)) => 3,
        Some(_) => 1,
        None => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn exit_codes_follow_error_kind() {
        let invalid = anyhow::Error::from(AppError::InvalidDirectory(PathBuf::from("nope")));
        assert_eq!(exit_code_for(&invalid), 1);

        let traversal = anyhow::Error::from(AppError::Traversal {
            path: PathBuf::from("src"),
            source: io::Error::other("denied"),
        });
        assert_eq!(exit_code_for(&traversal), 2);

        let parse = anyhow::Error::from(AppError::TomlParse("bad".to_string()));
        assert_eq!(exit_code_for(&parse), 3);

        assert_eq!(exit_code_for(&anyhow::anyhow!("plain")), 1);
    }

    #[test]
    fn context_does_not_hide_the_error_kind() {
        let err = anyhow::Error::from(AppError::SettingsWrite {
            path: PathBuf::from("settings.toml"),
            source: io::Error::other("read-only"),
        })
        .context("Failed to save project configuration");
        assert_eq!(exit_code_for(&err), 3);
    }
}
