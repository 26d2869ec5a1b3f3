use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io;

use crate::cli_args::Cli;

pub fn handle_completion_command(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let bin_name = command.get_name().to_string();
    log::debug!("Generating {} completions for {}", shell, bin_name);
    generate(shell, &mut command, bin_name, &mut io::stdout());
    Ok(())
}
