use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "projmap",
    author,
    version,
    about = "Fast project structure documentation generator.",
    long_about = "projmap walks a project directory, applies ignore patterns and an extension \nallow-list, and writes a Markdown map of the structure, optionally with file contents, \nfor developers and AI assistants.",
    after_help = "EXAMPLES:\n  projmap\n  projmap src/components -c\n  projmap --clipboard\n  projmap --init --config-ignored"
)]
pub struct Cli {
    #[arg(value_name = "PATH", help = "Target subdirectory to map (optional).")]
    pub path: Option<String>,

    #[arg(short = 'c', long, help = "Include file contents in the output.")]
    pub content: bool,

    #[arg(
        short = 'o',
        long,
        value_name = "PATH",
        help = "Output file path (relative to project root).",
        help_heading = "Output Control"
    )]
    pub output: Option<String>,

    #[arg(
        long,
        conflicts_with = "output",
        help = "Copy output to clipboard instead of saving to file.",
        help_heading = "Output Control"
    )]
    pub clipboard: bool,

    #[arg(
        long,
        help = "Initialize project configuration.",
        help_heading = "Project Setup"
    )]
    pub init: bool,

    #[arg(
        long = "config-ignored",
        help = "Configure ignored patterns during initialization.",
        help_heading = "Project Setup"
    )]
    pub config_ignored: bool,

    #[arg(
        long = "config-extensions",
        help = "Configure included extensions during initialization.",
        help_heading = "Project Setup"
    )]
    pub config_extensions: bool,

    #[arg(
        long,
        value_name = "NAME",
        help = "Project name used in the report title.",
        help_heading = "Project Setup"
    )]
    pub project_name: Option<String>,

    #[arg(
        long,
        help = "Update default configuration for new projects.",
        help_heading = "Project Setup"
    )]
    pub set_defaults: bool,

    #[arg(long, value_enum, value_name = "SHELL", help = "Print shell completions and exit.")]
    pub completions: Option<Shell>,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase message verbosity (-v, -vv).")]
    pub verbose: u8,

    #[arg(short, long, help = "Silence informational messages and warnings.")]
    pub quiet: bool,
}

impl Cli {
    /// Target subdirectory with trailing separators removed; `None` for an empty path.
    pub fn target_path(&self) -> Option<&str> {
        self.path
            .as_deref()
            .map(|p| p.trim_end_matches(['/', '\\']))
            .filter(|p| !p.is_empty() && *p != ".")
    }

    pub fn output_path(&self) -> Option<PathBuf> {
        self.output
            .as_deref()
            .map(|o| PathBuf::from(shellexpand::tilde(o).as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn target_path_drops_trailing_separators() {
        let cli = Cli::parse_from(["projmap", "src/lib/"]);
        assert_eq!(cli.target_path(), Some("src/lib"));

        let cli = Cli::parse_from(["projmap", "."]);
        assert_eq!(cli.target_path(), None);
    }

    #[test]
    fn clipboard_conflicts_with_output() {
        let result = Cli::try_parse_from(["projmap", "--clipboard", "-o", "out.md"]);
        assert!(result.is_err());
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::parse_from(["projmap", "-c", "-vv", "--init", "--config-ignored", "pkg"]);
        assert!(cli.content);
        assert!(cli.init);
        assert!(cli.config_ignored);
        assert!(!cli.config_extensions);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.path.as_deref(), Some("pkg"));
    }
}
