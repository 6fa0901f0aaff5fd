use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// Find Python virtual environments and build a command to remove them
#[derive(Parser, Debug)]
#[command(name = "venv-sweeper")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Path to configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// List directories that could not be read
    #[arg(short = 'i', long)]
    pub show_ignored: bool,

    /// Descend into hidden directories
    #[arg(short, long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the command without copying it to the clipboard
    #[arg(long)]
    pub no_clipboard: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Validates the CLI definition is correct
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["venv-sweeper"]);
        assert_eq!(cli.path, PathBuf::from("."));
        assert!(!cli.all);
        assert!(!cli.show_ignored);
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn parse_path_and_flags() {
        let cli = Cli::parse_from([
            "venv-sweeper",
            "--all",
            "--show-ignored",
            "--no-clipboard",
            "/projects",
        ]);
        assert_eq!(cli.path, PathBuf::from("/projects"));
        assert!(cli.all);
        assert!(cli.show_ignored);
        assert!(cli.no_clipboard);
    }

    #[test]
    fn parse_short_flags() {
        let cli = Cli::parse_from(["venv-sweeper", "-a", "-i", "-vv", "src"]);
        assert!(cli.all);
        assert!(cli.show_ignored);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["venv-sweeper", "--completions", "bash"]);
        assert_eq!(cli.completions, Some(Shell::Bash));
    }
}
