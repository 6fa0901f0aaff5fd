//! Find environments under a root, report them and publish the removal command.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cli::Cli;
use crate::clipboard::{self, PublishOutcome};
use crate::config::Config;
use crate::error::{Result, SweeperError};
use crate::report::{format_ignored, format_json, format_table, FormatOptions, Report};
use crate::scanner::{EnvScanner, ScanOptions};
use crate::shell::build_rm_command;

/// Check that `path` is an existing, listable directory and return its
/// canonical form.
pub fn validate_root(path: &Path) -> Result<PathBuf> {
    let root = path.canonicalize().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => SweeperError::PathNotFound(path.to_path_buf()),
        _ => SweeperError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    if !root.is_dir() {
        return Err(SweeperError::NotADirectory(path.to_path_buf()));
    }

    // An unreadable root would otherwise scan as an empty tree
    fs::read_dir(&root).map_err(|source| SweeperError::Io {
        path: root.clone(),
        source,
    })?;

    Ok(root)
}

/// Decide whether stdout output gets ANSI colors.
pub fn colors_enabled(setting: &str, no_color_flag: bool) -> bool {
    if no_color_flag || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    match setting {
        "always" => true,
        "never" => false,
        _ => std::io::stdout().is_terminal(),
    }
}

fn scan_spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {wide_msg}") {
        spinner.set_style(style);
    }
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Run the sweep
pub fn run(cli: &Cli, config: &Config) -> Result<()> {
    let root = validate_root(&cli.path)?;

    let scan_options =
        ScanOptions::new().with_hidden(cli.all || config.scanner.include_hidden);
    let show_ignored = cli.show_ignored || config.scanner.show_ignored;
    let format_options = FormatOptions::new()
        .with_colors(!cli.json && colors_enabled(&config.output.color, cli.no_color));

    tracing::info!(path = %root.display(), include_hidden = scan_options.include_hidden, "Scanning");

    let spinner = scan_spinner(!cli.quiet && !cli.json);
    let scanner = EnvScanner::new(scan_options);
    let result = scanner.scan_with(&root, |dir| {
        spinner.set_message(dir.display().to_string());
    });
    spinner.finish_and_clear();

    let report = Report::new(result.environments);
    let command = if report.is_empty() {
        None
    } else {
        build_rm_command(report.entries())
    };

    if cli.json {
        println!(
            "{}",
            format_json(&root, &report, &result.ignored, command.as_deref())?
        );
        return Ok(());
    }

    if !result.ignored.is_empty() {
        if show_ignored {
            println!("{}", format_ignored(&result.ignored, &format_options));
        } else if !cli.quiet {
            eprintln!(
                "{} director{} could not be read (use --show-ignored to list)",
                result.ignored.len(),
                if result.ignored.len() == 1 { "y" } else { "ies" }
            );
        }
    }

    let Some(command) = command else {
        println!("No virtual environments found under {}.", root.display());
        return Ok(());
    };

    println!("{}", format_table(&report, &format_options));
    println!("{}", command);

    if cli.no_clipboard || !config.clipboard.enabled {
        return Ok(());
    }

    let backend = clipboard::select(&config.clipboard.backend)?;
    match clipboard::publish(&command, backend.as_deref()) {
        PublishOutcome::Copied(name) => {
            if !cli.quiet {
                eprintln!("\nCommand copied to the clipboard ({}). Review it before running.", name);
            }
        }
        PublishOutcome::Unavailable | PublishOutcome::Failed(_) => {
            eprintln!("\nCould not copy to the clipboard; copy the command above manually.");
        }
    }

    Ok(())
}
