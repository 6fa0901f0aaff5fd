//! Ordering, totals and rendering of scan results.

use crossterm::style::{StyledContent, Stylize};
use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::scanner::{format_size, EnvironmentRecord, IgnoredRecord};

/// Environments ordered largest first, with their combined size.
#[derive(Debug, Clone, Default)]
pub struct Report {
    entries: Vec<EnvironmentRecord>,
    total: u64,
}

impl Report {
    /// Build a report from environments in discovery order.
    ///
    /// The sort is stable, so environments of equal size keep their
    /// discovery order.
    pub fn new(mut environments: Vec<EnvironmentRecord>) -> Self {
        environments.sort_by(|a, b| b.size.cmp(&a.size));
        let total = environments
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.size));

        Self {
            entries: environments,
            total,
        }
    }

    pub fn entries(&self) -> &[EnvironmentRecord] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Format options for report output
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Use ANSI colors in output
    pub colors: bool,
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.colors = enabled;
        self
    }
}

fn paint<F>(text: String, colors: bool, style: F) -> String
where
    F: FnOnce(String) -> StyledContent<String>,
{
    if colors {
        style(text).to_string()
    } else {
        text
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

/// Format the report as a ranked table followed by the total.
pub fn format_table(report: &Report, options: &FormatOptions) -> String {
    let mut output = String::new();

    let header = format!("{:>4}  {:>10}  {}", "RANK", "SIZE", "PATH");
    output.push_str(&paint(header, options.colors, |s| s.bold()));
    output.push('\n');
    output.push_str(&format!("{:->4}  {:->10}  {:-<50}\n", "", "", ""));

    for (idx, entry) in report.entries().iter().enumerate() {
        let size = paint(
            format!("{:>10}", format_size(entry.size)),
            options.colors,
            |s| s.yellow(),
        );
        output.push_str(&format!(
            "{:>4}  {}  {}\n",
            idx + 1,
            size,
            entry.path.display()
        ));
    }

    let total = paint(format_size(report.total()), options.colors, |s| {
        s.green().bold()
    });
    output.push_str(&format!(
        "\nTotal reclaimable space: {} in {}\n",
        total,
        plural(report.len(), "environment")
    ));

    output
}

/// Format directories that could not be read, one per line.
pub fn format_ignored(ignored: &[IgnoredRecord], options: &FormatOptions) -> String {
    let mut output = String::new();

    let title = format!("Ignored {}:", plural(ignored.len(), "path"));
    output.push_str(&paint(title, options.colors, |s| s.dark_yellow()));
    output.push('\n');

    for record in ignored {
        output.push_str(&format!("  {}  ({})\n", record.path.display(), record.reason));
    }

    output
}

#[derive(Serialize)]
struct JsonEnvironment<'a> {
    path: &'a Path,
    size: u64,
    size_human: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    root: &'a Path,
    environments: Vec<JsonEnvironment<'a>>,
    total: u64,
    total_human: String,
    ignored: &'a [IgnoredRecord],
    command: Option<&'a str>,
}

/// Format the whole result as a single JSON document.
pub fn format_json(
    root: &Path,
    report: &Report,
    ignored: &[IgnoredRecord],
    command: Option<&str>,
) -> Result<String> {
    let doc = JsonReport {
        root,
        environments: report
            .entries()
            .iter()
            .map(|e| JsonEnvironment {
                path: &e.path,
                size: e.size,
                size_human: format_size(e.size),
            })
            .collect(),
        total: report.total(),
        total_human: format_size(report.total()),
        ignored,
        command,
    };

    Ok(serde_json::to_string_pretty(&doc)?)
}
