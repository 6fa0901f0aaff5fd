//! Synthesis of the shell command that removes found environments.

use std::path::Path;

use crate::scanner::EnvironmentRecord;

/// Escape text for use inside a double-quoted POSIX shell word.
///
/// Backslash, double quote, backtick and dollar sign are the only
/// characters that keep a special meaning inside double quotes.
pub fn escape_double_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '"' | '`' | '$' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Double-quote a path for a shell command line.
pub fn quote_path(path: &Path) -> String {
    let text = match path.to_str() {
        Some(s) => s.to_string(),
        None => {
            tracing::warn!(
                path = %path.display(),
                "Path is not valid UTF-8; the command will not match it exactly"
            );
            path.to_string_lossy().into_owned()
        }
    };
    format!("\"{}\"", escape_double_quoted(&text))
}

/// Build an `rm -rf` command listing every environment, one per line.
///
/// Returns `None` when there is nothing to remove.
pub fn build_rm_command(environments: &[EnvironmentRecord]) -> Option<String> {
    if environments.is_empty() {
        return None;
    }

    let lines: Vec<String> = environments
        .iter()
        .map(|e| format!("\t{}", quote_path(&e.path)))
        .collect();

    Some(format!("rm -rf \\\n{}", lines.join(" \\\n")))
}
