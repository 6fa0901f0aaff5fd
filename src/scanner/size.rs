use std::fs::Metadata;
use std::path::Path;
use walkdir::WalkDir;

/// Get apparent file size (content length)
pub fn apparent_size(metadata: &Metadata) -> u64 {
    metadata.len()
}

/// Sum the apparent size of every regular file beneath `path`.
///
/// Symbolic links are never followed and count for nothing. Entries that
/// cannot be read (permission denied, removed mid-walk) contribute zero; the
/// error is logged and the walk carries on, so the result can undercount.
pub fn dir_size(path: &Path) -> u64 {
    let mut total: u64 = 0;

    for result in WalkDir::new(path).follow_links(false) {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                tracing::debug!(
                    path = %err.path().unwrap_or(path).display(),
                    error = %err,
                    "Skipping unreadable entry while sizing"
                );
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        match entry.metadata() {
            Ok(metadata) => total = total.saturating_add(apparent_size(&metadata)),
            Err(err) => {
                tracing::debug!(path = %entry.path().display(), error = %err, "No metadata");
            }
        }
    }

    total
}

/// Format size in human-readable format.
///
/// Uses a 1024-based ladder and always prints two decimals. Values beyond
/// 1024 TB stay in TB.
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    // 1023.996 KB prints as 1024.00 KB; show it as the next unit instead
    if (size * 100.0).round() >= 102400.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}
