//! Discovery of Python virtual environments in a directory tree.

mod options;
mod record;
mod size;
mod walker;

pub use options::ScanOptions;
pub use record::{EnvironmentRecord, IgnoredRecord, ScanResult};
pub use size::{apparent_size, dir_size, format_size};
pub use walker::{walk_dirs, ChildEntry, DirListing, Visit, VisitControl, WalkOutcome};

use std::path::Path;

/// File whose presence marks a directory as a virtual environment.
pub const ENV_MARKER: &str = "pyvenv.cfg";

/// How the scanner treats a directory it has listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirKind {
    /// Contains the marker; recorded and not descended into.
    Environment,
    /// Dot-directory below the root while hidden directories are excluded.
    Hidden,
    /// Ordinary directory to descend into.
    PassThrough,
}

/// Classify a listed directory.
pub fn classify(listing: &DirListing, options: &ScanOptions) -> DirKind {
    if listing.contains_file(ENV_MARKER) {
        return DirKind::Environment;
    }

    if !options.include_hidden && listing.depth > 0 && is_hidden_name(listing) {
        return DirKind::Hidden;
    }

    DirKind::PassThrough
}

fn is_hidden_name(listing: &DirListing) -> bool {
    match listing.name() {
        Some(name) => {
            let name = name.to_string_lossy();
            name.starts_with('.') && name != "." && name != ".."
        }
        None => false,
    }
}

/// Scanner that finds environment directories under a root.
#[derive(Debug, Clone, Default)]
pub struct EnvScanner {
    options: ScanOptions,
}

impl EnvScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan `root` for environments.
    pub fn scan(&self, root: &Path) -> ScanResult {
        self.scan_with(root, |_| {})
    }

    /// Scan `root`, calling `on_dir` with every directory as it is visited,
    /// before any of its subdirectories.
    ///
    /// Each environment is sized as soon as it is found, before the walk
    /// moves on to the next sibling.
    pub fn scan_with<F>(&self, root: &Path, mut on_dir: F) -> ScanResult
    where
        F: FnMut(&Path),
    {
        let mut result = ScanResult::default();

        walk_dirs(root, |visit| match visit {
            Visit::Unreadable { path, error, .. } => {
                on_dir(path);
                tracing::warn!(path = %path.display(), error = %error, "Cannot read directory");
                result.ignored.push(IgnoredRecord {
                    path: path.to_path_buf(),
                    reason: error.to_string(),
                });
                VisitControl::SkipSubtree
            }
            Visit::Listed(listing) => {
                on_dir(&listing.path);
                match classify(listing, &self.options) {
                    DirKind::Environment => {
                        let size = dir_size(&listing.path);
                        tracing::info!(
                            path = %listing.path.display(),
                            size,
                            "Found virtual environment"
                        );
                        result.environments.push(EnvironmentRecord {
                            path: listing.path.clone(),
                            size,
                        });
                        VisitControl::SkipSubtree
                    }
                    DirKind::Hidden => {
                        tracing::debug!(path = %listing.path.display(), "Skipping hidden directory");
                        VisitControl::SkipSubtree
                    }
                    DirKind::PassThrough => VisitControl::Continue,
                }
            }
        });

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn make_env(path: &Path, payload: usize) {
        fs::create_dir_all(path.join("lib")).unwrap();
        File::create(path.join(ENV_MARKER))
            .unwrap()
            .write_all(b"home = /usr/bin\n")
            .unwrap();
        File::create(path.join("lib/payload.bin"))
            .unwrap()
            .write_all(&vec![0u8; payload])
            .unwrap();
    }

    fn listing(path: &str, depth: usize) -> DirListing {
        DirListing {
            path: PathBuf::from(path),
            depth,
            children: vec![],
        }
    }

    #[test]
    fn test_classify_hidden_below_root() {
        let opts = ScanOptions::default();
        assert_eq!(classify(&listing("/p/.cache", 1), &opts), DirKind::Hidden);
        assert_eq!(classify(&listing("/p/.git", 3), &opts), DirKind::Hidden);
        assert_eq!(classify(&listing("/p/src", 1), &opts), DirKind::PassThrough);
    }

    #[test]
    fn test_classify_root_never_hidden() {
        let opts = ScanOptions::default();
        assert_eq!(classify(&listing("/p/.config", 0), &opts), DirKind::PassThrough);
    }

    #[test]
    fn test_classify_hidden_included() {
        let opts = ScanOptions::new().with_hidden(true);
        assert_eq!(classify(&listing("/p/.cache", 1), &opts), DirKind::PassThrough);
    }

    #[test]
    fn test_scan_finds_environments() {
        let dir = TempDir::new().unwrap();
        make_env(&dir.path().join("app/venv"), 100);
        make_env(&dir.path().join("tools/env"), 50);
        fs::create_dir_all(dir.path().join("docs")).unwrap();

        let result = EnvScanner::default().scan(dir.path());

        assert_eq!(result.environments.len(), 2);
        assert!(result.ignored.is_empty());
        assert!(result.environments[0].path.ends_with("app/venv"));
        assert!(result.environments[1].path.ends_with("tools/env"));
    }

    #[test]
    fn test_scan_sizes_whole_environment() {
        let dir = TempDir::new().unwrap();
        make_env(&dir.path().join("venv"), 1000);

        let result = EnvScanner::default().scan(dir.path());

        let marker_len = "home = /usr/bin\n".len() as u64;
        assert_eq!(result.environments[0].size, 1000 + marker_len);
    }

    #[test]
    fn test_scan_does_not_descend_into_environment() {
        let dir = TempDir::new().unwrap();
        let outer = dir.path().join("outer");
        make_env(&outer, 10);
        make_env(&outer.join("lib/nested"), 10);

        let result = EnvScanner::default().scan(dir.path());

        assert_eq!(result.environments.len(), 1);
        assert_eq!(result.environments[0].path, outer);
    }

    #[test]
    fn test_scan_root_can_be_environment() {
        let dir = TempDir::new().unwrap();
        make_env(dir.path(), 10);

        let result = EnvScanner::default().scan(dir.path());

        assert_eq!(result.environments.len(), 1);
        assert_eq!(result.environments[0].path, dir.path());
    }

    #[test]
    fn test_marker_directory_does_not_count() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("weird").join(ENV_MARKER)).unwrap();

        let result = EnvScanner::default().scan(dir.path());

        assert!(result.environments.is_empty());
    }

    #[test]
    fn test_scan_hidden_directories() {
        let dir = TempDir::new().unwrap();
        make_env(&dir.path().join(".venv_cache/env"), 10);

        let hidden_off = EnvScanner::new(ScanOptions::new().with_hidden(false)).scan(dir.path());
        assert!(hidden_off.environments.is_empty());

        let hidden_on = EnvScanner::new(ScanOptions::new().with_hidden(true)).scan(dir.path());
        assert_eq!(hidden_on.environments.len(), 1);
    }

    #[test]
    fn test_hidden_environment_itself_is_found() {
        // The marker check comes before the hidden check
        let dir = TempDir::new().unwrap();
        make_env(&dir.path().join("project/.venv"), 10);

        let result = EnvScanner::default().scan(dir.path());

        assert_eq!(result.environments.len(), 1);
        assert!(result.environments[0].path.ends_with(".venv"));
    }

    #[test]
    fn test_scan_with_reports_directories() {
        let dir = TempDir::new().unwrap();
        make_env(&dir.path().join("a/venv"), 10);

        let mut seen = Vec::new();
        EnvScanner::default().scan_with(dir.path(), |p| seen.push(p.to_path_buf()));

        // root, a, a/venv; the environment's interior is not visited
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|p| !p.ends_with("lib")));
    }

    #[test]
    fn test_scan_empty_tree() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c")).unwrap();

        let result = EnvScanner::default().scan(dir.path());

        assert!(result.is_empty());
        assert!(result.ignored.is_empty());
    }
}
