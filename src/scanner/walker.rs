use std::ffi::{OsStr, OsString};
use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};

/// What the walker should do after a directory has been visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitControl {
    /// Descend into the directory's subdirectories.
    Continue,
    /// Do not descend; carry on with the next sibling.
    SkipSubtree,
    /// Stop the whole walk.
    Abort,
}

/// How a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    Completed,
    Aborted,
}

/// A single entry inside a listed directory.
#[derive(Debug, Clone)]
pub struct ChildEntry {
    pub name: OsString,
    pub path: PathBuf,
    /// Type of the entry itself; symbolic links are not resolved.
    pub file_type: FileType,
}

/// The contents of a directory that was listed successfully.
#[derive(Debug, Clone)]
pub struct DirListing {
    pub path: PathBuf,
    /// 0 for the walk root
    pub depth: usize,
    /// Sorted by name
    pub children: Vec<ChildEntry>,
}

impl DirListing {
    /// Final path component, if any.
    pub fn name(&self) -> Option<&OsStr> {
        self.path.file_name()
    }

    /// True if a non-directory child with exactly this name exists.
    pub fn contains_file(&self, name: &str) -> bool {
        self.children
            .iter()
            .any(|c| c.name == name && !c.file_type.is_dir())
    }

    /// Real subdirectories. Symlinks to directories are not included.
    pub fn subdirs(&self) -> impl Iterator<Item = &ChildEntry> {
        self.children.iter().filter(|c| c.file_type.is_dir())
    }
}

/// A directory as presented to the visit callback.
#[derive(Debug)]
pub enum Visit<'a> {
    Listed(&'a DirListing),
    Unreadable {
        path: &'a Path,
        depth: usize,
        error: &'a io::Error,
    },
}

/// Depth-first pre-order walk over the directories under `root`.
///
/// Each directory is listed, then handed to `visit`, whose answer decides
/// whether its subdirectories are walked. Directories that cannot be listed
/// are reported as [`Visit::Unreadable`] and never descended into. Symbolic
/// links are never followed.
pub fn walk_dirs<F>(root: &Path, mut visit: F) -> WalkOutcome
where
    F: FnMut(Visit<'_>) -> VisitControl,
{
    walk_recursive(root, 0, &mut visit)
}

fn walk_recursive<F>(path: &Path, depth: usize, visit: &mut F) -> WalkOutcome
where
    F: FnMut(Visit<'_>) -> VisitControl,
{
    let listing = match list_dir(path, depth) {
        Ok(listing) => listing,
        Err(error) => {
            let control = visit(Visit::Unreadable {
                path,
                depth,
                error: &error,
            });
            return match control {
                VisitControl::Abort => WalkOutcome::Aborted,
                _ => WalkOutcome::Completed,
            };
        }
    };

    match visit(Visit::Listed(&listing)) {
        VisitControl::Continue => {}
        VisitControl::SkipSubtree => return WalkOutcome::Completed,
        VisitControl::Abort => return WalkOutcome::Aborted,
    }

    for child in listing.subdirs() {
        if walk_recursive(&child.path, depth + 1, visit) == WalkOutcome::Aborted {
            return WalkOutcome::Aborted;
        }
    }

    WalkOutcome::Completed
}

/// Read a directory's entries, sorted by name.
///
/// Fails if the directory cannot be opened or an entry cannot be read.
/// An entry whose type cannot be determined is left out.
fn list_dir(path: &Path, depth: usize) -> io::Result<DirListing> {
    let mut children = Vec::new();

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(err) => {
                tracing::debug!(path = %entry.path().display(), error = %err, "Unknown entry type");
                continue;
            }
        };
        children.push(ChildEntry {
            name: entry.file_name(),
            path: entry.path(),
            file_type,
        });
    }

    children.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(DirListing {
        path: path.to_path_buf(),
        depth,
        children,
    })
}
