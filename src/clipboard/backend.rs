use std::ffi::OsStr;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Result, SweeperError};

/// Trait for clipboard backends
pub trait Clipboard: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &str;

    /// Check if this backend is available on the current system
    fn is_available(&self) -> bool;

    /// Place `text` on the clipboard
    fn copy(&self, text: &str) -> Result<()>;
}

/// Clipboard backed by an external utility that reads the text from stdin.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    name: String,
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(name: &str, program: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// macOS
    pub fn pbcopy() -> Self {
        Self::new("pbcopy", "pbcopy", &[])
    }

    /// Wayland
    pub fn wl_copy() -> Self {
        Self::new("wl-copy", "wl-copy", &[])
    }

    pub fn xclip() -> Self {
        Self::new("xclip", "xclip", &["-selection", "clipboard"])
    }

    pub fn xsel() -> Self {
        Self::new("xsel", "xsel", &["--clipboard", "--input"])
    }
}

impl Clipboard for CommandClipboard {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_available(&self) -> bool {
        find_in_path(&self.program).is_some()
    }

    fn copy(&self, text: &str) -> Result<()> {
        // Any failure to start the utility means it cannot be used here
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                tracing::debug!(program = %self.program, error = %e, "Failed to spawn clipboard utility");
                SweeperError::ClipboardUnavailable(self.program.clone())
            })?;

        // stdin is dropped at the end of the block so the utility sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        // Reap the child even when it stopped reading early
        let output = child.wait_with_output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SweeperError::Command(format!(
                "{} failed ({}): {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        written.map_err(|e| SweeperError::Command(format!("Failed to write to {}: {}", self.program, e)))
    }
}

/// Locate an executable by name on `PATH`.
pub fn find_in_path(program: &str) -> Option<std::path::PathBuf> {
    if program.contains('/') {
        let path = Path::new(program);
        return is_executable(path).then(|| path.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(OsStr::new(program)))
        .find(|candidate| is_executable(candidate))
}

fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}
