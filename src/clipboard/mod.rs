//! Delivery of the synthesized command to the system clipboard.
//!
//! Text is always handed to an external utility on stdin. A missing or
//! failing utility is never fatal: the command is still printed.

mod backend;

pub use backend::{find_in_path, Clipboard, CommandClipboard};

use crate::error::{ConfigError, Result, SweeperError};

/// Backend names accepted in configuration, besides `auto`.
pub const BACKEND_NAMES: &[&str] = &["pbcopy", "wl-copy", "xclip", "xsel"];

/// Result of trying to publish text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Copied by the named backend
    Copied(String),
    /// No usable clipboard utility is installed, or it could not be started
    Unavailable,
    /// The utility ran but failed
    Failed(String),
}

/// Look up a backend by its configuration name.
pub fn backend_by_name(name: &str) -> Option<CommandClipboard> {
    match name {
        "pbcopy" => Some(CommandClipboard::pbcopy()),
        "wl-copy" => Some(CommandClipboard::wl_copy()),
        "xclip" => Some(CommandClipboard::xclip()),
        "xsel" => Some(CommandClipboard::xsel()),
        _ => None,
    }
}

/// Backends worth trying for the current session, most suitable first.
pub fn candidates(macos: bool, wayland: bool) -> Vec<CommandClipboard> {
    if macos {
        return vec![CommandClipboard::pbcopy()];
    }

    let mut list = Vec::new();
    if wayland {
        list.push(CommandClipboard::wl_copy());
    }
    list.push(CommandClipboard::xclip());
    list.push(CommandClipboard::xsel());
    list
}

/// Resolve a backend preference (`auto` or a backend name).
///
/// Returns `Ok(None)` when `auto` finds nothing installed. A named backend is
/// returned even if missing so the failure is reported when copying.
pub fn select(preference: &str) -> Result<Option<Box<dyn Clipboard>>> {
    if preference == "auto" {
        let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
        let found = candidates(cfg!(target_os = "macos"), wayland)
            .into_iter()
            .find(|c| c.is_available());

        if let Some(ref backend) = found {
            tracing::debug!(backend = backend.name(), "Selected clipboard backend");
        }
        return Ok(found.map(|c| Box::new(c) as Box<dyn Clipboard>));
    }

    match backend_by_name(preference) {
        Some(backend) => Ok(Some(Box::new(backend))),
        None => Err(ConfigError::Invalid(format!(
            "unknown clipboard backend '{}' (expected auto, {})",
            preference,
            BACKEND_NAMES.join(", ")
        ))
        .into()),
    }
}

/// How to get a clipboard utility on this platform.
pub fn install_hint() -> &'static str {
    if cfg!(target_os = "macos") {
        "pbcopy should ship with macOS; check your PATH"
    } else {
        "install wl-clipboard (Wayland) or xclip / xsel (X11)"
    }
}

/// Copy `text` with `backend`, logging instead of failing.
pub fn publish(text: &str, backend: Option<&dyn Clipboard>) -> PublishOutcome {
    let Some(backend) = backend else {
        tracing::warn!("No clipboard utility found; {}", install_hint());
        return PublishOutcome::Unavailable;
    };

    match backend.copy(text) {
        Ok(()) => {
            tracing::info!(backend = backend.name(), "Command copied to clipboard");
            PublishOutcome::Copied(backend.name().to_string())
        }
        Err(SweeperError::ClipboardUnavailable(program)) => {
            tracing::warn!("Clipboard utility '{}' could not be started; {}", program, install_hint());
            PublishOutcome::Unavailable
        }
        Err(err) => {
            tracing::warn!(
                backend = backend.name(),
                error = %err,
                "Clipboard copy failed; {}",
                install_hint()
            );
            PublishOutcome::Failed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_by_name() {
        for name in BACKEND_NAMES {
            assert_eq!(backend_by_name(name).unwrap().name(), *name);
        }
        assert!(backend_by_name("clip.exe").is_none());
    }

    #[test]
    fn test_candidates_macos() {
        let names: Vec<_> = candidates(true, false)
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["pbcopy"]);
    }

    #[test]
    fn test_candidates_wayland_first() {
        let names: Vec<_> = candidates(false, true)
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["wl-copy", "xclip", "xsel"]);
    }

    #[test]
    fn test_candidates_x11() {
        let names: Vec<_> = candidates(false, false)
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        assert_eq!(names, vec!["xclip", "xsel"]);
    }

    #[test]
    fn test_select_named_backend() {
        let backend = select("xsel").unwrap().unwrap();
        assert_eq!(backend.name(), "xsel");
    }

    #[test]
    fn test_select_unknown_backend_is_error() {
        let err = select("clip.exe").err().unwrap();
        assert!(matches!(err, SweeperError::Config(_)));
        assert!(err.to_string().contains("clip.exe"));
    }

    #[test]
    fn test_select_auto_does_not_fail() {
        // Depends on the host, but must never error
        assert!(select("auto").is_ok());
    }

    #[test]
    fn test_publish_without_backend() {
        assert_eq!(publish("rm -rf", None), PublishOutcome::Unavailable);
    }

    #[test]
    fn test_publish_missing_program() {
        let backend =
            CommandClipboard::new("ghost", "/nonexistent/definitely-not-a-clipboard-tool", &[]);
        assert_eq!(publish("rm -rf", Some(&backend)), PublishOutcome::Unavailable);
    }

    #[test]
    fn test_publish_success() {
        let backend = CommandClipboard::new("cat", "cat", &[]);
        assert_eq!(
            publish("rm -rf", Some(&backend)),
            PublishOutcome::Copied("cat".to_string())
        );
    }

    #[test]
    fn test_publish_failure() {
        let backend = CommandClipboard::new("failing", "sh", &["-c", "cat > /dev/null; exit 1"]);
        assert!(matches!(
            publish("rm -rf", Some(&backend)),
            PublishOutcome::Failed(_)
        ));
    }
}
