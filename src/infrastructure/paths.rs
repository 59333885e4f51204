//! Path handling for the Zellij sandbox.
//!
//! Inside the plugin sandbox the host filesystem is reachable under `/host`.
//! These helpers translate user-typed paths into sandbox paths and locate the
//! plugin's data directory.

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
const HOST_ROOT: &str = "/host";

/// Returns the data directory for finassist files (trace logs).
///
/// Resolves to `~/.local/share/zellij/finassist` on the host when Zellij was
/// started from the home directory.
///
/// ```
/// use finassist::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/finassist"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join("finassist")
}

/// Expands tilde paths to the `/host` prefix.
///
/// ```
/// use finassist::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/reports"), "/host/reports");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', HOST_ROOT, 1)
    } else if path == "~" {
        HOST_ROOT.to_string()
    } else {
        path.to_string()
    }
}

/// Resolves a user-typed document path to the path readable in the sandbox.
///
/// - `~/x` and `~` are expanded with [`expand_tilde`]
/// - paths already under `/host` are kept
/// - other absolute paths are re-rooted under `/host`
/// - relative paths are taken relative to `/host`
///
/// Surrounding whitespace is ignored.
///
/// ```
/// use finassist::infrastructure::resolve_document_path;
/// use std::path::PathBuf;
///
/// assert_eq!(resolve_document_path("~/q3.pdf"), PathBuf::from("/host/q3.pdf"));
/// assert_eq!(resolve_document_path("docs/q3.pdf"), PathBuf::from("/host/docs/q3.pdf"));
/// assert_eq!(resolve_document_path("/srv/q3.pdf"), PathBuf::from("/host/srv/q3.pdf"));
/// ```
#[must_use]
pub fn resolve_document_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let expanded = expand_tilde(trimmed);

    if expanded == HOST_ROOT || expanded.starts_with("/host/") {
        PathBuf::from(expanded)
    } else if let Some(absolute) = expanded.strip_prefix('/') {
        PathBuf::from(HOST_ROOT).join(absolute)
    } else {
        PathBuf::from(HOST_ROOT).join(expanded)
    }
}

/// Removes the `/host` prefix from sandbox paths for display purposes.
///
/// ```
/// use finassist::infrastructure::strip_host_prefix;
///
/// assert_eq!(strip_host_prefix("/host/reports/q3.pdf"), "/reports/q3.pdf");
/// assert_eq!(strip_host_prefix("/absolute/path"), "/absolute/path");
/// ```
#[must_use]
pub fn strip_host_prefix(path: &str) -> String {
    path.strip_prefix(HOST_ROOT).unwrap_or(path).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_paths_are_kept() {
        assert_eq!(resolve_document_path("/host/a.txt"), PathBuf::from("/host/a.txt"));
        assert_eq!(resolve_document_path("  ~/a.txt "), PathBuf::from("/host/a.txt"));
    }

    #[test]
    fn lookalike_prefix_is_re_rooted() {
        assert_eq!(resolve_document_path("/hostile/a.txt"), PathBuf::from("/host/hostile/a.txt"));
    }
}
