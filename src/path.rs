use std::path::{Path, PathBuf};

/// Get the user's home directory.
///
/// Uses the `home` crate which handles platform-specific detection:
/// - Unix: `$HOME` environment variable
/// - Windows: `USERPROFILE` or `HOMEDRIVE`/`HOMEPATH`
pub fn home_dir() -> Option<PathBuf> {
    home::home_dir()
}

/// Expand a leading `~` to the home directory.
///
/// Users commonly write `GIT_PROFILES_DIR=~/profiles` in files that are not
/// processed by a shell, so the variable can arrive unexpanded.
pub fn expand_tilde(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).into_owned())
}

/// Format a filesystem path for user-facing output.
///
/// Replaces home directory prefix with `~` (e.g., `/Users/ada/.config/git-profile`
/// -> `~/.config/git-profile`). Paths outside home are returned unchanged.
pub fn format_path_for_display(path: &Path) -> String {
    if let Some(home) = home_dir()
        && let Ok(stripped) = path.strip_prefix(&home)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }

        let mut display_path = PathBuf::from("~");
        display_path.push(stripped);
        return display_path.display().to_string();
    }

    path.display().to_string()
}
