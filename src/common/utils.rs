//! Small helpers shared across modules.

use std::path::Path;

/// Display a path with the home directory replaced by `~`, so logs don't leak the user name.
pub fn private_path(path: &Path) -> String {
    if let Some(home) = dirs::home_dir()
        && let Ok(rest) = path.strip_prefix(&home)
    {
        return Path::new("~").join(rest).display().to_string();
    }
    path.display().to_string()
}
