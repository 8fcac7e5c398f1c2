//! Config path resolution helpers.

use std::path::{Path, PathBuf};

/// File name of the optional project configuration.
pub const PROJECT_CONFIG_FILE: &str = "schemer.toml";

pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(PROJECT_CONFIG_FILE)
}

/// Resolve a configured path against the project root.
///
/// Absolute paths are returned unchanged.
pub fn resolve_project_path(project_root: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
