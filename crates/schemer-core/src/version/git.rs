//! Git helpers for stamping builds with the source revision.

use std::path::Path;

use git2::Repository;
use tracing::debug;

/// Abbreviated id of the commit `HEAD` points to, for the repository
/// containing `project_root`.
pub fn head_short_id(project_root: &Path) -> anyhow::Result<String> {
    let repo = Repository::discover(project_root)?;
    let commit = repo.head()?.peel_to_commit()?;
    let short = commit.as_object().short_id()?;

    short
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("Short commit id is not valid UTF-8"))
}

/// Like [`head_short_id`], but `None` outside a repository or before the
/// first commit.
pub fn short_revision(project_root: &Path) -> Option<String> {
    match head_short_id(project_root) {
        Ok(rev) => Some(rev),
        Err(e) => {
            debug!(
                root = %project_root.display(),
                error = %e,
                "no source revision available"
            );
            None
        }
    }
}
