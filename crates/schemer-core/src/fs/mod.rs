//! Filesystem primitives shared across features.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

/// Generated artifact written to a sibling tmp file, not yet in place.
///
/// [`StagedOutput::commit`] renames it over the target. Dropping an
/// uncommitted output removes the tmp file, so a batch that fails halfway
/// through staging leaves every target untouched.
#[derive(Debug)]
pub struct StagedOutput {
    path: PathBuf,
    tmp_path: Option<PathBuf>,
}

/// Write `content` next to `path` without replacing it yet.
///
/// Parent directories are created. A target that exists as a directory is
/// rejected here rather than at commit time.
pub fn stage_output(path: &Path, content: &str) -> anyhow::Result<StagedOutput> {
    if path.is_dir() {
        anyhow::bail!("Output path is a directory: {}", path.display());
    }

    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Output path has no file name: {}", path.display()))?;
    let tmp_path = parent.join(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        std::process::id()
    ));

    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write tmp output: {}", tmp_path.display()))?;

    debug!(path = %path.display(), bytes = content.len(), "staged output");
    Ok(StagedOutput {
        path: path.to_path_buf(),
        tmp_path: Some(tmp_path),
    })
}

impl StagedOutput {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the staged content into place, replacing any existing file.
    pub fn commit(mut self) -> anyhow::Result<PathBuf> {
        let Some(tmp_path) = self.tmp_path.take() else {
            return Ok(std::mem::take(&mut self.path));
        };

        // Remove target first on Windows for replace semantics
        if cfg!(windows) && self.path.exists() {
            fs::remove_file(&self.path).with_context(|| {
                format!("Failed to remove existing output: {}", self.path.display())
            })?;
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e)
                .with_context(|| format!("Failed to rename tmp output: {}", tmp_path.display()));
        }

        debug!(path = %self.path.display(), "wrote output");
        Ok(std::mem::take(&mut self.path))
    }
}

impl Drop for StagedOutput {
    fn drop(&mut self) {
        if let Some(tmp_path) = self.tmp_path.take() {
            let _ = fs::remove_file(tmp_path);
        }
    }
}
