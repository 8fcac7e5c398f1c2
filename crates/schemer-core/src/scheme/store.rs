//! File-backed access to the schemes document.

use std::path::{Path, PathBuf};

use super::error::Result;
use super::parser::parse_schemes_file;
use super::schema::{ResolvedScheme, SchemesDocument};

/// Handle to a schemes document on disk.
///
/// Holds only the path; each call re-reads the file so edits between
/// builds are always picked up.
#[derive(Debug, Clone)]
pub struct SchemeStore {
    path: PathBuf,
}

impl SchemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<SchemesDocument> {
        parse_schemes_file(&self.path)
    }

    /// Resolve `requested`, or the document default when `None`.
    pub fn resolve(&self, requested: Option<&str>) -> Result<ResolvedScheme> {
        self.load()?.resolve_or_default(requested)
    }
}
