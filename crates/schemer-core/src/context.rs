//! Build context shared by all commands.

use std::path::{Path, PathBuf};

use crate::config::{ConfigStore, ProjectConfig, resolve_project_path};
use crate::scheme::SchemeStore;

/// Project root plus its loaded configuration.
///
/// Frontends create this once and hand it to commands; every path in the
/// configuration is resolved against the project root.
#[derive(Debug, Clone)]
pub struct BuildContext {
    project_root: PathBuf,
    config: ProjectConfig,
}

impl BuildContext {
    /// Load `schemer.toml` from `project_root` (defaults when absent).
    pub fn load(project_root: PathBuf) -> anyhow::Result<Self> {
        let config = ConfigStore::from_project_root(&project_root).load()?;
        Ok(Self {
            project_root,
            config,
        })
    }

    /// Context for the current working directory.
    pub fn with_defaults() -> anyhow::Result<Self> {
        Self::load(std::env::current_dir()?)
    }

    /// Create context with an explicit configuration (for testing).
    pub fn with_config(project_root: PathBuf, config: ProjectConfig) -> Self {
        Self {
            project_root,
            config,
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Resolve a configured path against the project root.
    pub fn resolve_path(&self, configured: &str) -> PathBuf {
        resolve_project_path(&self.project_root, configured)
    }

    pub fn schemes_path(&self) -> PathBuf {
        self.resolve_path(&self.config.paths.schemes)
    }

    pub fn resources_path(&self) -> PathBuf {
        self.resolve_path(&self.config.paths.resources)
    }

    pub fn build_vars_path(&self) -> PathBuf {
        self.resolve_path(&self.config.paths.build_vars)
    }

    /// Get a SchemeStore for the configured schemes document.
    pub fn scheme_store(&self) -> SchemeStore {
        SchemeStore::new(self.schemes_path())
    }
}
