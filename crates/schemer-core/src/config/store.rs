//! Config store for loading schemer.toml.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::{ProjectConfig, parser, paths::project_config_path};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    pub fn from_project_root(project_root: &Path) -> Self {
        Self {
            config_path: project_config_path(project_root),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load schemer.toml, falling back to defaults when it does not exist.
    pub fn load(&self) -> anyhow::Result<ProjectConfig> {
        if !self.config_path.exists() {
            debug!(
                path = %self.config_path.display(),
                "no project config, using defaults"
            );
            return Ok(ProjectConfig::new());
        }
        parser::parse_project_toml(&self.config_path)
    }
}
