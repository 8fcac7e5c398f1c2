//! Resource manifest (`resources.yml`).
//!
//! ```yaml
//! css:
//!   - css/ionic.app.css
//! lib:
//!   - lib/ionic/js/ionic.bundle.js
//!   - https://maps.googleapis.com/maps/api/js
//! js:
//!   - js/app.js
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::types::ResourceKind;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceManifest {
    #[serde(default)]
    pub css: Option<Vec<String>>,

    #[serde(default)]
    pub lib: Option<Vec<String>>,

    #[serde(default)]
    pub js: Option<Vec<String>>,
}

impl ResourceManifest {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read resource manifest: {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse resource manifest: {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Entries listed for `kind`, in manifest order.
    pub fn entries(&self, kind: ResourceKind) -> &[String] {
        let list = match kind {
            ResourceKind::Css => &self.css,
            ResourceKind::Lib => &self.lib,
            ResourceKind::Js => &self.js,
        };
        list.as_deref().unwrap_or_default()
    }
}

/// Absolute `http:`/`https:` references are loaded live, never bundled.
pub fn is_live_url(entry: &str) -> bool {
    entry.starts_with("http:") || entry.starts_with("https:")
}
