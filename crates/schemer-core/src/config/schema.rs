//! Configuration schema for schemer.toml
//!
//! Every section is optional; a missing file or section falls back to the
//! standard Ionic project layout:
//!
//! ```toml
//! [paths]
//! schemes = "schemes.yml"
//! resources = "resources.yml"
//! build_vars = "www/js/build-vars.js"
//!
//! [bundles]
//! css = "css/app.bundle.css"
//!
//! [[master]]
//! source = "config.master.xml"
//! output = "config.xml"
//! platforms = ["cordova"]
//! ```

use serde::Deserialize;

use crate::types::{Platform, ResourceKind};

/// Root configuration structure for schemer.toml
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub bundles: BundlesConfig,

    /// Master files rendered by `configure`
    #[serde(default = "default_masters", rename = "master")]
    pub masters: Vec<MasterEntry>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            bundles: BundlesConfig::default(),
            masters: default_masters(),
        }
    }
}

impl ProjectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Masters that apply when preparing `platform`
    pub fn masters_for(&self, platform: Platform) -> impl Iterator<Item = &MasterEntry> {
        self.masters
            .iter()
            .filter(move |master| master.applies_to(platform))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for master in &self.masters {
            master.validate()?;
        }
        if self.paths.schemes.trim().is_empty() {
            anyhow::bail!("paths.schemes cannot be empty");
        }
        Ok(())
    }
}

/// Input and output locations, relative to the project root
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Schemes document
    #[serde(default = "default_schemes_path")]
    pub schemes: String,

    /// Resource manifest listing css/lib/js references
    #[serde(default = "default_resources_path")]
    pub resources: String,

    /// Generated runtime build variables script
    #[serde(default = "default_build_vars_path")]
    pub build_vars: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            schemes: default_schemes_path(),
            resources: default_resources_path(),
            build_vars: default_build_vars_path(),
        }
    }
}

fn default_schemes_path() -> String {
    "schemes.yml".to_string()
}

fn default_resources_path() -> String {
    "resources.yml".to_string()
}

fn default_build_vars_path() -> String {
    "www/js/build-vars.js".to_string()
}

/// Bundle paths referenced from HTML when building bundled
#[derive(Debug, Clone, Deserialize)]
pub struct BundlesConfig {
    #[serde(default = "default_css_bundle")]
    pub css: String,

    #[serde(default = "default_lib_bundle")]
    pub lib: String,

    #[serde(default = "default_js_bundle")]
    pub js: String,
}

impl BundlesConfig {
    pub fn path_for(&self, kind: ResourceKind) -> &str {
        match kind {
            ResourceKind::Css => &self.css,
            ResourceKind::Lib => &self.lib,
            ResourceKind::Js => &self.js,
        }
    }
}

impl Default for BundlesConfig {
    fn default() -> Self {
        Self {
            css: default_css_bundle(),
            lib: default_lib_bundle(),
            js: default_js_bundle(),
        }
    }
}

fn default_css_bundle() -> String {
    "css/app.bundle.css".to_string()
}

fn default_lib_bundle() -> String {
    "lib/lib.bundle.js".to_string()
}

fn default_js_bundle() -> String {
    "js/app.bundle.js".to_string()
}

/// A master template and where its rendered copy goes
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MasterEntry {
    pub source: String,

    pub output: String,

    /// Platforms this master is rendered for; empty means all
    #[serde(default)]
    pub platforms: Vec<Platform>,

    /// Replace `<!-- references:* -->` markers before substitution
    #[serde(default)]
    pub inject_references: bool,
}

impl MasterEntry {
    pub fn applies_to(&self, platform: Platform) -> bool {
        self.platforms.is_empty() || self.platforms.contains(&platform)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.source.trim().is_empty() {
            anyhow::bail!("Invalid master entry: 'source' cannot be empty");
        }
        if self.output.trim().is_empty() {
            anyhow::bail!(
                "Invalid master entry '{}': 'output' cannot be empty",
                self.source
            );
        }
        if self.source == self.output {
            anyhow::bail!(
                "Invalid master entry '{}': output would overwrite the master",
                self.source
            );
        }
        Ok(())
    }
}

fn default_masters() -> Vec<MasterEntry> {
    vec![
        MasterEntry {
            source: "www/index.master.html".to_string(),
            output: "www/index.html".to_string(),
            platforms: Vec::new(),
            inject_references: true,
        },
        MasterEntry {
            source: "config.master.xml".to_string(),
            output: "config.xml".to_string(),
            platforms: vec![Platform::Cordova],
            inject_references: false,
        },
        MasterEntry {
            source: "www/manifest.master.json".to_string(),
            output: "www/manifest.json".to_string(),
            platforms: vec![Platform::Chrome],
            inject_references: false,
        },
    ]
}
