//! Shared core types used across configuration, templating and commands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Target platform being prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Cordova native shells (config.xml).
    Cordova,
    /// Chrome extension/app packaging (manifest.json).
    Chrome,
    /// Plain web deployment.
    #[default]
    Web,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Cordova => "cordova",
            Platform::Chrome => "chrome",
            Platform::Web => "web",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Platform {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "cordova" => Ok(Platform::Cordova),
            "chrome" => Ok(Platform::Chrome),
            "web" => Ok(Platform::Web),
            other => anyhow::bail!(
                "Unknown platform: {}. Use 'cordova', 'chrome' or 'web'",
                other
            ),
        }
    }
}

/// Kind of resource wired into HTML masters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// Stylesheets.
    Css,
    /// Third-party scripts, loaded before application code.
    Lib,
    /// Application scripts.
    Js,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Css, ResourceKind::Lib, ResourceKind::Js];

    /// Marker name as it appears inside `<!-- references:NAME -->`.
    pub fn marker_name(&self) -> &'static str {
        match self {
            ResourceKind::Css => "css",
            ResourceKind::Lib => "lib",
            ResourceKind::Js => "js",
        }
    }

    pub fn from_marker_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.marker_name() == name)
    }
}
