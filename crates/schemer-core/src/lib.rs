//! Schemer Core Library
//!
//! Resolves build schemes (named variable profiles with base inheritance and
//! overrides) and renders master files for Cordova, Chrome and web builds.

pub mod build_vars;
pub mod commands;
pub mod config;
pub mod context;
pub mod fs;
pub mod references;
pub mod scheme;
pub mod template;
pub mod types;
pub mod version;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{BundlesConfig, ConfigStore, MasterEntry, ProjectConfig};
    pub use crate::context::BuildContext;

    // Schemes
    pub use crate::scheme::{
        ResolvedScheme, Scheme, SchemeError, SchemeStore, SchemesDocument, Variables,
        resolve_scheme,
    };

    // Templating
    pub use crate::references::{InjectOptions, ResourceManifest, inject_references};
    pub use crate::template::{apply_replacements, flatten_csp};

    // Build output
    pub use crate::build_vars::{BuildInfo, render_build_vars};
    pub use crate::types::{Platform, ResourceKind};
}
