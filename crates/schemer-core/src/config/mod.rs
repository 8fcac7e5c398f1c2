//! Project configuration (`schemer.toml`)
//!
//! Locates the schemes document, resource manifest, bundle paths and the set
//! of master files rendered for each platform.

pub mod parser;
pub mod paths;
pub mod schema;
pub mod store;

pub use parser::{parse_project_toml, parse_project_toml_str};
pub use paths::{PROJECT_CONFIG_FILE, project_config_path, resolve_project_path};
pub use schema::{BundlesConfig, MasterEntry, PathsConfig, ProjectConfig};
pub use store::ConfigStore;
