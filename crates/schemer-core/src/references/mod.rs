//! HTML asset wiring: resource manifest plus marker injection.

pub mod inject;
pub mod manifest;

pub use inject::{InjectOptions, inject_references, reference_tags};
pub use manifest::{ResourceManifest, is_live_url};
