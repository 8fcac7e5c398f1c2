//! Errors raised while loading and resolving schemes.

use std::path::PathBuf;

/// Configuration errors for the schemes document.
///
/// Every variant is fatal: resolution never yields a partial result.
#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
    #[error("failed to read schemes file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schemes document: {0}")]
    Parse(String),

    #[error("schemes document has no 'schemes' section")]
    MissingSchemes,

    #[error("no scheme requested and the schemes document has no 'default'")]
    NoDefault,

    #[error("scheme '{0}' not found")]
    UnknownScheme(String),

    #[error("scheme '{scheme}' has base '{base}', which does not exist")]
    UnknownBase { scheme: String, base: String },

    #[error("override '{0}' requested but the schemes document has no 'overrides' section")]
    MissingOverrides(String),

    #[error("override '{0}' not found")]
    UnknownOverride(String),

    #[error("cyclic base chain: {}", chain.join(" -> "))]
    CyclicBase { chain: Vec<String> },
}

pub type Result<T> = std::result::Result<T, SchemeError>;
