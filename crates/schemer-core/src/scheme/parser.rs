//! YAML parser for the schemes document with line-context errors

use std::path::Path;

use super::error::{Result, SchemeError};
use super::schema::SchemesDocument;
use crate::config::parser::get_line_context;

/// Read and parse a schemes document from disk.
pub fn parse_schemes_file(path: &Path) -> Result<SchemesDocument> {
    let content = std::fs::read_to_string(path).map_err(|source| SchemeError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_schemes_str(&content)
}

/// Parse schemes document content.
pub fn parse_schemes_str(content: &str) -> Result<SchemesDocument> {
    if content.trim().is_empty() {
        return Err(SchemeError::MissingSchemes);
    }

    let document: SchemesDocument =
        serde_yaml::from_str(content).map_err(|e| enhance_yaml_error(e, content))?;

    if document.schemes.is_none() {
        return Err(SchemeError::MissingSchemes);
    }

    Ok(document)
}

fn enhance_yaml_error(error: serde_yaml::Error, content: &str) -> SchemeError {
    match error.location() {
        Some(location) => {
            let context = get_line_context(content, location.line());
            SchemeError::Parse(format!(
                "YAML error at line {}:\n{}\n\nError: {}",
                location.line(),
                context,
                error
            ))
        }
        None => SchemeError::Parse(error.to_string()),
    }
}
