//! Build schemes: named variable profiles with base inheritance and overrides.

pub mod error;
pub mod parser;
pub mod resolver;
pub mod schema;
pub mod store;

pub use error::SchemeError;
pub use parser::{parse_schemes_file, parse_schemes_str};
pub use resolver::resolve_scheme;
pub use schema::{ResolvedScheme, Scheme, SchemeSelection, SchemesDocument, Variables};
pub use store::SchemeStore;
