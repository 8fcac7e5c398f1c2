//! Master-file templating: `${KEY}` substitution with rendered scheme values.

pub mod csp;
pub mod substitute;
pub mod value;

pub use csp::{CSP_KEY, flatten_csp};
pub use substitute::{apply_replacements, substitute, unresolved_tokens};
pub use value::{RenderedVariables, render_variables, value_to_string};
