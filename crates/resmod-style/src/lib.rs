//! CSS module scanner.
//!
//! Extracts class, id and custom property names from raw stylesheets in a
//! single pass. Declaration bodies are skipped; only custom properties are
//! picked out of them.

pub mod options;
pub mod scanner;

pub use options::{CssParseOptions, SelectorType};
pub use scanner::{parse_css, CssModuleScanner, StyleMetadata, StyleResources};
