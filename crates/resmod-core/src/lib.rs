//! Shared building blocks for resmod scanners.
//!
//! This crate holds the character-level name convention engine, the token
//! accumulators the scanners feed characters into, and the resource module
//! types both the CSS and SVG scanners produce.

pub mod convention;
pub mod error;
pub mod resource;
pub mod token;
pub mod traits;

pub use convention::{file_identifier, transform_file_name, NameConvention, Trace};
pub use error::ParseError;
pub use resource::{ResourceModule, ResourceType, Resources};
pub use token::{RawValue, Selector};
pub use traits::ResourceParser;
