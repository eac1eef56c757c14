//! Trait definitions for resource scanners.

use crate::error::ParseError;
use crate::resource::Resources;

/// A scanner that turns raw resource text into a resource module.
///
/// Scanners keep their token accumulators between calls and reset them at the
/// start of every parse, so one instance can be reused sequentially.
pub trait ResourceParser {
    /// Format specific metadata returned alongside the module.
    type Metadata;

    /// Parse raw text.
    ///
    /// Returns `Ok(None)` when nothing worth indexing was found.
    fn parse(&mut self, raw: &str) -> Result<Option<Resources<Self::Metadata>>, ParseError>;
}
