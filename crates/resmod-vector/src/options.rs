//! Vector parse options.

use std::fmt;
use std::sync::Arc;

use resmod_core::NameConvention;

use crate::types::{SvgElementType, VectorType};

/// Custom key transform. Receives the raw id value.
pub type ConventionFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Custom prefix per vector and element type.
pub type ElementPrefixFn = Arc<dyn Fn(VectorType, SvgElementType) -> String + Send + Sync>;

/// Options controlling how element ids become resource keys.
#[derive(Clone, Default)]
pub struct VectorParseOptions {
    /// Prefix every key with its element kind, e.g. `rectBox` or `txt_title`
    pub prefix: bool,

    /// Custom prefix, used when `prefix` is set
    pub prefix_cb: Option<ElementPrefixFn>,

    /// Convention used to build keys
    pub convention: NameConvention,

    /// Custom key transform replacing the built-in convention
    pub convention_cb: Option<ConventionFn>,

    /// Return the element tree even when no id was indexed
    pub include_meta: bool,
}

impl fmt::Debug for VectorParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorParseOptions")
            .field("prefix", &self.prefix)
            .field("prefix_cb", &self.prefix_cb.is_some())
            .field("convention", &self.convention)
            .field("convention_cb", &self.convention_cb.is_some())
            .field("include_meta", &self.include_meta)
            .finish()
    }
}

impl VectorParseOptions {
    /// Resolve the key prefix for an element, if prefixing is enabled.
    pub(crate) fn prefix_for(&self, element_type: SvgElementType) -> Option<String> {
        if !self.prefix {
            return None;
        }
        match &self.prefix_cb {
            Some(cb) => Some(cb(VectorType::Svg, element_type)),
            None => Some(element_type.prefix(self.convention).to_string()),
        }
    }

    /// Convention applied while accumulating ids. A convention callback
    /// takes over conversion entirely.
    pub(crate) fn id_convention(&self) -> Option<NameConvention> {
        match self.convention_cb {
            Some(_) => None,
            None => Some(self.convention),
        }
    }
}
