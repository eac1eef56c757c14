//! SVG element tree.

use indexmap::IndexMap;
use serde::Serialize;

use crate::types::SvgElementType;

/// One SVG element and its subtree.
///
/// A node holds either `ctext` or `children`, never both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SvgMetadata {
    /// Tag name as written in the source, e.g. `clipPath`
    pub name: String,

    /// Element kind resolved from the tag name
    pub element_type: SvgElementType,

    /// Attributes in source order, values verbatim
    pub attributes: IndexMap<String, String>,

    /// Trimmed text content of `text` and `tspan` elements
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ctext: Option<String>,

    /// Child elements in source order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SvgMetadata>,
}

impl SvgMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            element_type: SvgElementType::from_tag(&name),
            name,
            ..Self::default()
        }
    }

    /// Builder style attribute setter.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Whether text between the tags is kept as `ctext`.
    pub fn holds_text(&self) -> bool {
        self.element_type == SvgElementType::Text || self.name.eq_ignore_ascii_case("tspan")
    }
}
