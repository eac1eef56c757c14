//! CSS parse options and selector prefixes.

use std::fmt;
use std::sync::Arc;

use resmod_core::NameConvention;
use serde::Serialize;

/// Category of an extracted css token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorType {
    Id,
    Class,
    Variable,
}

impl SelectorType {
    /// Built-in prefix for this selector type under the given convention.
    pub fn prefix(&self, convention: NameConvention) -> &'static str {
        match (convention, self) {
            (NameConvention::UpperSnake, Self::Class) => "CLASS_",
            (NameConvention::UpperSnake, Self::Id) => "ID_",
            (NameConvention::UpperSnake, Self::Variable) => "VAR_",
            (NameConvention::Snake, Self::Class) => "class_",
            (NameConvention::Snake, Self::Id) => "id_",
            (NameConvention::Snake, Self::Variable) => "var_",
            (NameConvention::Pascal, Self::Class) => "Class",
            (NameConvention::Pascal, Self::Id) => "Id",
            (NameConvention::Pascal, Self::Variable) => "Var",
            (NameConvention::Camel, Self::Class) => "class",
            (NameConvention::Camel, Self::Id) => "id",
            (NameConvention::Camel, Self::Variable) => "var",
        }
    }

    /// Symbol that introduces the selector in css source.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Id => "#",
            Self::Class => ".",
            Self::Variable => "--",
        }
    }
}

/// Custom key transform applied after the built-in convention.
pub type ConventionFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Custom prefix for a selector type.
pub type SelectorPrefixFn = Arc<dyn Fn(SelectorType) -> String + Send + Sync>;

/// Options controlling which selectors are extracted and how keys are named.
#[derive(Clone)]
pub struct CssParseOptions {
    /// Include `#id` selectors
    pub css_id: bool,

    /// Include `--custom-property` names
    pub css_variable: bool,

    /// Include `.class` selectors
    pub css_class: bool,

    /// Drop `.`, `#` and `--` from raw values
    pub exclude_selector_symbol: bool,

    /// Prefix every key with its selector category
    pub prefix: bool,

    /// Custom prefix per selector type, used when `prefix` is set
    pub prefix_cb: Option<SelectorPrefixFn>,

    /// Convention used to build keys
    pub convention: NameConvention,

    /// Custom transform applied to the converted key
    pub convention_cb: Option<ConventionFn>,
}

impl Default for CssParseOptions {
    fn default() -> Self {
        Self {
            css_id: true,
            css_variable: true,
            css_class: true,
            exclude_selector_symbol: false,
            prefix: false,
            prefix_cb: None,
            convention: NameConvention::Camel,
            convention_cb: None,
        }
    }
}

impl fmt::Debug for CssParseOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CssParseOptions")
            .field("css_id", &self.css_id)
            .field("css_variable", &self.css_variable)
            .field("css_class", &self.css_class)
            .field("exclude_selector_symbol", &self.exclude_selector_symbol)
            .field("prefix", &self.prefix)
            .field("prefix_cb", &self.prefix_cb.is_some())
            .field("convention", &self.convention)
            .field("convention_cb", &self.convention_cb.is_some())
            .finish()
    }
}

impl CssParseOptions {
    /// Resolve the prefix for a selector type, if prefixing is enabled.
    pub(crate) fn prefix_for(&self, selector_type: SelectorType) -> Option<String> {
        if !self.prefix {
            return None;
        }
        match &self.prefix_cb {
            Some(cb) => Some(cb(selector_type)),
            None => Some(selector_type.prefix(self.convention).to_string()),
        }
    }

    /// Whether the given selector type should be extracted.
    pub(crate) fn includes(&self, selector_type: SelectorType) -> bool {
        match selector_type {
            SelectorType::Id => self.css_id,
            SelectorType::Class => self.css_class,
            SelectorType::Variable => self.css_variable,
        }
    }
}
