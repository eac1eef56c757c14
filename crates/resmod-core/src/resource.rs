//! Resource module and parse result types.

use indexmap::IndexMap;
use serde::Serialize;

/// Ordered mapping from generated identifier to the raw source value.
///
/// Keys are unique and keep first-seen order. Inserting a key that is already
/// present leaves the existing entry untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResourceModule {
    entries: IndexMap<String, String>,
}

impl ResourceModule {
    /// Create an empty module.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry unless the key already exists.
    ///
    /// Returns `true` when the entry was added.
    pub fn insert(&mut self, key: impl Into<String>, raw: impl Into<String>) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, raw.into());
        true
    }

    /// Look up the raw value of a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fold another module into this one, keeping existing keys.
    pub fn merge(&mut self, other: ResourceModule) {
        for (key, raw) in other.entries {
            self.entries.entry(key).or_insert(raw);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResourceModule {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut module = Self::new();
        for (key, raw) in iter {
            module.insert(key, raw);
        }
        module
    }
}

/// Kind of resource a scanner produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Css,
    Scss,
    Sass,
    Svg,
}

impl ResourceType {
    /// Resolve a resource type from a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "css" => Some(Self::Css),
            "scss" => Some(Self::Scss),
            "sass" => Some(Self::Sass),
            "svg" => Some(Self::Svg),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Sass => "sass",
            Self::Svg => "svg",
        }
    }

    /// Whether the resource is a stylesheet.
    pub fn is_style(&self) -> bool {
        !matches!(self, Self::Svg)
    }
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resources<M> {
    /// Extracted identifiers
    pub module: ResourceModule,

    /// Format specific metadata
    pub metadata: M,

    /// Type of the parsed resource
    pub resource_type: ResourceType,

    /// File extensions the resource was read from
    pub extensions: Vec<String>,
}
