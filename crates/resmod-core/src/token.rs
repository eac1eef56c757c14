//! Token accumulators fed one character at a time by the scanners.

use std::fmt;

use crate::convention::{transform_selector_char, NameConvention, Trace};
use crate::error::ParseError;

/// A plain character transform, e.g. [`crate::convention::lowercase_char`].
pub type CharTransform = fn(char) -> Result<char, ParseError>;

/// Accumulates a transformed and a raw copy of a token.
///
/// Once locked, further appends fail until the value is reset. The svg
/// attribute scanner locks the attribute name as soon as it is complete.
#[derive(Debug, Clone, Default)]
pub struct RawValue {
    name: String,
    raw: String,
    transform: Option<CharTransform>,
    locked: bool,
}

impl RawValue {
    /// Create a raw value with an optional character transform.
    pub fn new(transform: Option<CharTransform>) -> Self {
        Self {
            transform,
            ..Self::default()
        }
    }

    /// Append a character to both buffers.
    pub fn append(&mut self, ch: char) -> Result<&mut Self, ParseError> {
        if self.locked {
            return Err(ParseError::Locked);
        }
        match self.transform {
            Some(transform) => self.name.push(transform(ch)?),
            None => self.name.push(ch),
        }
        self.raw.push(ch);
        Ok(self)
    }

    /// Clear both buffers and unlock.
    pub fn reset(&mut self) {
        self.name.clear();
        self.raw.clear();
        self.locked = false;
    }

    /// Refuse any further append until [`RawValue::reset`] is called.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    /// The transformed value.
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The value exactly as it appeared in the input.
    pub fn raw_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Accumulates a css selector or svg id, converting it with a name convention.
///
/// Leading selector symbols (`.`, `#`, `--`) go through [`Selector::append_raw`]
/// so they are kept in the raw value without reaching the converted key.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    value: String,
    raw: String,
    convention: Option<NameConvention>,
    has_prefix: bool,
    trace: Trace,
}

impl Selector {
    /// Create a selector. Without a convention characters are copied verbatim.
    pub fn new(convention: Option<NameConvention>, has_prefix: bool) -> Self {
        Self {
            convention,
            has_prefix,
            ..Self::default()
        }
    }

    /// Append a character to the raw value and its converted form to the value.
    pub fn append(&mut self, ch: char) -> Result<&mut Self, ParseError> {
        self.raw.push(ch);
        match self.convention {
            Some(convention) => {
                if let Some(out) =
                    transform_selector_char(convention, self.has_prefix, ch, &mut self.trace)?
                {
                    self.value.push(out);
                }
            }
            None => self.value.push(ch),
        }
        Ok(self)
    }

    /// Append a character to the raw value only.
    pub fn append_raw(&mut self, ch: char) -> &mut Self {
        self.raw.push(ch);
        self
    }

    /// Clear both values and start a fresh trace.
    pub fn reset(&mut self) {
        self.value.clear();
        self.raw.clear();
        self.trace.reset();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The converted value.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The value exactly as it appeared in the input, selector symbol included.
    pub fn raw_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convention::lowercase_char;

    fn lower(ch: char) -> Result<char, ParseError> {
        lowercase_char(ch, false)
    }

    #[test]
    fn raw_value_keeps_both_buffers() {
        let mut value = RawValue::new(Some(lower));
        for ch in "ClipPath".chars() {
            value.append(ch).unwrap();
        }
        assert_eq!(value.as_str(), "clippath");
        assert_eq!(value.raw_str(), "ClipPath");
        assert_eq!(value.to_string(), "clippath");
    }

    #[test]
    fn raw_value_refuses_append_after_lock() {
        let mut value = RawValue::new(None);
        value.append('x').unwrap();
        value.lock();
        assert!(value.is_locked());
        assert_eq!(value.append('y').unwrap_err(), ParseError::Locked);

        value.reset();
        assert!(!value.is_locked());
        assert!(value.is_empty());
        value.append('y').unwrap();
        assert_eq!(value.as_str(), "y");
    }

    #[test]
    fn raw_value_propagates_transform_errors() {
        let mut value = RawValue::new(Some(lower));
        assert!(matches!(
            value.append('1'),
            Err(ParseError::InvalidCharacter { ch: '1', .. })
        ));
    }

    #[test]
    fn selector_keeps_symbol_in_raw_only() {
        let mut selector = Selector::new(Some(NameConvention::Camel), false);
        selector.append_raw('.');
        for ch in "nav-item".chars() {
            selector.append(ch).unwrap();
        }
        assert_eq!(selector.as_str(), "navItem");
        assert_eq!(selector.raw_str(), ".nav-item");
    }

    #[test]
    fn selector_reset_restarts_trace() {
        let mut selector = Selector::new(Some(NameConvention::Camel), false);
        for ch in "a-b".chars() {
            selector.append(ch).unwrap();
        }
        selector.reset();
        for ch in "info".chars() {
            selector.append(ch).unwrap();
        }
        assert_eq!(selector.as_str(), "info");
    }

    #[test]
    fn selector_without_convention_copies() {
        let mut selector = Selector::new(None, false);
        for ch in "my-Mask".chars() {
            selector.append(ch).unwrap();
        }
        assert_eq!(selector.as_str(), "my-Mask");
        assert_eq!(selector.raw_str(), "my-Mask");
    }
}
