//! Attribute scanner for a single SVG tag.

use resmod_core::{ParseError, RawValue, ResourceModule, Selector};

use crate::metadata::SvgMetadata;
use crate::options::VectorParseOptions;

/// Attribute names allow namespaced and dotted forms such as `xlink:href`.
fn attribute_char(ch: char) -> Result<char, ParseError> {
    if ch.is_ascii_alphanumeric() || matches!(ch, '-' | ':' | '_' | '.') {
        Ok(ch)
    } else {
        Err(ParseError::InvalidCharacter {
            convention: "attribute",
            ch,
        })
    }
}

/// Scans `name="value"` pairs of one tag.
///
/// Every attribute is stored on the element. Values of whitelisted attributes
/// are also converted to a key and inserted into the resource module, when the
/// caller provides one.
#[derive(Debug)]
pub struct SvgAttributeScanner {
    options: VectorParseOptions,
    attr: RawValue,
    value: RawValue,
    key: Selector,
}

impl SvgAttributeScanner {
    pub fn new(options: VectorParseOptions) -> Self {
        let key = Selector::new(options.id_convention(), options.prefix);
        Self {
            options,
            attr: RawValue::new(Some(attribute_char)),
            value: RawValue::new(None),
            key,
        }
    }

    /// Scan attributes starting at `start`, just past the tag name.
    ///
    /// Returns the index of the unquoted `/` or `>` that ends the tag.
    pub fn scan(
        &mut self,
        chars: &[char],
        start: usize,
        node: &mut SvgMetadata,
        mut module: Option<&mut ResourceModule>,
    ) -> Result<usize, ParseError> {
        self.reset();
        let mut quote: Option<char> = None;
        let mut expect_value = false;
        let mut indexed = false;
        let mut i = start;

        while i < chars.len() {
            let ch = chars[i];

            if let Some(open) = quote {
                if ch == open {
                    self.commit(node, indexed, module.as_deref_mut());
                    quote = None;
                } else {
                    self.value.append(ch)?;
                    if indexed {
                        self.key.append(ch)?;
                    }
                }
                i += 1;
                continue;
            }

            match ch {
                c if c.is_whitespace() => {
                    if !self.attr.is_empty() {
                        self.attr.lock();
                    }
                }
                '=' => {
                    if self.attr.is_empty() || expect_value {
                        return Err(ParseError::UnexpectedCharacter { ch, offset: i });
                    }
                    self.attr.lock();
                    expect_value = true;
                }
                '"' | '\'' => {
                    if !expect_value {
                        return Err(ParseError::UnexpectedCharacter { ch, offset: i });
                    }
                    indexed = module.is_some() && node.element_type.indexes(self.attr.as_str());
                    expect_value = false;
                    quote = Some(ch);
                }
                '/' | '>' => {
                    if expect_value {
                        return Err(ParseError::UnexpectedCharacter { ch, offset: i });
                    }
                    self.commit_boolean(node);
                    return Ok(i);
                }
                _ => {
                    if expect_value {
                        return Err(ParseError::UnexpectedCharacter { ch, offset: i });
                    }
                    if self.attr.is_locked() {
                        // previous attribute had no value
                        self.commit_boolean(node);
                    }
                    self.attr.append(ch)?;
                }
            }
            i += 1;
        }

        match quote {
            Some(_) => Err(ParseError::UnterminatedAttribute(
                self.attr.raw_str().to_string(),
            )),
            None => Err(ParseError::UnexpectedEof),
        }
    }

    /// Clear the accumulators.
    pub fn reset(&mut self) {
        self.attr.reset();
        self.value.reset();
        self.key.reset();
    }

    fn commit(
        &mut self,
        node: &mut SvgMetadata,
        indexed: bool,
        module: Option<&mut ResourceModule>,
    ) {
        let value = self.value.raw_str().to_string();

        if let Some(module) = module.filter(|_| indexed && !self.key.is_empty()) {
            let mut key = self.key.as_str().to_string();
            if let Some(cb) = &self.options.convention_cb {
                key = cb(&key);
            }
            if let Some(prefix) = self.options.prefix_for(node.element_type) {
                key = format!("{prefix}{key}");
            }
            module.insert(key, value.clone());
        }

        node.attributes
            .insert(self.attr.raw_str().to_string(), value);
        self.reset();
    }

    fn commit_boolean(&mut self, node: &mut SvgMetadata) {
        if !self.attr.is_empty() {
            node.attributes
                .insert(self.attr.raw_str().to_string(), String::new());
        }
        self.reset();
    }
}
