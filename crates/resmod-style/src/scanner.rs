//! Single-pass css scanner.

use resmod_core::{ParseError, ResourceModule, ResourceParser, ResourceType, Resources, Selector};
use serde::Serialize;

use crate::options::{CssParseOptions, SelectorType};

/// Metadata of a parsed stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleMetadata {
    /// The stylesheet exactly as it was given to the scanner
    pub raw: String,
}

/// Resources produced by the css scanner.
pub type StyleResources = Resources<StyleMetadata>;

/// At-rules whose block holds ordinary rules rather than declarations.
const GROUPING_AT_RULES: &[&str] = &["media", "supports", "layer", "container", "document", "scope"];

/// Where the scanner currently is in the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    /// Selector list of a rule
    Selectors,
    /// Inside `[...]` of an attribute selector
    Attribute,
    /// Prelude of an at-rule; `naming` while the at-rule name is being read
    AtRule { naming: bool },
    /// Inside a declaration block or a skipped at-rule block
    Block { depth: usize },
}

/// Css module scanner.
///
/// Extracts class, id and custom property names in first-seen order.
/// Declaration values are never inspected beyond custom property names.
#[derive(Debug)]
pub struct CssModuleScanner {
    options: CssParseOptions,
    name: Selector,
    selector_type: Option<SelectorType>,
    token_start: usize,
}

impl CssModuleScanner {
    /// Create a scanner with the given options.
    pub fn new(options: CssParseOptions) -> Self {
        let name = Selector::new(Some(options.convention), options.prefix);
        Self {
            options,
            name,
            selector_type: None,
            token_start: 0,
        }
    }

    /// Scan a raw stylesheet.
    pub fn scan(&mut self, raw: &str) -> Result<Option<StyleResources>, ParseError> {
        self.name.reset();
        self.selector_type = None;

        let chars: Vec<char> = raw.chars().collect();
        let mut module = ResourceModule::new();
        let mut context = Context::Selectors;
        let mut at_name = String::new();
        let mut in_comment = false;
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];

            if in_comment {
                if ch == '*' && chars.get(i + 1) == Some(&'/') {
                    in_comment = false;
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }
            if ch == '/' && chars.get(i + 1) == Some(&'*') {
                in_comment = true;
                i += 2;
                continue;
            }

            match context {
                Context::Selectors => match ch {
                    '.' | '#' => {
                        self.commit(&mut module)?;
                        let selector_type = if ch == '.' {
                            SelectorType::Class
                        } else {
                            SelectorType::Id
                        };
                        if self.options.includes(selector_type) {
                            self.open(selector_type, i);
                        }
                    }
                    '-' if self.selector_type.is_none() && opens_variable(&chars, i) => {
                        self.open_variable(&chars, i)?;
                        i += 2;
                        continue;
                    }
                    '{' => {
                        self.commit(&mut module)?;
                        context = Context::Block { depth: 1 };
                    }
                    '}' => {
                        // end of a grouping at-rule
                        self.commit(&mut module)?;
                    }
                    '[' => {
                        self.commit(&mut module)?;
                        context = Context::Attribute;
                    }
                    '@' if self.selector_type.is_none() => {
                        at_name.clear();
                        context = Context::AtRule { naming: true };
                    }
                    c if ends_selector(c) => self.commit(&mut module)?,
                    _ => {
                        if self.selector_type.is_some() {
                            self.name.append(ch)?;
                        }
                    }
                },

                Context::Attribute => match ch {
                    '"' | '\'' => i = skip_string(&chars, i),
                    ']' => context = Context::Selectors,
                    _ => {}
                },

                Context::AtRule { naming } => {
                    if naming && (ch.is_ascii_alphanumeric() || ch == '-') {
                        at_name.push(ch.to_ascii_lowercase());
                        i += 1;
                        continue;
                    }
                    context = match ch {
                        '{' if GROUPING_AT_RULES.contains(&at_name.as_str()) => Context::Selectors,
                        '{' => Context::Block { depth: 1 },
                        ';' => Context::Selectors,
                        '"' | '\'' => {
                            i = skip_string(&chars, i);
                            Context::AtRule { naming: false }
                        }
                        _ => Context::AtRule { naming: false },
                    };
                }

                Context::Block { depth } => match ch {
                    '"' | '\'' => {
                        self.commit(&mut module)?;
                        i = skip_string(&chars, i);
                    }
                    '{' => {
                        self.commit(&mut module)?;
                        context = Context::Block { depth: depth + 1 };
                    }
                    '}' => {
                        self.commit(&mut module)?;
                        context = if depth > 1 {
                            Context::Block { depth: depth - 1 }
                        } else {
                            Context::Selectors
                        };
                    }
                    '-' if self.selector_type.is_none() && opens_variable(&chars, i) => {
                        self.open_variable(&chars, i)?;
                        i += 2;
                        continue;
                    }
                    c if c.is_whitespace() || matches!(c, ':' | ',' | ')' | ';' | '!') => {
                        self.commit(&mut module)?;
                    }
                    _ => {
                        if self.selector_type == Some(SelectorType::Variable) {
                            self.name.append(ch)?;
                        }
                    }
                },
            }

            i += 1;
        }

        self.commit(&mut module)?;

        if module.is_empty() {
            return Ok(None);
        }

        Ok(Some(Resources {
            module,
            metadata: StyleMetadata {
                raw: raw.to_string(),
            },
            resource_type: ResourceType::Css,
            extensions: vec!["css".to_string()],
        }))
    }

    /// Start a new token of the given type.
    fn open(&mut self, selector_type: SelectorType, offset: usize) {
        self.name.reset();
        if !self.options.exclude_selector_symbol {
            for ch in selector_type.symbol().chars() {
                self.name.append_raw(ch);
            }
        }
        self.selector_type = Some(selector_type);
        self.token_start = offset;
    }

    /// Handle `--` at `offset`. A third hyphen is never valid.
    fn open_variable(&mut self, chars: &[char], offset: usize) -> Result<(), ParseError> {
        if !self.options.css_variable {
            return Ok(());
        }
        if chars.get(offset + 2) == Some(&'-') {
            return Err(ParseError::MalformedVariable { offset });
        }
        self.open(SelectorType::Variable, offset);
        Ok(())
    }

    /// Close the open token, if any, and add it to the module.
    fn commit(&mut self, module: &mut ResourceModule) -> Result<(), ParseError> {
        let Some(selector_type) = self.selector_type.take() else {
            return Ok(());
        };

        if self.name.is_empty() {
            if selector_type == SelectorType::Variable {
                return Err(ParseError::MalformedVariable {
                    offset: self.token_start,
                });
            }
            self.name.reset();
            return Ok(());
        }

        let mut key = self.name.as_str().to_string();
        if let Some(cb) = &self.options.convention_cb {
            key = cb(&key);
        }
        if let Some(prefix) = self.options.prefix_for(selector_type) {
            key = format!("{prefix}{key}");
        }

        module.insert(key, self.name.raw_str());
        self.name.reset();
        Ok(())
    }
}

impl ResourceParser for CssModuleScanner {
    type Metadata = StyleMetadata;

    fn parse(&mut self, raw: &str) -> Result<Option<StyleResources>, ParseError> {
        self.scan(raw)
    }
}

/// Parse a raw stylesheet with the given options.
pub fn parse_css(raw: &str, options: &CssParseOptions) -> Result<Option<StyleResources>, ParseError> {
    CssModuleScanner::new(options.clone()).scan(raw)
}

/// Characters that close a selector token outside a declaration block.
fn ends_selector(ch: char) -> bool {
    ch.is_whitespace()
        || matches!(ch, ',' | ':' | '>' | '+' | '~' | '(' | ')' | ';' | '*' | '&' | '|')
}

/// Whether `--` at `i` starts a custom property. It must begin a token.
fn opens_variable(chars: &[char], i: usize) -> bool {
    if chars.get(i + 1) != Some(&'-') {
        return false;
    }
    match i.checked_sub(1).and_then(|prev| chars.get(prev)) {
        None => true,
        Some(&ch) => ch.is_whitespace() || matches!(ch, '{' | ';' | '(' | ',' | ':'),
    }
}

/// Return the index of the quote closing the string that opens at `start`.
fn skip_string(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            c if c == quote => return i,
            _ => {}
        }
        i += 1;
    }
    chars.len()
}
