//! Character-level name convention engine.
//!
//! Identifiers are converted one character at a time so the scanners can feed
//! characters straight from the input without buffering a whole token first.
//! The per-token scratch state lives in [`Trace`], which the caller owns and
//! resets whenever a new token begins.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Naming convention applied to extracted identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NameConvention {
    /// `myBoxShadow`
    #[default]
    #[serde(rename = "camel")]
    Camel,
    /// `MyBoxShadow`
    #[serde(rename = "pascal")]
    Pascal,
    /// `my_box_shadow`
    #[serde(rename = "snake")]
    Snake,
    /// `MY_BOX_SHADOW`
    #[serde(rename = "Snake", alias = "SNAKE")]
    UpperSnake,
}

impl NameConvention {
    /// Get the string representation of this convention.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Camel => "camel",
            Self::Pascal => "pascal",
            Self::Snake => "snake",
            Self::UpperSnake => "Snake",
        }
    }

    /// Whether words are joined with an underscore.
    pub fn uses_underscore(&self) -> bool {
        matches!(self, Self::Snake | Self::UpperSnake)
    }
}

impl fmt::Display for NameConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a convention name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name convention {0:?}, expected one of camel, pascal, snake or Snake")]
pub struct UnknownConvention(pub String);

impl FromStr for NameConvention {
    type Err = UnknownConvention;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camel" => Ok(Self::Camel),
            "pascal" => Ok(Self::Pascal),
            "snake" => Ok(Self::Snake),
            "Snake" | "SNAKE" => Ok(Self::UpperSnake),
            other => Err(UnknownConvention(other.to_string())),
        }
    }
}

/// Scratch state carried through the conversion of a single identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trace {
    /// Position within the current segment
    pub index: usize,
    /// Number of segments started so far
    pub seg: usize,
    /// Whether the previous character was a segment separator
    pub hyphen: bool,
}

impl Trace {
    /// Reset to the state of a fresh token.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Transform one character of a css selector, css variable or svg id.
///
/// Returns `None` when the character is consumed without output (a segment
/// separator in camel or pascal case). Letters, digits, underscore and hyphen
/// are accepted; anything else is an invalid character.
pub fn transform_selector_char(
    convention: NameConvention,
    has_prefix: bool,
    ch: char,
    trace: &mut Trace,
) -> Result<Option<char>, ParseError> {
    if !(ch.is_ascii_alphanumeric() || ch == '-' || ch == '_') {
        return Err(ParseError::InvalidCharacter {
            convention: convention.as_str(),
            ch,
        });
    }

    match convention {
        NameConvention::Snake | NameConvention::UpperSnake => {
            if ch == '-' {
                trace.index = 0;
                trace.seg += 1;
                return Ok(Some('_'));
            }
            trace.index += 1;
            if convention == NameConvention::Snake {
                Ok(Some(ch.to_ascii_lowercase()))
            } else {
                Ok(Some(ch.to_ascii_uppercase()))
            }
        }
        NameConvention::Camel | NameConvention::Pascal => {
            if ch == '-' {
                if trace.hyphen {
                    return Ok(Some('_'));
                }
                trace.hyphen = true;
                trace.index = 0;
                trace.seg += 1;
                return Ok(None);
            }

            // a prefix always leads the key, so the first word is capitalised too
            let capitalise_first = convention == NameConvention::Pascal || has_prefix;
            let out = if trace.index > 0 {
                ch.to_ascii_lowercase()
            } else if trace.seg > 0 || capitalise_first {
                ch.to_ascii_uppercase()
            } else {
                ch.to_ascii_lowercase()
            };
            trace.index += 1;
            trace.hyphen = false;
            Ok(Some(out))
        }
    }
}

/// Lowercase a name character.
///
/// Accepts ASCII letters and hyphen, plus digits when `numeric` is set.
pub fn lowercase_char(ch: char, numeric: bool) -> Result<char, ParseError> {
    match ch {
        'A'..='Z' | 'a'..='z' | '-' => Ok(ch.to_ascii_lowercase()),
        '0'..='9' if numeric => Ok(ch),
        _ => Err(ParseError::InvalidCharacter {
            convention: "lowercase",
            ch,
        }),
    }
}

/// Uppercase a name character.
///
/// Accepts ASCII letters and hyphen, plus digits when `numeric` is set.
pub fn uppercase_char(ch: char, numeric: bool) -> Result<char, ParseError> {
    match ch {
        'A'..='Z' | 'a'..='z' | '-' => Ok(ch.to_ascii_uppercase()),
        '0'..='9' if numeric => Ok(ch),
        _ => Err(ParseError::InvalidCharacter {
            convention: "uppercase",
            ch,
        }),
    }
}

/// Convert a file name (without extension) into an identifier.
///
/// Dot and hyphen separate words. In camel and pascal case the separator is
/// dropped and the next character is uppercased; underscore is treated the
/// same way there. In both snake cases separators become an underscore.
pub fn transform_file_name(name: &str, convention: NameConvention) -> Result<String, ParseError> {
    let underscore = convention.uses_underscore();
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;

    for (i, ch) in name.chars().enumerate() {
        match ch {
            '.' | '-' => {
                if underscore {
                    out.push('_');
                } else {
                    upper_next = true;
                }
            }
            '_' => {
                if underscore {
                    out.push('_');
                } else {
                    upper_next = true;
                }
            }
            _ => {
                let upper = upper_next
                    || convention == NameConvention::UpperSnake
                    || (i == 0 && convention == NameConvention::Pascal);
                let converted = if upper {
                    uppercase_char(ch, true)?
                } else {
                    lowercase_char(ch, true)?
                };
                out.push(converted);
                upper_next = false;
            }
        }
    }

    Ok(out)
}

/// Derive an identifier from a file path using its stem.
pub fn file_identifier(path: &Path, convention: NameConvention) -> Result<String, ParseError> {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    transform_file_name(stem, convention)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(input: &str, convention: NameConvention, has_prefix: bool) -> String {
        let mut trace = Trace::default();
        input
            .chars()
            .filter_map(|ch| transform_selector_char(convention, has_prefix, ch, &mut trace).unwrap())
            .collect()
    }

    #[test]
    fn converts_hyphenated_selectors() {
        assert_eq!(convert("my-box-shadow", NameConvention::Camel, false), "myBoxShadow");
        assert_eq!(convert("my-box-shadow", NameConvention::Pascal, false), "MyBoxShadow");
        assert_eq!(convert("my-box-shadow", NameConvention::Snake, false), "my_box_shadow");
        assert_eq!(
            convert("my-box-shadow", NameConvention::UpperSnake, false),
            "MY_BOX_SHADOW"
        );
    }

    #[test]
    fn camel_with_prefix_capitalises_first_word() {
        assert_eq!(convert("info", NameConvention::Camel, true), "Info");
        assert_eq!(convert("myMask", NameConvention::Camel, true), "Mymask");
    }

    #[test]
    fn lowercases_inside_segments() {
        assert_eq!(convert("Card-Title", NameConvention::Camel, false), "cardTitle");
        assert_eq!(convert("Card-Title", NameConvention::Pascal, false), "CardTitle");
        assert_eq!(convert("Card-Title", NameConvention::Snake, false), "card_title");
    }

    #[test]
    fn double_hyphen_becomes_underscore() {
        assert_eq!(convert("block--mod", NameConvention::Camel, false), "block_Mod");
    }

    #[test]
    fn keeps_digits_and_underscore() {
        assert_eq!(convert("col-2", NameConvention::Camel, false), "col2");
        assert_eq!(convert("poly_id", NameConvention::Pascal, false), "Poly_id");
    }

    #[test]
    fn conversion_is_stable_on_its_output() {
        for (input, convention) in [
            ("info", NameConvention::Camel),
            ("my_box", NameConvention::Snake),
            ("MY_BOX", NameConvention::UpperSnake),
            ("Info", NameConvention::Pascal),
        ] {
            let once = convert(input, convention, false);
            assert_eq!(convert(&once, convention, false), once);
        }
    }

    #[test]
    fn rejects_invalid_characters() {
        let mut trace = Trace::default();
        let err = transform_selector_char(NameConvention::Camel, false, '>', &mut trace).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidCharacter {
                convention: "camel",
                ch: '>'
            }
        );
    }

    #[test]
    fn case_helpers_respect_numeric_flag() {
        assert_eq!(lowercase_char('A', false), Ok('a'));
        assert_eq!(uppercase_char('-', false), Ok('-'));
        assert!(lowercase_char('1', false).is_err());
        assert_eq!(lowercase_char('1', true), Ok('1'));
        assert!(uppercase_char(' ', true).is_err());
    }

    #[test]
    fn transforms_file_names() {
        assert_eq!(transform_file_name("my-icon", NameConvention::Camel).unwrap(), "myIcon");
        assert_eq!(transform_file_name("my-icon", NameConvention::Pascal).unwrap(), "MyIcon");
        assert_eq!(transform_file_name("my-icon", NameConvention::Snake).unwrap(), "my_icon");
        assert_eq!(
            transform_file_name("my-icon", NameConvention::UpperSnake).unwrap(),
            "MY_ICON"
        );
        assert_eq!(transform_file_name("icon.v2", NameConvention::Camel).unwrap(), "iconV2");
        assert_eq!(transform_file_name("arrow_up", NameConvention::Camel).unwrap(), "arrowUp");
        assert_eq!(transform_file_name("arrow_up", NameConvention::Snake).unwrap(), "arrow_up");
    }

    #[test]
    fn file_identifier_drops_extension() {
        let path = Path::new("assets/icons/my-icon.svg");
        assert_eq!(file_identifier(path, NameConvention::Camel).unwrap(), "myIcon");
        assert_eq!(file_identifier(path, NameConvention::Pascal).unwrap(), "MyIcon");
        assert_eq!(file_identifier(path, NameConvention::Snake).unwrap(), "my_icon");
        assert_eq!(file_identifier(path, NameConvention::UpperSnake).unwrap(), "MY_ICON");
    }

    #[test]
    fn file_name_rejects_spaces() {
        assert!(transform_file_name("my icon", NameConvention::Camel).is_err());
    }

    #[test]
    fn parses_convention_names() {
        assert_eq!("camel".parse::<NameConvention>().unwrap(), NameConvention::Camel);
        assert_eq!("SNAKE".parse::<NameConvention>().unwrap(), NameConvention::UpperSnake);
        assert_eq!(NameConvention::UpperSnake.to_string(), "Snake");
        assert!("kebab".parse::<NameConvention>().is_err());
    }
}
