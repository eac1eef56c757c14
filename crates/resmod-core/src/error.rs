//! Parse errors shared by every scanner.

/// Errors that can occur while scanning a resource.
///
/// Every variant fails the whole parse call. Finding nothing worth indexing is
/// not an error; scanners report it as `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid resource name character {ch:?} in {convention}, expected a-z, A-Z, 0-9 or hyphen (-)")]
    InvalidCharacter { convention: &'static str, ch: char },

    #[error("invalid operation, raw value is locked")]
    Locked,

    #[error("invalid css syntax on variable name at offset {offset}")]
    MalformedVariable { offset: usize },

    #[error("invalid svg hierarchy, expected {expected} but got {found}")]
    Hierarchy { expected: String, found: String },

    #[error("element should not have any child: {0}")]
    ChildlessElement(String),

    #[error("unterminated value for attribute {0}")]
    UnterminatedAttribute(String),

    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("unsupported vector format, only svg is supported")]
    UnsupportedVector,
}
