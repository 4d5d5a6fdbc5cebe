use thiserror::Error;

/// Errors produced by type construction and parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("string too long: at most {max} symbols, got {actual}")]
    StringTooLong { max: usize, actual: usize },

    #[error("string contains an embedded NUL")]
    EmbeddedNul,
}
