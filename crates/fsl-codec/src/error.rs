use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("malformed ledger: expected {expected} bytes, got {actual}")]
    MalformedLedger { expected: usize, actual: usize },

    #[error("unknown {field} value: {value}")]
    UnknownEnumValue { field: &'static str, value: u8 },

    #[error("string too long: at most {max} symbols, got {actual}")]
    StringTooLong { max: usize, actual: usize },

    #[error("corrupt {field}: {reason}")]
    CorruptField { field: &'static str, reason: String },
}

pub type CodecResult<T> = Result<T, CodecError>;
