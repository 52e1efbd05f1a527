use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid record id: {0}")]
    InvalidId(String),

    #[error("invalid id length: expected {expected} hex characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("`{value}` is not a valid value for `{field}`")]
    InvalidValue { field: &'static str, value: String },

    #[error("invalid date `{0}`: expected RFC 3339 or YYYY-MM-DD")]
    InvalidDate(String),
}
