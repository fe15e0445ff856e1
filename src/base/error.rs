use thiserror::Error;

/// Every failure a cookie call can report.
///
/// All variants are detected synchronously, before any store mutation, and
/// none are retryable.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CookieError {
    /// Fewer positional arguments than the call requires.
    #[error("Too few parameters: expected {expected}, got {actual}")]
    Arity { expected: usize, actual: usize },

    /// A positional argument has the wrong kind. `position` is 1-based.
    #[error("Parameter {position} should be {expected} type, got {actual}")]
    Type {
        position: usize,
        expected: &'static str,
        actual: &'static str,
    },

    /// A well-typed but semantically invalid field.
    #[error("Invalid {field}: expected {expected}")]
    Validation {
        field: &'static str,
        expected: &'static str,
    },

    /// The stored value for `key` is not a valid percent-escaped string.
    #[error("Cannot unescape value of cookie {key:?}: {reason}")]
    Decode { key: String, reason: String },

    /// The host cookie store is missing or has the wrong shape.
    #[error("Cookie store unavailable: {0}")]
    Unavailable(String),
}

impl CookieError {
    pub fn arity(expected: usize, actual: usize) -> Self {
        CookieError::Arity { expected, actual }
    }

    pub fn type_mismatch(position: usize, expected: &'static str, actual: &'static str) -> Self {
        CookieError::Type {
            position,
            expected,
            actual,
        }
    }

    pub fn validation(field: &'static str, expected: &'static str) -> Self {
        CookieError::Validation { field, expected }
    }

    pub fn decode(key: impl Into<String>, reason: impl ToString) -> Self {
        CookieError::Decode {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        CookieError::Unavailable(reason.into())
    }

    /// Stable numeric code for hosts that can only carry integers.
    pub fn as_i32(&self) -> i32 {
        match self {
            CookieError::Arity { .. } => -1000,
            CookieError::Type { .. } => -1001,
            CookieError::Validation { .. } => -1002,
            CookieError::Decode { .. } => -1003,
            CookieError::Unavailable(_) => -1004,
        }
    }

    /// Error class name as surfaced to the host.
    pub fn kind(&self) -> &'static str {
        match self {
            CookieError::Arity { .. } => "ArityError",
            CookieError::Type { .. } => "TypeError",
            CookieError::Validation { .. } => "ValidationError",
            CookieError::Decode { .. } => "DecodeError",
            CookieError::Unavailable(_) => "UnavailableError",
        }
    }
}
