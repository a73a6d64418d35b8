//! Argument guards used when constructing commands and entities.
//!
//! Guard failures are precondition violations, not business outcomes: callers
//! propagate them as errors and the transport answers with 400.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    #[error("Required input {0} was empty.")]
    NullOrWhiteSpace(&'static str),

    #[error("Required input {param} cannot be zero or negative, got {value}.")]
    NegativeOrZero { param: &'static str, value: i64 },
}

impl GuardError {
    /// Name of the argument that was rejected.
    pub fn param(&self) -> &'static str {
        match self {
            Self::NullOrWhiteSpace(param) => param,
            Self::NegativeOrZero { param, .. } => param,
        }
    }
}

/// Reject empty or whitespace-only text, returning it unchanged otherwise.
pub fn not_null_or_whitespace(
    value: impl Into<String>,
    param: &'static str,
) -> Result<String, GuardError> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(GuardError::NullOrWhiteSpace(param));
    }
    Ok(value)
}

pub fn not_negative_or_zero(value: i64, param: &'static str) -> Result<i64, GuardError> {
    if value <= 0 {
        return Err(GuardError::NegativeOrZero { param, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_blank_text() {
        assert_eq!(
            not_null_or_whitespace("", "name"),
            Err(GuardError::NullOrWhiteSpace("name"))
        );
        assert_eq!(
            not_null_or_whitespace(" \t\n", "name"),
            Err(GuardError::NullOrWhiteSpace("name"))
        );
    }

    #[test]
    fn test_keeps_text_untrimmed() {
        assert_eq!(not_null_or_whitespace(" Acme ", "name").unwrap(), " Acme ");
    }

    #[test]
    fn test_rejects_non_positive_ids() {
        assert!(not_negative_or_zero(0, "id").is_err());
        let err = not_negative_or_zero(-4, "id").unwrap_err();
        assert_eq!(err.param(), "id");
        assert_eq!(
            err.to_string(),
            "Required input id cannot be zero or negative, got -4."
        );
        assert_eq!(not_negative_or_zero(7, "id"), Ok(7));
    }

    #[test]
    fn test_blank_message() {
        let err = GuardError::NullOrWhiteSpace("name");
        assert_eq!(err.to_string(), "Required input name was empty.");
    }
}
