//! Use-case outcomes
//!
//! Every command or query handler returns an [`Outcome`] instead of failing for
//! anticipated business conditions. Exactly one state is active at a time, and a
//! value is only carried by the success states.
//!
//! ```text
//!   Success(T) ──┐
//!   Created(T) ──┤
//!   NotFound   ──┼──► transport mapping (axum_helpers::results)
//!   Invalid    ──┤
//!   Error      ──┘
//! ```
//!
//! Argument preconditions are not part of this taxonomy: they are rejected when a
//! command is constructed, see [`guard`].
//!
//! # Example
//!
//! ```
//! use outcome::{Outcome, OutcomeStatus};
//!
//! let found: Outcome<&str> = Outcome::success("acme");
//! assert_eq!(found.status(), OutcomeStatus::Ok);
//!
//! let missing: Outcome<&str> = Outcome::not_found();
//! assert!(missing.value().is_none());
//! ```

pub mod guard;

pub use guard::GuardError;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Name of the offending field or argument
    pub identifier: String,
    /// Human-readable reason
    pub error_message: String,
    /// Optional machine-readable code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl ValidationError {
    pub fn new(identifier: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            error_message: error_message.into(),
            error_code: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }
}

/// Status classification of an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum OutcomeStatus {
    Ok,
    Created,
    NotFound,
    Invalid,
    Error,
}

/// Result of a use case.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Outcome<T> {
    /// Completed, carrying the value
    Success(T),
    /// A new resource was created, carrying it
    Created(T),
    /// The addressed resource does not exist
    NotFound,
    /// The request was understood but failed validation
    Invalid(Vec<ValidationError>),
    /// Generic failure with optional messages
    Error(Vec<String>),
}

impl<T> Outcome<T> {
    pub fn success(value: T) -> Self {
        Self::Success(value)
    }

    pub fn created(value: T) -> Self {
        Self::Created(value)
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn invalid(errors: Vec<ValidationError>) -> Self {
        Self::Invalid(errors)
    }

    /// Shorthand for a single validation failure.
    pub fn invalid_field(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid(vec![ValidationError::new(identifier, message)])
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(vec![message.into()])
    }

    pub fn status(&self) -> OutcomeStatus {
        match self {
            Self::Success(_) => OutcomeStatus::Ok,
            Self::Created(_) => OutcomeStatus::Created,
            Self::NotFound => OutcomeStatus::NotFound,
            Self::Invalid(_) => OutcomeStatus::Invalid,
            Self::Error(_) => OutcomeStatus::Error,
        }
    }

    /// True for `Success` and `Created`.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Created(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) | Self::Created(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Success(value) | Self::Created(value) => Some(value),
            _ => None,
        }
    }

    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            Self::Invalid(errors) => errors,
            _ => &[],
        }
    }

    pub fn errors(&self) -> &[String] {
        match self {
            Self::Error(errors) => errors,
            _ => &[],
        }
    }

    /// Transform the carried value, keeping the state.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Created(value) => Outcome::Created(f(value)),
            Self::NotFound => Outcome::NotFound,
            Self::Invalid(errors) => Outcome::Invalid(errors),
            Self::Error(errors) => Outcome::Error(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_only_present_in_success_states() {
        assert_eq!(Outcome::success(1).value(), Some(&1));
        assert_eq!(Outcome::created(2).into_value(), Some(2));
        assert!(Outcome::<i32>::not_found().value().is_none());
        assert!(Outcome::<i32>::invalid(vec![]).value().is_none());
        assert!(Outcome::<i32>::error("boom").into_value().is_none());
    }

    #[test]
    fn test_status_classification() {
        assert_eq!(Outcome::success(()).status(), OutcomeStatus::Ok);
        assert_eq!(Outcome::created(()).status(), OutcomeStatus::Created);
        assert_eq!(Outcome::<()>::not_found().status(), OutcomeStatus::NotFound);
        assert_eq!(
            Outcome::<()>::invalid_field("name", "required").status(),
            OutcomeStatus::Invalid
        );
        assert_eq!(Outcome::<()>::error("boom").status(), OutcomeStatus::Error);
    }

    #[test]
    fn test_is_success_covers_created() {
        assert!(Outcome::success(()).is_success());
        assert!(Outcome::created(()).is_success());
        assert!(!Outcome::<()>::not_found().is_success());
    }

    #[test]
    fn test_map_preserves_state() {
        let created = Outcome::created(21).map(|v| v * 2);
        assert_eq!(created, Outcome::Created(42));

        let invalid: Outcome<String> =
            Outcome::<i32>::invalid_field("id", "must be positive").map(|v| v.to_string());
        assert_eq!(invalid.validation_errors().len(), 1);
        assert_eq!(invalid.validation_errors()[0].identifier, "id");
    }

    #[test]
    fn test_error_messages() {
        let outcome = Outcome::<()>::error("token store unavailable");
        assert_eq!(outcome.errors(), ["token store unavailable".to_string()]);
        assert!(outcome.validation_errors().is_empty());
    }

    #[test]
    fn test_validation_error_serializes_camel_case() {
        let error = ValidationError::new("name", "Name is required").with_code("required");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["identifier"], "name");
        assert_eq!(json["errorMessage"], "Name is required");
        assert_eq!(json["errorCode"], "required");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(OutcomeStatus::NotFound.to_string(), "not_found");
        assert_eq!(OutcomeStatus::Ok.to_string(), "ok");
    }
}
