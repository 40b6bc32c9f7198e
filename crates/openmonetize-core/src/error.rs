//! Error types for event models.

use std::fmt;

use crate::EventType;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while constructing or decoding an event model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A field is missing or does not have the declared shape.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The wire text is not syntactically valid JSON.
    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),
}

impl ModelError {
    /// Returns the validation error, if this is one.
    #[must_use]
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Parse(_) => None,
        }
    }

    /// Returns `true` if the wire text could not be parsed as JSON.
    #[must_use]
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid field `{field}`: {kind}")]
pub struct ValidationError {
    field: String,
    kind: ValidationErrorKind,
}

impl ValidationError {
    /// Field name used when the input as a whole is rejected.
    pub const ROOT: &'static str = "$";

    /// Create a validation error for `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    /// Shorthand for a missing required field.
    #[must_use]
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, ValidationErrorKind::Missing)
    }

    /// Shorthand for a field holding the wrong JSON type.
    #[must_use]
    pub fn wrong_type(field: impl Into<String>, expected: &'static str) -> Self {
        Self::new(field, ValidationErrorKind::WrongType { expected })
    }

    /// The wire name of the offending field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// What was wrong with the field.
    #[must_use]
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }
}

/// The reason a field failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required field is absent or `null`.
    Missing,
    /// The field holds a value of the wrong JSON type.
    ///
    /// Count fields (`image_count`, `input_tokens`, `output_tokens`) only
    /// accept non-negative JSON integers: `-1` and `100.0` both land here.
    WrongType {
        /// Human-readable description of the expected shape.
        expected: &'static str,
    },
    /// A string field that must carry a value is empty.
    Empty,
    /// The field is not part of the model's schema.
    Unknown,
    /// A numeric field is NaN or infinite.
    NonFinite,
    /// The discriminator names a different variant.
    EventTypeMismatch {
        /// The variant being decoded.
        expected: EventType,
        /// The value found on the wire.
        found: String,
    },
    /// The input is not a JSON object.
    NotAnObject,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("required field is missing"),
            Self::WrongType { expected } => write!(f, "expected {expected}"),
            Self::Empty => f.write_str("must not be empty"),
            Self::Unknown => f.write_str("field is not part of the schema"),
            Self::NonFinite => f.write_str("must be a finite number"),
            Self::EventTypeMismatch { expected, found } => {
                write!(f, "expected event type {expected}, found {found}")
            }
            Self::NotAnObject => f.write_str("expected a JSON object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display_names_field() {
        let err = ValidationError::missing("feature_id");
        assert_eq!(
            err.to_string(),
            "invalid field `feature_id`: required field is missing"
        );
    }

    #[test]
    fn mismatch_display() {
        let err = ValidationError::new(
            "event_type",
            ValidationErrorKind::EventTypeMismatch {
                expected: EventType::Custom,
                found: "TOKEN_USAGE".into(),
            },
        );
        assert!(err.to_string().contains("expected event type CUSTOM"));
    }

    #[test]
    fn model_error_classification() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ModelError::Parse(parse);
        assert!(err.is_parse());
        assert!(err.as_validation().is_none());

        let err: ModelError = ValidationError::missing("event_id").into();
        assert!(!err.is_parse());
        assert_eq!(err.as_validation().map(ValidationError::field), Some("event_id"));
    }
}
