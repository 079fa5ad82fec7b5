//! Model error model.

use thiserror::Error;

/// Result type used across the model layer.
pub type ModelResult<T> = Result<T, ModelError>;

/// Model-level error.
///
/// Every variant describes bad input handed to a construction or assignment
/// path. Nothing here is retryable; callers that chose to rehydrate with bad
/// data get the error back unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A timestamp field did not match `YYYY-MM-DD HH:MM:SS`.
    #[error("invalid timestamp for `{field}`: {value:?} (expected YYYY-MM-DD HH:MM:SS)")]
    Format { field: &'static str, value: String },

    /// A required audit field was not supplied at rehydration.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// A reserved field was given a value of the wrong JSON type.
    #[error("field `{field}` must be a {expected}")]
    FieldType {
        field: &'static str,
        expected: &'static str,
    },

    /// Reserved fields cannot be removed from a model.
    #[error("field `{0}` is reserved")]
    ReservedField(String),
}

impl ModelError {
    pub fn format(field: &'static str, value: impl Into<String>) -> Self {
        Self::Format {
            field,
            value: value.into(),
        }
    }

    pub fn missing(field: &'static str) -> Self {
        Self::MissingField(field)
    }

    pub fn field_type(field: &'static str, expected: &'static str) -> Self {
        Self::FieldType { field, expected }
    }

    pub fn reserved(field: impl Into<String>) -> Self {
        Self::ReservedField(field.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_names_field_and_value() {
        let err = ModelError::format("created_at", "not-a-date");
        assert_eq!(
            err.to_string(),
            "invalid timestamp for `created_at`: \"not-a-date\" (expected YYYY-MM-DD HH:MM:SS)"
        );
    }

    #[test]
    fn missing_field_message() {
        assert_eq!(
            ModelError::missing("updated_at").to_string(),
            "missing required field `updated_at`"
        );
    }
}
