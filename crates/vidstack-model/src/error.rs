//! Errors raised when a response does not match the entity schema.

use crate::types::EntityKind;

/// A 2xx response that could not be turned into entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedResponse {
    /// A required field is absent or null.
    #[error("malformed {kind} response: missing required field `{field}`")]
    MissingField {
        /// Entity kind being parsed.
        kind: EntityKind,
        /// Missing field name.
        field: String,
    },

    /// A field is present but cannot be coerced to its type.
    #[error("malformed {kind} response: field `{field}` should be {expected}, got {found}")]
    InvalidField {
        /// Entity kind being parsed.
        kind: EntityKind,
        /// Offending field name.
        field: String,
        /// Expected type.
        expected: &'static str,
        /// What was received.
        found: String,
    },

    /// The body has neither the single-record nor the list shape.
    #[error("malformed {kind} response: expected {expected}, got {found}")]
    UnexpectedShape {
        /// Entity kind being parsed.
        kind: EntityKind,
        /// Expected shape.
        expected: &'static str,
        /// Received shape.
        found: &'static str,
    },

    /// The body is not valid JSON.
    #[error("malformed response: invalid JSON: {0}")]
    InvalidJson(String),
}

impl MalformedResponse {
    /// The field this error names, if any.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field, .. } | Self::InvalidField { field, .. } => Some(field),
            Self::UnexpectedShape { .. } | Self::InvalidJson(_) => None,
        }
    }
}

impl From<serde_json::Error> for MalformedResponse {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(err.to_string())
    }
}
