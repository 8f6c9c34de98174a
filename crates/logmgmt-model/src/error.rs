//! Error types for the management model
//!
//! Provides error handling for:
//! - Attribute value validation (resolved and unresolved)
//! - Path address parsing

use crate::value::ModelType;

/// A value was rejected by an attribute's validator
///
/// Raised before any runtime state is touched, so it is always recoverable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Undefined value for an attribute that requires one
    #[error("'{name}' may not be undefined")]
    NullNotAllowed { name: String },

    /// Value has the wrong type
    #[error("'{name}' expects {expected}, found {actual}")]
    InvalidType {
        name: String,
        expected: ModelType,
        actual: ModelType,
    },

    /// Expression given for an attribute that does not support them
    #[error("'{name}' does not support expressions: {value}")]
    ExpressionNotAllowed { name: String, value: String },

    /// Expression reached a resolved-value check
    #[error("'{name}' has unresolved expression: {value}")]
    UnresolvedExpression { name: String, value: String },

    /// Value not among the accepted set
    #[error("'{name}' must be one of {allowed:?}, found '{value}'")]
    NotAllowed {
        name: String,
        value: String,
        allowed: Vec<String>,
    },

    /// String length out of bounds
    #[error("'{name}' length {length} outside {min}..={max}")]
    InvalidLength {
        name: String,
        length: usize,
        min: usize,
        max: usize,
    },

    /// Attribute-specific rejection
    #[error("'{name}' has invalid value '{value}': {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

impl ValidationError {
    /// Create an attribute-specific rejection
    pub fn invalid_value(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Name of the attribute that failed validation
    #[must_use]
    pub fn attribute(&self) -> &str {
        match self {
            Self::NullNotAllowed { name }
            | Self::InvalidType { name, .. }
            | Self::ExpressionNotAllowed { name, .. }
            | Self::UnresolvedExpression { name, .. }
            | Self::NotAllowed { name, .. }
            | Self::InvalidLength { name, .. }
            | Self::InvalidValue { name, .. } => name,
        }
    }
}

/// Malformed path address
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    /// Element is not `key=value`
    #[error("invalid address element '{0}': expected key=value")]
    InvalidElement(String),

    /// Element has an empty key or value
    #[error("address element '{0}' has an empty key or value")]
    EmptySegment(String),

    /// Model form is not a list of single-entry objects
    #[error("address must be a list of single-entry objects, found {0}")]
    InvalidModel(String),
}
