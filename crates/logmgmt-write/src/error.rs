//! Error types for attribute writes
//!
//! Provides error handling for:
//! - Value validation failures
//! - Built-in attribute failures (level, encoding)
//! - Failures reported by extension hooks
//! - Malformed write-attribute requests

use logmgmt_handler::{HandlerError, InvalidLevel, UnsupportedEncoding};
use logmgmt_model::{AddressError, PathAddress, ValidationError};

/// Failure applying or reverting one attribute write
///
/// Every variant is recoverable: no variant leaves the handler with a
/// partially applied value for the attribute concerned.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// Value rejected by the attribute's validator or formatter strategy
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Level token not recognised
    #[error("'{attribute}' has unrecognised level '{value}'")]
    InvalidLevel {
        attribute: String,
        value: String,
        #[source]
        source: InvalidLevel,
    },

    /// Handler rejected the encoding; its previous encoding is unchanged
    #[error("failed to set encoding of handler '{handler}' to '{value}'")]
    EncodingUnsupported {
        handler: String,
        value: String,
        #[source]
        source: UnsupportedEncoding,
    },

    /// Failure reported by the extension hook, passed through unchanged
    #[error(transparent)]
    Delegated(#[from] HookError),

    /// Operation address has no element naming a handler
    #[error("address '{0}' does not identify a handler")]
    InvalidAddress(PathAddress),
}

impl WriteError {
    /// Check if the failure came from the extension hook
    #[inline]
    #[must_use]
    pub fn is_delegated(&self) -> bool {
        matches!(self, Self::Delegated(_))
    }
}

/// Failure reported by an extension hook
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// The hook does not handle this attribute
    #[error("attribute '{0}' is not writable on this handler")]
    UnknownAttribute(String),

    /// Value not acceptable for the attribute
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Handler failed to carry out the change
    #[error(transparent)]
    Handler(#[from] HandlerError),

    /// Attribute-specific refusal
    #[error("'{attribute}' rejected: {reason}")]
    Rejected { attribute: String, reason: String },
}

impl HookError {
    /// Create attribute-specific refusal
    pub fn rejected(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}

/// Malformed write-attribute request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    /// Required slot absent
    #[error("operation is missing '{0}'")]
    MissingSlot(&'static str),

    /// Attribute name slot is not a string
    #[error("operation 'name' must be a string, found {0}")]
    InvalidName(String),

    /// Address slot malformed
    #[error("operation address invalid: {0}")]
    InvalidAddress(#[from] AddressError),
}
