//! Base validation path
//!
//! Validation for attributes the coordinator's own registry does not define.

use logmgmt_model::{describe, is_expression, ModelValue, ValidationError};
use std::fmt;

/// Generic validation applied to attributes outside a coordinator's registry
#[cfg_attr(test, mockall::automock)]
pub trait BaseValidation: Send + Sync + fmt::Debug {
    /// Validate a value after expression resolution
    ///
    /// # Errors
    /// Returns [`ValidationError`] if the value is not acceptable.
    fn validate_resolved(&self, name: &str, value: &ModelValue) -> Result<(), ValidationError>;

    /// Validate a raw value, which may still hold expressions
    ///
    /// # Errors
    /// Returns [`ValidationError`] if the value is not acceptable.
    fn validate_unresolved(&self, name: &str, value: &ModelValue) -> Result<(), ValidationError>;
}

/// Accepts any value except an expression that survived resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidation;

impl BaseValidation for DefaultValidation {
    fn validate_resolved(&self, name: &str, value: &ModelValue) -> Result<(), ValidationError> {
        if is_expression(value) {
            return Err(ValidationError::UnresolvedExpression {
                name: name.to_string(),
                value: describe(value),
            });
        }
        Ok(())
    }

    fn validate_unresolved(&self, _name: &str, _value: &ModelValue) -> Result<(), ValidationError> {
        Ok(())
    }
}
