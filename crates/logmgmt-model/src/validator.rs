//! Parameter validators
//!
//! Provides the [`ParameterValidator`] capability and the generic validators
//! attribute definitions are assembled from.

use crate::error::ValidationError;
use crate::value::{describe, is_expression, ModelType, ModelValue};
use std::fmt;
use std::sync::Arc;

/// Validates a value supplied for a named parameter
///
/// Two entry points mirror the two phases of a write:
/// - [`validate_parameter`](Self::validate_parameter) sees the raw value,
///   which may still contain `${...}` expressions
/// - [`validate_resolved_parameter`](Self::validate_resolved_parameter) sees
///   the value after expression resolution
pub trait ParameterValidator: Send + Sync + fmt::Debug {
    /// Validate an unresolved value
    ///
    /// Expressions are accepted by default; they are checked once resolved.
    fn validate_parameter(&self, name: &str, value: &ModelValue) -> Result<(), ValidationError> {
        if is_expression(value) {
            return Ok(());
        }
        self.validate_resolved_parameter(name, value)
    }

    /// Validate a resolved value
    fn validate_resolved_parameter(
        &self,
        name: &str,
        value: &ModelValue,
    ) -> Result<(), ValidationError>;
}

impl<V: ParameterValidator + ?Sized> ParameterValidator for Arc<V> {
    fn validate_parameter(&self, name: &str, value: &ModelValue) -> Result<(), ValidationError> {
        (**self).validate_parameter(name, value)
    }

    fn validate_resolved_parameter(
        &self,
        name: &str,
        value: &ModelValue,
    ) -> Result<(), ValidationError> {
        (**self).validate_resolved_parameter(name, value)
    }
}

/// Checks definedness, expression support and value type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelTypeValidator {
    expected: ModelType,
    allow_null: bool,
    allow_expression: bool,
}

impl ModelTypeValidator {
    /// Create validator for a required, non-expression value
    #[inline]
    #[must_use]
    pub fn new(expected: ModelType) -> Self {
        Self {
            expected,
            allow_null: false,
            allow_expression: false,
        }
    }

    /// Accept undefined values
    #[inline]
    #[must_use]
    pub fn allow_null(mut self, allow: bool) -> Self {
        self.allow_null = allow;
        self
    }

    /// Accept `${...}` expressions before resolution
    #[inline]
    #[must_use]
    pub fn allow_expression(mut self, allow: bool) -> Self {
        self.allow_expression = allow;
        self
    }

    /// Expected type
    #[inline]
    #[must_use]
    pub fn expected(&self) -> ModelType {
        self.expected
    }

    fn check_type(&self, name: &str, value: &ModelValue) -> Result<(), ValidationError> {
        let actual = ModelType::of(value);
        if self.expected.accepts(actual) {
            Ok(())
        } else {
            Err(ValidationError::InvalidType {
                name: name.to_string(),
                expected: self.expected,
                actual,
            })
        }
    }

    fn check_null(&self, name: &str) -> Result<(), ValidationError> {
        if self.allow_null {
            Ok(())
        } else {
            Err(ValidationError::NullNotAllowed {
                name: name.to_string(),
            })
        }
    }
}

impl ParameterValidator for ModelTypeValidator {
    fn validate_parameter(&self, name: &str, value: &ModelValue) -> Result<(), ValidationError> {
        if value.is_null() {
            return self.check_null(name);
        }
        if is_expression(value) {
            return if self.allow_expression {
                Ok(())
            } else {
                Err(ValidationError::ExpressionNotAllowed {
                    name: name.to_string(),
                    value: describe(value),
                })
            };
        }
        self.check_type(name, value)
    }

    fn validate_resolved_parameter(
        &self,
        name: &str,
        value: &ModelValue,
    ) -> Result<(), ValidationError> {
        if value.is_null() {
            return self.check_null(name);
        }
        if is_expression(value) {
            return Err(ValidationError::UnresolvedExpression {
                name: name.to_string(),
                value: describe(value),
            });
        }
        self.check_type(name, value)
    }
}

/// Restricts a string value to a fixed set
///
/// Undefined and non-string values pass; pair with [`ModelTypeValidator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedValuesValidator {
    allowed: Vec<String>,
    case_sensitive: bool,
}

impl AllowedValuesValidator {
    /// Create case-sensitive validator
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            case_sensitive: true,
        }
    }

    /// Compare ignoring ASCII case
    #[inline]
    #[must_use]
    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    /// Accepted values
    #[inline]
    #[must_use]
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    fn matches(&self, candidate: &str) -> bool {
        self.allowed.iter().any(|a| {
            if self.case_sensitive {
                a == candidate
            } else {
                a.eq_ignore_ascii_case(candidate)
            }
        })
    }
}

impl ParameterValidator for AllowedValuesValidator {
    fn validate_resolved_parameter(
        &self,
        name: &str,
        value: &ModelValue,
    ) -> Result<(), ValidationError> {
        match value.as_str() {
            Some(s) if !self.matches(s) => Err(ValidationError::NotAllowed {
                name: name.to_string(),
                value: s.to_string(),
                allowed: self.allowed.clone(),
            }),
            _ => Ok(()),
        }
    }
}

/// Bounds the length of a string value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringLengthValidator {
    min: usize,
    max: usize,
}

impl StringLengthValidator {
    /// Create validator for `min..=max` characters
    #[inline]
    #[must_use]
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// At least `min` characters
    #[inline]
    #[must_use]
    pub fn at_least(min: usize) -> Self {
        Self::new(min, usize::MAX)
    }
}

impl ParameterValidator for StringLengthValidator {
    fn validate_resolved_parameter(
        &self,
        name: &str,
        value: &ModelValue,
    ) -> Result<(), ValidationError> {
        let Some(s) = value.as_str() else {
            return Ok(());
        };
        let length = s.chars().count();
        if (self.min..=self.max).contains(&length) {
            Ok(())
        } else {
            Err(ValidationError::InvalidLength {
                name: name.to_string(),
                length,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Runs validators in order, stopping at the first failure
#[derive(Debug, Clone, Default)]
pub struct ChainedValidator {
    validators: Vec<Arc<dyn ParameterValidator>>,
}

impl ChainedValidator {
    /// Create empty chain
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator
    #[must_use]
    pub fn then(mut self, validator: impl ParameterValidator + 'static) -> Self {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Append a shared validator
    #[must_use]
    pub fn then_shared(mut self, validator: Arc<dyn ParameterValidator>) -> Self {
        self.validators.push(validator);
        self
    }
}

impl ParameterValidator for ChainedValidator {
    fn validate_parameter(&self, name: &str, value: &ModelValue) -> Result<(), ValidationError> {
        self.validators
            .iter()
            .try_for_each(|v| v.validate_parameter(name, value))
    }

    fn validate_resolved_parameter(
        &self,
        name: &str,
        value: &ModelValue,
    ) -> Result<(), ValidationError> {
        self.validators
            .iter()
            .try_for_each(|v| v.validate_resolved_parameter(name, value))
    }
}
