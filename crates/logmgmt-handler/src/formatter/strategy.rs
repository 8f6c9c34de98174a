//! Formatter specifications
//!
//! A formatter attribute value is interpreted by a [`FormatterStrategy`],
//! producing a [`FormatterSpec`] which installs the formatter on a handler.

use super::{LogFormatter, PatternFormatter};
use crate::handler::LogHandler;
use logmgmt_model::{ModelType, ModelValue, ValidationError};
use std::fmt;
use std::sync::Arc;

/// Interpreted formatter attribute value
#[derive(Debug, Clone)]
pub enum FormatterSpec {
    /// `%`-conversion pattern
    Pattern(PatternFormatter),

    /// Formatter supplied by a custom strategy
    Custom(Arc<dyn LogFormatter>),
}

impl FormatterSpec {
    /// Formatter described by this spec
    #[must_use]
    pub fn formatter(&self) -> Arc<dyn LogFormatter> {
        match self {
            Self::Pattern(pattern) => Arc::new(pattern.clone()),
            Self::Custom(formatter) => Arc::clone(formatter),
        }
    }

    /// Install the formatter on a live handler
    pub fn apply_to(&self, handler: &dyn LogHandler) {
        handler.set_formatter(self.formatter());
    }
}

/// Interprets formatter attribute values
pub trait FormatterStrategy: Send + Sync + fmt::Debug {
    /// Parse a resolved formatter value
    ///
    /// # Errors
    /// Returns [`ValidationError`] if the value does not describe a formatter.
    fn parse(&self, attribute: &str, value: &ModelValue) -> Result<FormatterSpec, ValidationError>;
}

/// Reads the formatter attribute as a pattern string
///
/// An undefined value selects [`DEFAULT_PATTERN`](super::DEFAULT_PATTERN).
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternFormatterStrategy;

impl FormatterStrategy for PatternFormatterStrategy {
    fn parse(&self, attribute: &str, value: &ModelValue) -> Result<FormatterSpec, ValidationError> {
        match value {
            ModelValue::Null => Ok(FormatterSpec::Pattern(PatternFormatter::default())),
            ModelValue::String(pattern) => PatternFormatter::new(pattern.as_str())
                .map(FormatterSpec::Pattern)
                .map_err(|e| ValidationError::invalid_value(attribute, pattern.as_str(), e.to_string())),
            other => Err(ValidationError::InvalidType {
                name: attribute.to_string(),
                expected: ModelType::String,
                actual: ModelType::of(other),
            }),
        }
    }
}
