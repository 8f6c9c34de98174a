//! Standard handler attributes
//!
//! Definitions for the attributes every handler exposes (`level`, `filter`,
//! `formatter`, `encoding`) and those specific to console and file
//! handlers, together with their domain validators.

use crate::console::ConsoleTarget;
use crate::encoding::Charset;
use crate::formatter::{FormatterStrategy, DEFAULT_PATTERN};
use crate::level::Level;
use logmgmt_model::{
    as_model_string, AllowedValuesValidator, AttributeDefinition, ModelType, ModelValue,
    ParameterValidator, StringLengthValidator, ValidationError,
};
use std::sync::Arc;

/// Threshold level
pub const LEVEL: &str = "level";
/// Record filter expression
pub const FILTER: &str = "filter";
/// Formatter pattern
pub const FORMATTER: &str = "formatter";
/// Output character encoding
pub const ENCODING: &str = "encoding";
/// Flush after every record
pub const AUTOFLUSH: &str = "autoflush";
/// Console stream
pub const TARGET: &str = "target";
/// Output file path
pub const FILE: &str = "file";
/// Append to an existing file on open
pub const APPEND: &str = "append";

/// Names of the attributes common to all handlers
pub const BASE_ATTRIBUTE_NAMES: [&str; 4] = [LEVEL, FILTER, FORMATTER, ENCODING];

/// Accepts level names and values, optionally above a floor
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelValidator {
    minimum: Option<Level>,
}

impl LevelValidator {
    /// Accept any known level
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject levels below `minimum`
    #[inline]
    #[must_use]
    pub fn minimum(mut self, minimum: Level) -> Self {
        self.minimum = Some(minimum);
        self
    }
}

impl ParameterValidator for LevelValidator {
    fn validate_resolved_parameter(&self, name: &str, value: &ModelValue) -> Result<(), ValidationError> {
        let Some(token) = as_model_string(value) else {
            return Ok(());
        };
        let level = Level::parse(&token)
            .map_err(|e| ValidationError::invalid_value(name, token.as_str(), e.to_string()))?;
        match self.minimum {
            Some(minimum) if level.value() < minimum.value() => Err(ValidationError::invalid_value(
                name,
                token,
                format!("level must be {minimum} or above"),
            )),
            _ => Ok(()),
        }
    }
}

/// Accepts supported encoding names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodingValidator;

impl ParameterValidator for EncodingValidator {
    fn validate_resolved_parameter(&self, name: &str, value: &ModelValue) -> Result<(), ValidationError> {
        match value.as_str() {
            Some(encoding) => Charset::for_name(encoding)
                .map(|_| ())
                .map_err(|e| ValidationError::invalid_value(name, encoding, e.to_string())),
            None => Ok(()),
        }
    }
}

/// Accepts values the formatter strategy can interpret
#[derive(Debug, Clone)]
pub struct FormatterValidator {
    strategy: Arc<dyn FormatterStrategy>,
}

impl FormatterValidator {
    /// Validate through a specific strategy
    pub fn new(strategy: Arc<dyn FormatterStrategy>) -> Self {
        Self { strategy }
    }
}

impl ParameterValidator for FormatterValidator {
    fn validate_resolved_parameter(&self, name: &str, value: &ModelValue) -> Result<(), ValidationError> {
        if value.is_null() {
            return Ok(());
        }
        self.strategy.parse(name, value).map(|_| ())
    }
}

/// `level`, defaulting to `ALL`
#[must_use]
pub fn level() -> AttributeDefinition {
    AttributeDefinition::builder(LEVEL, ModelType::String)
        .allow_null(true)
        .allow_expression(true)
        .default_value(Level::ALL.name())
        .description("The log level specifying which message levels will be logged by this handler")
        .validator(LevelValidator::new())
        .build()
}

/// `filter`
#[must_use]
pub fn filter() -> AttributeDefinition {
    AttributeDefinition::builder(FILTER, ModelType::String)
        .allow_null(true)
        .allow_expression(true)
        .description("Defines a simple filter type")
        .build()
}

/// `formatter`, defaulting to [`DEFAULT_PATTERN`] and validated through
/// `strategy`
#[must_use]
pub fn formatter(strategy: Arc<dyn FormatterStrategy>) -> AttributeDefinition {
    AttributeDefinition::builder(FORMATTER, ModelType::String)
        .allow_null(true)
        .allow_expression(true)
        .default_value(DEFAULT_PATTERN)
        .description("Defines a pattern for the formatter")
        .validator(FormatterValidator::new(strategy))
        .build()
}

/// `encoding`; undefined means the platform default
#[must_use]
pub fn encoding() -> AttributeDefinition {
    AttributeDefinition::builder(ENCODING, ModelType::String)
        .allow_null(true)
        .allow_expression(true)
        .description("The character encoding used by this handler")
        .validator(EncodingValidator)
        .build()
}

/// `autoflush`, defaulting to `true`
#[must_use]
pub fn autoflush() -> AttributeDefinition {
    AttributeDefinition::builder(AUTOFLUSH, ModelType::Boolean)
        .allow_null(true)
        .allow_expression(true)
        .default_value(true)
        .description("Automatically flush after each write")
        .build()
}

/// `target`, defaulting to `System.out`
#[must_use]
pub fn target() -> AttributeDefinition {
    AttributeDefinition::builder(TARGET, ModelType::String)
        .allow_null(true)
        .allow_expression(true)
        .default_value(ConsoleTarget::SystemOut.as_str())
        .description("Defines the target of the console handler")
        .validator(AllowedValuesValidator::new(ConsoleTarget::NAMES))
        .build()
}

/// `file`
#[must_use]
pub fn file() -> AttributeDefinition {
    AttributeDefinition::builder(FILE, ModelType::String)
        .allow_expression(true)
        .description("The file path the handler writes to")
        .validator(StringLengthValidator::at_least(1))
        .build()
}

/// `append`, defaulting to `true`
#[must_use]
pub fn append() -> AttributeDefinition {
    AttributeDefinition::builder(APPEND, ModelType::Boolean)
        .allow_null(true)
        .allow_expression(true)
        .default_value(true)
        .description("Append to the file if it exists instead of truncating it")
        .build()
}

/// Attributes every handler exposes, in [`BASE_ATTRIBUTE_NAMES`] order
#[must_use]
pub fn base_attributes(formatter_strategy: Arc<dyn FormatterStrategy>) -> Vec<AttributeDefinition> {
    vec![level(), filter(), formatter(formatter_strategy), encoding()]
}

/// Attributes specific to console handlers
#[must_use]
pub fn console_handler_attributes() -> Vec<AttributeDefinition> {
    vec![autoflush(), target()]
}

/// Attributes specific to file handlers
#[must_use]
pub fn file_handler_attributes() -> Vec<AttributeDefinition> {
    vec![autoflush(), file(), append()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::PatternFormatterStrategy;
    use serde_json::json;

    #[test]
    fn level_definition() {
        let def = level();
        let v = def.validator();
        assert!(v.validate_resolved_parameter(LEVEL, &json!("WARNING")).is_ok());
        assert!(v.validate_resolved_parameter(LEVEL, &json!("LOUD")).is_err());
        assert!(v.validate_parameter(LEVEL, &json!("${log.level}")).is_ok());
        assert_eq!(def.resolve(&json!(null)), &json!("ALL"));
    }

    #[test]
    fn level_minimum() {
        let v = LevelValidator::new().minimum(Level::INFO);
        assert!(v.validate_resolved_parameter(LEVEL, &json!("WARN")).is_ok());
        assert!(v.validate_resolved_parameter(LEVEL, &json!("INFO")).is_ok());
        assert!(v.validate_resolved_parameter(LEVEL, &json!("DEBUG")).is_err());
    }

    #[test]
    fn encoding_definition() {
        let v = encoding();
        assert!(v.validator().validate_resolved_parameter(ENCODING, &json!("UTF-8")).is_ok());
        assert!(v.validator().validate_resolved_parameter(ENCODING, &json!(null)).is_ok());
        assert!(v
            .validator()
            .validate_resolved_parameter(ENCODING, &json!("not-a-real-encoding"))
            .is_err());
    }

    #[test]
    fn formatter_definition() {
        let v = formatter(Arc::new(PatternFormatterStrategy));
        assert!(v.validator().validate_resolved_parameter(FORMATTER, &json!("%p %m%n")).is_ok());
        assert!(v.validator().validate_resolved_parameter(FORMATTER, &json!("%y")).is_err());
    }

    #[test]
    fn target_definition() {
        let v = target();
        assert!(v.validator().validate_resolved_parameter(TARGET, &json!("System.err")).is_ok());
        assert!(v.validator().validate_resolved_parameter(TARGET, &json!("System.in")).is_err());
    }

    #[test]
    fn file_requires_value() {
        let v = file();
        assert!(v.validator().validate_resolved_parameter(FILE, &json!(null)).is_err());
        assert!(v.validator().validate_resolved_parameter(FILE, &json!("")).is_err());
        assert!(v.validator().validate_resolved_parameter(FILE, &json!("server.log")).is_ok());
    }

    #[test]
    fn base_set_names() {
        let names: Vec<String> = base_attributes(Arc::new(PatternFormatterStrategy))
            .iter()
            .map(|d| d.name().to_string())
            .collect();
        assert_eq!(names, BASE_ATTRIBUTE_NAMES);
    }
}
