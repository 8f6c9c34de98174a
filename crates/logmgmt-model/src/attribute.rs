//! Attribute definitions
//!
//! An [`AttributeDefinition`] is the static description of one settable
//! property: its name, type constraints, default and validator.

use crate::validator::{ChainedValidator, ModelTypeValidator, ParameterValidator};
use crate::value::{ModelType, ModelValue};
use std::sync::Arc;

/// Static description of one settable attribute
///
/// Immutable once built; cheap to clone.
#[derive(Debug, Clone)]
pub struct AttributeDefinition {
    name: Arc<str>,
    value_type: ModelType,
    allow_null: bool,
    allow_expression: bool,
    default_value: Option<ModelValue>,
    description: Option<Arc<str>>,
    validator: Arc<dyn ParameterValidator>,
}

impl AttributeDefinition {
    /// Start building a definition
    #[inline]
    #[must_use]
    pub fn builder(name: impl Into<String>, value_type: ModelType) -> AttributeDefinitionBuilder {
        AttributeDefinitionBuilder::new(name, value_type)
    }

    /// Attribute name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared value type
    #[inline]
    #[must_use]
    pub fn value_type(&self) -> ModelType {
        self.value_type
    }

    /// Whether an undefined value is accepted
    #[inline]
    #[must_use]
    pub fn allows_null(&self) -> bool {
        self.allow_null
    }

    /// Whether `${...}` expressions are accepted before resolution
    #[inline]
    #[must_use]
    pub fn allows_expression(&self) -> bool {
        self.allow_expression
    }

    /// Value used when the attribute is undefined
    #[inline]
    #[must_use]
    pub fn default_value(&self) -> Option<&ModelValue> {
        self.default_value.as_ref()
    }

    /// Human readable description
    #[inline]
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Effective validator (type constraints plus any custom validator)
    #[inline]
    #[must_use]
    pub fn validator(&self) -> &dyn ParameterValidator {
        self.validator.as_ref()
    }

    /// Substitute the default for an undefined value
    #[must_use]
    pub fn resolve<'a>(&'a self, value: &'a ModelValue) -> &'a ModelValue {
        match (value, &self.default_value) {
            (ModelValue::Null, Some(default)) => default,
            _ => value,
        }
    }
}

/// Builder for [`AttributeDefinition`]
#[derive(Debug)]
pub struct AttributeDefinitionBuilder {
    name: String,
    value_type: ModelType,
    allow_null: bool,
    allow_expression: bool,
    default_value: Option<ModelValue>,
    description: Option<String>,
    validator: Option<Arc<dyn ParameterValidator>>,
}

impl AttributeDefinitionBuilder {
    fn new(name: impl Into<String>, value_type: ModelType) -> Self {
        Self {
            name: name.into(),
            value_type,
            allow_null: false,
            allow_expression: false,
            default_value: None,
            description: None,
            validator: None,
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

    /// Default used when the value is undefined
    #[inline]
    #[must_use]
    pub fn default_value(mut self, value: impl Into<ModelValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Human readable description
    #[inline]
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attribute-specific validator, run after the type checks
    #[inline]
    #[must_use]
    pub fn validator(mut self, validator: impl ParameterValidator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Build the definition
    #[must_use]
    pub fn build(self) -> AttributeDefinition {
        let type_check = ModelTypeValidator::new(self.value_type)
            .allow_null(self.allow_null)
            .allow_expression(self.allow_expression);
        let validator: Arc<dyn ParameterValidator> = match self.validator {
            Some(custom) => Arc::new(ChainedValidator::new().then(type_check).then_shared(custom)),
            None => Arc::new(type_check),
        };
        AttributeDefinition {
            name: self.name.into(),
            value_type: self.value_type,
            allow_null: self.allow_null,
            allow_expression: self.allow_expression,
            default_value: self.default_value,
            description: self.description.map(Into::into),
            validator,
        }
    }
}
