//! Model value tree helpers
//!
//! Operations, attribute values and defaults are carried as [`ModelValue`]
//! trees. This module classifies values and recognises unresolved
//! expressions.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Detyped management value
///
/// A request's slots (address, attribute name, values) are all value trees.
pub type ModelValue = serde_json::Value;

/// Type classification of a [`ModelValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelType {
    /// No value (`null`)
    Undefined,

    /// `true` / `false`
    Boolean,

    /// Integral number
    Int,

    /// Floating point number
    Double,

    /// Plain string
    String,

    /// Unresolved `${...}` expression
    Expression,

    /// Ordered list of values
    List,

    /// Keyed object
    Object,
}

impl ModelType {
    /// Classify a value
    #[must_use]
    pub fn of(value: &ModelValue) -> Self {
        match value {
            ModelValue::Null => Self::Undefined,
            ModelValue::Bool(_) => Self::Boolean,
            ModelValue::Number(n) if n.is_f64() => Self::Double,
            ModelValue::Number(_) => Self::Int,
            ModelValue::String(_) if is_expression(value) => Self::Expression,
            ModelValue::String(_) => Self::String,
            ModelValue::Array(_) => Self::List,
            ModelValue::Object(_) => Self::Object,
        }
    }

    /// Whether a value of type `actual` satisfies this expected type
    ///
    /// Integral numbers are accepted where a double is expected.
    #[inline]
    #[must_use]
    pub fn accepts(self, actual: ModelType) -> bool {
        self == actual || matches!((self, actual), (Self::Double, Self::Int))
    }
}

impl Display for ModelType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Undefined => "undefined",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Double => "double",
            Self::String => "string",
            Self::Expression => "expression",
            Self::List => "list",
            Self::Object => "object",
        };
        f.write_str(name)
    }
}

/// Check whether a value is an unresolved `${...}` expression
#[must_use]
pub fn is_expression(value: &ModelValue) -> bool {
    match value {
        ModelValue::String(s) => s
            .find("${")
            .is_some_and(|start| s[start + 2..].contains('}')),
        _ => false,
    }
}

/// Render a scalar value as a string
///
/// Returns `None` for undefined values, lists and objects.
#[must_use]
pub fn as_model_string(value: &ModelValue) -> Option<String> {
    match value {
        ModelValue::String(s) => Some(s.clone()),
        ModelValue::Number(n) => Some(n.to_string()),
        ModelValue::Bool(b) => Some(b.to_string()),
        ModelValue::Null | ModelValue::Array(_) | ModelValue::Object(_) => None,
    }
}

/// Short rendering of a value for error context
#[must_use]
pub fn describe(value: &ModelValue) -> String {
    as_model_string(value).unwrap_or_else(|| value.to_string())
}
