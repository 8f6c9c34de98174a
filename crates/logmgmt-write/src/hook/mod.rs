//! Extension hooks
//!
//! An [`ExtensionHook`] supplies the attributes a concrete handler type adds
//! on top of the built-in ones, and the logic to apply and revert them.
//!
//! - [`NoExtension`]: no extra attributes
//! - [`ConsoleHandlerHook`]: `autoflush`, `target`
//! - [`FileHandlerHook`]: `autoflush`, `file`, `append`

mod console;
mod file;

pub use console::ConsoleHandlerHook;
pub use file::FileHandlerHook;

use crate::error::HookError;
use crate::operation::WriteOperation;
use logmgmt_model::{AttributeDefinition, AttributeRegistry, ModelType, ModelValue, ValidationError};

/// Attribute-specific write logic for handlers of type `T`
///
/// Called by the coordinator for every attribute that is not built in, and
/// only when the handler is running.
pub trait ExtensionHook<T>: Send + Sync {
    /// Definitions this hook adds to the coordinator's registry
    ///
    /// Registered after the built-in set, so a definition with a built-in
    /// name replaces the built-in definition.
    fn attributes(&self) -> Vec<AttributeDefinition> {
        Vec::new()
    }

    /// Apply `op.resolved_value()` to the handler
    ///
    /// Returns `true` if the change only takes effect after a restart.
    ///
    /// # Errors
    /// Returns [`HookError`] if the change cannot be made.
    fn apply(&self, op: &WriteOperation, handler: &T) -> Result<bool, HookError>;

    /// Restore `op.value_to_restore()` on the handler
    ///
    /// # Errors
    /// Returns [`HookError`] if the previous value cannot be restored.
    fn revert(&self, op: &WriteOperation, handler: &T) -> Result<(), HookError>;
}

/// Hook for handler types with only the built-in attributes
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExtension;

impl<T> ExtensionHook<T> for NoExtension {
    fn apply(&self, op: &WriteOperation, _handler: &T) -> Result<bool, HookError> {
        Err(HookError::UnknownAttribute(op.attribute_name().to_string()))
    }

    fn revert(&self, op: &WriteOperation, _handler: &T) -> Result<(), HookError> {
        Err(HookError::UnknownAttribute(op.attribute_name().to_string()))
    }
}

/// Look up an attribute in a hook's own definitions and apply its default
fn resolve<'a>(
    definitions: &'a AttributeRegistry,
    attribute: &str,
    value: &'a ModelValue,
) -> Result<&'a ModelValue, HookError> {
    definitions
        .get(attribute)
        .map(|def| def.resolve(value))
        .ok_or_else(|| HookError::UnknownAttribute(attribute.to_string()))
}

/// Read a boolean, accepting `"true"` / `"false"` strings
fn boolean(attribute: &str, value: &ModelValue) -> Result<bool, HookError> {
    match value {
        ModelValue::Bool(b) => Ok(*b),
        ModelValue::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
        ModelValue::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
        other => Err(ValidationError::InvalidType {
            name: attribute.to_string(),
            expected: ModelType::Boolean,
            actual: ModelType::of(other),
        }
        .into()),
    }
}

/// Read a string
fn string<'a>(attribute: &str, value: &'a ModelValue) -> Result<&'a str, HookError> {
    value.as_str().ok_or_else(|| {
        ValidationError::InvalidType {
            name: attribute.to_string(),
            expected: ModelType::String,
            actual: ModelType::of(value),
        }
        .into()
    })
}
