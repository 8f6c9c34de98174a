//! Console handler hook

use super::{boolean, resolve, string, ExtensionHook};
use crate::error::HookError;
use crate::operation::WriteOperation;
use logmgmt_handler::attributes::{self, AUTOFLUSH, TARGET};
use logmgmt_handler::{ConsoleHandler, ConsoleTarget, LogHandler};
use logmgmt_model::{AttributeDefinition, AttributeRegistry, ModelValue};

/// Writes `autoflush` and `target` on a running [`ConsoleHandler`]
///
/// Both apply live.
#[derive(Debug, Clone)]
pub struct ConsoleHandlerHook {
    definitions: AttributeRegistry,
}

impl ConsoleHandlerHook {
    /// Create hook with the standard console attributes
    #[must_use]
    pub fn new() -> Self {
        Self {
            definitions: AttributeRegistry::builder()
                .register_all(attributes::console_handler_attributes())
                .build(),
        }
    }

    fn update(&self, handler: &ConsoleHandler, attribute: &str, value: &ModelValue) -> Result<(), HookError> {
        let value = resolve(&self.definitions, attribute, value)?;
        match attribute {
            AUTOFLUSH => handler.set_autoflush(boolean(attribute, value)?),
            TARGET => {
                let target = string(attribute, value)?
                    .parse::<ConsoleTarget>()
                    .map_err(|e| HookError::rejected(attribute, e.to_string()))?;
                handler.set_target(target)?;
            }
            other => return Err(HookError::UnknownAttribute(other.to_string())),
        }
        Ok(())
    }
}

impl Default for ConsoleHandlerHook {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionHook<ConsoleHandler> for ConsoleHandlerHook {
    fn attributes(&self) -> Vec<AttributeDefinition> {
        self.definitions.definitions().cloned().collect()
    }

    fn apply(&self, op: &WriteOperation, handler: &ConsoleHandler) -> Result<bool, HookError> {
        self.update(handler, op.attribute_name(), op.resolved_value())?;
        Ok(false)
    }

    fn revert(&self, op: &WriteOperation, handler: &ConsoleHandler) -> Result<(), HookError> {
        self.update(handler, op.attribute_name(), op.value_to_restore())
    }
}
