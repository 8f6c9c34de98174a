//! File handler hook

use super::{boolean, resolve, string, ExtensionHook};
use crate::error::HookError;
use crate::operation::WriteOperation;
use logmgmt_handler::attributes::{self, APPEND, AUTOFLUSH, FILE};
use logmgmt_handler::{FileHandler, LogHandler};
use logmgmt_model::{AttributeDefinition, AttributeRegistry, ModelValue};
use std::path::Path;

/// Writes `autoflush`, `file` and `append` on a running [`FileHandler`]
///
/// `append` is only read when a file is opened, so changing it reports that
/// a restart is required. A relative `file` resolves against the handler's
/// [`base_dir`](FileHandler::base_dir), as it does when the handler is
/// started from configuration.
#[derive(Debug, Clone)]
pub struct FileHandlerHook {
    definitions: AttributeRegistry,
}

impl FileHandlerHook {
    /// Create hook with the standard file attributes
    #[must_use]
    pub fn new() -> Self {
        Self {
            definitions: AttributeRegistry::builder()
                .register_all(attributes::file_handler_attributes())
                .build(),
        }
    }

    fn update(&self, handler: &FileHandler, attribute: &str, value: &ModelValue) -> Result<bool, HookError> {
        let value = resolve(&self.definitions, attribute, value)?;
        match attribute {
            AUTOFLUSH => handler.set_autoflush(boolean(attribute, value)?),
            APPEND => {
                handler.set_append(boolean(attribute, value)?);
                return Ok(true);
            }
            FILE => {
                let path = match value {
                    ModelValue::Null => None,
                    other => Some(Path::new(string(attribute, other)?)),
                };
                handler.set_file(path)?;
            }
            other => return Err(HookError::UnknownAttribute(other.to_string())),
        }
        Ok(false)
    }
}

impl Default for FileHandlerHook {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionHook<FileHandler> for FileHandlerHook {
    fn attributes(&self) -> Vec<AttributeDefinition> {
        self.definitions.definitions().cloned().collect()
    }

    fn apply(&self, op: &WriteOperation, handler: &FileHandler) -> Result<bool, HookError> {
        self.update(handler, op.attribute_name(), op.resolved_value())
    }

    fn revert(&self, op: &WriteOperation, handler: &FileHandler) -> Result<(), HookError> {
        self.update(handler, op.attribute_name(), op.value_to_restore())
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn op(attribute: &str, new: ModelValue, current: ModelValue) -> WriteOperation {
        WriteOperation::new(
            "/subsystem=logging/file-handler=FILE".parse().unwrap(),
            attribute,
            new,
            current,
        )
    }

    #[test]
    fn append_requires_restart() {
        let hook = FileHandlerHook::new();
        let handler = FileHandler::new("FILE");
        let op = op(APPEND, json!(false), json!(true));

        assert!(hook.apply(&op, &handler).unwrap());
        assert!(!handler.append());
        hook.revert(&op, &handler).unwrap();
        assert!(handler.append());
    }

    #[test]
    fn file_switch_and_revert() {
        let dir = tempfile::tempdir().unwrap();
        let old = dir.path().join("old.log");
        let new = dir.path().join("new.log");
        let handler = FileHandler::open("FILE", &old, true).unwrap();
        let hook = FileHandlerHook::new();
        let op = op(
            FILE,
            json!(new.to_str().unwrap()),
            json!(old.to_str().unwrap()),
        );

        assert!(!hook.apply(&op, &handler).unwrap());
        assert_eq!(handler.file(), Some(new.clone()));
        hook.revert(&op, &handler).unwrap();
        assert_eq!(handler.file(), Some(old));
    }

    #[test]
    fn relative_file_uses_handler_base_dir() {
        let dir = tempfile::tempdir().unwrap();
        let handler = FileHandler::new("FILE").with_base_dir(dir.path());
        let hook = FileHandlerHook::new();
        let op = op(FILE, json!("rotated/server.log"), json!(null));

        hook.apply(&op, &handler).unwrap();
        assert_eq!(handler.file(), Some(dir.path().join("rotated/server.log")));
        hook.revert(&op, &handler).unwrap();
        assert!(handler.file().is_none());
    }

    #[test]
    fn unopenable_file_is_handler_error() {
        let dir = tempfile::tempdir().unwrap();
        let handler = FileHandler::new("FILE");
        let hook = FileHandlerHook::new();
        let op = op(FILE, json!(dir.path().to_str().unwrap()), json!(null));
        assert!(matches!(hook.apply(&op, &handler), Err(HookError::Handler(_))));
        assert!(handler.file().is_none());
    }
}
