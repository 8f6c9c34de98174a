//! Attribute writes on running log handlers
//!
//! Changes one attribute of a live handler without a restart, and undoes the
//! change if the surrounding transaction aborts:
//!
//! - [`WriteOperation`]: address, attribute, new value and current value
//! - [`WriteCoordinator`]: validate, locate the running handler, apply or revert
//! - [`ExtensionHook`]: attribute-specific logic beyond the built-in
//!   `level`, `filter`, `formatter` and `encoding`
//! - [`BaseValidation`]: validation for attributes outside the coordinator's
//!   registry
//!
//! # Example
//!
//! ```rust
//! use logmgmt_handler::{ConsoleHandler, HandlerRegistry, Level, LogHandler};
//! use logmgmt_write::{ConsoleHandlerHook, WriteCoordinator, WriteOperation};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let handlers = Arc::new(HandlerRegistry::new());
//! let console = handlers.register(ConsoleHandler::new("CONSOLE"));
//! let coordinator = WriteCoordinator::new(Arc::clone(&handlers), ConsoleHandlerHook::new());
//!
//! let op = WriteOperation::new(
//!     "/subsystem=logging/console-handler=CONSOLE".parse().unwrap(),
//!     "level",
//!     json!("WARN"),
//!     json!("ALL"),
//! );
//! coordinator.validate_resolved(op.attribute_name(), op.resolved_value()).unwrap();
//! assert!(!coordinator.apply(&op).unwrap());
//! assert_eq!(console.level(), Level::WARN);
//!
//! coordinator.revert(&op).unwrap();
//! assert_eq!(console.level(), Level::ALL);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod coordinator;
mod error;
mod hook;
mod operation;
mod validation;

// Re-exports
pub use coordinator::{
    ConsoleHandlerWriteCoordinator, FileHandlerWriteCoordinator, WriteCoordinator,
    WriteCoordinatorBuilder,
};
pub use error::{HookError, OperationError, WriteError};
pub use hook::{ConsoleHandlerHook, ExtensionHook, FileHandlerHook, NoExtension};
pub use operation::{WriteOperation, ADDRESS, NAME, VALUE};
pub use validation::{BaseValidation, DefaultValidation};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
