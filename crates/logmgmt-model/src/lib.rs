//! Management model primitives
//!
//! Building blocks shared by every write-attribute handler:
//!
//! - [`ModelValue`]: detyped value tree carried by operations
//! - [`PathAddress`]: address of a managed resource
//! - [`ParameterValidator`]: resolved / unresolved value validation
//! - [`AttributeDefinition`]: name, type constraints, default and validator
//! - [`AttributeRegistry`]: immutable name → definition map
//!
//! # Example
//!
//! ```rust
//! use logmgmt_model::{AttributeDefinition, AttributeRegistry, ModelType};
//! use serde_json::json;
//!
//! let registry = AttributeRegistry::builder()
//!     .register(AttributeDefinition::builder("append", ModelType::Boolean).build())
//!     .build();
//!
//! let append = registry.get("append").unwrap();
//! assert!(append.validator().validate_resolved_parameter("append", &json!(true)).is_ok());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod attribute;
mod error;
mod path;
mod registry;
mod validator;
mod value;

// Re-exports
pub use attribute::{AttributeDefinition, AttributeDefinitionBuilder};
pub use error::{AddressError, ValidationError};
pub use path::{PathAddress, PathElement};
pub use registry::{AttributeRegistry, AttributeRegistryBuilder};
pub use validator::{
    AllowedValuesValidator, ChainedValidator, ModelTypeValidator, ParameterValidator,
    StringLengthValidator,
};
pub use value::{as_model_string, describe, is_expression, ModelType, ModelValue};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
