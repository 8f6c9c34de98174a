//! Write coordinator
//!
//! [`WriteCoordinator`] validates, applies and reverts one attribute write on
//! a running handler. The four built-in attributes (`level`, `filter`,
//! `formatter`, `encoding`) are handled here; every other attribute goes to
//! the [`ExtensionHook`].

use crate::error::WriteError;
use crate::hook::{ConsoleHandlerHook, ExtensionHook, FileHandlerHook, NoExtension};
use crate::operation::WriteOperation;
use crate::validation::{BaseValidation, DefaultValidation};
use logmgmt_handler::attributes::{self, ENCODING, FILTER, FORMATTER, LEVEL};
use logmgmt_handler::{
    ConsoleHandler, FileHandler, FormatterStrategy, HandlerLookup, Level, LogHandler,
    PatternFormatterStrategy,
};
use logmgmt_model::{describe, AttributeDefinition, AttributeRegistry, ModelValue, ValidationError};
use std::fmt;
use std::sync::Arc;

/// Coordinator for console handlers
pub type ConsoleHandlerWriteCoordinator = WriteCoordinator<ConsoleHandler, ConsoleHandlerHook>;

/// Coordinator for file handlers
pub type FileHandlerWriteCoordinator = WriteCoordinator<FileHandler, FileHandlerHook>;

/// Attributes every coordinator applies itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuiltinAttribute {
    Level,
    Filter,
    Formatter,
    Encoding,
}

impl BuiltinAttribute {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            LEVEL => Some(Self::Level),
            FILTER => Some(Self::Filter),
            FORMATTER => Some(Self::Formatter),
            ENCODING => Some(Self::Encoding),
            _ => None,
        }
    }
}

/// Applies and reverts attribute writes on handlers of type `T`
///
/// Holds no mutable state: the attribute registry is fixed at construction,
/// and the target handler is looked up afresh on every call.
pub struct WriteCoordinator<T: 'static, H = NoExtension> {
    registry: AttributeRegistry,
    lookup: Arc<dyn HandlerLookup<T>>,
    hook: H,
    formatter_strategy: Arc<dyn FormatterStrategy>,
    base_validation: Arc<dyn BaseValidation>,
}

impl<T: LogHandler + 'static, H: ExtensionHook<T>> WriteCoordinator<T, H> {
    /// Create coordinator with the default formatter strategy and base validation
    pub fn new(lookup: impl HandlerLookup<T> + 'static, hook: H) -> Self {
        Self::builder(lookup, hook).build()
    }

    /// Create builder
    pub fn builder(lookup: impl HandlerLookup<T> + 'static, hook: H) -> WriteCoordinatorBuilder<T, H> {
        WriteCoordinatorBuilder {
            lookup: Arc::new(lookup),
            hook,
            formatter_strategy: Arc::new(PatternFormatterStrategy),
            base_validation: Arc::new(DefaultValidation),
            extra: Vec::new(),
        }
    }

    /// Attributes this coordinator governs
    #[inline]
    #[must_use]
    pub fn attributes(&self) -> &AttributeRegistry {
        &self.registry
    }

    /// Definition of one attribute
    #[inline]
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.registry.get(name)
    }

    /// Extension hook
    #[inline]
    #[must_use]
    pub fn hook(&self) -> &H {
        &self.hook
    }

    /// Validate a resolved value
    ///
    /// Attributes in the registry use their own validator; anything else goes
    /// to the base validation path.
    ///
    /// # Errors
    /// Returns [`ValidationError`] if the value is rejected.
    pub fn validate_resolved(&self, name: &str, value: &ModelValue) -> Result<(), ValidationError> {
        match self.registry.get(name) {
            Some(def) => def.validator().validate_resolved_parameter(name, value),
            None => self.base_validation.validate_resolved(name, value),
        }
    }

    /// Validate an unresolved value
    ///
    /// # Errors
    /// Returns [`ValidationError`] if the value is rejected.
    pub fn validate_unresolved(&self, name: &str, value: &ModelValue) -> Result<(), ValidationError> {
        match self.registry.get(name) {
            Some(def) => def.validator().validate_parameter(name, value),
            None => self.base_validation.validate_unresolved(name, value),
        }
    }

    /// Apply the operation's resolved value to the running handler
    ///
    /// Returns `true` if the handler must restart to pick up the change. A
    /// handler that is not running is not an error: the write is deferred
    /// and `false` is returned.
    ///
    /// The value must already have passed
    /// [`validate_resolved`](Self::validate_resolved).
    ///
    /// # Errors
    /// Returns [`WriteError`] if the value cannot be applied. The attribute
    /// keeps its previous value.
    pub fn apply(&self, op: &WriteOperation) -> Result<bool, WriteError> {
        let Some(handler) = self.target(op)? else {
            return Ok(false);
        };
        let attribute = op.attribute_name();
        match BuiltinAttribute::from_name(attribute) {
            Some(builtin) => {
                self.update_builtin(builtin, &handler, attribute, op.resolved_value())?;
                tracing::debug!(handler = handler.name(), attribute, "applied attribute");
                Ok(false)
            }
            None => {
                let restart = self.hook.apply(op, &handler).map_err(|e| {
                    tracing::warn!(handler = handler.name(), attribute, "extension apply failed: {}", e);
                    e
                })?;
                tracing::debug!(handler = handler.name(), attribute, restart, "applied extension attribute");
                Ok(restart)
            }
        }
    }

    /// Restore the operation's previous value on the running handler
    ///
    /// A handler that is not running is left alone.
    ///
    /// # Errors
    /// Returns [`WriteError`] if the previous value cannot be restored.
    pub fn revert(&self, op: &WriteOperation) -> Result<(), WriteError> {
        let Some(handler) = self.target(op)? else {
            return Ok(());
        };
        let attribute = op.attribute_name();
        match BuiltinAttribute::from_name(attribute) {
            Some(builtin) => self.update_builtin(builtin, &handler, attribute, op.value_to_restore())?,
            None => self.hook.revert(op, &handler)?,
        }
        tracing::debug!(handler = handler.name(), attribute, "reverted attribute");
        Ok(())
    }

    fn target(&self, op: &WriteOperation) -> Result<Option<Arc<T>>, WriteError> {
        let name = op
            .handler_name()
            .ok_or_else(|| WriteError::InvalidAddress(op.address().clone()))?;
        let handler = self.lookup.get(name);
        if handler.is_none() {
            tracing::debug!(
                handler = name,
                attribute = op.attribute_name(),
                "handler not running, write deferred"
            );
        }
        Ok(handler)
    }

    /// Shared by apply and revert so a revert interprets values exactly as
    /// the apply did
    fn update_builtin(
        &self,
        builtin: BuiltinAttribute,
        handler: &T,
        attribute: &str,
        value: &ModelValue,
    ) -> Result<(), WriteError> {
        let value = match self.registry.get(attribute) {
            Some(def) => def.resolve(value),
            None => value,
        };
        match builtin {
            BuiltinAttribute::Level => {
                let level = match value {
                    ModelValue::Null => Level::default(),
                    other => Level::parse(&describe(other)).map_err(|source| WriteError::InvalidLevel {
                        attribute: attribute.to_string(),
                        value: describe(other),
                        source,
                    })?,
                };
                handler.set_level(level);
            }
            BuiltinAttribute::Filter => {
                tracing::trace!(handler = handler.name(), "filter changes are not applied to running handlers");
            }
            BuiltinAttribute::Formatter => {
                self.formatter_strategy.parse(attribute, value)?.apply_to(handler);
            }
            BuiltinAttribute::Encoding => {
                let name = match value {
                    ModelValue::Null => None,
                    other => Some(describe(other)),
                };
                handler
                    .set_encoding(name.as_deref())
                    .map_err(|source| WriteError::EncodingUnsupported {
                        handler: handler.name().to_string(),
                        value: describe(value),
                        source,
                    })?;
            }
        }
        Ok(())
    }
}

impl<T: 'static, H> fmt::Debug for WriteCoordinator<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteCoordinator")
            .field("attributes", &self.registry.names())
            .field("formatter_strategy", &self.formatter_strategy)
            .field("base_validation", &self.base_validation)
            .finish_non_exhaustive()
    }
}

/// Builder for [`WriteCoordinator`]
pub struct WriteCoordinatorBuilder<T: 'static, H> {
    lookup: Arc<dyn HandlerLookup<T>>,
    hook: H,
    formatter_strategy: Arc<dyn FormatterStrategy>,
    base_validation: Arc<dyn BaseValidation>,
    extra: Vec<AttributeDefinition>,
}

impl<T: LogHandler + 'static, H: ExtensionHook<T>> WriteCoordinatorBuilder<T, H> {
    /// Interpret `formatter` values with a custom strategy
    #[must_use]
    pub fn formatter_strategy(mut self, strategy: Arc<dyn FormatterStrategy>) -> Self {
        self.formatter_strategy = strategy;
        self
    }

    /// Validate attributes outside the registry with a custom path
    #[must_use]
    pub fn base_validation(mut self, validation: impl BaseValidation + 'static) -> Self {
        self.base_validation = Arc::new(validation);
        self
    }

    /// Register an additional definition, replacing any with the same name
    #[must_use]
    pub fn attribute(mut self, definition: AttributeDefinition) -> Self {
        self.extra.push(definition);
        self
    }

    /// Register additional definitions
    #[must_use]
    pub fn attributes<I>(mut self, definitions: I) -> Self
    where
        I: IntoIterator<Item = AttributeDefinition>,
    {
        self.extra.extend(definitions);
        self
    }

    /// Build coordinator
    ///
    /// Definitions are registered in order: built-in, hook, additional.
    /// A later definition replaces an earlier one with the same name.
    #[must_use]
    pub fn build(self) -> WriteCoordinator<T, H> {
        let registry = AttributeRegistry::builder()
            .register_all(attributes::base_attributes(Arc::clone(&self.formatter_strategy)))
            .register_all(self.hook.attributes())
            .register_all(self.extra)
            .build();
        tracing::debug!(attributes = ?registry.names(), "built write coordinator");

        WriteCoordinator {
            registry,
            lookup: self.lookup,
            hook: self.hook,
            formatter_strategy: self.formatter_strategy,
            base_validation: self.base_validation,
        }
    }
}

impl<T: 'static, H> fmt::Debug for WriteCoordinatorBuilder<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteCoordinatorBuilder")
            .field("extra", &self.extra)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HookError;
    use crate::validation::MockBaseValidation;
    use logmgmt_handler::attributes::{LevelValidator, AUTOFLUSH, BASE_ATTRIBUTE_NAMES, TARGET};
    use logmgmt_handler::{Charset, ConsoleTarget, HandlerRegistry, DEFAULT_PATTERN};
    use logmgmt_model::{ModelType, PathAddress};
    use serde_json::json;

    fn address(name: &str) -> PathAddress {
        format!("/subsystem=logging/console-handler={name}").parse().unwrap()
    }

    fn op(attribute: &str, new: ModelValue, current: ModelValue) -> WriteOperation {
        WriteOperation::new(address("CONSOLE"), attribute, new, current)
    }

    fn console() -> (Arc<HandlerRegistry<ConsoleHandler>>, ConsoleHandlerWriteCoordinator) {
        let handlers = Arc::new(HandlerRegistry::new());
        handlers.register(ConsoleHandler::new("CONSOLE"));
        let coordinator = WriteCoordinator::new(Arc::clone(&handlers), ConsoleHandlerHook::new());
        (handlers, coordinator)
    }

    #[test]
    fn registry_contents() {
        let (_, coordinator) = console();
        let names = coordinator.attributes().names();
        for name in BASE_ATTRIBUTE_NAMES.into_iter().chain([AUTOFLUSH, TARGET]) {
            assert!(names.contains(&name), "missing {name}");
        }
        assert_eq!(coordinator.attributes().len(), 6);
    }

    #[test]
    fn level_apply_and_revert() {
        let (handlers, coordinator) = console();
        let handler = handlers.get("CONSOLE").unwrap();
        handler.set_level(Level::INFO);

        let op = op(LEVEL, json!("WARNING"), json!("INFO"));
        assert!(!coordinator.apply(&op).unwrap());
        assert_eq!(handler.level(), Level::WARNING);

        coordinator.revert(&op).unwrap();
        assert_eq!(handler.level(), Level::INFO);
    }

    #[test]
    fn level_unknown_token() {
        let (handlers, coordinator) = console();
        let handler = handlers.get("CONSOLE").unwrap();
        handler.set_level(Level::INFO);

        let err = coordinator.apply(&op(LEVEL, json!("LOUD"), json!("INFO"))).unwrap_err();
        assert!(matches!(err, WriteError::InvalidLevel { ref value, .. } if value == "LOUD"));
        assert_eq!(handler.level(), Level::INFO);
    }

    #[test]
    fn undefined_level_restores_all() {
        let (handlers, coordinator) = console();
        let handler = handlers.get("CONSOLE").unwrap();
        let op = op(LEVEL, json!("ERROR"), json!(null));

        coordinator.apply(&op).unwrap();
        assert_eq!(handler.level(), Level::ERROR);
        coordinator.revert(&op).unwrap();
        assert_eq!(handler.level(), Level::ALL);
    }

    #[test]
    fn encoding_unsupported_leaves_encoding() {
        let (handlers, coordinator) = console();
        let handler = handlers.get("CONSOLE").unwrap();
        handler.set_encoding(Some("ISO-8859-1")).unwrap();

        let err = coordinator
            .apply(&op(ENCODING, json!("not-a-real-encoding"), json!("ISO-8859-1")))
            .unwrap_err();
        assert!(matches!(err, WriteError::EncodingUnsupported { ref handler, .. } if handler == "CONSOLE"));
        assert_eq!(handler.encoding(), Some(Charset::Iso8859_1));
    }

    #[test]
    fn encoding_apply_and_revert_to_default() {
        let (handlers, coordinator) = console();
        let handler = handlers.get("CONSOLE").unwrap();
        let op = op(ENCODING, json!("US-ASCII"), json!(null));

        coordinator.apply(&op).unwrap();
        assert_eq!(handler.encoding(), Some(Charset::UsAscii));
        coordinator.revert(&op).unwrap();
        assert_eq!(handler.encoding(), None);
    }

    #[test]
    fn formatter_apply_and_revert() {
        let (handlers, coordinator) = console();
        let handler = handlers.get("CONSOLE").unwrap();
        let op = op(FORMATTER, json!("%p %m%n"), json!(null));

        coordinator.apply(&op).unwrap();
        assert_eq!(handler.formatter().pattern(), Some("%p %m%n"));
        coordinator.revert(&op).unwrap();
        assert_eq!(handler.formatter().pattern(), Some(DEFAULT_PATTERN));
    }

    #[test]
    fn oversized_formatter_width_rejected() {
        let (handlers, coordinator) = console();
        let handler = handlers.get("CONSOLE").unwrap();
        let value = json!("%99999999999m");

        assert!(matches!(
            coordinator.validate_resolved(FORMATTER, &value),
            Err(ValidationError::InvalidValue { .. })
        ));
        let err = coordinator.apply(&op(FORMATTER, value, json!(null))).unwrap_err();
        assert!(matches!(err, WriteError::Validation(_)));
        assert_eq!(handler.formatter().pattern(), Some(DEFAULT_PATTERN));
    }

    #[test]
    fn revert_level_unknown_token() {
        let (handlers, coordinator) = console();
        let handler = handlers.get("CONSOLE").unwrap();
        let op = op(LEVEL, json!("WARNING"), json!("LOUD"));

        coordinator.apply(&op).unwrap();
        let err = coordinator.revert(&op).unwrap_err();
        assert!(matches!(err, WriteError::InvalidLevel { ref value, .. } if value == "LOUD"));
        assert_eq!(handler.level(), Level::WARNING);
    }

    #[test]
    fn revert_encoding_unsupported_keeps_applied() {
        let (handlers, coordinator) = console();
        let handler = handlers.get("CONSOLE").unwrap();
        let op = op(ENCODING, json!("UTF-16BE"), json!("not-a-real-encoding"));

        coordinator.apply(&op).unwrap();
        let err = coordinator.revert(&op).unwrap_err();
        assert!(matches!(err, WriteError::EncodingUnsupported { ref value, .. } if value == "not-a-real-encoding"));
        assert_eq!(handler.encoding(), Some(Charset::Utf16Be));
    }

    #[test]
    fn revert_formatter_unparsable() {
        let (handlers, coordinator) = console();
        let handler = handlers.get("CONSOLE").unwrap();
        let op = op(FORMATTER, json!("%m%n"), json!("%q"));

        coordinator.apply(&op).unwrap();
        let err = coordinator.revert(&op).unwrap_err();
        assert!(matches!(err, WriteError::Validation(ValidationError::InvalidValue { .. })));
        assert_eq!(handler.formatter().pattern(), Some("%m%n"));
    }

    #[test]
    fn filter_is_accepted_and_inert() {
        let (handlers, coordinator) = console();
        let handler = handlers.get("CONSOLE").unwrap();
        let op = op(FILTER, json!("match(\"ERROR.*\")"), json!(null));

        assert!(!coordinator.apply(&op).unwrap());
        coordinator.revert(&op).unwrap();
        assert_eq!(handler.level(), Level::ALL);
    }

    #[test]
    fn extension_attribute_delegated() {
        let (handlers, coordinator) = console();
        let handler = handlers.get("CONSOLE").unwrap();
        let op = op(TARGET, json!("System.err"), json!("System.out"));

        assert!(!coordinator.apply(&op).unwrap());
        assert_eq!(handler.target(), ConsoleTarget::SystemErr);
        coordinator.revert(&op).unwrap();
        assert_eq!(handler.target(), ConsoleTarget::SystemOut);
    }

    #[test]
    fn unknown_attribute_with_no_extension() {
        let handlers = Arc::new(HandlerRegistry::new());
        handlers.register(ConsoleHandler::new("CONSOLE"));
        let coordinator: WriteCoordinator<ConsoleHandler> = WriteCoordinator::new(handlers, NoExtension);

        let err = coordinator.apply(&op("custom", json!(1), json!(null))).unwrap_err();
        assert!(err.is_delegated());
        assert!(matches!(err, WriteError::Delegated(HookError::UnknownAttribute(ref name)) if name == "custom"));
    }

    #[test]
    fn absent_handler_defers() {
        let (_, coordinator) = console();
        for attribute in [LEVEL, FILTER, FORMATTER, ENCODING, AUTOFLUSH, TARGET, "custom"] {
            let op = WriteOperation::new(address("MISSING"), attribute, json!("bogus"), json!(null));
            assert!(!coordinator.apply(&op).unwrap());
            coordinator.revert(&op).unwrap();
        }
    }

    #[test]
    fn empty_address_rejected() {
        let (_, coordinator) = console();
        let op = WriteOperation::new(PathAddress::root(), LEVEL, json!("INFO"), json!(null));
        assert!(matches!(coordinator.apply(&op), Err(WriteError::InvalidAddress(_))));
        assert!(matches!(coordinator.revert(&op), Err(WriteError::InvalidAddress(_))));
    }

    #[test]
    fn later_definition_wins() {
        let handlers = Arc::new(HandlerRegistry::<ConsoleHandler>::new());
        let strict = AttributeDefinition::builder(LEVEL, ModelType::String)
            .validator(LevelValidator::new().minimum(Level::INFO))
            .build();
        let coordinator: WriteCoordinator<ConsoleHandler> = WriteCoordinator::builder(handlers, NoExtension)
            .attribute(strict)
            .build();

        assert_eq!(coordinator.attributes().definitions().filter(|d| d.name() == LEVEL).count(), 1);
        assert!(!coordinator.attribute(LEVEL).unwrap().allows_null());
        assert!(coordinator.validate_resolved(LEVEL, &json!("DEBUG")).is_err());
        assert!(coordinator.validate_resolved(LEVEL, &json!("WARN")).is_ok());
    }

    #[test]
    fn known_attribute_uses_definition() {
        let (_, coordinator) = console();
        assert!(coordinator.validate_resolved(ENCODING, &json!("UTF-8")).is_ok());
        assert!(coordinator.validate_resolved(ENCODING, &json!("not-a-real-encoding")).is_err());
        assert!(coordinator.validate_unresolved(LEVEL, &json!("${log.level:INFO}")).is_ok());
        assert!(coordinator.validate_resolved(LEVEL, &json!("${log.level:INFO}")).is_err());
        assert!(coordinator.validate_resolved(TARGET, &json!("System.in")).is_err());
    }

    #[test]
    fn unknown_attribute_uses_base_validation() {
        let mut base = MockBaseValidation::new();
        base.expect_validate_resolved()
            .withf(|name, value| name == "customAttr" && value == &json!(7))
            .times(1)
            .returning(|name, _| Err(ValidationError::invalid_value(name, "7", "too large")));
        base.expect_validate_unresolved()
            .withf(|name, value| name == "customAttr" && value == &json!("${x}"))
            .times(1)
            .returning(|_, _| Ok(()));

        let handlers = Arc::new(HandlerRegistry::<ConsoleHandler>::new());
        let coordinator: WriteCoordinator<ConsoleHandler> = WriteCoordinator::builder(handlers, NoExtension)
            .base_validation(base)
            .build();

        assert_eq!(
            coordinator.validate_resolved("customAttr", &json!(7)),
            Err(ValidationError::invalid_value("customAttr", "7", "too large"))
        );
        assert_eq!(coordinator.validate_unresolved("customAttr", &json!("${x}")), Ok(()));
    }

    #[test]
    fn known_attribute_skips_base_validation() {
        let mut base = MockBaseValidation::new();
        base.expect_validate_resolved().never();
        let handlers = Arc::new(HandlerRegistry::<ConsoleHandler>::new());
        let coordinator: WriteCoordinator<ConsoleHandler> = WriteCoordinator::builder(handlers, NoExtension)
            .base_validation(base)
            .build();
        assert!(coordinator.validate_resolved(LEVEL, &json!("INFO")).is_ok());
    }
}
