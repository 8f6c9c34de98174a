//! Attribute registry
//!
//! Provides [`AttributeRegistry`], the immutable name → definition map a
//! write coordinator is built with.

use crate::attribute::AttributeDefinition;
use im::OrdMap;

/// Immutable mapping from attribute name to its definition
///
/// Built once through [`AttributeRegistryBuilder`]; later registrations
/// replace earlier ones with the same name. Clones share structure, so a
/// registry can be handed out freely for introspection.
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    definitions: OrdMap<String, AttributeDefinition>,
}

impl AttributeRegistry {
    /// Start building a registry
    #[inline]
    #[must_use]
    pub fn builder() -> AttributeRegistryBuilder {
        AttributeRegistryBuilder::default()
    }

    /// Look up a definition by name
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeDefinition> {
        self.definitions.get(name)
    }

    /// Check if a definition exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Iterate over all definitions, ordered by name
    pub fn definitions(&self) -> impl Iterator<Item = &AttributeDefinition> {
        self.definitions.values()
    }

    /// List all attribute names, ordered
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.definitions.keys().map(String::as_str).collect()
    }

    /// Get number of definitions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Builder for [`AttributeRegistry`]
#[derive(Debug, Default)]
pub struct AttributeRegistryBuilder {
    definitions: OrdMap<String, AttributeDefinition>,
}

impl AttributeRegistryBuilder {
    /// Register a definition, replacing any previous one with the same name
    #[must_use]
    pub fn register(mut self, definition: AttributeDefinition) -> Self {
        self.definitions
            .insert(definition.name().to_string(), definition);
        self
    }

    /// Register definitions in order
    #[must_use]
    pub fn register_all<I>(self, definitions: I) -> Self
    where
        I: IntoIterator<Item = AttributeDefinition>,
    {
        definitions.into_iter().fold(self, Self::register)
    }

    /// Freeze the registry
    #[inline]
    #[must_use]
    pub fn build(self) -> AttributeRegistry {
        AttributeRegistry {
            definitions: self.definitions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ModelType;

    fn def(name: &str, value_type: ModelType) -> AttributeDefinition {
        AttributeDefinition::builder(name, value_type).build()
    }

    #[test]
    fn registry_new_empty() {
        let registry = AttributeRegistry::builder().build();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.get("level").is_none());
    }

    #[test]
    fn registry_register() {
        let registry = AttributeRegistry::builder()
            .register(def("level", ModelType::String))
            .register(def("encoding", ModelType::String))
            .build();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("level"));
        assert_eq!(registry.names(), vec!["encoding", "level"]);
    }

    #[test]
    fn later_registration_wins() {
        let registry = AttributeRegistry::builder()
            .register(def("level", ModelType::String))
            .register_all([def("level", ModelType::Int)])
            .build();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("level").unwrap().value_type(), ModelType::Int);
        assert_eq!(registry.definitions().filter(|d| d.name() == "level").count(), 1);
    }

    #[test]
    fn clones_are_independent_views() {
        let registry = AttributeRegistry::builder()
            .register(def("level", ModelType::String))
            .build();
        let view = registry.clone();
        assert_eq!(view.len(), registry.len());
        assert!(view.contains("level"));
    }
}
