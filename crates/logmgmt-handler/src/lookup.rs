//! Runtime handler lookup
//!
//! Provides [`HandlerLookup`], the seam a write coordinator uses to find a
//! running handler, and [`HandlerRegistry`], a concurrent implementation.

use crate::handler::LogHandler;
use dashmap::DashMap;
use std::sync::Arc;

/// Finds a running handler by name
///
/// Results may change between calls as handlers are started and stopped.
pub trait HandlerLookup<T>: Send + Sync {
    /// Running handler with this name, if any
    fn get(&self, name: &str) -> Option<Arc<T>>;
}

impl<T, L: HandlerLookup<T> + ?Sized> HandlerLookup<T> for Arc<L> {
    fn get(&self, name: &str) -> Option<Arc<T>> {
        (**self).get(name)
    }
}

/// Concurrent registry of running handlers, keyed by handler name
#[derive(Debug)]
pub struct HandlerRegistry<T> {
    handlers: DashMap<String, Arc<T>>,
}

impl<T: LogHandler> HandlerRegistry<T> {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Register a running handler, replacing any with the same name
    pub fn register(&self, handler: T) -> Arc<T> {
        self.register_shared(Arc::new(handler))
    }

    /// Register an already shared handler
    pub fn register_shared(&self, handler: Arc<T>) -> Arc<T> {
        let name = handler.name().to_string();
        tracing::debug!(handler = %name, "handler registered");
        self.handlers.insert(name, Arc::clone(&handler));
        handler
    }

    /// Remove a handler, returning it if it was running
    pub fn remove(&self, name: &str) -> Option<Arc<T>> {
        let removed = self.handlers.remove(name).map(|(_, h)| h);
        if removed.is_some() {
            tracing::debug!(handler = name, "handler removed");
        }
        removed
    }

    /// Check if a handler is running
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Names of running handlers, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Get number of running handlers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handlers are running
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T: LogHandler> Default for HandlerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: LogHandler> HandlerLookup<T> for HandlerRegistry<T> {
    fn get(&self, name: &str) -> Option<Arc<T>> {
        self.handlers.get(name).map(|h| Arc::clone(h.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ConsoleHandler;

    #[test]
    fn register_and_lookup() {
        let registry = HandlerRegistry::new();
        registry.register(ConsoleHandler::new("CONSOLE"));
        assert!(registry.contains("CONSOLE"));
        assert_eq!(registry.get("CONSOLE").unwrap().name(), "CONSOLE");
        assert!(registry.get("OTHER").is_none());
    }

    #[test]
    fn remove_makes_handler_absent() {
        let registry = HandlerRegistry::new();
        let handler = registry.register(ConsoleHandler::new("CONSOLE"));
        let removed = registry.remove("CONSOLE").unwrap();
        assert!(Arc::ptr_eq(&handler, &removed));
        assert!(registry.get("CONSOLE").is_none());
        assert!(registry.remove("CONSOLE").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn names_sorted() {
        let registry = HandlerRegistry::new();
        registry.register(ConsoleHandler::new("B"));
        registry.register(ConsoleHandler::new("A"));
        assert_eq!(registry.names(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn shared_lookup() {
        let registry = Arc::new(HandlerRegistry::new());
        registry.register(ConsoleHandler::new("CONSOLE"));
        let lookup: &dyn HandlerLookup<ConsoleHandler> = &registry;
        assert!(lookup.get("CONSOLE").is_some());
    }
}
