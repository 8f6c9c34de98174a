//! Path addresses for locating managed resources
//!
//! Provides [`PathAddress`] for hierarchical addressing of resources in the
//! management tree, e.g. `/subsystem=logging/console-handler=CONSOLE`.

use crate::error::AddressError;
use crate::value::ModelValue;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// One `key=value` step of a [`PathAddress`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathElement {
    key: String,
    value: String,
}

impl PathElement {
    /// Create new element
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Resource type, e.g. `console-handler`
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Resource name, e.g. `CONSOLE`
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Display for PathElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

impl FromStr for PathElement {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, value) = s
            .split_once('=')
            .ok_or_else(|| AddressError::InvalidElement(s.to_string()))?;
        if key.is_empty() || value.is_empty() {
            return Err(AddressError::EmptySegment(s.to_string()));
        }
        Ok(Self::new(key, value))
    }
}

/// Address of a resource in the management tree
///
/// # Examples
/// - `[subsystem=logging, console-handler=CONSOLE]` → `/subsystem=logging/console-handler=CONSOLE`
/// - `[]` → `/` (root)
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathAddress(Vec<PathElement>);

impl PathAddress {
    /// Create new address from elements
    #[inline]
    #[must_use]
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self(elements)
    }

    /// Empty address (root)
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Parse the model form: a list of single-entry objects
    ///
    /// `[{"subsystem": "logging"}, {"file-handler": "FILE"}]`
    ///
    /// # Errors
    /// Returns [`AddressError::InvalidModel`] if the value has another shape.
    pub fn from_model(value: &ModelValue) -> Result<Self, AddressError> {
        let invalid = || AddressError::InvalidModel(value.to_string());
        let list = value.as_array().ok_or_else(invalid)?;
        let mut elements = Vec::with_capacity(list.len());
        for item in list {
            let object = item.as_object().ok_or_else(invalid)?;
            let mut entries = object.iter();
            let (key, value) = match (entries.next(), entries.next()) {
                (Some(entry), None) => entry,
                _ => return Err(invalid()),
            };
            let value = value.as_str().ok_or_else(invalid)?;
            if key.is_empty() || value.is_empty() {
                return Err(AddressError::EmptySegment(format!("{key}={value}")));
            }
            elements.push(PathElement::new(key.clone(), value));
        }
        Ok(Self(elements))
    }

    /// Render as the model list form
    #[must_use]
    pub fn to_model(&self) -> ModelValue {
        ModelValue::Array(
            self.0
                .iter()
                .map(|e| {
                    let mut object = serde_json::Map::new();
                    object.insert(e.key.clone(), ModelValue::String(e.value.clone()));
                    ModelValue::Object(object)
                })
                .collect(),
        )
    }

    /// Get address elements
    #[inline]
    #[must_use]
    pub fn elements(&self) -> &[PathElement] {
        &self.0
    }

    /// Get number of elements
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if address is empty (root)
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get last element (if not root)
    #[inline]
    #[must_use]
    pub fn last_element(&self) -> Option<&PathElement> {
        self.0.last()
    }

    /// Get parent address (if not root)
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Append an element, returning new address
    #[inline]
    #[must_use]
    pub fn child(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut new = self.clone();
        new.0.push(PathElement::new(key, value));
        new
    }
}

impl Display for PathAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for element in &self.0 {
            write!(f, "/{element}")?;
        }
        Ok(())
    }
}

impl FromStr for PathAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split('/')
            .filter(|segment| !segment.is_empty())
            .map(PathElement::from_str)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl FromIterator<PathElement> for PathAddress {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
