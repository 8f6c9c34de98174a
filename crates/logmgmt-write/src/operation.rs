//! Write-attribute operations

use crate::error::OperationError;
use logmgmt_model::{ModelValue, PathAddress};

/// Request slot holding the target address
pub const ADDRESS: &str = "address";
/// Request slot holding the attribute name
pub const NAME: &str = "name";
/// Request slot holding the new value
pub const VALUE: &str = "value";

/// One request to change one attribute on one handler
///
/// Carries both the new and the current value so the same operation can be
/// applied and, if the surrounding transaction aborts, reverted.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteOperation {
    address: PathAddress,
    attribute: String,
    resolved_value: ModelValue,
    current_value: ModelValue,
}

impl WriteOperation {
    /// Create operation
    pub fn new(
        address: PathAddress,
        attribute: impl Into<String>,
        resolved_value: impl Into<ModelValue>,
        current_value: impl Into<ModelValue>,
    ) -> Self {
        Self {
            address,
            attribute: attribute.into(),
            resolved_value: resolved_value.into(),
            current_value: current_value.into(),
        }
    }

    /// Read a write-attribute request
    ///
    /// ```json
    /// {"operation": "write-attribute",
    ///  "address": [{"subsystem": "logging"}, {"console-handler": "CONSOLE"}],
    ///  "name": "level",
    ///  "value": "WARN"}
    /// ```
    ///
    /// `value` must already be resolved; an absent `value` is undefined.
    ///
    /// # Errors
    /// Returns [`OperationError`] if `address` or `name` is missing or malformed.
    pub fn from_request(request: &ModelValue, current_value: ModelValue) -> Result<Self, OperationError> {
        let address = request
            .get(ADDRESS)
            .ok_or(OperationError::MissingSlot(ADDRESS))
            .and_then(|a| PathAddress::from_model(a).map_err(OperationError::from))?;
        let name = request.get(NAME).ok_or(OperationError::MissingSlot(NAME))?;
        let attribute = name
            .as_str()
            .ok_or_else(|| OperationError::InvalidName(name.to_string()))?;
        let resolved_value = request.get(VALUE).cloned().unwrap_or(ModelValue::Null);
        Ok(Self::new(address, attribute, resolved_value, current_value))
    }

    /// Address of the handler resource
    #[inline]
    #[must_use]
    pub fn address(&self) -> &PathAddress {
        &self.address
    }

    /// Name of the attribute being written
    #[inline]
    #[must_use]
    pub fn attribute_name(&self) -> &str {
        &self.attribute
    }

    /// New value, after expression resolution
    #[inline]
    #[must_use]
    pub fn resolved_value(&self) -> &ModelValue {
        &self.resolved_value
    }

    /// Value before this operation
    #[inline]
    #[must_use]
    pub fn current_value(&self) -> &ModelValue {
        &self.current_value
    }

    /// Value a revert restores (the current value)
    #[inline]
    #[must_use]
    pub fn value_to_restore(&self) -> &ModelValue {
        &self.current_value
    }

    /// Value a revert undoes (the resolved value)
    #[inline]
    #[must_use]
    pub fn value_to_revert(&self) -> &ModelValue {
        &self.resolved_value
    }

    /// Handler name: the value of the last address element
    #[inline]
    #[must_use]
    pub fn handler_name(&self) -> Option<&str> {
        self.address.last_element().map(|e| e.value())
    }
}
