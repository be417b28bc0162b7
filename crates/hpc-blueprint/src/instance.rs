//! Configured component instances

use hpc_catalog::{ComponentDefinition, OptionValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a configured instance, unique for the lifetime of its store
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    /// Wrap an existing id string
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as `&str`
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Ordered option values of one instance
pub type OptionValues = IndexMap<String, OptionValue>;

/// A user-added copy of a component definition with its own option values
///
/// Every key in `values` is an option id of `definition`; keys keep the
/// definition's declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguredInstance {
    id: InstanceId,
    definition: Arc<ComponentDefinition>,
    values: OptionValues,
}

impl ConfiguredInstance {
    /// Create an instance seeded with every option's default
    #[must_use]
    pub fn new(id: InstanceId, definition: Arc<ComponentDefinition>) -> Self {
        let values = definition
            .options
            .iter()
            .map(|o| (o.id.clone(), o.default.clone()))
            .collect();
        Self {
            id,
            definition,
            values,
        }
    }

    /// Instance id
    #[inline]
    #[must_use]
    pub fn id(&self) -> &InstanceId {
        &self.id
    }

    /// Shared definition
    #[inline]
    #[must_use]
    pub fn definition(&self) -> &Arc<ComponentDefinition> {
        &self.definition
    }

    /// Current values in option declaration order
    #[inline]
    #[must_use]
    pub fn values(&self) -> &OptionValues {
        &self.values
    }

    /// Current value of one option
    #[inline]
    #[must_use]
    pub fn value(&self, option_id: &str) -> Option<&OptionValue> {
        self.values.get(option_id)
    }

    /// Replace a value in place; `false` if the option is not declared
    pub(crate) fn set_value(&mut self, option_id: &str, value: OptionValue) -> bool {
        match self.values.get_mut(option_id) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}
