//! Configuration store
//!
//! Ordered, in-memory list of configured instances. Insertion order is the
//! module order of the rendered blueprint. The store is an explicitly owned
//! value; there is no shared or global state.

use crate::error::StoreError;
use crate::instance::{ConfiguredInstance, InstanceId};
use hpc_catalog::{ComponentDefinition, OptionValue};
use std::sync::Arc;

/// Ordered collection of configured instances
#[derive(Debug, Clone, Default)]
pub struct ConfigurationStore {
    instances: Vec<ConfiguredInstance>,
    /// Last issued sequence number; never reused
    sequence: u64,
}

impl ConfigurationStore {
    /// Create an empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new instance seeded with the definition's defaults
    ///
    /// The id is `<definition id>-<n>` where `n` is a store-wide counter, so
    /// ids stay unique even after removals.
    pub fn add(&mut self, definition: Arc<ComponentDefinition>) -> InstanceId {
        self.sequence += 1;
        let id = InstanceId::new(format!("{}-{}", definition.id, self.sequence));
        tracing::debug!(instance = %id, "adding component instance");
        self.instances
            .push(ConfiguredInstance::new(id.clone(), definition));
        id
    }

    /// Replace one option value of an instance
    ///
    /// The value is stored as given; range and choice checks are left to
    /// the caller (see [`hpc_catalog::OptionSpec::check_value`]).
    ///
    /// # Errors
    /// - `StoreError::InstanceNotFound` if no instance has this id
    /// - `StoreError::UnknownOption` if the definition declares no such option
    pub fn update_field(
        &mut self,
        instance_id: &InstanceId,
        option_id: &str,
        value: OptionValue,
    ) -> Result<(), StoreError> {
        let instance = self
            .instances
            .iter_mut()
            .find(|i| i.id() == instance_id)
            .ok_or_else(|| StoreError::InstanceNotFound(instance_id.to_string()))?;

        if instance.set_value(option_id, value) {
            tracing::debug!(instance = %instance_id, option = option_id, "updated field");
            Ok(())
        } else {
            Err(StoreError::UnknownOption {
                component: instance.definition().id.clone(),
                option: option_id.to_string(),
            })
        }
    }

    /// Remove an instance; returns `false` and changes nothing if absent
    pub fn remove(&mut self, instance_id: &InstanceId) -> bool {
        let before = self.instances.len();
        self.instances.retain(|i| i.id() != instance_id);
        let removed = self.instances.len() != before;
        if removed {
            tracing::debug!(instance = %instance_id, "removed component instance");
        }
        removed
    }

    /// Instances in current order
    #[inline]
    #[must_use]
    pub fn list(&self) -> &[ConfiguredInstance] {
        &self.instances
    }

    /// Look up one instance
    #[must_use]
    pub fn get(&self, instance_id: &InstanceId) -> Option<&ConfiguredInstance> {
        self.instances.iter().find(|i| i.id() == instance_id)
    }

    /// Number of instances
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether the store holds no instances
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Remove every instance (the id counter keeps counting)
    pub fn clear(&mut self) {
        self.instances.clear();
    }
}
