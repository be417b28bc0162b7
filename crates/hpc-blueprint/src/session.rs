//! Editing session
//!
//! A [`Session`] owns the catalog and the configuration store for one
//! user session. It is created explicitly and passed around explicitly; all
//! edits go through its transition methods.
//!
//! Sessions can also be seeded from a YAML session file:
//!
//! ```yaml
//! components:
//!   - component: c2-standard-8
//!     settings:
//!       cpuCount: 16
//!       os: ubuntu-2204
//!   - component: vpc-network
//! ```

use crate::error::{BlueprintError, StoreError};
use crate::instance::InstanceId;
use crate::serializer;
use crate::store::ConfigurationStore;
use hpc_catalog::{Catalog, OptionValue, ValueIssue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One component entry of a session file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentEntry {
    /// Definition id
    pub component: String,
    /// Option overrides applied after defaults
    #[serde(default)]
    pub settings: IndexMap<String, OptionValue>,
}

/// Parsed session file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSpec {
    /// Components in module order
    #[serde(default)]
    pub components: Vec<ComponentEntry>,
}

impl SessionSpec {
    /// Parse a session file
    ///
    /// # Errors
    /// `BlueprintError::InvalidSession` on malformed YAML
    pub fn from_yaml(text: &str) -> Result<Self, BlueprintError> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// A value that was stored even though it does not fit its option
#[derive(Debug, Clone, PartialEq)]
pub struct ValueWarning {
    /// Instance the value belongs to
    pub instance_id: InstanceId,
    /// Option id
    pub option_id: String,
    /// What is wrong with it
    pub issue: ValueIssue,
}

impl std::fmt::Display for ValueWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.instance_id, self.option_id, self.issue)
    }
}

/// Catalog plus configuration store for one user session
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    store: ConfigurationStore,
}

impl Session {
    /// Start an empty session over a catalog
    #[inline]
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            store: ConfigurationStore::new(),
        }
    }

    /// Build a session from a parsed session file
    ///
    /// Values that do not fit their option are kept and reported as warnings.
    ///
    /// # Errors
    /// - `BlueprintError::Catalog` for an unknown component id
    /// - `BlueprintError::Store` for an option the component does not declare
    pub fn from_spec(
        catalog: Catalog,
        spec: &SessionSpec,
    ) -> Result<(Self, Vec<ValueWarning>), BlueprintError> {
        let mut session = Self::new(catalog);
        let mut warnings = Vec::new();
        for entry in &spec.components {
            let id = session.add(&entry.component)?;
            for (option_id, value) in &entry.settings {
                if let Some(warning) = session.update_field(&id, option_id, value.clone())? {
                    warnings.push(warning);
                }
            }
        }
        Ok((session, warnings))
    }

    /// Add a component by definition id
    ///
    /// # Errors
    /// `BlueprintError::Catalog` if the id is not in the catalog
    pub fn add(&mut self, definition_id: &str) -> Result<InstanceId, BlueprintError> {
        let definition = self.catalog.require(definition_id)?;
        Ok(self.store.add(definition))
    }

    /// Set an option value, returning a warning if it does not fit
    ///
    /// # Errors
    /// Store errors (missing instance, undeclared option)
    pub fn update_field(
        &mut self,
        instance_id: &InstanceId,
        option_id: &str,
        value: OptionValue,
    ) -> Result<Option<ValueWarning>, StoreError> {
        let issue = self
            .store
            .get(instance_id)
            .and_then(|i| i.definition().option(option_id))
            .and_then(|spec| spec.check_value(&value));

        self.store.update_field(instance_id, option_id, value)?;

        Ok(issue.map(|issue| {
            let warning = ValueWarning {
                instance_id: instance_id.clone(),
                option_id: option_id.to_string(),
                issue,
            };
            tracing::warn!(%warning, "value stored outside declared constraints");
            warning
        }))
    }

    /// Set an option from raw user input, interpreted by the option's kind
    ///
    /// Input for an instance or option that does not exist is passed on as
    /// text so the store reports the missing target.
    ///
    /// # Errors
    /// Store errors (missing instance, undeclared option)
    pub fn update_field_input(
        &mut self,
        instance_id: &InstanceId,
        option_id: &str,
        input: &str,
    ) -> Result<Option<ValueWarning>, StoreError> {
        let value = self
            .store
            .get(instance_id)
            .and_then(|i| i.definition().option(option_id))
            .map_or_else(|| OptionValue::from(input), |spec| spec.parse_input(input));
        self.update_field(instance_id, option_id, value)
    }

    /// Remove an instance; `false` if it was not present
    pub fn remove(&mut self, instance_id: &InstanceId) -> bool {
        self.store.remove(instance_id)
    }

    /// Render the current blueprint document
    #[must_use]
    pub fn document(&self) -> String {
        serializer::serialize(self.store.list())
    }

    /// Catalog of this session
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Store of this session
    #[inline]
    #[must_use]
    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }
}
